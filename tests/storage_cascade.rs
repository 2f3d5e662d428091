//! On-disk store behaviour: updates, single and cascading deletes,
//! association views and reopening an existing database.

use tempfile::TempDir;

use superheroes::model::{Id, NewHero, NewHeroPower, NewPower, Strength};
use superheroes::storage::{seed, Relations, StorageError, StorageResult, Store};

fn open(dir: &TempDir) -> Store {
    let store = Store::open(dir.path().join("heroes.db")).unwrap();
    store.migrate().unwrap();
    store
}

/// One hero holding two powers; `super strength` belongs to nobody else.
fn populate(store: &Store) -> (Id, Id, Id) {
    store
        .write(|tx| -> StorageResult<(Id, Id, Id)> {
            let hero = tx.create_hero(&NewHero::new("Gwen Stacy", "Spider-Gwen"))?;
            let strength = tx.create_power(
                &NewPower::new("super strength", "gives the wielder super-human strengths").unwrap(),
            )?;
            let senses = tx.create_power(
                &NewPower::new("super human senses", "allows the wielder to use her senses at a super-human level")
                    .unwrap(),
            )?;
            tx.create_hero_power(&NewHeroPower::new("Strong", hero.id(), strength.id()).unwrap())?;
            tx.create_hero_power(&NewHeroPower::new("Weak", hero.id(), senses.id()).unwrap())?;
            Ok((hero.id(), strength.id(), senses.id()))
        })
        .unwrap()
}

#[test]
fn deleting_hero_removes_its_hero_powers() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let (hero_id, strength_id, _) = populate(&store);

    let heroes = store.read(|tx| tx.heroes_of_power(strength_id)).unwrap();
    assert_eq!(heroes.len(), 1);
    assert_eq!(heroes[0].id(), hero_id);

    let deleted = store.write(|tx| tx.delete_hero(hero_id)).unwrap();
    assert!(deleted);

    store
        .read(|tx| -> StorageResult<()> {
            assert!(tx.hero_powers()?.is_empty());
            assert!(tx.hero_powers_of_hero(hero_id)?.is_empty());
            assert!(tx.heroes_of_power(strength_id)?.is_empty());
            // Powers themselves survive
            assert_eq!(tx.powers()?.len(), 2);
            Ok(())
        })
        .unwrap();
}

#[test]
fn deleting_power_removes_only_its_hero_powers() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let (hero_id, strength_id, senses_id) = populate(&store);

    store.write(|tx| tx.delete_power(strength_id)).unwrap();

    let powers = store.read(|tx| tx.powers_of_hero(hero_id)).unwrap();
    assert_eq!(powers.len(), 1);
    assert_eq!(powers[0].id(), senses_id);
}

#[test]
fn hero_power_requires_existing_parents() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let (hero_id, _, _) = populate(&store);

    let result = store.write(|tx| tx.create_hero_power(&NewHeroPower::new("Average", hero_id, 999).unwrap()));
    assert!(matches!(result, Err(StorageError::Constraint(_))));

    let count = store.read(|tx| tx.hero_powers()).unwrap().len();
    assert_eq!(count, 2);
}

#[test]
fn data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let (hero_id, _, _) = {
        let store = open(&dir);
        populate(&store)
    };

    let store = open(&dir);
    let hero = store.read(|tx| tx.hero(hero_id)).unwrap().unwrap();
    assert_eq!(hero.super_name, "Spider-Gwen");

    // Migrating an up-to-date database applies nothing
    assert_eq!(store.migrate().unwrap().applied(), 0);
}

#[test]
fn seed_replaces_existing_rows() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    populate(&store);

    let report = seed(&store).unwrap();
    assert_eq!(report.heroes, 10);
    assert_eq!(report.powers, 4);

    store
        .read(|tx| -> StorageResult<()> {
            assert_eq!(tx.heroes()?.len(), 10);
            assert_eq!(tx.powers()?.len(), 4);
            assert_eq!(tx.hero_powers()?.len(), report.hero_powers);
            assert!(tx.hero(1)?.is_none());
            Ok(())
        })
        .unwrap();
}

#[test]
fn updates_to_hero_and_strength_are_stored() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let (hero_id, strength_id, _) = populate(&store);

    store
        .write(|tx| -> StorageResult<()> {
            let mut hero = tx.hero(hero_id)?.unwrap();
            hero.super_name = "Ghost-Spider".to_string();
            assert!(tx.update_hero(&hero)?);

            let mut link = tx
                .hero_powers_of_hero(hero_id)?
                .into_iter()
                .find(|hp| hp.power_id() == strength_id)
                .unwrap();
            link.set_strength("Average").unwrap();
            assert!(tx.update_hero_power(&link)?);
            Ok(())
        })
        .unwrap();

    store
        .read(|tx| -> StorageResult<()> {
            assert_eq!(tx.hero(hero_id)?.unwrap().super_name, "Ghost-Spider");
            let link = tx.hero_powers_of_power(strength_id)?.pop().unwrap();
            assert_eq!(link.strength(), Strength::Average);
            assert_eq!(tx.hero_power(link.id())?.unwrap(), link);
            Ok(())
        })
        .unwrap();
}

#[test]
fn deleting_one_hero_power_keeps_its_parents() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let (hero_id, strength_id, senses_id) = populate(&store);

    let link_id = store
        .read(|tx| tx.hero_powers_of_power(strength_id))
        .unwrap()[0]
        .id();

    assert!(store.write(|tx| tx.delete_hero_power(link_id)).unwrap());
    // A second delete finds nothing
    assert!(!store.write(|tx| tx.delete_hero_power(link_id)).unwrap());

    store
        .read(|tx| -> StorageResult<()> {
            assert!(tx.hero_power(link_id)?.is_none());
            assert!(tx.hero(hero_id)?.is_some());
            assert!(tx.power(strength_id)?.is_some());
            assert!(tx.heroes_of_power(strength_id)?.is_empty());

            let remaining: Vec<Id> = tx.powers_of_hero(hero_id)?.iter().map(|p| p.id()).collect();
            assert_eq!(remaining, vec![senses_id]);
            Ok(())
        })
        .unwrap();
}

#[test]
fn updating_missing_rows_reports_false() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let (hero_id, _, _) = populate(&store);

    let updated = store
        .write(|tx| -> StorageResult<bool> {
            let hero = tx.hero(hero_id)?.unwrap();
            tx.delete_hero(hero_id)?;
            tx.update_hero(&hero)
        })
        .unwrap();
    assert!(!updated);
}
