//! Demo data set
//!
//! Every row goes through the validated constructors, so the seed can never
//! store a description or strength the API would reject.

use tracing::info;

use crate::model::{NewHero, NewHeroPower, NewPower, Strength};
use crate::validation::ValidationError;

use super::errors::StorageError;
use super::store::Store;

const HEROES: &[(&str, &str)] = &[
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

const POWERS: &[(&str, &str)] = &[
    ("super strength", "gives the wielder super-human strengths"),
    ("flight", "gives the wielder the ability to fly through the skies at supersonic speed"),
    ("super human senses", "allows the wielder to use her senses at a super-human level"),
    ("elasticity", "can stretch the human body to extreme lengths"),
];

/// Row counts written by [`seed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub heroes: usize,
    pub powers: usize,
    pub hero_powers: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Clears all tables and writes the demo data in one transaction.
///
/// Hero `i` receives power `i % 4` at strength `i % 3`, so every power is
/// linked to at least two heroes.
pub fn seed(store: &Store) -> Result<SeedReport, SeedError> {
    let report = store.write(|tx| -> Result<SeedReport, SeedError> {
        tx.clear()?;

        let mut powers = Vec::with_capacity(POWERS.len());
        for (name, description) in POWERS {
            powers.push(tx.create_power(&NewPower::new(*name, *description)?)?);
        }

        let mut heroes = Vec::with_capacity(HEROES.len());
        for (name, super_name) in HEROES {
            heroes.push(tx.create_hero(&NewHero::new(*name, *super_name))?);
        }

        let mut hero_powers = 0;
        for (i, hero) in heroes.iter().enumerate() {
            let power = &powers[i % powers.len()];
            let strength = Strength::ALL[i % Strength::ALL.len()];
            tx.create_hero_power(&NewHeroPower::new(
                strength.as_str(),
                hero.id(),
                power.id(),
            )?)?;
            hero_powers += 1;
        }

        Ok(SeedReport {
            heroes: heroes.len(),
            powers: powers.len(),
            hero_powers,
        })
    })?;

    info!(
        heroes = report.heroes,
        powers = report.powers,
        hero_powers = report.hero_powers,
        "Seeded database"
    );
    Ok(report)
}
