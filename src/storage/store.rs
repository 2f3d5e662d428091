//! SQLite-backed record store
//!
//! One connection guarded by a mutex. Every unit of work runs inside
//! [`Store::write`] or [`Store::read`], which wrap the closure in a single
//! transaction: `Ok` commits, `Err` rolls back.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql, Transaction};

use crate::model::{Hero, HeroPower, Id, NewHero, NewHeroPower, NewPower, Power, Strength};

use super::errors::{StorageError, StorageResult};
use super::migrations::{self, MigrationReport};

/// Path that selects a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Relationship lookups needed to walk the model graph
pub trait Relations {
    fn hero(&self, id: Id) -> StorageResult<Option<Hero>>;

    fn power(&self, id: Id) -> StorageResult<Option<Power>>;

    /// Hero power rows owned by a hero
    fn hero_powers_of_hero(&self, hero_id: Id) -> StorageResult<Vec<HeroPower>>;

    /// Hero power rows owned by a power
    fn hero_powers_of_power(&self, power_id: Id) -> StorageResult<Vec<HeroPower>>;
}

/// The record store
pub struct Store {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Opens (or creates) the database at `path`. `:memory:` opens a
    /// private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let conn = if path.as_os_str() == IN_MEMORY {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        Self::with_connection(conn)
    }

    /// Opens an empty in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        // SQLite leaves foreign key enforcement off unless asked, per connection
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Brings the schema up to date
    pub fn migrate(&self) -> StorageResult<MigrationReport> {
        let mut conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        migrations::apply(&mut conn)
    }

    /// Runs `f` in a write transaction.
    ///
    /// The transaction commits only if `f` returns `Ok`. Any error,
    /// including a validation failure raised inside `f`, discards every
    /// change made through the handle.
    pub fn write<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Tx<'_>) -> Result<T, E>,
        E: From<StorageError>,
    {
        let mut conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        let tx = Tx {
            inner: conn.transaction().map_err(StorageError::from)?,
        };
        let value = f(&tx)?;
        tx.inner.commit().map_err(StorageError::from)?;
        Ok(value)
    }

    /// Runs `f` in a transaction used only for reading.
    pub fn read<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Tx<'_>) -> Result<T, E>,
        E: From<StorageError>,
    {
        let mut conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        let tx = Tx {
            inner: conn.transaction().map_err(StorageError::from)?,
        };
        // Dropping the transaction rolls it back; nothing was written
        f(&tx)
    }
}

/// Handle to an open transaction
pub struct Tx<'c> {
    inner: Transaction<'c>,
}

impl std::fmt::Debug for Tx<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tx").finish_non_exhaustive()
    }
}

fn hero_from_row(row: &Row<'_>) -> rusqlite::Result<Hero> {
    Ok(Hero::from_parts(row.get(0)?, row.get(1)?, row.get(2)?))
}

fn power_from_row(row: &Row<'_>) -> rusqlite::Result<Power> {
    Ok(Power::from_parts(row.get(0)?, row.get(1)?, row.get(2)?))
}

fn hero_power_from_row(row: &Row<'_>) -> rusqlite::Result<HeroPower> {
    Ok(HeroPower::from_parts(
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
    ))
}

impl Tx<'_> {
    fn query_list<T, P>(
        &self,
        sql: &str,
        params: P,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> StorageResult<Vec<T>>
    where
        P: rusqlite::Params,
    {
        let mut stmt = self.inner.prepare_cached(sql)?;
        let rows = stmt.query_map(params, map)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn execute(&self, sql: &str, params: impl rusqlite::Params) -> StorageResult<usize> {
        self.inner
            .execute(sql, params)
            .map_err(StorageError::classify)
    }

    // ==================
    // Heroes
    // ==================

    pub fn create_hero(&self, draft: &NewHero) -> StorageResult<Hero> {
        self.execute(
            "INSERT INTO heroes (name, super_name) VALUES (?1, ?2)",
            params![draft.name, draft.super_name],
        )?;
        Ok(Hero::from_parts(
            self.inner.last_insert_rowid(),
            draft.name.clone(),
            draft.super_name.clone(),
        ))
    }

    pub fn heroes(&self) -> StorageResult<Vec<Hero>> {
        self.query_list(
            "SELECT id, name, super_name FROM heroes ORDER BY id",
            [],
            hero_from_row,
        )
    }

    /// Returns `false` if no hero has that id
    pub fn update_hero(&self, hero: &Hero) -> StorageResult<bool> {
        let changed = self.execute(
            "UPDATE heroes SET name = ?1, super_name = ?2 WHERE id = ?3",
            params![hero.name, hero.super_name, hero.id()],
        )?;
        Ok(changed > 0)
    }

    /// Deletes a hero and, by cascade, its hero powers.
    ///
    /// Returns `false` if no hero has that id.
    pub fn delete_hero(&self, id: Id) -> StorageResult<bool> {
        Ok(self.execute("DELETE FROM heroes WHERE id = ?1", [id])? > 0)
    }

    /// Powers reachable from a hero through its hero powers
    pub fn powers_of_hero(&self, hero_id: Id) -> StorageResult<Vec<Power>> {
        self.query_list(
            "SELECT p.id, p.name, p.description
             FROM hero_powers hp JOIN powers p ON p.id = hp.power_id
             WHERE hp.hero_id = ?1
             ORDER BY hp.id",
            [hero_id],
            power_from_row,
        )
    }

    // ==================
    // Powers
    // ==================

    pub fn create_power(&self, draft: &NewPower) -> StorageResult<Power> {
        self.execute(
            "INSERT INTO powers (name, description) VALUES (?1, ?2)",
            params![draft.name(), draft.description()],
        )?;
        Ok(Power::from_parts(
            self.inner.last_insert_rowid(),
            draft.name().to_string(),
            draft.description().to_string(),
        ))
    }

    pub fn powers(&self) -> StorageResult<Vec<Power>> {
        self.query_list(
            "SELECT id, name, description FROM powers ORDER BY id",
            [],
            power_from_row,
        )
    }

    /// Returns `false` if no power has that id
    pub fn update_power(&self, power: &Power) -> StorageResult<bool> {
        let changed = self.execute(
            "UPDATE powers SET name = ?1, description = ?2 WHERE id = ?3",
            params![power.name(), power.description(), power.id()],
        )?;
        Ok(changed > 0)
    }

    /// Deletes a power and, by cascade, its hero powers.
    pub fn delete_power(&self, id: Id) -> StorageResult<bool> {
        Ok(self.execute("DELETE FROM powers WHERE id = ?1", [id])? > 0)
    }

    /// Heroes reachable from a power through its hero powers
    pub fn heroes_of_power(&self, power_id: Id) -> StorageResult<Vec<Hero>> {
        self.query_list(
            "SELECT h.id, h.name, h.super_name
             FROM hero_powers hp JOIN heroes h ON h.id = hp.hero_id
             WHERE hp.power_id = ?1
             ORDER BY hp.id",
            [power_id],
            hero_from_row,
        )
    }

    // ==================
    // Hero powers
    // ==================

    /// Inserts a hero power. A dangling `hero_id` or `power_id` is rejected
    /// by the foreign keys with [`StorageError::Constraint`].
    pub fn create_hero_power(&self, draft: &NewHeroPower) -> StorageResult<HeroPower> {
        self.execute(
            "INSERT INTO hero_powers (strength, hero_id, power_id) VALUES (?1, ?2, ?3)",
            params![draft.strength(), draft.hero_id(), draft.power_id()],
        )?;
        Ok(HeroPower::from_parts(
            self.inner.last_insert_rowid(),
            draft.strength(),
            draft.hero_id(),
            draft.power_id(),
        ))
    }

    pub fn hero_power(&self, id: Id) -> StorageResult<Option<HeroPower>> {
        Ok(self
            .inner
            .query_row(
                "SELECT id, strength, hero_id, power_id FROM hero_powers WHERE id = ?1",
                [id],
                hero_power_from_row,
            )
            .optional()?)
    }

    pub fn hero_powers(&self) -> StorageResult<Vec<HeroPower>> {
        self.query_list(
            "SELECT id, strength, hero_id, power_id FROM hero_powers ORDER BY id",
            [],
            hero_power_from_row,
        )
    }

    pub fn update_hero_power(&self, hero_power: &HeroPower) -> StorageResult<bool> {
        let changed = self.execute(
            "UPDATE hero_powers SET strength = ?1, hero_id = ?2, power_id = ?3 WHERE id = ?4",
            params![
                hero_power.strength(),
                hero_power.hero_id(),
                hero_power.power_id(),
                hero_power.id()
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_hero_power(&self, id: Id) -> StorageResult<bool> {
        Ok(self.execute("DELETE FROM hero_powers WHERE id = ?1", [id])? > 0)
    }

    /// Removes every row from all three tables
    pub fn clear(&self) -> StorageResult<()> {
        self.inner
            .execute_batch("DELETE FROM hero_powers; DELETE FROM heroes; DELETE FROM powers;")?;
        Ok(())
    }
}

impl Relations for Tx<'_> {
    fn hero(&self, id: Id) -> StorageResult<Option<Hero>> {
        Ok(self
            .inner
            .query_row(
                "SELECT id, name, super_name FROM heroes WHERE id = ?1",
                [id],
                hero_from_row,
            )
            .optional()?)
    }

    fn power(&self, id: Id) -> StorageResult<Option<Power>> {
        Ok(self
            .inner
            .query_row(
                "SELECT id, name, description FROM powers WHERE id = ?1",
                [id],
                power_from_row,
            )
            .optional()?)
    }

    fn hero_powers_of_hero(&self, hero_id: Id) -> StorageResult<Vec<HeroPower>> {
        self.query_list(
            "SELECT id, strength, hero_id, power_id FROM hero_powers WHERE hero_id = ?1 ORDER BY id",
            [hero_id],
            hero_power_from_row,
        )
    }

    fn hero_powers_of_power(&self, power_id: Id) -> StorageResult<Vec<HeroPower>> {
        self.query_list(
            "SELECT id, strength, hero_id, power_id FROM hero_powers WHERE power_id = ?1 ORDER BY id",
            [power_id],
            hero_power_from_row,
        )
    }
}

impl ToSql for Strength {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Strength {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        let store = Store::open_in_memory().unwrap();
        store.migrate().unwrap();
        store
    }

    fn description() -> &'static str {
        "gives the wielder super-human strengths"
    }

    #[test]
    fn test_create_and_get_hero() {
        let store = store();
        let created = store
            .write(|tx| tx.create_hero(&NewHero::new("Kamala Khan", "Ms. Marvel")))
            .unwrap();

        let fetched = store
            .read(|tx| tx.hero(created.id()))
            .unwrap()
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_missing_id_is_none_not_error() {
        let store = store();
        assert!(store.read(|tx| tx.hero(999)).unwrap().is_none());
        assert!(store.read(|tx| tx.power(999)).unwrap().is_none());
        assert!(store.read(|tx| tx.hero_power(999)).unwrap().is_none());
    }

    #[test]
    fn test_error_rolls_back_transaction() {
        let store = store();

        let result = store.write(|tx| -> StorageResult<()> {
            tx.create_hero(&NewHero::new("Doreen Green", "Squirrel Girl"))?;
            Err(StorageError::Constraint("forced".to_string()))
        });
        assert!(result.is_err());

        assert!(store.read(|tx| tx.heroes()).unwrap().is_empty());
    }

    #[test]
    fn test_update_power_persists() {
        let store = store();
        let mut power = store
            .write(|tx| tx.create_power(&NewPower::new("flight", description()).unwrap()))
            .unwrap();

        power
            .set_description("This is a valid description.")
            .unwrap();
        assert!(store.write(|tx| tx.update_power(&power)).unwrap());

        let stored = store.read(|tx| tx.power(power.id())).unwrap().unwrap();
        assert_eq!(stored.description(), "This is a valid description.");
    }

    #[test]
    fn test_dangling_reference_is_constraint_error() {
        let store = store();
        let draft = NewHeroPower::new("Strong", 10, 20).unwrap();

        let err = store.write(|tx| tx.create_hero_power(&draft)).unwrap_err();
        assert!(matches!(err, StorageError::Constraint(_)));
        assert!(store.read(|tx| tx.hero_powers()).unwrap().is_empty());
    }

    #[test]
    fn test_strength_is_stored_as_literal() {
        let store = store();
        let (hero, power) = store
            .write(|tx| -> StorageResult<(Hero, Power)> {
                let hero = tx.create_hero(&NewHero::new("Gwen Stacy", "Spider-Gwen"))?;
                let power = tx.create_power(&NewPower::new("elasticity", description()).unwrap())?;
                Ok((hero, power))
            })
            .unwrap();

        store
            .write(|tx| {
                tx.create_hero_power(&NewHeroPower::new("Average", hero.id(), power.id()).unwrap())
            })
            .unwrap();

        let raw: String = store
            .read(|tx| -> StorageResult<String> {
                Ok(tx.inner.query_row(
                    "SELECT strength FROM hero_powers",
                    [],
                    |row| row.get(0),
                )?)
            })
            .unwrap();
        assert_eq!(raw, "Average");
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = store();
        let first = store
            .write(|tx| tx.create_hero(&NewHero::new("Janet Van Dyne", "The Wasp")))
            .unwrap();
        assert!(store.write(|tx| tx.delete_hero(first.id())).unwrap());

        let second = store
            .write(|tx| tx.create_hero(&NewHero::new("Wanda Maximoff", "Scarlet Witch")))
            .unwrap();
        assert!(second.id() > first.id());
    }
}
