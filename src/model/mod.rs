//! # Data Model
//!
//! Heroes and powers joined many-to-many through hero powers.
//!
//! Guarded fields (`Power::description`, `HeroPower::strength`) are private
//! and can only be set through methods that run the validation rules, so an
//! invalid value never exists in a model instance built by this crate.
//!
//! Unsaved rows are drafts (`NewHero`, `NewPower`, `NewHeroPower`); the
//! store assigns ids when it inserts them.

mod hero;
mod hero_power;
mod power;

pub use hero::{Hero, NewHero};
pub use hero_power::{HeroPower, NewHeroPower, Strength};
pub use power::{NewPower, Power};

/// Row identifier assigned by the store
pub type Id = i64;
