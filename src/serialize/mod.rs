//! # Shaped Serialization
//!
//! Converts model instances into JSON objects whose shape is controlled by
//! [`Rules`]: dotted exclusion paths, or an allow-list of fields.
//!
//! Heroes and powers both reach each other through `hero_powers`, so an
//! unrestricted walk would never end. Two things stop it:
//!
//! 1. Each model carries default exclusions for its back-references
//!    (see [`Entity::default_rules`]), merged at every level.
//! 2. The walk is bounded by [`MAX_DEPTH`]; exceeding it is an error, not
//!    a stack overflow.
//!
//! Endpoint shapes are named in [`projections`].

pub mod projections;
mod rules;
mod serializer;

pub use rules::Rules;
pub use serializer::{Entity, SerializeError, Serializer, Shaped, MAX_DEPTH};
