//! Rule-driven serializer
//!
//! Walks an entity and its relationships, resolving each relationship
//! through [`Relations`] only when the rules let it through.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{Hero, HeroPower, Power};
use crate::storage::{Relations, StorageError};

use super::rules::Rules;

/// Deepest nesting the serializer will follow
pub const MAX_DEPTH: usize = 8;

/// A shaped entity: field name to value
pub type Shaped = Map<String, Value>;

#[derive(Debug, Error)]
pub enum SerializeError {
    /// Relationship walk did not terminate within [`MAX_DEPTH`] levels
    #[error("serialization exceeded depth {max} at '{path}'; exclude the back-reference")]
    DepthExceeded { path: String, max: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Anything the serializer can shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Hero(Hero),
    Power(Power),
    HeroPower(HeroPower),
}

impl From<Hero> for Entity {
    fn from(hero: Hero) -> Self {
        Entity::Hero(hero)
    }
}

impl From<Power> for Entity {
    fn from(power: Power) -> Self {
        Entity::Power(power)
    }
}

impl From<HeroPower> for Entity {
    fn from(hero_power: HeroPower) -> Self {
        Entity::HeroPower(hero_power)
    }
}

enum Related {
    One(Option<Entity>),
    Many(Vec<Entity>),
}

impl Entity {
    /// Exclusions every instance of the model carries
    pub fn default_rules(&self) -> &'static [&'static str] {
        match self {
            Entity::Hero(_) => &["hero_powers.hero"],
            Entity::Power(_) => &["hero_powers.power"],
            Entity::HeroPower(_) => &["hero.hero_powers", "power.hero_powers"],
        }
    }

    fn scalars(&self) -> Vec<(&'static str, Value)> {
        match self {
            Entity::Hero(h) => vec![
                ("id", h.id().into()),
                ("name", h.name.clone().into()),
                ("super_name", h.super_name.clone().into()),
            ],
            Entity::Power(p) => vec![
                ("id", p.id().into()),
                ("name", p.name().into()),
                ("description", p.description().into()),
            ],
            Entity::HeroPower(hp) => vec![
                ("id", hp.id().into()),
                ("strength", hp.strength().as_str().into()),
                ("hero_id", hp.hero_id().into()),
                ("power_id", hp.power_id().into()),
            ],
        }
    }

    fn relationships(&self) -> &'static [&'static str] {
        match self {
            Entity::Hero(_) | Entity::Power(_) => &["hero_powers"],
            Entity::HeroPower(_) => &["hero", "power"],
        }
    }

    fn load<R: Relations + ?Sized>(&self, name: &str, relations: &R) -> Result<Related, StorageError> {
        let many = |rows: Vec<HeroPower>| Related::Many(rows.into_iter().map(Entity::from).collect());
        Ok(match (self, name) {
            (Entity::Hero(h), "hero_powers") => many(relations.hero_powers_of_hero(h.id())?),
            (Entity::Power(p), "hero_powers") => many(relations.hero_powers_of_power(p.id())?),
            (Entity::HeroPower(hp), "hero") => {
                Related::One(relations.hero(hp.hero_id())?.map(Entity::from))
            }
            (Entity::HeroPower(hp), "power") => {
                Related::One(relations.power(hp.power_id())?.map(Entity::from))
            }
            _ => Related::One(None),
        })
    }
}

/// Turns entities into field maps
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    model_rules: bool,
    max_depth: usize,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer {
    /// Serializer that merges each model's default rules at its level
    pub fn new() -> Self {
        Self {
            model_rules: true,
            max_depth: MAX_DEPTH,
        }
    }

    /// Serializer that applies only the caller's rules. Callers must
    /// exclude back-references themselves or hit the depth limit.
    pub fn raw() -> Self {
        Self {
            model_rules: false,
            max_depth: MAX_DEPTH,
        }
    }

    /// Shapes one entity.
    ///
    /// # Errors
    ///
    /// Returns `DepthExceeded` when the rules let a relationship cycle
    /// through, and `Storage` when a relationship lookup fails.
    pub fn serialize<R: Relations + ?Sized>(
        &self,
        entity: &Entity,
        rules: &Rules,
        relations: &R,
    ) -> Result<Shaped, SerializeError> {
        self.walk(entity, rules, relations, 0, &mut Vec::new())
    }

    /// Shapes a list of entities with the same rules
    pub fn serialize_all<R, I>(
        &self,
        entities: I,
        rules: &Rules,
        relations: &R,
    ) -> Result<Vec<Shaped>, SerializeError>
    where
        R: Relations + ?Sized,
        I: IntoIterator,
        I::Item: Into<Entity>,
    {
        entities
            .into_iter()
            .map(|e| self.serialize(&e.into(), rules, relations))
            .collect()
    }

    fn walk<R: Relations + ?Sized>(
        &self,
        entity: &Entity,
        rules: &Rules,
        relations: &R,
        depth: usize,
        path: &mut Vec<&'static str>,
    ) -> Result<Shaped, SerializeError> {
        if depth > self.max_depth {
            return Err(SerializeError::DepthExceeded {
                path: path.join("."),
                max: self.max_depth,
            });
        }

        let rules = if self.model_rules && !rules.is_only() {
            rules.clone().with_excluded(entity.default_rules().iter().copied())
        } else {
            rules.clone()
        };

        let mut out = Map::new();
        for (field, value) in entity.scalars() {
            if rules.allows(field) {
                out.insert(field.to_string(), value);
            }
        }

        for &field in entity.relationships() {
            if !rules.allows(field) {
                continue;
            }
            let nested = rules.descend(field);
            path.push(field);
            let value = match entity.load(field, relations)? {
                Related::One(None) => Value::Null,
                Related::One(Some(child)) => {
                    Value::Object(self.walk(&child, &nested, relations, depth + 1, path)?)
                }
                Related::Many(children) => {
                    let mut items = Vec::with_capacity(children.len());
                    for child in &children {
                        items.push(Value::Object(
                            self.walk(child, &nested, relations, depth + 1, path)?,
                        ));
                    }
                    Value::Array(items)
                }
            };
            path.pop();
            out.insert(field.to_string(), value);
        }

        Ok(out)
    }
}
