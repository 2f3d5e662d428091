use std::fmt;
use std::str::FromStr;

use crate::validation::{validate_strength, ValidationError, ValidationResult};

use super::Id;

/// How strongly a hero holds a power
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Strong, Strength::Weak, Strength::Average];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Weak => "Weak",
            Strength::Average => "Average",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strength {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_strength(s)
    }
}

/// A hero power draft linking a hero to a power
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHeroPower {
    strength: Strength,
    hero_id: Id,
    power_id: Id,
}

impl NewHeroPower {
    /// Creates a draft, validating the strength literal.
    ///
    /// Whether `hero_id` and `power_id` exist is checked when the draft is
    /// stored.
    pub fn new(strength: &str, hero_id: Id, power_id: Id) -> ValidationResult<Self> {
        Ok(Self {
            strength: strength.parse()?,
            hero_id,
            power_id,
        })
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn hero_id(&self) -> Id {
        self.hero_id
    }

    pub fn power_id(&self) -> Id {
        self.power_id
    }
}

/// A stored hero power
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroPower {
    id: Id,
    strength: Strength,
    hero_id: Id,
    power_id: Id,
}

impl HeroPower {
    pub(crate) fn from_parts(id: Id, strength: Strength, hero_id: Id, power_id: Id) -> Self {
        Self {
            id,
            strength,
            hero_id,
            power_id,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn hero_id(&self) -> Id {
        self.hero_id
    }

    pub fn power_id(&self) -> Id {
        self.power_id
    }

    /// Replaces the strength. On error the hero power is left unchanged.
    pub fn set_strength(&mut self, strength: &str) -> ValidationResult<()> {
        self.strength = strength.parse()?;
        Ok(())
    }
}
