use crate::validation::{validate_description, ValidationResult};

use super::Id;

/// A power draft with an already validated description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPower {
    name: String,
    description: String,
}

impl NewPower {
    /// Creates a draft, validating the description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> ValidationResult<Self> {
        let description = description.into();
        validate_description(&description)?;
        Ok(Self {
            name: name.into(),
            description,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A stored power
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Power {
    id: Id,
    name: String,
    description: String,
}

impl Power {
    /// Rebuilds a power from a stored row. Stored rows are not re-validated.
    pub(crate) fn from_parts(id: Id, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the description. On error the power is left unchanged.
    pub fn set_description(&mut self, description: impl Into<String>) -> ValidationResult<()> {
        let description = description.into();
        validate_description(&description)?;
        self.description = description;
        Ok(())
    }
}
