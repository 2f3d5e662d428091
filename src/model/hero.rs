use super::Id;

/// A hero draft that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHero {
    pub name: String,
    pub super_name: String,
}

impl NewHero {
    pub fn new(name: impl Into<String>, super_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_name: super_name.into(),
        }
    }
}

/// A stored hero
///
/// Its powers are reached through hero power rows; see
/// [`Tx::powers_of_hero`](crate::storage::Tx::powers_of_hero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    id: Id,
    pub name: String,
    pub super_name: String,
}

impl Hero {
    pub(crate) fn from_parts(id: Id, name: String, super_name: String) -> Self {
        Self {
            id,
            name,
            super_name,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }
}
