//! Undirected relationships between two persons

use super::ident::PersonId;
use super::{Entity, EntityKind};
use serde::{Deserialize, Serialize};

/// A described link between two persons
///
/// The pair is stored in the order it was given, but for duplicate
/// detection `(a, b)` and `(b, a)` are the same relationship. Derived
/// equality stays order-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    part1: PersonId,
    part2: PersonId,
    description: String,
}

impl Relationship {
    pub fn new(part1: PersonId, part2: PersonId, description: impl Into<String>) -> Self {
        Self {
            part1,
            part2,
            description: description.into(),
        }
    }

    pub fn part1(&self) -> PersonId {
        self.part1
    }

    pub fn part2(&self) -> PersonId {
        self.part2
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether `person` is one of the two endpoints
    pub fn involves(&self, person: PersonId) -> bool {
        self.part1 == person || self.part2 == person
    }

    /// The other endpoint when `person` is part of this relationship
    pub fn counterpart(&self, person: PersonId) -> Option<PersonId> {
        if self.part1 == person {
            Some(self.part2)
        } else if self.part2 == person {
            Some(self.part1)
        } else {
            None
        }
    }

    /// Same relationship means the same unordered pair, whatever the description
    pub fn is_same_relationship(&self, other: &Relationship) -> bool {
        (self.part1 == other.part1 && self.part2 == other.part2)
            || (self.part1 == other.part2 && self.part2 == other.part1)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Entity for Relationship {
    const KIND: EntityKind = EntityKind::Relationship;

    fn is_same(&self, other: &Self) -> bool {
        self.is_same_relationship(other)
    }
}
