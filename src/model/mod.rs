//! Entity types held by the address book

mod ident;
mod person;
mod relationship;
mod tag;

#[cfg(test)]
mod tests;

pub use ident::{Identifier, IdentifierAllocator, PersonId, TagId, MAX_IDENTIFIER};
pub use person::Person;
pub use relationship::Relationship;
pub use tag::{Tag, DEFAULT_TAG_COLOR};

use serde::{Deserialize, Serialize};

/// The kinds of entity a book stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Tag,
    Relationship,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Person => "person",
            EntityKind::Tag => "tag",
            EntityKind::Relationship => "relationship",
        };
        f.write_str(name)
    }
}

/// A value that can live in a [`Registry`](crate::book::Registry)
///
/// Two comparisons are available: `PartialEq` for the exact record, and
/// [`is_same`](Entity::is_same) for the coarser identity used to reject
/// duplicates.
pub trait Entity: Clone + PartialEq {
    const KIND: EntityKind;

    fn is_same(&self, other: &Self) -> bool;
}
