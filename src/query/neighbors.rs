//! Immediate relationships of one person

use super::types::{LinkEntry, RelationshipView};
use crate::book::{AddressBook, BookError, BookResult};
use crate::model::PersonId;
use tracing::debug;

/// Query for the persons directly related to one person
#[derive(Debug, Clone, Default)]
pub struct NeighborQuery {
    /// Person whose relationships are listed
    pub person: Option<PersonId>,
}

impl NeighborQuery {
    /// Create a query for the relationships of `person`
    pub fn of(person: PersonId) -> Self {
        Self {
            person: Some(person),
        }
    }

    /// Execute the query
    ///
    /// Rows follow relationship registry order. Each row holds the other
    /// endpoint and the relationship itself. A person with no relationships,
    /// or an id with no person behind it, gives an empty view.
    pub fn execute(&self, book: &AddressBook) -> BookResult<RelationshipView> {
        let person = self
            .person
            .ok_or_else(|| BookError::InvalidArgument("neighbor query needs a person id".into()))?;

        let entries: Vec<LinkEntry> = book
            .relationships()
            .iter()
            .filter_map(|rel| {
                rel.counterpart(person)
                    .map(|other| LinkEntry::resolve(book, other, Some(rel)))
            })
            .collect();

        debug!(%person, found = entries.len(), "immediate relationship query");
        Ok(RelationshipView::from_entries(entries))
    }
}
