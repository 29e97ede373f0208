//! Query result structures

use crate::book::AddressBook;
use crate::model::{Person, PersonId, Relationship};

/// One row of a relationship query
///
/// `person` is `None` when `person_id` has no matching person in the book
/// (a relationship endpoint left dangling). `relationship` is the edge that
/// belongs with this row; for link results it leads to the next row and is
/// `None` on the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkEntry {
    pub person_id: PersonId,
    pub person: Option<Person>,
    pub relationship: Option<Relationship>,
}

impl LinkEntry {
    pub(crate) fn resolve(
        book: &AddressBook,
        person_id: PersonId,
        relationship: Option<&Relationship>,
    ) -> Self {
        Self {
            person_id,
            person: book.person(person_id).cloned(),
            relationship: relationship.cloned(),
        }
    }

    /// Name of the person, if it exists
    pub fn name(&self) -> Option<&str> {
        self.person.as_ref().map(Person::name)
    }
}

/// Ordered, read-only result of a relationship query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipView {
    entries: Vec<LinkEntry>,
}

impl RelationshipView {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<LinkEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinkEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Person ids in result order
    pub fn person_ids(&self) -> Vec<PersonId> {
        self.entries.iter().map(|e| e.person_id).collect()
    }

    /// Number of relationships carried by the rows
    pub fn relationship_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.relationship.is_some())
            .count()
    }
}

impl<'a> IntoIterator for &'a RelationshipView {
    type Item = &'a LinkEntry;
    type IntoIter = std::slice::Iter<'a, LinkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
