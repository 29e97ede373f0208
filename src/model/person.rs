//! Person records

use super::ident::{IdentifierAllocator, PersonId, TagId};
use super::{Entity, EntityKind};
use crate::book::BookResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A contact in the address book
///
/// Immutable once built. Edits produce a new value through the `with_*`
/// methods, which is then swapped in with `AddressBook::set_person`.
/// Tag ids may point at tags that do not exist yet; callers check them
/// with `AddressBook::has_tag_ids` before admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    note: String,
    #[serde(default)]
    tags: BTreeSet<TagId>,
}

impl Person {
    /// Create a person with a freshly allocated identifier
    pub fn create(
        ids: &mut IdentifierAllocator<PersonId>,
        name: impl Into<String>,
    ) -> BookResult<Self> {
        Ok(Self::bare(ids.next()?, name.into()))
    }

    /// Rebuild a person whose identifier was assigned earlier
    ///
    /// The identifier is recorded with the allocator so later allocations
    /// skip past it.
    pub fn restore(
        ids: &mut IdentifierAllocator<PersonId>,
        id: PersonId,
        name: impl Into<String>,
    ) -> Self {
        ids.observe(id);
        Self::bare(id, name.into())
    }

    fn bare(id: PersonId, name: String) -> Self {
        Self {
            id,
            name,
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            note: String::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn tags(&self) -> &BTreeSet<TagId> {
        &self.tags
    }

    pub fn has_tag(&self, tag: TagId) -> bool {
        self.tags.contains(&tag)
    }

    /// Same person means same name; other fields are ignored
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Replace the whole tag set
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagId>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn with_tag(mut self, tag: TagId) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn without_tag(mut self, tag: TagId) -> Self {
        self.tags.remove(&tag);
        self
    }
}

impl Entity for Person {
    const KIND: EntityKind = EntityKind::Person;

    fn is_same(&self, other: &Self) -> bool {
        self.is_same_person(other)
    }
}
