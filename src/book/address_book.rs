//! AddressBook: the aggregate owning every registry

use super::error::{BookError, BookResult};
use super::registry::Registry;
use super::snapshot::AddressBookSnapshot;
use crate::model::{EntityKind, IdentifierAllocator, Person, PersonId, Relationship, Tag, TagId};
use crate::query::{LinkQuery, NeighborQuery, RelationshipView};
use std::collections::HashSet;
use std::hash::Hash;
use tracing::debug;

/// Persons, tags and relationships, plus the allocators for their ids
///
/// Uniqueness inside each registry is enforced here, by weak identity and,
/// for persons and tags, by id. Whether a
/// relationship's endpoints exist as persons is left to callers; removing a
/// person through [`remove_person`](AddressBook::remove_person) drops every
/// relationship that touches it.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    persons: Registry<Person>,
    tags: Registry<Tag>,
    relationships: Registry<Relationship>,
    person_ids: IdentifierAllocator<PersonId>,
    tag_ids: IdentifierAllocator<TagId>,
}

impl AddressBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book holding the contents of `snapshot`
    pub fn from_snapshot(snapshot: AddressBookSnapshot) -> BookResult<Self> {
        let mut book = Self::new();
        book.reset_data(snapshot)?;
        Ok(book)
    }

    // === Identifiers ===

    /// Allocator for person ids, for use with `Person::create`/`restore`
    pub fn person_ids_mut(&mut self) -> &mut IdentifierAllocator<PersonId> {
        &mut self.person_ids
    }

    /// Allocator for tag ids, for use with `Tag::create`/`restore`
    pub fn tag_ids_mut(&mut self) -> &mut IdentifierAllocator<TagId> {
        &mut self.tag_ids
    }

    /// Build a person with a fresh id (not yet added)
    pub fn new_person(&mut self, name: impl Into<String>) -> BookResult<Person> {
        Person::create(&mut self.person_ids, name)
    }

    /// Build a tag with a fresh id (not yet added)
    pub fn new_tag(&mut self, name: impl Into<String>) -> BookResult<Tag> {
        Tag::create(&mut self.tag_ids, name)
    }

    // === Persons ===

    pub fn persons(&self) -> &Registry<Person> {
        &self.persons
    }

    /// Whether a person with the same name is held
    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.contains(person)
    }

    pub fn has_person_id(&self, id: PersonId) -> bool {
        self.person(id).is_some()
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.iter().find(|p| p.id() == id)
    }

    pub fn person_by_name(&self, name: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.name() == name)
    }

    /// Add a person
    ///
    /// The person's id is recorded with the allocator, so ids built
    /// elsewhere never get handed out again.
    pub fn add_person(&mut self, person: Person) -> BookResult<()> {
        let id = person.id();
        if self.has_person_id(id) {
            return Err(BookError::DuplicateEntity {
                kind: EntityKind::Person,
            });
        }
        self.persons.add(person)?;
        self.person_ids.observe(id);
        debug!(kind = "person", %id, "added");
        Ok(())
    }

    /// Replace `target` with `edited`, keeping its position
    pub fn set_person(&mut self, target: &Person, edited: Person) -> BookResult<()> {
        let id = edited.id();
        if id != target.id() && self.persons.position(target).is_some() && self.has_person_id(id) {
            return Err(BookError::DuplicateEntity {
                kind: EntityKind::Person,
            });
        }
        self.persons.replace(target, edited)?;
        self.person_ids.observe(id);
        debug!(kind = "person", %id, "replaced");
        Ok(())
    }

    /// Remove a person together with every relationship touching it
    ///
    /// Returns the relationships that were dropped.
    pub fn remove_person(&mut self, person: &Person) -> BookResult<Vec<Relationship>> {
        let removed = self.persons.remove(person)?;
        let dropped = self.remove_relationships_if_contains_person(removed.id());
        debug!(kind = "person", id = %removed.id(), dropped = dropped.len(), "removed");
        Ok(dropped)
    }

    /// Replace every person
    pub fn set_persons(&mut self, persons: Vec<Person>) -> BookResult<()> {
        let ids: Vec<PersonId> = persons.iter().map(Person::id).collect();
        check_unique_ids(EntityKind::Person, &ids)?;
        self.persons.replace_all(persons)?;
        for &id in &ids {
            self.person_ids.observe(id);
        }
        debug!(kind = "person", count = ids.len(), "replaced all");
        Ok(())
    }

    // === Tags ===

    pub fn tags(&self) -> &Registry<Tag> {
        &self.tags
    }

    /// Whether a tag with the same name is held
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id() == id)
    }

    pub fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name() == name)
    }

    /// Whether every id in `ids` names a tag in the book
    pub fn has_tag_ids<'a>(&self, ids: impl IntoIterator<Item = &'a TagId>) -> bool {
        ids.into_iter().all(|id| self.tag(*id).is_some())
    }

    pub fn add_tag(&mut self, tag: Tag) -> BookResult<()> {
        let id = tag.id();
        if self.tag(id).is_some() {
            return Err(BookError::DuplicateEntity {
                kind: EntityKind::Tag,
            });
        }
        self.tags.add(tag)?;
        self.tag_ids.observe(id);
        debug!(kind = "tag", %id, "added");
        Ok(())
    }

    pub fn set_tag(&mut self, target: &Tag, edited: Tag) -> BookResult<()> {
        let id = edited.id();
        if id != target.id() && self.tags.position(target).is_some() && self.tag(id).is_some() {
            return Err(BookError::DuplicateEntity {
                kind: EntityKind::Tag,
            });
        }
        self.tags.replace(target, edited)?;
        self.tag_ids.observe(id);
        debug!(kind = "tag", %id, "replaced");
        Ok(())
    }

    /// Remove a tag and strip its id from every person carrying it
    pub fn remove_tag(&mut self, tag: &Tag) -> BookResult<()> {
        let removed = self.tags.remove(tag)?;
        let id = removed.id();

        let carriers: Vec<Person> = self
            .persons
            .iter()
            .filter(|p| p.has_tag(id))
            .cloned()
            .collect();
        for person in &carriers {
            self.persons.replace(person, person.clone().without_tag(id))?;
        }

        debug!(kind = "tag", %id, untagged = carriers.len(), "removed");
        Ok(())
    }

    pub fn set_tags(&mut self, tags: Vec<Tag>) -> BookResult<()> {
        let ids: Vec<TagId> = tags.iter().map(Tag::id).collect();
        check_unique_ids(EntityKind::Tag, &ids)?;
        self.tags.replace_all(tags)?;
        for &id in &ids {
            self.tag_ids.observe(id);
        }
        debug!(kind = "tag", count = ids.len(), "replaced all");
        Ok(())
    }

    // === Relationships ===

    pub fn relationships(&self) -> &Registry<Relationship> {
        &self.relationships
    }

    /// Whether a relationship between the same two persons is held
    pub fn has_relationship(&self, relationship: &Relationship) -> bool {
        self.relationships.contains(relationship)
    }

    /// Add a relationship
    ///
    /// Endpoints are not checked against the person registry.
    pub fn add_relationship(&mut self, relationship: Relationship) -> BookResult<()> {
        let (a, b) = (relationship.part1(), relationship.part2());
        self.relationships.add(relationship)?;
        debug!(kind = "relationship", part1 = %a, part2 = %b, "added");
        Ok(())
    }

    pub fn set_relationship(
        &mut self,
        target: &Relationship,
        edited: Relationship,
    ) -> BookResult<()> {
        let (a, b) = (edited.part1(), edited.part2());
        self.relationships.replace(target, edited)?;
        debug!(kind = "relationship", part1 = %a, part2 = %b, "replaced");
        Ok(())
    }

    pub fn remove_relationship(&mut self, relationship: &Relationship) -> BookResult<()> {
        let removed = self.relationships.remove(relationship)?;
        debug!(
            kind = "relationship",
            part1 = %removed.part1(),
            part2 = %removed.part2(),
            "removed"
        );
        Ok(())
    }

    /// Drop every relationship with `person` as either endpoint
    pub fn remove_relationships_if_contains_person(
        &mut self,
        person: PersonId,
    ) -> Vec<Relationship> {
        let removed = self.relationships.remove_where(|r| r.involves(person));
        debug!(kind = "relationship", %person, removed = removed.len(), "removed for person");
        removed
    }

    pub fn set_relationships(&mut self, relationships: Vec<Relationship>) -> BookResult<()> {
        let count = relationships.len();
        self.relationships.replace_all(relationships)?;
        debug!(kind = "relationship", count, "replaced all");
        Ok(())
    }

    // === Whole book ===

    /// Replace all contents with `snapshot`
    ///
    /// Every registry is checked before anything changes, so a rejected
    /// snapshot leaves the book as it was. Allocators start over from the
    /// highest ids in the snapshot. Registry versions keep counting, so
    /// views built before the reset recompute.
    pub fn reset_data(&mut self, snapshot: AddressBookSnapshot) -> BookResult<()> {
        let AddressBookSnapshot {
            persons,
            tags,
            relationships,
        } = snapshot;

        let person_id_list: Vec<PersonId> = persons.iter().map(Person::id).collect();
        let tag_id_list: Vec<TagId> = tags.iter().map(Tag::id).collect();
        check_unique_ids(EntityKind::Person, &person_id_list)?;
        check_unique_ids(EntityKind::Tag, &tag_id_list)?;
        Registry::<Person>::check_unique(&persons)?;
        Registry::<Tag>::check_unique(&tags)?;
        Registry::<Relationship>::check_unique(&relationships)?;

        let mut person_ids = IdentifierAllocator::new();
        for &id in &person_id_list {
            person_ids.observe(id);
        }
        let mut tag_ids = IdentifierAllocator::new();
        for &id in &tag_id_list {
            tag_ids.observe(id);
        }

        self.persons.replace_all(persons)?;
        self.tags.replace_all(tags)?;
        self.relationships.replace_all(relationships)?;
        self.person_ids = person_ids;
        self.tag_ids = tag_ids;

        debug!(
            persons = self.persons.len(),
            tags = self.tags.len(),
            relationships = self.relationships.len(),
            "reset book data"
        );
        Ok(())
    }

    /// Copy out the current contents
    pub fn to_snapshot(&self) -> AddressBookSnapshot {
        AddressBookSnapshot {
            persons: self.persons.as_slice().to_vec(),
            tags: self.tags.as_slice().to_vec(),
            relationships: self.relationships.as_slice().to_vec(),
        }
    }

    /// Empty every registry and restart both allocators
    pub fn clear(&mut self) {
        self.persons.remove_where(|_| true);
        self.tags.remove_where(|_| true);
        self.relationships.remove_where(|_| true);
        self.person_ids = IdentifierAllocator::new();
        self.tag_ids = IdentifierAllocator::new();
        debug!("cleared book");
    }

    // === Graph queries ===

    /// Persons directly related to `person`, with the relationship to each
    pub fn query_immediate_relationship(&self, person: PersonId) -> BookResult<RelationshipView> {
        NeighborQuery::of(person).execute(self)
    }

    /// Shortest chain of relationships from `from` to `to`
    pub fn query_link(&self, from: PersonId, to: PersonId) -> BookResult<RelationshipView> {
        LinkQuery::between(from, to).execute(self)
    }
}

fn check_unique_ids<I: Eq + Hash + Copy>(kind: EntityKind, ids: &[I]) -> BookResult<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    if ids.iter().all(|id| seen.insert(*id)) {
        Ok(())
    } else {
        Err(BookError::DuplicateEntity { kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::BookError;

    fn pid(raw: i64) -> PersonId {
        PersonId::new(raw).unwrap()
    }

    fn duplicate_kind(err: BookError) -> Option<EntityKind> {
        match err {
            BookError::DuplicateEntity { kind } => Some(kind),
            _ => None,
        }
    }

    fn book_with(names: &[&str]) -> AddressBook {
        let mut book = AddressBook::new();
        for name in names {
            let person = book.new_person(*name).unwrap();
            book.add_person(person).unwrap();
        }
        book
    }

    #[test]
    fn test_create_book() {
        let book = AddressBook::new();
        assert!(book.persons().is_empty());
        assert!(book.tags().is_empty());
        assert!(book.relationships().is_empty());
    }

    #[test]
    fn test_add_duplicate_person_fails() {
        let mut book = book_with(&["Alice"]);
        let again = book.new_person("Alice").unwrap();
        let err = book.add_person(again).unwrap_err();
        assert!(matches!(err, BookError::DuplicateEntity { .. }));
    }

    #[test]
    fn test_add_person_observes_foreign_id() {
        let mut book = AddressBook::new();
        let mut elsewhere = IdentifierAllocator::new();
        let restored = Person::restore(&mut elsewhere, pid(40), "Loaded");
        book.add_person(restored).unwrap();
        assert_eq!(book.new_person("Fresh").unwrap().id(), pid(41));
    }

    #[test]
    fn test_set_person_edits_in_place() {
        let mut book = book_with(&["Alice", "Bob"]);
        let alice = book.person(pid(1)).unwrap().clone();
        book.set_person(&alice, alice.clone().with_phone("555")).unwrap();
        assert_eq!(book.persons().as_slice()[0].phone(), "555");
        assert_eq!(book.persons().as_slice()[1].name(), "Bob");
    }

    #[test]
    fn test_remove_person_cascades() {
        let mut book = book_with(&["Alice", "Bob", "Carl"]);
        book.add_relationship(Relationship::new(pid(1), pid(2), "ab")).unwrap();
        book.add_relationship(Relationship::new(pid(3), pid(2), "cb")).unwrap();
        book.add_relationship(Relationship::new(pid(1), pid(3), "ac")).unwrap();

        let bob = book.person(pid(2)).unwrap().clone();
        let dropped = book.remove_person(&bob).unwrap();

        assert_eq!(dropped.len(), 2);
        assert!(!book.has_person_id(pid(2)));
        assert_eq!(book.relationships().len(), 1);
        assert!(book.relationships().iter().all(|r| !r.involves(pid(2))));
    }

    #[test]
    fn test_remove_relationships_for_unknown_person_is_noop() {
        let mut book = book_with(&["Alice", "Bob"]);
        book.add_relationship(Relationship::new(pid(1), pid(2), "ab")).unwrap();
        assert!(book.remove_relationships_if_contains_person(pid(9)).is_empty());
        assert_eq!(book.relationships().len(), 1);
    }

    #[test]
    fn test_has_tag_ids() {
        let mut book = AddressBook::new();
        let friends = book.new_tag("friends").unwrap();
        let work = book.new_tag("work").unwrap();
        let (f, w) = (friends.id(), work.id());
        book.add_tag(friends).unwrap();

        assert!(book.has_tag_ids(&[f]));
        assert!(book.has_tag_ids(std::iter::empty()));
        assert!(!book.has_tag_ids(&[f, w]));
    }

    #[test]
    fn test_remove_tag_untags_persons() {
        let mut book = AddressBook::new();
        let tag = book.new_tag("friends").unwrap();
        let tag_id = tag.id();
        book.add_tag(tag.clone()).unwrap();
        let alice = book.new_person("Alice").unwrap().with_tag(tag_id);
        book.add_person(alice).unwrap();

        book.remove_tag(&tag).unwrap();

        assert!(book.tag(tag_id).is_none());
        assert!(!book.persons().as_slice()[0].has_tag(tag_id));
    }

    #[test]
    fn test_relationship_endpoints_are_not_enforced() {
        let mut book = book_with(&["Alice"]);
        book.add_relationship(Relationship::new(pid(1), pid(99), "ghost")).unwrap();
        assert_eq!(book.relationships().len(), 1);
    }

    #[test]
    fn test_reset_data_rebuilds_allocators() {
        let mut book = book_with(&["Alice", "Bob", "Carl"]);
        let snapshot = AddressBookSnapshot::from_json(
            r#"{ "persons": [{ "id": 12, "name": "Zed" }], "tags": [{ "id": 5, "name": "x" }] }"#,
        )
        .unwrap();

        book.reset_data(snapshot).unwrap();

        assert_eq!(book.persons().len(), 1);
        assert_eq!(book.new_person("Next").unwrap().id(), pid(13));
        assert_eq!(book.new_tag("y").unwrap().id().get(), 6);
    }

    #[test]
    fn test_reset_data_rejects_duplicates_atomically() {
        let mut book = book_with(&["Alice"]);
        let snapshot = AddressBookSnapshot::from_json(
            r#"{
                "persons": [{ "id": 1, "name": "A" }, { "id": 2, "name": "B" }],
                "relationships": [
                    { "part1": 1, "part2": 2, "description": "x" },
                    { "part1": 2, "part2": 1, "description": "y" }
                ]
            }"#,
        )
        .unwrap();

        let err = book.reset_data(snapshot).unwrap_err();
        assert!(matches!(err, BookError::DuplicateEntity { .. }));
        assert_eq!(book.persons().len(), 1);
        assert_eq!(book.persons().as_slice()[0].name(), "Alice");
    }

    #[test]
    fn test_reset_data_rejects_repeated_person_id() {
        let mut book = book_with(&["Alice"]);
        let snapshot = AddressBookSnapshot::from_json(
            r#"{ "persons": [{ "id": 1, "name": "Alice" }, { "id": 1, "name": "Bob" }] }"#,
        )
        .unwrap();

        let err = book.reset_data(snapshot).unwrap_err();
        assert_eq!(duplicate_kind(err), Some(EntityKind::Person));
        assert_eq!(book.persons().len(), 1);
        assert_eq!(book.persons().as_slice()[0].name(), "Alice");
    }

    #[test]
    fn test_reset_data_rejects_repeated_tag_id() {
        let mut book = AddressBook::new();
        let snapshot = AddressBookSnapshot::from_json(
            r#"{ "tags": [{ "id": 4, "name": "friends" }, { "id": 4, "name": "work" }] }"#,
        )
        .unwrap();

        let err = book.reset_data(snapshot).unwrap_err();
        assert_eq!(duplicate_kind(err), Some(EntityKind::Tag));
        assert!(book.tags().is_empty());
    }

    #[test]
    fn test_add_person_rejects_held_id() {
        let mut book = book_with(&["Alice"]);
        let mut elsewhere = IdentifierAllocator::new();
        let bob = Person::restore(&mut elsewhere, pid(1), "Bob");

        let err = book.add_person(bob).unwrap_err();
        assert_eq!(duplicate_kind(err), Some(EntityKind::Person));
        assert_eq!(book.persons().len(), 1);
    }

    #[test]
    fn test_add_tag_rejects_held_id() {
        let mut book = AddressBook::new();
        let friends = book.new_tag("friends").unwrap();
        let id = friends.id();
        book.add_tag(friends).unwrap();

        let mut elsewhere = IdentifierAllocator::new();
        let work = Tag::restore(&mut elsewhere, id, "work");
        let err = book.add_tag(work).unwrap_err();
        assert_eq!(duplicate_kind(err), Some(EntityKind::Tag));
        assert_eq!(book.tags().len(), 1);
    }

    #[test]
    fn test_set_person_cannot_take_another_id() {
        let mut book = book_with(&["Alice", "Bob"]);
        let alice = book.person(pid(1)).unwrap().clone();
        let mut elsewhere = IdentifierAllocator::new();
        let renumbered = Person::restore(&mut elsewhere, pid(2), "Alice");

        let err = book.set_person(&alice, renumbered).unwrap_err();
        assert!(matches!(err, BookError::DuplicateEntity { .. }));
        assert_eq!(book.person(pid(1)).unwrap().name(), "Alice");
    }

    #[test]
    fn test_set_persons_rejects_repeated_id() {
        let mut book = book_with(&["Alice"]);
        let mut elsewhere = IdentifierAllocator::new();
        let persons = vec![
            Person::restore(&mut elsewhere, pid(7), "Bob"),
            Person::restore(&mut elsewhere, pid(7), "Carl"),
        ];

        assert!(book.set_persons(persons).is_err());
        assert_eq!(book.persons().as_slice()[0].name(), "Alice");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut book = book_with(&["Alice", "Bob"]);
        book.add_relationship(Relationship::new(pid(2), pid(1), "ba")).unwrap();

        let restored = AddressBook::from_snapshot(book.to_snapshot()).unwrap();
        assert_eq!(restored.to_snapshot(), book.to_snapshot());
    }

    #[test]
    fn test_clear_restarts_ids() {
        let mut book = book_with(&["Alice", "Bob"]);
        book.clear();
        assert!(book.persons().is_empty());
        assert_eq!(book.new_person("Again").unwrap().id(), pid(1));
    }

    #[test]
    fn test_reset_and_clear_keep_versions_moving() {
        let mut book = book_with(&["Alice"]);
        let before = book.persons().version();

        book.reset_data(AddressBookSnapshot::default()).unwrap();
        let after_reset = book.persons().version();
        assert!(after_reset > before);

        let bob = book.new_person("Bob").unwrap();
        book.add_person(bob).unwrap();
        book.clear();
        assert!(book.persons().version() > after_reset);
    }
}
