//! Contactgraph: contacts, tags and the relationships between them
//!
//! An in-memory address book that keeps persons, tags and pairwise
//! relationships free of duplicates, and answers graph questions about the
//! relationships.
//!
//! # Core Concepts
//!
//! - **Registries**: ordered collections that reject equivalent entries
//! - **Identifiers**: integer ids issued per entity kind by an allocator the book owns
//! - **Relationships**: undirected, described edges between two person ids
//!
//! # Example
//!
//! ```
//! use contactgraph::{AddressBook, Relationship};
//!
//! let mut book = AddressBook::new();
//! let alice = book.new_person("Alice").unwrap();
//! let bob = book.new_person("Bob").unwrap();
//! let (a, b) = (alice.id(), bob.id());
//! book.add_person(alice).unwrap();
//! book.add_person(bob).unwrap();
//! book.add_relationship(Relationship::new(a, b, "friends")).unwrap();
//!
//! let link = book.query_link(a, b).unwrap();
//! assert_eq!(link.len(), 2);
//! ```

mod book;
mod model;
pub mod query;

pub use book::{AddressBook, AddressBookSnapshot, BookError, BookResult, Registry};
pub use model::{
    Entity, EntityKind, Identifier, IdentifierAllocator, Person, PersonId, Relationship, Tag,
    TagId, DEFAULT_TAG_COLOR, MAX_IDENTIFIER,
};
pub use query::{
    Filter, FilteredView, LinkEntry, LinkQuery, NeighborQuery, PersonFilter, RelationshipFilter,
    RelationshipView, TagFilter,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
