//! Query system for the address book
//!
//! Provides filtered views over the registries, immediate relationship
//! lookup, and shortest links through the relationship graph. Graph
//! queries rebuild their working index from the live relationship
//! registry on every call.

mod find;
mod neighbors;
mod path;
mod types;

pub use find::{Filter, FilteredView, PersonFilter, RelationshipFilter, TagFilter};
pub use neighbors::NeighborQuery;
pub use path::LinkQuery;
pub use types::{LinkEntry, RelationshipView};
