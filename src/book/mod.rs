//! Registries and the address book aggregate

mod address_book;
mod error;
mod registry;
mod snapshot;

pub use address_book::AddressBook;
pub use error::{BookError, BookResult};
pub use registry::Registry;
pub use snapshot::AddressBookSnapshot;
