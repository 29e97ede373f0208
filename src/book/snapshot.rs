//! Serializable copy of a book's contents

use super::error::BookResult;
use crate::model::{Person, Relationship, Tag};
use serde::{Deserialize, Serialize};

/// Everything a book holds, in registry order
///
/// This is the shape persisted data is loaded from and saved to. Loading
/// goes through [`AddressBook::reset_data`](super::AddressBook::reset_data),
/// which re-checks uniqueness and records every identifier with the
/// allocators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressBookSnapshot {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl AddressBookSnapshot {
    pub fn from_json(json: &str) -> BookResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> BookResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::BookError;

    #[test]
    fn test_missing_sections_default_to_empty() {
        let snapshot = AddressBookSnapshot::from_json(r#"{ "persons": [] }"#).unwrap();
        assert!(snapshot.tags.is_empty());
        assert!(snapshot.relationships.is_empty());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = AddressBookSnapshot::from_json("{ persons: ").unwrap_err();
        assert!(matches!(err, BookError::Serialization(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let json = r##"{
            "persons": [{ "id": 1, "name": "Alice", "tags": [1] }, { "id": 2, "name": "Bob" }],
            "tags": [{ "id": 1, "name": "friends", "color": "#00FF00" }],
            "relationships": [{ "part1": 2, "part2": 1, "description": "neighbours" }]
        }"##;
        let snapshot = AddressBookSnapshot::from_json(json).unwrap();
        let again = AddressBookSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(snapshot, again);
        assert_eq!(again.relationships[0].description(), "neighbours");
    }
}
