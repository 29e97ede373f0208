//! Serialization tests with persisted-data fixtures

use serde_json::{json, Value};

fn person_fixture() -> Value {
    json!({
        "id": 4,
        "name": "Bernice Yu",
        "phone": "99272758",
        "email": "berniceyu@example.com",
        "address": "Blk 30 Lorong 3 Serangoon Gardens, #07-18",
        "note": "",
        "tags": [2, 1]
    })
}

fn tag_fixture() -> Value {
    json!({
        "id": 2,
        "name": "colleagues",
        "description": "people from work",
        "color": "#3366FF"
    })
}

fn relationship_fixture() -> Value {
    json!({
        "part1": 4,
        "part2": 1,
        "description": "roommates"
    })
}

#[cfg(test)]
mod serialization_tests {
    use super::*;
    use crate::model::{
        IdentifierAllocator, Person, PersonId, Relationship, Tag, TagId, DEFAULT_TAG_COLOR,
    };

    #[test]
    fn person_id_serializes_as_integer() {
        let id = PersonId::new(12).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "12");
        let back: PersonId = serde_json::from_str("12").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn out_of_range_ids_fail_to_deserialize() {
        assert!(serde_json::from_str::<PersonId>("0").is_err());
        assert!(serde_json::from_str::<TagId>("-3").is_err());
        assert!(serde_json::from_value::<Person>(json!({ "id": 0, "name": "Zero" })).is_err());
    }

    #[test]
    fn person_deserializes_from_fixture() {
        let person: Person = serde_json::from_value(person_fixture()).unwrap();
        assert_eq!(person.id(), PersonId::new(4).unwrap());
        assert_eq!(person.name(), "Bernice Yu");
        assert_eq!(person.tags().len(), 2);
        assert!(person.has_tag(TagId::new(1).unwrap()));
    }

    #[test]
    fn person_tags_serialize_sorted() {
        let person: Person = serde_json::from_value(person_fixture()).unwrap();
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["tags"], json!([1, 2]));
    }

    #[test]
    fn person_optional_fields_default_when_missing() {
        let person: Person = serde_json::from_value(json!({ "id": 9, "name": "Roy" })).unwrap();
        assert_eq!(person.phone(), "");
        assert!(person.tags().is_empty());
    }

    #[test]
    fn tag_deserializes_from_fixture() {
        let tag: Tag = serde_json::from_value(tag_fixture()).unwrap();
        assert_eq!(tag.id(), TagId::new(2).unwrap());
        assert_eq!(tag.color(), "#3366FF");
    }

    #[test]
    fn tag_missing_color_uses_default() {
        let tag: Tag = serde_json::from_value(json!({ "id": 1, "name": "family" })).unwrap();
        assert_eq!(tag.color(), DEFAULT_TAG_COLOR);
    }

    #[test]
    fn relationship_round_trips_field_order() {
        let rel: Relationship = serde_json::from_value(relationship_fixture()).unwrap();
        assert_eq!(rel.part1(), PersonId::new(4).unwrap());
        assert_eq!(rel.part2(), PersonId::new(1).unwrap());
        assert_eq!(serde_json::to_value(&rel).unwrap(), relationship_fixture());
    }

    #[test]
    fn created_entities_serialize_with_allocated_ids() {
        let mut ids = IdentifierAllocator::new();
        let tag = Tag::create(&mut ids, "friends").unwrap();
        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "friends");
    }
}
