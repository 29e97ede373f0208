//! Tags used to categorize persons

use super::ident::{IdentifierAllocator, TagId};
use super::{Entity, EntityKind};
use crate::book::BookResult;
use serde::{Deserialize, Serialize};

/// Display color used when a tag carries none
pub const DEFAULT_TAG_COLOR: &str = "#FFFFFF";

/// A named category
///
/// Equality compares name, description and color. The identifier is left
/// out, so two tags with the same content but different ids compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_color")]
    color: String,
}

fn default_color() -> String {
    DEFAULT_TAG_COLOR.to_string()
}

impl Tag {
    /// Create a tag with a freshly allocated identifier
    pub fn create(
        ids: &mut IdentifierAllocator<TagId>,
        name: impl Into<String>,
    ) -> BookResult<Self> {
        Ok(Self::bare(ids.next()?, name.into()))
    }

    /// Rebuild a tag whose identifier was assigned earlier
    pub fn restore(
        ids: &mut IdentifierAllocator<TagId>,
        id: TagId,
        name: impl Into<String>,
    ) -> Self {
        ids.observe(id);
        Self::bare(id, name.into())
    }

    fn bare(id: TagId, name: String) -> Self {
        Self {
            id,
            name,
            description: String::new(),
            color: default_color(),
        }
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Hex color string such as `#FF8800`
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Same tag means same name
    pub fn is_same_tag(&self, other: &Tag) -> bool {
        self.name == other.name
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.color == other.color
    }
}

impl Eq for Tag {}

impl Entity for Tag {
    const KIND: EntityKind = EntityKind::Tag;

    fn is_same(&self, other: &Self) -> bool {
        self.is_same_tag(other)
    }
}
