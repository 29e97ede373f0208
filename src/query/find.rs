//! Filtered views for find/list style reads

use crate::book::Registry;
use crate::model::{Entity, Person, PersonId, Relationship, Tag, TagId};

/// Criteria that select entities of one kind
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

impl<T, F> Filter<T> for F
where
    F: Fn(&T) -> bool,
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

/// Predicate-driven projection of a registry
///
/// Matching positions are cached and recomputed only when the registry's
/// version moves or the predicate changes. A view is meant to follow a
/// single registry.
pub struct FilteredView<T> {
    filter: Box<dyn Filter<T>>,
    indices: Vec<usize>,
    seen_version: Option<u64>,
}

impl<T: Entity> FilteredView<T> {
    /// A view showing every element
    pub fn all() -> Self {
        Self::new(|_: &T| true)
    }

    /// A view showing the elements `filter` accepts
    pub fn new(filter: impl Filter<T> + 'static) -> Self {
        Self {
            filter: Box::new(filter),
            indices: Vec::new(),
            seen_version: None,
        }
    }

    /// Swap the filter; the next read recomputes
    pub fn set_filter(&mut self, filter: impl Filter<T> + 'static) {
        self.filter = Box::new(filter);
        self.seen_version = None;
    }

    /// Recompute matches if the registry changed; returns whether it did
    pub fn refresh(&mut self, registry: &Registry<T>) -> bool {
        if self.seen_version == Some(registry.version()) {
            return false;
        }
        self.indices = registry
            .iter()
            .enumerate()
            .filter(|(_, item)| self.filter.matches(item))
            .map(|(i, _)| i)
            .collect();
        self.seen_version = Some(registry.version());
        true
    }

    /// Matching elements in registry order
    pub fn items<'a>(&mut self, registry: &'a Registry<T>) -> Vec<&'a T> {
        self.refresh(registry);
        self.indices
            .iter()
            .filter_map(|&i| registry.get(i))
            .collect()
    }

    /// Number of matching elements
    pub fn count(&mut self, registry: &Registry<T>) -> usize {
        self.refresh(registry);
        self.indices.len()
    }
}

impl<T: Entity> Default for FilteredView<T> {
    fn default() -> Self {
        Self::all()
    }
}

impl<T> std::fmt::Debug for FilteredView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredView")
            .field("indices", &self.indices)
            .field("seen_version", &self.seen_version)
            .finish_non_exhaustive()
    }
}

fn has_word(text: &str, keyword: &str) -> bool {
    text.split_whitespace()
        .any(|word| word.eq_ignore_ascii_case(keyword))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Find criteria for persons; all set criteria must hold
#[derive(Debug, Clone, Default)]
pub struct PersonFilter {
    /// Any of these must equal a whole word of the name (case-insensitive)
    pub name_keywords: Vec<String>,
    /// Substring looked for in every text field (case-insensitive)
    pub text: Option<String>,
    /// Tag the person must carry
    pub tag: Option<TagId>,
}

impl PersonFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match names containing any of these words
    pub fn with_name_keywords<S: Into<String>>(
        mut self,
        keywords: impl IntoIterator<Item = S>,
    ) -> Self {
        self.name_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Match persons with `text` in any field
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Match persons carrying `tag`
    pub fn with_tag(mut self, tag: TagId) -> Self {
        self.tag = Some(tag);
        self
    }
}

impl Filter<Person> for PersonFilter {
    fn matches(&self, person: &Person) -> bool {
        if !self.name_keywords.is_empty()
            && !self
                .name_keywords
                .iter()
                .any(|k| has_word(person.name(), k))
        {
            return false;
        }

        if let Some(ref text) = self.text {
            let fields = [
                person.name(),
                person.phone(),
                person.email(),
                person.address(),
                person.note(),
            ];
            if !fields.iter().any(|f| contains_ignore_case(f, text)) {
                return false;
            }
        }

        if let Some(tag) = self.tag {
            if !person.has_tag(tag) {
                return false;
            }
        }

        true
    }
}

/// Find criteria for tags
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    /// Any of these must equal a whole word of the tag name (case-insensitive)
    pub name_keywords: Vec<String>,
}

impl TagFilter {
    pub fn with_name_keywords<S: Into<String>>(keywords: impl IntoIterator<Item = S>) -> Self {
        Self {
            name_keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filter<Tag> for TagFilter {
    fn matches(&self, tag: &Tag) -> bool {
        self.name_keywords.is_empty()
            || self.name_keywords.iter().any(|k| has_word(tag.name(), k))
    }
}

/// Find criteria for relationships; all set criteria must hold
#[derive(Debug, Clone, Default)]
pub struct RelationshipFilter {
    /// Person that must be one of the endpoints
    pub involving: Option<PersonId>,
    /// Substring looked for in the description (case-insensitive)
    pub description: Option<String>,
}

impl RelationshipFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn involving(mut self, person: PersonId) -> Self {
        self.involving = Some(person);
        self
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

impl Filter<Relationship> for RelationshipFilter {
    fn matches(&self, rel: &Relationship) -> bool {
        if let Some(person) = self.involving {
            if !rel.involves(person) {
                return false;
            }
        }
        if let Some(ref text) = self.description {
            if !contains_ignore_case(rel.description(), text) {
                return false;
            }
        }
        true
    }
}
