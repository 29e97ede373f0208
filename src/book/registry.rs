//! Registry: an ordered, duplicate-free collection of one entity kind

use super::error::{BookError, BookResult};
use crate::model::Entity;

/// Ordered collection that rejects entries equivalent to one already held
///
/// Duplicates are judged by [`Entity::is_same`]; lookups for replace and
/// remove use full equality. Iteration follows insertion order, and
/// replacing an element keeps its position. Every successful mutation bumps
/// [`version`](Registry::version) so projections can tell when to recompute.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: Vec<T>,
    version: u64,
}

impl<T: Entity> Registry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            version: 0,
        }
    }

    /// Whether an equivalent element is already held
    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|existing| existing.is_same(item))
    }

    /// Append an element
    pub fn add(&mut self, item: T) -> BookResult<()> {
        if self.contains(&item) {
            return Err(BookError::DuplicateEntity { kind: T::KIND });
        }
        self.items.push(item);
        self.touch();
        Ok(())
    }

    /// Substitute `replacement` for the element equal to `target`, in place
    ///
    /// `replacement` may be equivalent to `target` (an edit that keeps the
    /// identity), but must not be equivalent to any other element.
    pub fn replace(&mut self, target: &T, replacement: T) -> BookResult<()> {
        let index = self
            .position(target)
            .ok_or(BookError::EntityNotFound { kind: T::KIND })?;

        if !target.is_same(&replacement) && self.contains(&replacement) {
            return Err(BookError::DuplicateEntity { kind: T::KIND });
        }

        self.items[index] = replacement;
        self.touch();
        Ok(())
    }

    /// Remove the element equal to `item`, returning it
    pub fn remove(&mut self, item: &T) -> BookResult<T> {
        let index = self
            .position(item)
            .ok_or(BookError::EntityNotFound { kind: T::KIND })?;
        let removed = self.items.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Replace the whole contents
    ///
    /// Nothing changes if `items` holds two equivalent elements.
    pub fn replace_all(&mut self, items: Vec<T>) -> BookResult<()> {
        Self::check_unique(&items)?;
        self.items = items;
        self.touch();
        Ok(())
    }

    /// Fail if any two of `items` are equivalent
    pub fn check_unique(items: &[T]) -> BookResult<()> {
        if all_unique(items) {
            Ok(())
        } else {
            Err(BookError::DuplicateEntity { kind: T::KIND })
        }
    }

    /// Remove every element matching `predicate`, returning them in order
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Vec<T> {
        let (removed, kept): (Vec<T>, Vec<T>) =
            std::mem::take(&mut self.items).into_iter().partition(|item| predicate(item));
        self.items = kept;
        if !removed.is_empty() {
            self.touch();
        }
        removed
    }

    /// Index of the element equal to `item`
    pub fn position(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|existing| existing == item)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Elements in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Change counter, bumped by every successful mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl<T: Entity> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Entity> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn all_unique<T: Entity>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(i, a)| items[i + 1..].iter().all(|b| !a.is_same(b)))
}
