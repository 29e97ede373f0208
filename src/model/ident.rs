//! Integer identifiers and the allocator that hands them out

use crate::book::{BookError, BookResult};
use super::EntityKind;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Largest identifier any entity kind may carry
pub const MAX_IDENTIFIER: u32 = i32::MAX as u32;

/// Common behaviour of the per-kind identifier newtypes
pub trait Identifier: Copy + Eq + std::hash::Hash + std::fmt::Debug {
    /// Which entity kind this identifier belongs to
    const KIND: EntityKind;

    /// Wrap a raw value that is already known to be in range
    fn from_raw(raw: u32) -> Self;

    /// The raw integer value
    fn get(self) -> u32;
}

fn check_range(raw: i64) -> BookResult<u32> {
    if raw >= 1 && raw <= i64::from(MAX_IDENTIFIER) {
        Ok(raw as u32)
    } else {
        Err(BookError::InvalidIdentifier(raw))
    }
}

/// Unique identifier for a person
///
/// Serializes as a plain integer; out-of-range values fail to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct PersonId(u32);

impl PersonId {
    /// Create a PersonId, rejecting values outside 1..=i32::MAX
    pub fn new(raw: i64) -> BookResult<Self> {
        check_range(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Identifier for PersonId {
    const KIND: EntityKind = EntityKind::Person;

    fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for PersonId {
    type Error = BookError;

    fn try_from(raw: i64) -> BookResult<Self> {
        Self::new(raw)
    }
}

impl From<PersonId> for u32 {
    fn from(id: PersonId) -> u32 {
        id.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct TagId(u32);

impl TagId {
    /// Create a TagId, rejecting values outside 1..=i32::MAX
    pub fn new(raw: i64) -> BookResult<Self> {
        check_range(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Identifier for TagId {
    const KIND: EntityKind = EntityKind::Tag;

    fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for TagId {
    type Error = BookError;

    fn try_from(raw: i64) -> BookResult<Self> {
        Self::new(raw)
    }
}

impl From<TagId> for u32 {
    fn from(id: TagId) -> u32 {
        id.0
    }
}

impl std::fmt::Display for TagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues identifiers for one entity kind
///
/// Tracks the highest identifier ever issued or observed. Identifiers that
/// arrive from outside (deserialized data) must be passed to [`observe`]
/// before the next call to [`next`], otherwise a fresh identifier could
/// reuse one that is already in the book.
///
/// [`observe`]: IdentifierAllocator::observe
/// [`next`]: IdentifierAllocator::next
#[derive(Debug, Clone)]
pub struct IdentifierAllocator<I> {
    high_water: u32,
    _kind: PhantomData<I>,
}

impl<I: Identifier> IdentifierAllocator<I> {
    /// Create an allocator whose first identifier will be 1
    pub fn new() -> Self {
        Self {
            high_water: 0,
            _kind: PhantomData,
        }
    }

    /// Allocate the next identifier
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> BookResult<I> {
        if self.high_water >= MAX_IDENTIFIER {
            return Err(BookError::IdentifierSpaceExhausted { kind: I::KIND });
        }
        self.high_water += 1;
        Ok(I::from_raw(self.high_water))
    }

    /// Record an identifier as seen without allocating
    pub fn observe(&mut self, id: I) {
        self.high_water = self.high_water.max(id.get());
    }

    /// Highest identifier issued or observed so far (0 when none)
    pub fn high_water(&self) -> u32 {
        self.high_water
    }
}

impl<I: Identifier> Default for IdentifierAllocator<I> {
    fn default() -> Self {
        Self::new()
    }
}
