//! Shortest link between two persons

use std::collections::{HashMap, HashSet, VecDeque};
use super::types::{LinkEntry, RelationshipView};
use crate::book::{AddressBook, BookError, BookResult};
use crate::model::{PersonId, Relationship};
use tracing::debug;

/// Query for the shortest chain of relationships between two persons
///
/// Relationships are treated as undirected edges. Among several shortest
/// chains the one found first wins: nodes are expanded in BFS order and
/// each node's edges are tried in relationship registry order.
#[derive(Debug, Clone, Default)]
pub struct LinkQuery {
    /// Where the chain starts
    pub source: Option<PersonId>,
    /// Where the chain ends
    pub target: Option<PersonId>,
}

impl LinkQuery {
    /// Create a link query between two persons
    pub fn between(source: PersonId, target: PersonId) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
        }
    }

    /// Set the starting person
    pub fn from(mut self, source: PersonId) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the destination person
    pub fn to(mut self, target: PersonId) -> Self {
        self.target = Some(target);
        self
    }

    /// Execute the link query (BFS for shortest path)
    ///
    /// Each row pairs a person on the chain with the relationship leading to
    /// the next row; the destination row has none. The view is empty when
    /// both ends are the same person or no chain exists.
    pub fn execute(&self, book: &AddressBook) -> BookResult<RelationshipView> {
        let source = self
            .source
            .ok_or_else(|| BookError::InvalidArgument("link query needs a source id".into()))?;
        let target = self
            .target
            .ok_or_else(|| BookError::InvalidArgument("link query needs a target id".into()))?;

        if source == target {
            return Ok(RelationshipView::empty());
        }

        let adjacency = Adjacency::build(book.relationships().iter());
        if !adjacency.has_edges(&source) || !adjacency.has_edges(&target) {
            return Ok(RelationshipView::empty());
        }

        let mut visited: HashSet<PersonId> = HashSet::new();
        let mut queue: VecDeque<PersonId> = VecDeque::new();
        let mut predecessors: HashMap<PersonId, (PersonId, &Relationship)> = HashMap::new();

        visited.insert(source);
        queue.push_back(source);

        let mut found = false;
        'search: while let Some(current) = queue.pop_front() {
            for &(neighbor, rel) in adjacency.neighbors(&current) {
                if !visited.insert(neighbor) {
                    continue;
                }
                predecessors.insert(neighbor, (current, rel));
                if neighbor == target {
                    found = true;
                    break 'search;
                }
                queue.push_back(neighbor);
            }
        }

        if !found {
            debug!(%source, %target, "link query found no chain");
            return Ok(RelationshipView::empty());
        }

        let view = reconstruct_path(book, target, &predecessors);
        debug!(%source, %target, hops = view.len() - 1, "link query");
        Ok(view)
    }
}

/// Walk predecessors back from `target` and emit rows source-first
fn reconstruct_path(
    book: &AddressBook,
    target: PersonId,
    predecessors: &HashMap<PersonId, (PersonId, &Relationship)>,
) -> RelationshipView {
    let mut chain: Vec<(PersonId, Option<&Relationship>)> = Vec::new();
    let mut current = target;
    let mut outgoing: Option<&Relationship> = None;

    loop {
        chain.push((current, outgoing));
        match predecessors.get(&current) {
            Some(&(pred, rel)) => {
                outgoing = Some(rel);
                current = pred;
            }
            None => break,
        }
    }

    chain.reverse();
    RelationshipView::from_entries(
        chain
            .into_iter()
            .map(|(id, rel)| LinkEntry::resolve(book, id, rel))
            .collect(),
    )
}

/// Undirected neighbor lists, in relationship registry order
struct Adjacency<'a> {
    neighbors: HashMap<PersonId, Vec<(PersonId, &'a Relationship)>>,
}

impl<'a> Adjacency<'a> {
    fn build(relationships: impl Iterator<Item = &'a Relationship>) -> Self {
        let mut neighbors: HashMap<PersonId, Vec<(PersonId, &Relationship)>> = HashMap::new();

        for rel in relationships {
            let (a, b) = (rel.part1(), rel.part2());
            neighbors.entry(a).or_default().push((b, rel));
            if a != b {
                neighbors.entry(b).or_default().push((a, rel));
            }
        }

        Self { neighbors }
    }

    fn has_edges(&self, id: &PersonId) -> bool {
        self.neighbors.contains_key(id)
    }

    fn neighbors(&self, id: &PersonId) -> &[(PersonId, &'a Relationship)] {
        self.neighbors.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }
}
