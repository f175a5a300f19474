//! # Graph Store
//!
//! The in-memory concept graph for ideagraph.
//!
//! This module implements the `GraphStore` trait. Concepts and relations are
//! kept in insertion order so that layout and rendering walk them in a stable
//! sequence; `BTreeMap` indexes give deterministic lookups.

use crate::{Concept, ConceptId, GraphError, Relation};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// GRAPHSTORE TRAIT
// =============================================================================

/// The GraphStore trait defines the core graph operations.
///
/// The graph is simple and undirected: at most one relation per unordered
/// pair, no self-loops, and relations only between existing concepts.
pub trait GraphStore {
    /// Insert a concept if its id is absent.
    ///
    /// Returns `true` if the concept was inserted. An existing concept is
    /// left untouched, including its description.
    fn add_node(&mut self, concept: Concept) -> bool;

    /// Insert or relabel the relation between `from` and `to`.
    ///
    /// Fails with `UnknownNode` if either endpoint is absent and with
    /// `SelfLoop` if both endpoints are the same concept. On success returns
    /// the label that was replaced, if any.
    fn add_edge(
        &mut self,
        from: &ConceptId,
        to: &ConceptId,
        label: &str,
    ) -> Result<Option<String>, GraphError>;

    /// Check if a concept exists.
    fn contains_node(&self, id: &ConceptId) -> bool;

    /// Lookup a concept by id.
    fn concept(&self, id: &ConceptId) -> Option<&Concept>;

    /// All concepts in insertion order.
    fn nodes(&self) -> Vec<&Concept>;

    /// All relations, each unordered pair once, in insertion order.
    fn edges(&self) -> Vec<&Relation>;

    /// Number of relations incident to `id`; 0 for an absent concept.
    fn degree(&self, id: &ConceptId) -> usize;

    /// Label of the relation between `a` and `b`, in either direction.
    fn edge_label(&self, a: &ConceptId, b: &ConceptId) -> Option<&str>;

    /// Get the total number of concepts.
    fn node_count(&self) -> usize;

    /// Get the total number of relations.
    fn edge_count(&self) -> usize;
}

// =============================================================================
// GRAPH IMPLEMENTATION
// =============================================================================

/// The main Graph structure.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Concept storage in insertion order.
    concepts: Vec<Concept>,

    /// Reverse lookup: ConceptId -> slot in `concepts`
    index: BTreeMap<ConceptId, usize>,

    /// Relation storage in insertion order.
    relations: Vec<Relation>,

    /// Unordered pair (low slot, high slot) -> slot in `relations`
    pairs: BTreeMap<(usize, usize), usize>,

    /// Neighbor slots per concept slot.
    adjacency: Vec<BTreeSet<usize>>,
}

impl Graph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from concept and relation lists, all or nothing.
    ///
    /// Duplicate concept ids are collapsed (first description wins) and a
    /// repeated pair keeps the last label, mirroring `add_node`/`add_edge`.
    /// Fails on the first relation that `add_edge` would reject; no partial
    /// graph escapes.
    pub fn from_parts(
        concepts: impl IntoIterator<Item = Concept>,
        relations: impl IntoIterator<Item = Relation>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for concept in concepts {
            graph.add_node(concept);
        }
        for relation in relations {
            graph.add_edge(&relation.from, &relation.to, &relation.label)?;
        }
        Ok(graph)
    }

    /// Largest degree over all concepts; 0 for an empty or edgeless graph.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).max().unwrap_or(0)
    }

    /// Check that two graphs hold the same concepts, descriptions and
    /// labeled unordered pairs, regardless of insertion order or the
    /// direction each relation was recorded in.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        if self.node_count() != other.node_count() || self.edge_count() != other.edge_count() {
            return false;
        }
        let nodes_match = self
            .concepts
            .iter()
            .all(|c| other.concept(&c.id) == Some(c));
        let edges_match = self
            .relations
            .iter()
            .all(|r| other.edge_label(&r.from, &r.to) == Some(r.label.as_str()));
        nodes_match && edges_match
    }

    fn pair_key(a: usize, b: usize) -> (usize, usize) {
        if a <= b { (a, b) } else { (b, a) }
    }
}

impl GraphStore for Graph {
    fn add_node(&mut self, concept: Concept) -> bool {
        if self.index.contains_key(&concept.id) {
            return false;
        }

        let slot = self.concepts.len();
        self.index.insert(concept.id.clone(), slot);
        self.concepts.push(concept);
        self.adjacency.push(BTreeSet::new());
        true
    }

    fn add_edge(
        &mut self,
        from: &ConceptId,
        to: &ConceptId,
        label: &str,
    ) -> Result<Option<String>, GraphError> {
        let a = *self
            .index
            .get(from)
            .ok_or_else(|| GraphError::UnknownNode(from.clone()))?;
        let b = *self
            .index
            .get(to)
            .ok_or_else(|| GraphError::UnknownNode(to.clone()))?;
        if a == b {
            return Err(GraphError::SelfLoop(from.clone()));
        }

        let key = Self::pair_key(a, b);
        if let Some(relation) = self
            .pairs
            .get(&key)
            .and_then(|&slot| self.relations.get_mut(slot))
        {
            let previous = std::mem::replace(&mut relation.label, label.to_string());
            return Ok(Some(previous));
        }

        self.pairs.insert(key, self.relations.len());
        self.relations
            .push(Relation::new(from.clone(), to.clone(), label));
        if let Some(set) = self.adjacency.get_mut(a) {
            set.insert(b);
        }
        if let Some(set) = self.adjacency.get_mut(b) {
            set.insert(a);
        }
        Ok(None)
    }

    fn contains_node(&self, id: &ConceptId) -> bool {
        self.index.contains_key(id)
    }

    fn concept(&self, id: &ConceptId) -> Option<&Concept> {
        self.index.get(id).and_then(|&slot| self.concepts.get(slot))
    }

    fn nodes(&self) -> Vec<&Concept> {
        self.concepts.iter().collect()
    }

    fn edges(&self) -> Vec<&Relation> {
        self.relations.iter().collect()
    }

    fn degree(&self, id: &ConceptId) -> usize {
        self.index
            .get(id)
            .and_then(|&slot| self.adjacency.get(slot))
            .map_or(0, BTreeSet::len)
    }

    fn edge_label(&self, a: &ConceptId, b: &ConceptId) -> Option<&str> {
        let a = *self.index.get(a)?;
        let b = *self.index.get(b)?;
        let slot = *self.pairs.get(&Self::pair_key(a, b))?;
        self.relations.get(slot).map(|r| r.label.as_str())
    }

    fn node_count(&self) -> usize {
        self.concepts.len()
    }

    fn edge_count(&self) -> usize {
        self.relations.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
