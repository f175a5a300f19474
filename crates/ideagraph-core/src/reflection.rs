//! # Reflection
//!
//! A one-line prompt built from a randomly chosen relation, printed after a
//! render.

use crate::graph::GraphStore;
use crate::Relation;
use rand::Rng;

/// Format the prompt for one relation.
#[must_use]
pub fn prompt_for(relation: &Relation) -> String {
    format!(
        "Meditation prompt: Reflect on how '{}' {} '{}' in higher dims.",
        relation.from, relation.label, relation.to
    )
}

/// Pick a relation at random and format its prompt.
///
/// Returns `None` for a graph without relations.
pub fn meditation_prompt<G: GraphStore + ?Sized>(graph: &G, rng: &mut impl Rng) -> Option<String> {
    let edges = graph.edges();
    if edges.is_empty() {
        return None;
    }
    let pick = rng.random_range(0..edges.len());
    edges.get(pick).map(|relation| prompt_for(relation))
}
