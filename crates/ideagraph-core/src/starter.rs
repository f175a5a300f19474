//! # Starter Graph
//!
//! The machine-learning concept map a fresh workspace begins with.

use crate::graph::Graph;
use crate::{Concept, GraphError, Relation};

/// Concepts of the starter map, in insertion order.
pub const STARTER_CONCEPTS: [&str; 9] = [
    "Machine Learning Basics",
    "Supervised Learning",
    "Unsupervised Learning",
    "SVM",
    "Kernel Methods",
    "Dimensionality Reduction",
    "PCA",
    "Neural Networks",
    "Bayesian Inference",
];

/// Relations of the starter map as (from, to, label).
pub const STARTER_RELATIONS: [(&str, &str, &str); 8] = [
    ("Machine Learning Basics", "Supervised Learning", "includes"),
    ("Machine Learning Basics", "Unsupervised Learning", "includes"),
    ("Supervised Learning", "SVM", "example"),
    ("SVM", "Kernel Methods", "uses"),
    ("Unsupervised Learning", "Dimensionality Reduction", "includes"),
    ("Dimensionality Reduction", "PCA", "technique"),
    ("Neural Networks", "Kernel Methods", "relates to"),
    ("Bayesian Inference", "Machine Learning Basics", "foundation for"),
];

/// Descriptions attached to starter concepts.
pub const STARTER_DESCRIPTIONS: [(&str, &str); 2] = [
    (
        "Kernel Methods",
        "Higher dim insight: Lifts data for non-linear separation, like elevating studying.",
    ),
    (
        "PCA",
        "Reduces dims while preserving variance – meditate on info loss.",
    ),
];

/// Build the starter graph.
pub fn starter_graph() -> Result<Graph, GraphError> {
    let concepts = STARTER_CONCEPTS.into_iter().map(|label| {
        match STARTER_DESCRIPTIONS.iter().find(|(id, _)| *id == label) {
            Some((_, text)) => Concept::with_description(label, *text),
            None => Concept::new(label),
        }
    });
    let relations = STARTER_RELATIONS
        .into_iter()
        .map(|(from, to, label)| Relation::new(from, to, label));
    Graph::from_parts(concepts, relations)
}
