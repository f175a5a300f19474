//! # Graph Metrics
//!
//! Summary figures shown by `ideagraph status`.

use crate::graph::{Graph, GraphStore};
use crate::{ConceptId, Session};
use serde::{Deserialize, Serialize};

/// Structural summary of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphMetrics {
    /// Total number of concepts.
    pub node_count: usize,
    /// Total number of relations.
    pub edge_count: usize,
    /// Largest number of relations on a single concept.
    pub max_degree: usize,
    /// Concepts with the largest degree, in insertion order.
    pub hubs: Vec<ConceptId>,
    /// Concepts with no relations.
    pub isolated_count: usize,
    /// Distinct relationship labels in use.
    pub label_count: usize,
}

impl GraphMetrics {
    /// Compute metrics from a graph.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let max_degree = graph.max_degree();
        let concepts = graph.nodes();

        let hubs = if max_degree == 0 {
            Vec::new()
        } else {
            concepts
                .iter()
                .filter(|c| graph.degree(&c.id) == max_degree)
                .map(|c| c.id.clone())
                .collect()
        };
        let isolated_count = concepts
            .iter()
            .filter(|c| graph.degree(&c.id) == 0)
            .count();

        let mut labels: Vec<&str> = graph.edges().into_iter().map(|r| r.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();

        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            max_degree,
            hubs,
            isolated_count,
            label_count: labels.len(),
        }
    }

    /// Compute metrics from a session's graph.
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self::from_graph(session.graph())
    }

    /// Edges per node, scaled by 1000 (0 if no nodes).
    #[must_use]
    pub fn density_per_thousand(&self) -> usize {
        if self.node_count == 0 {
            0
        } else {
            self.edge_count.saturating_mul(1000) / self.node_count
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Concept;

    #[test]
    fn empty_graph_metrics() {
        let metrics = GraphMetrics::from_graph(&Graph::new());
        assert_eq!(metrics, GraphMetrics::default());
        assert_eq!(metrics.density_per_thousand(), 0);
    }

    #[test]
    fn hubs_and_isolated() {
        let mut graph = Graph::new();
        for label in ["hub", "a", "b", "alone"] {
            graph.add_node(Concept::new(label));
        }
        let hub = ConceptId::new("hub");
        graph.add_edge(&hub, &"a".into(), "has").expect("edge");
        graph.add_edge(&hub, &"b".into(), "uses").expect("edge");

        let metrics = GraphMetrics::from_graph(&graph);
        assert_eq!(metrics.max_degree, 2);
        assert_eq!(metrics.hubs, vec![hub]);
        assert_eq!(metrics.isolated_count, 1);
        assert_eq!(metrics.label_count, 2);
        assert_eq!(metrics.density_per_thousand(), 500);
    }
}
