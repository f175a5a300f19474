//! # Node-Link Format
//!
//! JSON persistence for ideagraph graphs.
//!
//! File I/O operations are in the app layer; this module only converts
//! between `Graph` and bytes.
//!
//! Format: a single JSON object
//! - `directed`, `multigraph`: always `false` on export
//! - `graph`: graph-level attributes, exported empty
//! - `nodes`: `[{ "id": <label>, "description"?: <text> }]`
//! - `links` (or `edges` on import): `[{ "source", "target", "label" }]`
//!
//! ## Validation
//!
//! Import is atomic. The payload size is checked before parsing, then the
//! whole document is validated (duplicate ids, dangling or self-referencing
//! links, counts) before any graph is returned.

use crate::graph::{Graph, GraphStore};
use crate::primitives::{MAX_IMPORT_EDGE_COUNT, MAX_IMPORT_NODE_COUNT, MAX_PAYLOAD_SIZE};
use crate::{Concept, ConceptId, GraphError, Relation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// DOCUMENT SHAPE
// =============================================================================

/// A node entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A link entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
    pub label: String,
}

/// The complete node-link document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkGraph {
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub multigraph: bool,
    #[serde(default)]
    pub graph: serde_json::Map<String, serde_json::Value>,
    pub nodes: Vec<NodeRecord>,
    #[serde(alias = "edges")]
    pub links: Vec<LinkRecord>,
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Build the node-link document for a graph.
///
/// Nodes and links follow the graph's insertion order.
pub fn export_node_link<G: GraphStore + ?Sized>(graph: &G) -> NodeLinkGraph {
    NodeLinkGraph {
        directed: false,
        multigraph: false,
        graph: serde_json::Map::new(),
        nodes: graph
            .nodes()
            .into_iter()
            .map(|c| NodeRecord {
                id: c.id.to_string(),
                description: c.description.clone(),
            })
            .collect(),
        links: graph
            .edges()
            .into_iter()
            .map(|r| LinkRecord {
                source: r.from.to_string(),
                target: r.to.to_string(),
                label: r.label.clone(),
            })
            .collect(),
    }
}

/// Rebuild a graph from a node-link document.
///
/// Rejects, as `MalformedPayload`: directed or multigraph documents,
/// duplicate node ids, links naming an id absent from `nodes`, self-links,
/// and documents over the node/edge count limits.
pub fn import_node_link(doc: NodeLinkGraph) -> Result<Graph, GraphError> {
    if doc.directed {
        return Err(GraphError::MalformedPayload(
            "directed graphs are not supported".to_string(),
        ));
    }
    if doc.multigraph {
        return Err(GraphError::MalformedPayload(
            "multigraphs are not supported".to_string(),
        ));
    }
    if doc.nodes.len() > MAX_IMPORT_NODE_COUNT {
        return Err(GraphError::MalformedPayload(format!(
            "node count {} exceeds maximum {}",
            doc.nodes.len(),
            MAX_IMPORT_NODE_COUNT
        )));
    }
    if doc.links.len() > MAX_IMPORT_EDGE_COUNT {
        return Err(GraphError::MalformedPayload(format!(
            "link count {} exceeds maximum {}",
            doc.links.len(),
            MAX_IMPORT_EDGE_COUNT
        )));
    }

    let mut seen = BTreeSet::new();
    for node in &doc.nodes {
        if !seen.insert(node.id.as_str()) {
            return Err(GraphError::MalformedPayload(format!(
                "duplicate node id '{}'",
                node.id
            )));
        }
    }
    for link in &doc.links {
        for end in [&link.source, &link.target] {
            if !seen.contains(end.as_str()) {
                return Err(GraphError::MalformedPayload(format!(
                    "link {} -> {} references unknown node '{}'",
                    link.source, link.target, end
                )));
            }
        }
        if link.source == link.target {
            return Err(GraphError::MalformedPayload(format!(
                "self-link on node '{}'",
                link.source
            )));
        }
    }

    let concepts = doc.nodes.into_iter().map(|n| Concept {
        id: ConceptId(n.id),
        description: n.description,
    });
    let relations = doc
        .links
        .into_iter()
        .map(|l| Relation::new(l.source, l.target, l.label));

    Graph::from_parts(concepts, relations)
        .map_err(|e| GraphError::MalformedPayload(e.to_string()))
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize a graph to node-link JSON bytes.
///
/// This is a pure transformation - no file I/O.
pub fn graph_to_json<G: GraphStore + ?Sized>(graph: &G, pretty: bool) -> Result<Vec<u8>, GraphError> {
    let doc = export_node_link(graph);
    let bytes = if pretty {
        serde_json::to_vec_pretty(&doc)
    } else {
        serde_json::to_vec(&doc)
    };
    bytes.map_err(|e| GraphError::SerializationError(e.to_string()))
}

/// Deserialize a graph from node-link JSON bytes.
///
/// This is a pure transformation - no file I/O. The size limit is checked
/// before parsing; any parse failure (bad JSON, missing `id`, `source`,
/// `target` or `label`) is a `MalformedPayload`.
pub fn graph_from_json(bytes: &[u8]) -> Result<Graph, GraphError> {
    if bytes.len() > MAX_PAYLOAD_SIZE {
        return Err(GraphError::MalformedPayload(format!(
            "payload size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_PAYLOAD_SIZE
        )));
    }

    let doc: NodeLinkGraph = serde_json::from_slice(bytes)
        .map_err(|e| GraphError::MalformedPayload(e.to_string()))?;
    import_node_link(doc)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ConceptId {
        ConceptId::new(s)
    }

    fn abc() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Concept::new("A"));
        graph.add_node(Concept::with_description("B", "bee"));
        graph.add_node(Concept::new("C"));
        graph.add_edge(&id("A"), &id("B"), "links").expect("edge");
        graph
    }

    #[test]
    fn export_shape() {
        let doc = export_node_link(&abc());

        assert!(!doc.directed);
        assert!(!doc.multigraph);
        assert_eq!(doc.nodes.len(), 3);
        assert_eq!(doc.links.len(), 1);
        assert_eq!(
            doc.links[0],
            LinkRecord {
                source: "A".to_string(),
                target: "B".to_string(),
                label: "links".to_string(),
            }
        );
    }

    #[test]
    fn export_omits_absent_description() {
        let json = String::from_utf8(graph_to_json(&abc(), false).expect("json")).expect("utf8");

        assert!(json.contains(r#"{"id":"A"}"#));
        assert!(json.contains(r#"{"id":"B","description":"bee"}"#));
    }

    #[test]
    fn json_roundtrip() {
        let graph = abc();
        let bytes = graph_to_json(&graph, true).expect("serialize");
        let restored = graph_from_json(&bytes).expect("deserialize");

        assert!(graph.same_content(&restored));
    }

    #[test]
    fn edges_key_accepted() {
        let json = br#"{
            "nodes": [{"id": "X"}, {"id": "Y"}],
            "edges": [{"source": "Y", "target": "X", "label": "rel"}]
        }"#;
        let graph = graph_from_json(json).expect("import");

        assert_eq!(graph.edge_label(&id("X"), &id("Y")), Some("rel"));
    }

    #[test]
    fn dangling_link_rejected() {
        let json = br#"{
            "nodes": [{"id": "X"}],
            "links": [{"source": "X", "target": "Y", "label": "rel"}]
        }"#;
        assert!(matches!(
            graph_from_json(json),
            Err(GraphError::MalformedPayload(_))
        ));
    }

    #[test]
    fn missing_label_rejected() {
        let json = br#"{
            "nodes": [{"id": "X"}, {"id": "Y"}],
            "links": [{"source": "X", "target": "Y"}]
        }"#;
        assert!(matches!(
            graph_from_json(json),
            Err(GraphError::MalformedPayload(_))
        ));
    }

    #[test]
    fn missing_node_id_rejected() {
        let json = br#"{"nodes": [{"description": "orphan"}], "links": []}"#;
        assert!(matches!(
            graph_from_json(json),
            Err(GraphError::MalformedPayload(_))
        ));
    }

    #[test]
    fn duplicate_node_rejected() {
        let json = br#"{"nodes": [{"id": "X"}, {"id": "X"}], "links": []}"#;
        assert!(matches!(
            graph_from_json(json),
            Err(GraphError::MalformedPayload(_))
        ));
    }

    #[test]
    fn self_link_rejected() {
        let json = br#"{
            "nodes": [{"id": "X"}],
            "links": [{"source": "X", "target": "X", "label": "is"}]
        }"#;
        assert!(matches!(
            graph_from_json(json),
            Err(GraphError::MalformedPayload(_))
        ));
    }

    #[test]
    fn directed_document_rejected() {
        let json = br#"{"directed": true, "nodes": [], "links": []}"#;
        assert!(matches!(
            graph_from_json(json),
            Err(GraphError::MalformedPayload(_))
        ));
    }

    #[test]
    fn graph_attributes_ignored() {
        let json = br#"{"directed": false, "multigraph": false, "graph": {"name": "x"},
            "nodes": [{"id": "X"}], "links": []}"#;
        let graph = graph_from_json(json).expect("import");
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn garbage_rejected() {
        assert!(matches!(
            graph_from_json(b"not json"),
            Err(GraphError::MalformedPayload(_))
        ));
    }
}
