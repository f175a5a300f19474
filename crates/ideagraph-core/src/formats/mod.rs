//! # Formats
//!
//! Serialization formats for ideagraph graphs.

pub mod node_link;

pub use node_link::{
    LinkRecord, NodeLinkGraph, NodeRecord, export_node_link, graph_from_json, graph_to_json,
    import_node_link,
};
