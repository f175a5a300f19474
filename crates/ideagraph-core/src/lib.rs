//! # ideagraph-core
//!
//! The concept-graph engine for ideagraph - THE LOGIC.
//!
//! This crate holds a small labeled graph of concepts and relationships,
//! lays it out in 3-D with a force-directed simulation, and turns graph plus
//! layout into a renderable scene.
//!
//! ## Pipeline
//!
//! ```text
//! Session ──owns──▶ Graph ──topology──▶ LayoutEngine ──▶ Layout
//!                     │                                   │
//!                     └────attributes────▶ SceneBuilder ◀─┘
//!                                              │
//!                                              ▼
//!                                     Scene ──▶ RenderSurface
//! ```
//!
//! ## Architectural Constraints
//!
//! - The `Graph` is the only mutable state; `Layout` and `Scene` are derived
//!   per render and discarded
//! - No async, no file or network I/O: persistence is bytes in, bytes out
//! - Randomness only through the seedable `LayoutConfig`
//!
//! ## Example
//!
//! ```
//! use ideagraph_core::{LayoutConfig, Session};
//!
//! let mut session = Session::new().with_layout_config(LayoutConfig::default().with_seed(7));
//! session.add_node("A", None);
//! session.add_node("B", Some("the second letter"));
//! session.add_edge("A", "B", "links").expect("both nodes exist");
//!
//! let scene = session.build_scene().expect("layout covers every node");
//! assert_eq!(scene.nodes.len(), 2);
//! assert_eq!(scene.edges.len(), 1);
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod formats;
pub mod graph;
pub mod layout;
pub mod metrics;
pub mod primitives;
pub mod reflection;
pub mod scene;
pub mod session;
pub mod starter;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Concept, ConceptId, GraphError, Position, Relation, Rgb};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use graph::{Graph, GraphStore};
pub use layout::{Layout, LayoutConfig, LayoutEngine};
pub use metrics::GraphMetrics;
pub use reflection::meditation_prompt;
pub use scene::{
    BASELINE_COLOR, EdgeSegment, NodeMarker, RenderSurface, Scene, SceneBuilder, SceneStyle,
    degree_color,
};
pub use session::Session;
pub use starter::starter_graph;

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{NodeLinkGraph, export_node_link, graph_from_json, graph_to_json, import_node_link};
