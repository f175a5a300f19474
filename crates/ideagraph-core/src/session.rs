//! # Session Module
//!
//! The command surface of the core.
//!
//! A `Session` owns the graph for its entire lifetime together with the
//! layout and scene settings used to render it. There is no ambient graph:
//! callers hold a `Session` and pass it by reference into their command
//! handlers.
//!
//! ## Render pipeline
//!
//! `render_request` always runs the layout against the current concept set
//! immediately before building the scene, so the two can never disagree.

use crate::formats::{NodeLinkGraph, export_node_link, import_node_link};
use crate::graph::{Graph, GraphStore};
use crate::layout::{LayoutConfig, LayoutEngine};
use crate::scene::{RenderSurface, Scene, SceneBuilder, SceneStyle};
use crate::{Concept, ConceptId, GraphError};

/// A graph plus the settings used to render it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The single mutable source of truth.
    graph: Graph,
    /// Layout tunables, including the seed.
    layout: LayoutConfig,
    /// Title and viewport of rendered scenes.
    style: SceneStyle,
}

impl Session {
    /// Create a new empty session with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session around an existing graph.
    #[must_use]
    pub fn with_graph(graph: Graph) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    /// Replace the layout settings.
    #[must_use]
    pub fn with_layout_config(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the scene style.
    #[must_use]
    pub fn with_style(mut self, style: SceneStyle) -> Self {
        self.style = style;
        self
    }

    /// Get a reference to the graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Get the layout settings.
    #[must_use]
    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Get the scene style.
    #[must_use]
    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    // =========================================================================
    // COMMANDS
    // =========================================================================

    /// Add a concept. An empty description counts as none.
    ///
    /// Returns `false` if the concept already existed; its description is
    /// left as it was.
    pub fn add_node(&mut self, id: &str, description: Option<&str>) -> bool {
        let concept = match description.filter(|d| !d.is_empty()) {
            Some(text) => Concept::with_description(id, text),
            None => Concept::new(id),
        };
        self.graph.add_node(concept)
    }

    /// Relate two existing concepts.
    ///
    /// On `UnknownNode` or `SelfLoop` the graph is unchanged. Returns the
    /// label that was overwritten, if the pair was already related.
    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        label: &str,
    ) -> Result<Option<String>, GraphError> {
        self.graph
            .add_edge(&ConceptId::new(from), &ConceptId::new(to), label)
    }

    /// The persistence payload for the current graph.
    #[must_use]
    pub fn export_graph(&self) -> NodeLinkGraph {
        export_node_link(&self.graph)
    }

    /// Replace the graph with an imported one.
    ///
    /// Atomic: on error the current graph is kept.
    pub fn import_graph(&mut self, doc: NodeLinkGraph) -> Result<(), GraphError> {
        self.graph = import_node_link(doc)?;
        Ok(())
    }

    /// Lay out the current graph and build its scene.
    pub fn build_scene(&self) -> Result<Scene, GraphError> {
        let layout = LayoutEngine::new(self.layout).compute(&self.graph)?;
        SceneBuilder::new(self.style.clone()).build(&self.graph, &layout)
    }

    /// Build a fresh scene and hand it to `surface`.
    ///
    /// Blocks for as long as the surface does.
    pub fn render_request(&self, surface: &mut dyn RenderSurface) -> Result<(), GraphError> {
        let scene = self.build_scene()?;
        surface.present(&scene)
    }

    // =========================================================================
    // SUMMARY
    // =========================================================================

    /// Get the number of concepts.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of relations.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

// =============================================================================
// TESTS
// =============================================================================
