//! # Scene Builder
//!
//! Projects a graph plus its layout into renderable geometry.
//!
//! A `Scene` is derived and transient: it is rebuilt wholesale for every
//! render request and never mutated afterwards. Rendering itself happens
//! behind the `RenderSurface` trait, outside the core.

use crate::graph::GraphStore;
use crate::layout::Layout;
use crate::primitives::{
    DEFAULT_SCENE_TITLE, DEFAULT_VIEW_HEIGHT, DEFAULT_VIEW_WIDTH, LAYOUT_DIMENSIONS,
    NODE_COLOR_BLUE, NODE_COLOR_GREEN, NODE_COLOR_RED_MAX,
};
use crate::{ConceptId, GraphError, Position, Rgb};
use serde::{Deserialize, Serialize};

/// Color of a node whose degree ratio is 0, including every node of an
/// edgeless graph.
pub const BASELINE_COLOR: Rgb = Rgb::new(0, NODE_COLOR_GREEN, NODE_COLOR_BLUE);

/// Map a degree onto the red ramp, normalized by the largest degree present.
///
/// A `max_degree` of 0 yields [`BASELINE_COLOR`].
#[must_use]
pub fn degree_color(degree: usize, max_degree: usize) -> Rgb {
    let ratio = if max_degree == 0 {
        0.0
    } else {
        (degree.min(max_degree) as f64) / (max_degree as f64)
    };
    // Truncates toward zero.
    let red = (NODE_COLOR_RED_MAX * ratio) as u8;
    Rgb::new(red, NODE_COLOR_GREEN, NODE_COLOR_BLUE)
}

// =============================================================================
// SCENE
// =============================================================================

/// One concept as drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMarker {
    pub id: ConceptId,
    pub position: Position,
    pub color: Rgb,
    /// Text drawn next to the marker.
    pub label: String,
    /// Text shown on hover.
    pub tooltip: String,
    pub degree: usize,
}

/// One relation as drawn: a straight segment between its endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSegment {
    pub from: ConceptId,
    pub to: ConceptId,
    pub start: Position,
    pub end: Position,
    /// Relationship label, available for on-hover display.
    pub label: String,
}

/// Presentation settings carried into the scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            title: DEFAULT_SCENE_TITLE.to_string(),
            width: DEFAULT_VIEW_WIDTH,
            height: DEFAULT_VIEW_HEIGHT,
        }
    }
}

/// Everything a rendering surface needs to draw the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub style: SceneStyle,
    /// Markers in graph insertion order.
    pub nodes: Vec<NodeMarker>,
    /// Segments in graph insertion order.
    pub edges: Vec<EdgeSegment>,
}

impl Scene {
    /// Find a marker by concept id.
    #[must_use]
    pub fn node(&self, id: &ConceptId) -> Option<&NodeMarker> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Edge coordinates flattened per axis, each segment followed by a gap.
    ///
    /// This is the polyline shape 3-D line traces expect: `start, end, None`
    /// for every segment.
    #[must_use]
    pub fn edge_polyline(&self) -> [Vec<Option<f64>>; LAYOUT_DIMENSIONS] {
        let mut axes: [Vec<Option<f64>>; LAYOUT_DIMENSIONS] = Default::default();
        for edge in &self.edges {
            let start = edge.start.to_array();
            let end = edge.end.to_array();
            for (axis, coords) in axes.iter_mut().enumerate() {
                coords.push(Some(start[axis]));
                coords.push(Some(end[axis]));
                coords.push(None);
            }
        }
        axes
    }
}

// =============================================================================
// RENDERING SURFACE
// =============================================================================

/// A place a scene can be shown: a browser page, a window, a file.
///
/// `present` blocks until the surface is done with the scene.
pub trait RenderSurface {
    /// Display the scene.
    fn present(&mut self, scene: &Scene) -> Result<(), GraphError>;
}

// =============================================================================
// BUILDER
// =============================================================================

/// Builds scenes from a graph and a layout computed for it.
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    style: SceneStyle,
}

impl SceneBuilder {
    /// Create a builder with the given style.
    #[must_use]
    pub fn new(style: SceneStyle) -> Self {
        Self { style }
    }

    /// Build a scene.
    ///
    /// The layout must have been computed against this graph's current
    /// concept set. A missing position is a sequencing bug in the caller and
    /// is reported as `LayoutContractViolation`, which must not be retried.
    pub fn build<G: GraphStore + ?Sized>(
        &self,
        graph: &G,
        layout: &Layout,
    ) -> Result<Scene, GraphError> {
        let concepts = graph.nodes();
        let max_degree = concepts
            .iter()
            .map(|c| graph.degree(&c.id))
            .max()
            .unwrap_or(0);

        let nodes = concepts
            .iter()
            .map(|concept| {
                let position = position_of(layout, &concept.id)?;
                let degree = graph.degree(&concept.id);
                Ok(NodeMarker {
                    id: concept.id.clone(),
                    position,
                    color: degree_color(degree, max_degree),
                    label: concept.id.to_string(),
                    tooltip: concept.tooltip().to_string(),
                    degree,
                })
            })
            .collect::<Result<Vec<_>, GraphError>>()?;

        let edges = graph
            .edges()
            .into_iter()
            .map(|relation| {
                Ok(EdgeSegment {
                    from: relation.from.clone(),
                    to: relation.to.clone(),
                    start: position_of(layout, &relation.from)?,
                    end: position_of(layout, &relation.to)?,
                    label: relation.label.clone(),
                })
            })
            .collect::<Result<Vec<_>, GraphError>>()?;

        Ok(Scene {
            style: self.style.clone(),
            nodes,
            edges,
        })
    }
}

fn position_of(layout: &Layout, id: &ConceptId) -> Result<Position, GraphError> {
    layout
        .get(id)
        .ok_or_else(|| GraphError::LayoutContractViolation(id.clone()))
}

// =============================================================================
// TESTS
// =============================================================================
