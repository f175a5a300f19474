//! # Primitives
//!
//! Compiled-in constants for layout, scene styling, and payload limits.
//!
//! These are defaults, not invariants: layout parameters can be overridden
//! through `LayoutConfig`, and the binary exposes them as CLI flags and
//! config-file keys.

// =============================================================================
// LAYOUT
// =============================================================================

/// Default number of relaxation steps in the force-directed layout.
pub const DEFAULT_ITERATIONS: usize = 50;

/// Default half-extent of the final layout: the largest absolute
/// coordinate after rescaling.
pub const DEFAULT_LAYOUT_SCALE: f64 = 1.0;

/// Number of spatial dimensions the layout works in.
pub const LAYOUT_DIMENSIONS: usize = 3;

/// Lower bound on pairwise distance when computing forces.
///
/// Coincident nodes would otherwise produce an infinite repulsion.
pub const MIN_DISTANCE: f64 = 0.01;

/// Lower bound on displacement length when normalizing a step.
pub const MIN_DISPLACEMENT: f64 = 0.01;

/// Initial temperature as a fraction of the largest coordinate span.
pub const INITIAL_TEMPERATURE_FACTOR: f64 = 0.1;

/// Upper bound on iterations accepted from configuration.
pub const MAX_ITERATIONS: usize = 10_000;

// =============================================================================
// SCENE STYLING
// =============================================================================

/// Green and blue channels of every node color; red carries the degree.
pub const NODE_COLOR_GREEN: u8 = 100;

/// See [`NODE_COLOR_GREEN`].
pub const NODE_COLOR_BLUE: u8 = 100;

/// Red channel at degree ratio 1.0.
pub const NODE_COLOR_RED_MAX: f64 = 255.0;

/// Marker diameter in the rendered view.
pub const NODE_MARKER_SIZE: u32 = 10;

/// Marker outline width.
pub const NODE_OUTLINE_WIDTH: u32 = 2;

/// Marker outline color.
pub const NODE_OUTLINE_COLOR: &str = "darkblue";

/// Edge line width.
pub const EDGE_LINE_WIDTH: u32 = 2;

/// Edge line color.
pub const EDGE_LINE_COLOR: &str = "gray";

/// Default title of a rendered scene.
pub const DEFAULT_SCENE_TITLE: &str = "Interactive 3D DSML Concept Graph";

/// Default viewport width in pixels.
pub const DEFAULT_VIEW_WIDTH: u32 = 800;

/// Default viewport height in pixels.
pub const DEFAULT_VIEW_HEIGHT: u32 = 600;

// =============================================================================
// PAYLOAD LIMITS
// =============================================================================

/// Maximum number of nodes accepted by a node-link import.
pub const MAX_IMPORT_NODE_COUNT: usize = 100_000;

/// Maximum number of edges accepted by a node-link import.
pub const MAX_IMPORT_EDGE_COUNT: usize = 1_000_000;

/// Maximum size in bytes of a node-link payload.
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_iterations_within_bound() {
        assert!(DEFAULT_ITERATIONS <= MAX_ITERATIONS);
    }
}
