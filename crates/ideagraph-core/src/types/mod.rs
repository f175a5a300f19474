//! # Core Type Definitions
//!
//! This module contains all core types for the ideagraph concept graph:
//! - Node identity and records (`ConceptId`, `Concept`)
//! - Labeled undirected edges (`Relation`)
//! - Geometry and color (`Position`, `Rgb`)
//! - Error types (`GraphError`)
//!
//! ## Identity
//!
//! A concept's label IS its identity. There is no separate numeric id, so
//! `ConceptId` implements `Ord` and `Hash` directly over the label string.

use crate::primitives::LAYOUT_DIMENSIONS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use thiserror::Error;

// =============================================================================
// CONCEPT IDENTITY
// =============================================================================

/// Identity of a concept node: its label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(pub String);

impl ConceptId {
    /// Create a new concept id from a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Get the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConceptId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for ConceptId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

// =============================================================================
// CONCEPT (NODE)
// =============================================================================

/// A concept node.
///
/// The only auxiliary attribute is an optional description, shown as the
/// hover tooltip when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// The concept's identity (its label).
    pub id: ConceptId,
    /// Optional free-text insight attached at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Concept {
    /// Create a concept without a description.
    #[must_use]
    pub fn new(id: impl Into<ConceptId>) -> Self {
        Self {
            id: id.into(),
            description: None,
        }
    }

    /// Create a concept carrying a description.
    #[must_use]
    pub fn with_description(id: impl Into<ConceptId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: Some(description.into()),
        }
    }

    /// Text shown on hover: the description if set, else the label.
    #[must_use]
    pub fn tooltip(&self) -> &str {
        self.description.as_deref().unwrap_or(self.id.as_str())
    }
}

// =============================================================================
// RELATION (EDGE)
// =============================================================================

/// A labeled, undirected relationship between two distinct concepts.
///
/// `from`/`to` record the order in which the edge was first added; equality
/// of relations for graph purposes is over the unordered pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// First endpoint.
    pub from: ConceptId,
    /// Second endpoint.
    pub to: ConceptId,
    /// Relationship type, e.g. "includes".
    pub label: String,
}

impl Relation {
    /// Create a new relation.
    #[must_use]
    pub fn new(from: impl Into<ConceptId>, to: impl Into<ConceptId>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        }
    }
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// A point (or displacement) in 3-D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a new position.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Largest absolute coordinate.
    #[must_use]
    pub fn max_abs(self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// True when every coordinate is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Coordinates as an array.
    #[must_use]
    pub const fn to_array(self) -> [f64; LAYOUT_DIMENSIONS] {
        [self.x, self.y, self.z]
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Position {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

// =============================================================================
// COLOR
// =============================================================================

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS functional notation, e.g. `rgb(255, 100, 100)`.
    #[must_use]
    pub fn css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in ideagraph.
///
/// - No silent failures
/// - Use `Result<T, GraphError>` for fallible operations
/// - Graph mutations are all-or-nothing: on error the graph is unchanged
#[derive(Debug, Error)]
pub enum GraphError {
    /// An edge named an endpoint that is not in the graph.
    #[error("Unknown concept: '{0}'")]
    UnknownNode(ConceptId),

    /// An edge named the same concept at both ends.
    #[error("Concept '{0}' cannot be related to itself")]
    SelfLoop(ConceptId),

    /// A node-link payload was missing fields or referenced absent nodes.
    #[error("Malformed graph payload: {0}")]
    MalformedPayload(String),

    /// A scene was requested against a layout that does not cover the graph.
    #[error("Layout has no position for concept '{0}'")]
    LayoutContractViolation(ConceptId),

    /// A layout or render setting is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl GraphError {
    /// True for internal-consistency failures that callers must not retry.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::LayoutContractViolation(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_falls_back_to_label() {
        let plain = Concept::new("PCA");
        assert_eq!(plain.tooltip(), "PCA");

        let described = Concept::with_description("PCA", "Reduces dims");
        assert_eq!(described.tooltip(), "Reduces dims");
    }

    #[test]
    fn position_arithmetic() {
        let a = Position::new(1.0, 2.0, 2.0);
        let b = Position::new(1.0, 0.0, 0.0);

        assert_eq!(a - b, Position::new(0.0, 2.0, 2.0));
        assert_eq!(a + b, Position::new(2.0, 2.0, 2.0));
        assert_eq!(b * 3.0, Position::new(3.0, 0.0, 0.0));
        assert!((a.length() - 3.0).abs() < 1e-12);
        assert!((Position::new(-4.0, 1.0, 2.0).max_abs() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn non_finite_position_detected() {
        assert!(Position::ORIGIN.is_finite());
        assert!(!Position::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Position::new(0.0, f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn rgb_css_notation() {
        assert_eq!(Rgb::new(255, 100, 100).css(), "rgb(255, 100, 100)");
    }

    #[test]
    fn concept_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ConceptId::new("SVM")).expect("serialize");
        assert_eq!(json, "\"SVM\"");
    }

    #[test]
    fn only_layout_violation_is_contract_violation() {
        assert!(GraphError::LayoutContractViolation("A".into()).is_contract_violation());
        assert!(!GraphError::UnknownNode("A".into()).is_contract_violation());
    }
}
