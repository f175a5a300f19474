//! # Layout Engine
//!
//! Force-directed (Fruchterman–Reingold) placement of concepts in 3-D.
//!
//! Every concept is a point mass. Every pair of concepts repels with a force
//! of `k² / d`; every relation pulls its endpoints together with `d² / k`,
//! where `k = sqrt(1 / n)` is the ideal edge length. Each step moves a node
//! along its net displacement by at most the current temperature, which cools
//! linearly to zero over the iteration budget. There is no convergence test:
//! the result is an approximate, visually balanced layout.
//!
//! ## Determinism
//!
//! Initial positions are drawn uniformly from the unit cube. With
//! `LayoutConfig::seed` set, the same graph always yields the same layout;
//! without it each call seeds from the OS and converges independently.

use crate::graph::GraphStore;
use crate::primitives::{
    DEFAULT_ITERATIONS, DEFAULT_LAYOUT_SCALE, INITIAL_TEMPERATURE_FACTOR, LAYOUT_DIMENSIONS,
    MAX_ITERATIONS, MIN_DISPLACEMENT, MIN_DISTANCE,
};
use crate::{ConceptId, GraphError, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Tunables for a layout run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Number of relaxation steps.
    pub iterations: usize,
    /// Seed for the initial positions; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Largest absolute coordinate of the rescaled result.
    pub scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            scale: DEFAULT_LAYOUT_SCALE,
        }
    }
}

impl LayoutConfig {
    /// Fix the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the iteration budget.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Override the output scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Validate ranges.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.iterations > MAX_ITERATIONS {
            return Err(GraphError::InvalidConfig(format!(
                "iterations {} exceeds maximum {}",
                self.iterations, MAX_ITERATIONS
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "scale must be a positive finite number, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

// =============================================================================
// LAYOUT RESULT
// =============================================================================

/// Positions for every concept of the graph a layout was computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    positions: BTreeMap<ConceptId, Position>,
}

impl Layout {
    /// Position of a concept.
    #[must_use]
    pub fn get(&self, id: &ConceptId) -> Option<Position> {
        self.positions.get(id).copied()
    }

    /// Check if a concept has a position.
    #[must_use]
    pub fn contains(&self, id: &ConceptId) -> bool {
        self.positions.contains_key(id)
    }

    /// Number of positioned concepts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the layout is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All positions, ordered by concept id.
    pub fn iter(&self) -> impl Iterator<Item = (&ConceptId, Position)> {
        self.positions.iter().map(|(id, pos)| (id, *pos))
    }
}

impl FromIterator<(ConceptId, Position)> for Layout {
    fn from_iter<I: IntoIterator<Item = (ConceptId, Position)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Computes a fresh `Layout` for a graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out every concept currently in `graph`.
    pub fn compute<G: GraphStore + ?Sized>(&self, graph: &G) -> Result<Layout, GraphError> {
        self.config.validate()?;

        let ids: Vec<ConceptId> = graph.nodes().into_iter().map(|c| c.id.clone()).collect();
        match ids.len() {
            0 => return Ok(Layout::default()),
            1 => return Ok(ids.into_iter().map(|id| (id, Position::ORIGIN)).collect()),
            _ => {}
        }

        let slots: BTreeMap<&ConceptId, usize> =
            ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
        let springs: Vec<(usize, usize)> = graph
            .edges()
            .into_iter()
            .filter_map(|r| Some((*slots.get(&r.from)?, *slots.get(&r.to)?)))
            .collect();

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut positions = random_positions(&mut rng, ids.len());

        relax(&mut positions, &springs, self.config.iterations);
        rescale(&mut positions, self.config.scale);

        Ok(ids.into_iter().zip(positions).collect())
    }
}

// =============================================================================
// SIMULATION
// =============================================================================

fn random_positions(rng: &mut impl Rng, count: usize) -> Vec<Position> {
    (0..count)
        .map(|_| Position::new(rng.random(), rng.random(), rng.random()))
        .collect()
}

/// Run the cooling schedule over `positions` in place.
fn relax(positions: &mut [Position], springs: &[(usize, usize)], iterations: usize) {
    let k = (1.0 / positions.len() as f64).sqrt();

    let span = bounding_span(positions);
    let mut temperature = INITIAL_TEMPERATURE_FACTOR * if span > 0.0 { span } else { 1.0 };
    let cooling = temperature / (iterations as f64 + 1.0);

    let mut displacement = vec![Position::ORIGIN; positions.len()];
    for _ in 0..iterations {
        displacement.fill(Position::ORIGIN);
        apply_repulsion(positions, &mut displacement, k);
        apply_attraction(positions, springs, &mut displacement, k);

        for (pos, disp) in positions.iter_mut().zip(&displacement) {
            let length = disp.length().max(MIN_DISPLACEMENT);
            *pos += *disp * (temperature / length);
        }
        temperature -= cooling;
    }
}

/// Every pair pushes apart with magnitude `k² / d`.
fn apply_repulsion(positions: &[Position], displacement: &mut [Position], k: f64) {
    let k2 = k * k;
    for (i, &pos_a) in positions.iter().enumerate() {
        for (j, &pos_b) in positions.iter().enumerate() {
            if i == j {
                continue;
            }
            let delta = pos_a - pos_b;
            let distance = delta.length().max(MIN_DISTANCE);
            if let Some(disp) = displacement.get_mut(i) {
                *disp += delta * (k2 / (distance * distance));
            }
        }
    }
}

/// Every relation pulls its endpoints together with magnitude `d² / k`.
fn apply_attraction(
    positions: &[Position],
    springs: &[(usize, usize)],
    displacement: &mut [Position],
    k: f64,
) {
    for &(a, b) in springs {
        let (Some(&pos_a), Some(&pos_b)) = (positions.get(a), positions.get(b)) else {
            continue;
        };
        let delta = pos_a - pos_b;
        let distance = delta.length().max(MIN_DISTANCE);
        let pull = delta * (distance / k);

        if let Some(disp) = displacement.get_mut(a) {
            *disp = *disp - pull;
        }
        if let Some(disp) = displacement.get_mut(b) {
            *disp += pull;
        }
    }
}

/// Largest extent of the point cloud along any axis.
fn bounding_span(positions: &[Position]) -> f64 {
    let mut min = [f64::INFINITY; LAYOUT_DIMENSIONS];
    let mut max = [f64::NEG_INFINITY; LAYOUT_DIMENSIONS];
    for pos in positions {
        for (axis, value) in pos.to_array().into_iter().enumerate() {
            min[axis] = min[axis].min(value);
            max[axis] = max[axis].max(value);
        }
    }
    (0..LAYOUT_DIMENSIONS).map(|axis| max[axis] - min[axis]).fold(0.0, f64::max)
}

/// Center on the mean and scale so the largest coordinate is `scale`.
fn rescale(positions: &mut [Position], scale: f64) {
    if positions.is_empty() {
        return;
    }
    let sum = positions
        .iter()
        .fold(Position::ORIGIN, |acc, &pos| acc + pos);
    let mean = sum * (1.0 / positions.len() as f64);
    for pos in positions.iter_mut() {
        *pos = *pos - mean;
    }

    let limit = positions.iter().map(|p| p.max_abs()).fold(0.0, f64::max);
    if limit > 0.0 {
        let factor = scale / limit;
        for pos in positions.iter_mut() {
            *pos = *pos * factor;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
