//! Classifier Limits
//!
//! Dimension limits and numeric sentinels shared by the MLP engine.

/// Hard cap on the number of hidden units.
///
/// Networks requesting more are rejected before any computation, matching the
/// fixed-size scratch buffer the legacy engine used.
pub const MAX_HIDDEN_NODES: usize = 1000;

/// Inputs below this value make the sigmoid return exactly 0.0.
///
/// Keeps `exp(-x)` from overflowing for hugely negative activations.
pub const SIGMOID_MIN_INPUT: f64 = -1.0e6;

/// Number of NFIQ quality classes (scores 1 through 5).
pub const NUM_QUALITY_CLASSES: usize = 5;
