//! Constants for NFIQ Core
//!
//! This module centralizes every numeric value that is part of the scoring
//! contract. Changing any of them changes quality scores, so they live in one
//! place with their meaning spelled out.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Quality**: quality-map levels, score range, degenerate-outcome sentinels
//! - **Features**: feature-vector length and reliability thresholds
//! - **Classifier**: network size limits and activation sentinels

/// Quality-map levels, score range and degenerate-outcome sentinels.
pub mod quality;

/// Feature vector layout and reliability binning thresholds.
pub mod features;

/// Classifier dimension limits and activation constants.
pub mod classifier;

// Re-export commonly used constants for convenience
pub use quality::{
    QUALITY_LEVELS, MAX_QUALITY_LEVEL, BACKGROUND_LEVEL,
    MIN_MINUTIAE, BEST_SCORE, WORST_SCORE, SENTINEL_CONFIDENCE,
};

pub use features::{NUM_FEATURES, NUM_RELIABILITY_BINS, RELIABILITY_THRESHOLDS};

pub use classifier::{MAX_HIDDEN_NODES, SIGMOID_MIN_INPUT, NUM_QUALITY_CLASSES};
