//! Embedded default parameter set
//!
//! Version `nfiq-dflt-1`. An 11-4-5 sigmoid network over Z-normalized
//! features.
//!
//! Every hidden unit sees the same weighted quality index `q` and fires at a
//! different cut point (-1.5, -0.5, 0.5, 1.5). Output `k` responds to the band
//! between two adjacent cuts, so class 0 wins when all four units fire and
//! class 4 wins when none do.
//!
//! This is a hand-built placeholder, not the trained weights or statistics of
//! the legacy NFIQ engine. Scores from it rank images sensibly but do not
//! reproduce legacy scores. Load a trained set through
//! [`NfiqParams::from_json`](crate::NfiqParams::from_json) or
//! [`MlpWeights::from_legacy_text`](crate::MlpWeights::from_legacy_text) when
//! legacy agreement matters.

use nfiq_core::constants::{NUM_FEATURES, NUM_QUALITY_CLASSES};

/// Identifier of the embedded parameter set
pub const DEFAULT_PARAMS_VERSION: &str = "nfiq-dflt-1";

/// Hidden units in the default network
pub const N_HIDDEN: usize = 4;

/// Reference population means, in feature order
pub const ZNORM_MEANS: [f64; NUM_FEATURES] = [
    1500.0, 60.0, 45.0, 35.0, 25.0, 15.0, 6.0, 0.10, 0.20, 0.35, 0.35,
];

/// Reference population standard deviations, in feature order
pub const ZNORM_STDDEVS: [f64; NUM_FEATURES] = [
    600.0, 25.0, 20.0, 16.0, 12.0, 9.0, 5.0, 0.08, 0.12, 0.15, 0.20,
];

const WEIGHT_COUNT: usize =
    N_HIDDEN * NUM_FEATURES + N_HIDDEN + NUM_QUALITY_CLASSES * N_HIDDEN + NUM_QUALITY_CLASSES;

/// Packed W1, B1, W2, B2
pub const MLP_WEIGHTS: [f64; WEIGHT_COUNT] = [
    // W1: hidden 0..4, each the quality index scaled by 4
    1.2, 0.4, 0.2, 0.2, 0.4, 0.6, 0.8, -1.2, -0.4, 0.4, 1.2,
    1.2, 0.4, 0.2, 0.2, 0.4, 0.6, 0.8, -1.2, -0.4, 0.4, 1.2,
    1.2, 0.4, 0.2, 0.2, 0.4, 0.6, 0.8, -1.2, -0.4, 0.4, 1.2,
    1.2, 0.4, 0.2, 0.2, 0.4, 0.6, 0.8, -1.2, -0.4, 0.4, 1.2,
    // B1: -4 * cut
    6.0, 2.0, -2.0, -6.0,
    // W2: output 0 (best) .. output 4 (worst)
    0.0, 0.0, 0.0, 6.0,
    0.0, 0.0, 6.0, -6.0,
    0.0, 6.0, -6.0, 0.0,
    6.0, -6.0, 0.0, 0.0,
    -6.0, 0.0, 0.0, 0.0,
    // B2
    -3.0, -3.0, -3.0, -3.0, 3.0,
];
