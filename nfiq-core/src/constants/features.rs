//! Feature Vector Layout
//!
//! The classifier was trained on an 11-element vector with fixed positional
//! semantics. The index constants below are the only sanctioned way to address
//! individual features.

/// Length of the NFIQ feature vector.
pub const NUM_FEATURES: usize = 11;

/// Number of minutia reliability bins.
pub const NUM_RELIABILITY_BINS: usize = 5;

/// Ascending reliability thresholds.
///
/// A minutia lands in bin `t` when its reliability is strictly greater than
/// `RELIABILITY_THRESHOLDS[t]`. Counting stops at the first threshold a minutia
/// fails, which is exact because the thresholds ascend.
pub const RELIABILITY_THRESHOLDS: [f64; NUM_RELIABILITY_BINS] = [0.5, 0.6, 0.7, 0.8, 0.9];

// ===== FEATURE INDICES =====

/// Number of foreground blocks in the quality map.
pub const FOREGROUND: usize = 0;
/// Total number of detected minutiae.
pub const MINUTIAE_COUNT: usize = 1;
/// Minutiae with reliability > 0.5.
pub const REL_BIN_50: usize = 2;
/// Minutiae with reliability > 0.6.
pub const REL_BIN_60: usize = 3;
/// Minutiae with reliability > 0.7.
pub const REL_BIN_70: usize = 4;
/// Minutiae with reliability > 0.8.
pub const REL_BIN_80: usize = 5;
/// Minutiae with reliability > 0.9.
pub const REL_BIN_90: usize = 6;
/// Fraction of foreground at quality level 1.
pub const QUALITY_FRACTION_1: usize = 7;
/// Fraction of foreground at quality level 2.
pub const QUALITY_FRACTION_2: usize = 8;
/// Fraction of foreground at quality level 3.
pub const QUALITY_FRACTION_3: usize = 9;
/// Fraction of foreground at quality level 4.
pub const QUALITY_FRACTION_4: usize = 10;

/// Human-readable names, indexed like the feature vector.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "foreground",
    "minutiae_count",
    "reliability_gt_0.5",
    "reliability_gt_0.6",
    "reliability_gt_0.7",
    "reliability_gt_0.8",
    "reliability_gt_0.9",
    "quality_fraction_1",
    "quality_fraction_2",
    "quality_fraction_3",
    "quality_fraction_4",
];
