//! NFIQ feature extraction
//!
//! Turns a minutiae list and a block quality map into the 11-element feature
//! vector the quality classifier was trained on.
//!
//! ## Feature Layout
//!
//! ```text
//! idx  feature
//! ---  ---------------------------------------------
//!  0   foreground blocks (quality level > 0)
//!  1   minutiae count
//!  2   minutiae with reliability > 0.5
//!  3   minutiae with reliability > 0.6
//!  4   minutiae with reliability > 0.7
//!  5   minutiae with reliability > 0.8
//!  6   minutiae with reliability > 0.9
//!  7   level-1 blocks / foreground
//!  8   level-2 blocks / foreground
//!  9   level-3 blocks / foreground
//! 10   level-4 blocks / foreground
//! ```
//!
//! Positions are fixed. The classifier weights address features by index, so
//! reordering silently changes every score.
//!
//! ## Degenerate Maps
//!
//! A map with no foreground yields an all-zero vector and
//! [`ExtractionOutcome::EmptyImage`]. That is a valid result, not an error.
//!
//! ```rust
//! use nfiq_core::{extract_features, ExtractionOutcome, Minutiae, QualityMap};
//!
//! let map = QualityMap::filled(8, 8, 0);
//! let extraction = extract_features(&Minutiae::new(), &map);
//! assert_eq!(extraction.outcome, ExtractionOutcome::EmptyImage);
//! assert!(extraction.features.iter().all(|&f| f == 0.0));
//! ```

use core::ops::{Index, IndexMut};

use crate::constants::features::{
    FEATURE_NAMES, FOREGROUND, MINUTIAE_COUNT, QUALITY_FRACTION_1, REL_BIN_50,
};
use crate::constants::{NUM_FEATURES, NUM_RELIABILITY_BINS, QUALITY_LEVELS, RELIABILITY_THRESHOLDS};
use crate::minutiae::Minutia;
use crate::quality_map::QualityMap;

/// Fixed-length NFIQ feature vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureVector([f64; NUM_FEATURES]);

impl FeatureVector {
    /// All-zero vector
    pub const ZERO: Self = Self([0.0; NUM_FEATURES]);

    /// Wrap raw values in feature order
    pub const fn new(values: [f64; NUM_FEATURES]) -> Self {
        Self(values)
    }

    /// Values in feature order
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Mutable values in feature order
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.0
    }

    /// Copy out the raw array
    pub fn to_array(&self) -> [f64; NUM_FEATURES] {
        self.0
    }

    /// Iterate values in feature order
    pub fn iter(&self) -> core::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Pairs of `(name, value)` for diagnostics
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }

    /// Reliability bin counts, features 2 through 6
    pub fn reliability_bins(&self) -> [f64; NUM_RELIABILITY_BINS] {
        let mut bins = [0.0; NUM_RELIABILITY_BINS];
        bins.copy_from_slice(&self.0[REL_BIN_50..REL_BIN_50 + NUM_RELIABILITY_BINS]);
        bins
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for FeatureVector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl From<[f64; NUM_FEATURES]> for FeatureVector {
    fn from(values: [f64; NUM_FEATURES]) -> Self {
        Self(values)
    }
}

/// How feature extraction ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Features computed normally
    Extracted,
    /// Quality map has no foreground; features are all zero
    EmptyImage,
}

/// Feature vector plus the outcome that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureExtraction {
    /// Extracted (or zeroed) features
    pub features: FeatureVector,
    /// Whether the map had any foreground
    pub outcome: ExtractionOutcome,
}

impl FeatureExtraction {
    /// True when the map had no foreground
    pub fn is_empty_image(&self) -> bool {
        self.outcome == ExtractionOutcome::EmptyImage
    }
}

/// Count minutiae per reliability bin.
///
/// Each minutia is tested against ascending thresholds and counted in every
/// bin it clears, stopping at the first threshold it fails.
pub fn reliability_bins(minutiae: &[Minutia]) -> [usize; NUM_RELIABILITY_BINS] {
    let mut bins = [0usize; NUM_RELIABILITY_BINS];
    for minutia in minutiae {
        for (bin, &threshold) in bins.iter_mut().zip(RELIABILITY_THRESHOLDS.iter()) {
            if minutia.reliability > threshold {
                *bin += 1;
            } else {
                break;
            }
        }
    }
    bins
}

/// Compute the NFIQ feature vector for one image.
///
/// Quality fractions are computed in double precision throughout.
pub fn extract_features(minutiae: &[Minutia], map: &QualityMap) -> FeatureExtraction {
    let hist: [usize; QUALITY_LEVELS] = map.histogram();
    let foreground = map.len() - hist[0];

    if foreground == 0 {
        log_debug!("quality map {}x{} has no foreground", map.width(), map.height());
        return FeatureExtraction {
            features: FeatureVector::ZERO,
            outcome: ExtractionOutcome::EmptyImage,
        };
    }

    let bins = reliability_bins(minutiae);
    let fg = foreground as f64;

    let mut features = FeatureVector::ZERO;
    features[FOREGROUND] = fg;
    features[MINUTIAE_COUNT] = minutiae.len() as f64;
    for (offset, &count) in bins.iter().enumerate() {
        features[REL_BIN_50 + offset] = count as f64;
    }
    for level in 1..QUALITY_LEVELS {
        features[QUALITY_FRACTION_1 + level - 1] = hist[level] as f64 / fg;
    }

    FeatureExtraction {
        features,
        outcome: ExtractionOutcome::Extracted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minutiae::{Direction, MinutiaType};
    use alloc::vec::Vec;

    fn minutiae(reliabilities: &[f64]) -> Vec<Minutia> {
        reliabilities
            .iter()
            .map(|&r| {
                Minutia::new(1, 1, Direction::default(), r, MinutiaType::RidgeEnding, true).unwrap()
            })
            .collect()
    }

    #[test]
    fn empty_map_zeroes_everything() {
        let map = QualityMap::filled(8, 8, 0);
        let extraction = extract_features(&minutiae(&[0.95, 0.95]), &map);
        assert!(extraction.is_empty_image());
        assert_eq!(extraction.features, FeatureVector::ZERO);
    }

    #[test]
    fn bins_use_strict_thresholds() {
        // 0.5 and 0.6 sit exactly on a threshold and do not clear it
        let bins = reliability_bins(&minutiae(&[0.5, 0.6, 0.65, 0.95, 1.0, 0.0]));
        assert_eq!(bins, [4, 3, 2, 2, 2]);
    }

    #[test]
    fn assembles_fixed_layout() {
        // 4x2 map: two background cells, levels 1,2,3,4,4,4 in foreground
        let map = QualityMap::new(4, 2, alloc::vec![0, 1, 2, 3, 4, 4, 4, 0]).unwrap();
        let extraction = extract_features(&minutiae(&[0.55, 0.75, 0.92]), &map);

        assert_eq!(extraction.outcome, ExtractionOutcome::Extracted);
        let f = extraction.features;
        assert_eq!(f[FOREGROUND], 6.0);
        assert_eq!(f[MINUTIAE_COUNT], 3.0);
        assert_eq!(f.reliability_bins(), [3.0, 2.0, 2.0, 1.0, 1.0]);
        assert_eq!(f[7], 1.0 / 6.0);
        assert_eq!(f[8], 1.0 / 6.0);
        assert_eq!(f[9], 1.0 / 6.0);
        assert_eq!(f[10], 3.0 / 6.0);
    }

    #[test]
    fn named_pairs_follow_layout() {
        let f = FeatureVector::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
        let names: Vec<_> = f.named().collect();
        assert_eq!(names[0], ("foreground", 1.0));
        assert_eq!(names[10], ("quality_fraction_4", 11.0));
    }
}
