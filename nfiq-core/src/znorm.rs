//! Z-normalization against population statistics
//!
//! Every feature is standardized as `(x - mean) / stddev` before it reaches
//! the classifier. The statistics come from a reference population and are
//! loaded once, then shared read-only.
//!
//! A zero standard deviation is not guarded: the division produces
//! infinities or NaN exactly as the legacy engine did.

use alloc::vec::Vec;

use crate::errors::{NfiqError, NfiqResult};
use crate::features::FeatureVector;

/// Per-feature population statistics
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZNormParams {
    /// Population mean per feature
    pub means: Vec<f64>,
    /// Population (sample) standard deviation per feature
    pub stddevs: Vec<f64>,
}

impl ZNormParams {
    /// Build from parallel arrays, which must have equal length
    pub fn new(means: Vec<f64>, stddevs: Vec<f64>) -> NfiqResult<Self> {
        let params = Self { means, stddevs };
        params.validate()?;
        Ok(params)
    }

    /// Number of coefficients covered
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// True when no coefficients are present
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Check the parallel arrays agree in length
    pub fn validate(&self) -> NfiqResult<()> {
        if self.means.len() != self.stddevs.len() {
            return Err(NfiqError::DimensionMismatch {
                what: "znorm stddevs",
                expected: self.means.len(),
                actual: self.stddevs.len(),
            });
        }
        Ok(())
    }

    /// Normalize a feature vector in place
    pub fn normalize(&self, features: &mut FeatureVector) -> NfiqResult<()> {
        normalize(features.as_mut_slice(), &self.means, &self.stddevs)
    }

    /// Undo [`normalize`](Self::normalize) in place
    pub fn denormalize(&self, features: &mut FeatureVector) -> NfiqResult<()> {
        denormalize(features.as_mut_slice(), &self.means, &self.stddevs)
    }
}

fn check_lengths(vector: &[f64], means: &[f64], stddevs: &[f64]) -> NfiqResult<()> {
    if means.len() != vector.len() {
        return Err(NfiqError::DimensionMismatch {
            what: "znorm means",
            expected: vector.len(),
            actual: means.len(),
        });
    }
    if stddevs.len() != vector.len() {
        return Err(NfiqError::DimensionMismatch {
            what: "znorm stddevs",
            expected: vector.len(),
            actual: stddevs.len(),
        });
    }
    Ok(())
}

/// Standardize `vector` in place: `v[i] = (v[i] - means[i]) / stddevs[i]`.
///
/// Lengths are checked before anything is written.
pub fn normalize(vector: &mut [f64], means: &[f64], stddevs: &[f64]) -> NfiqResult<()> {
    check_lengths(vector, means, stddevs)?;
    for ((v, &mean), &stddev) in vector.iter_mut().zip(means).zip(stddevs) {
        *v = (*v - mean) / stddev;
    }
    Ok(())
}

/// Inverse of [`normalize`]: `v[i] = v[i] * stddevs[i] + means[i]`.
pub fn denormalize(vector: &mut [f64], means: &[f64], stddevs: &[f64]) -> NfiqResult<()> {
    check_lengths(vector, means, stddevs)?;
    for ((v, &mean), &stddev) in vector.iter_mut().zip(means).zip(stddevs) {
        *v = *v * stddev + mean;
    }
    Ok(())
}

/// Compute per-column mean and sample standard deviation.
///
/// Offline utility for building [`ZNormParams`] from a training population.
/// Uses the one-pass form `(sum_sq - sum^2 / n) / (n - 1)` for variance.
/// Needs at least two rows, all of the same width.
pub fn compute_stats<R: AsRef<[f64]>>(rows: &[R]) -> NfiqResult<ZNormParams> {
    if rows.len() < 2 {
        return Err(NfiqError::InvalidInput {
            reason: "need at least two feature vectors for statistics",
        });
    }

    let width = rows[0].as_ref().len();
    let mut sums = alloc::vec![0.0f64; width];
    let mut sums_sq = alloc::vec![0.0f64; width];

    for row in rows {
        let row = row.as_ref();
        if row.len() != width {
            return Err(NfiqError::DimensionMismatch {
                what: "training row",
                expected: width,
                actual: row.len(),
            });
        }
        for ((sum, sum_sq), &x) in sums.iter_mut().zip(sums_sq.iter_mut()).zip(row) {
            *sum += x;
            *sum_sq += x * x;
        }
    }

    let n = rows.len() as f64;
    let means = sums.iter().map(|&sum| sum / n).collect();
    let stddevs = sums
        .iter()
        .zip(&sums_sq)
        .map(|(&sum, &sum_sq)| libm::sqrt((sum_sq - (sum * sum) / n) / (n - 1.0)))
        .collect();

    Ok(ZNormParams { means, stddevs })
}

/// [`compute_stats`] over extracted feature vectors
pub fn compute_feature_stats(vectors: &[FeatureVector]) -> NfiqResult<ZNormParams> {
    let rows: Vec<&[f64]> = vectors.iter().map(FeatureVector::as_slice).collect();
    compute_stats(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn stats_two_rows() {
        let stats = compute_stats(&[vec![2.0], vec![4.0]]).unwrap();
        assert_eq!(stats.means, vec![3.0]);
        assert!((stats.stddevs[0] - 1.414_213_56).abs() < 1e-8);
    }

    #[test]
    fn stats_need_two_rows() {
        let err = compute_stats(&[vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, NfiqError::InvalidInput { .. }));
        let empty: [Vec<f64>; 0] = [];
        assert!(compute_stats(&empty).is_err());
    }

    #[test]
    fn stats_reject_ragged_rows() {
        let err = compute_stats(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, NfiqError::DimensionMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn normalize_in_place() {
        let mut v = [10.0, 0.0];
        normalize(&mut v, &[4.0, 1.0], &[2.0, 0.5]).unwrap();
        assert_eq!(v, [3.0, -2.0]);
    }

    #[test]
    fn normalize_rejects_mismatch_without_writing() {
        let mut v = [10.0, 0.0];
        assert!(normalize(&mut v, &[4.0], &[2.0, 0.5]).is_err());
        assert!(normalize(&mut v, &[4.0, 1.0], &[2.0]).is_err());
        assert_eq!(v, [10.0, 0.0]);
    }

    #[test]
    fn zero_stddev_propagates() {
        let mut v = [1.0, 0.0];
        normalize(&mut v, &[0.0, 0.0], &[0.0, 0.0]).unwrap();
        assert!(v[0].is_infinite());
        assert!(v[1].is_nan());
    }

    #[test]
    fn params_validate_lengths() {
        assert!(ZNormParams::new(vec![0.0; 11], vec![1.0; 10]).is_err());
        assert!(ZNormParams::new(vec![0.0; 11], vec![1.0; 11]).is_ok());
    }
}
