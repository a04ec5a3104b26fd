//! Block quality map
//!
//! The detector divides the image into blocks and grades each one from 0
//! (background) to 4 (clean ridge flow). The map is produced once per image
//! and only read afterwards.

use alloc::vec::Vec;

use crate::constants::{BACKGROUND_LEVEL, MAX_QUALITY_LEVEL, QUALITY_LEVELS};
use crate::errors::{NfiqError, NfiqResult};

/// Row-major grid of quality levels
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawQualityMap"))]
pub struct QualityMap {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

/// Unchecked wire form, validated through [`QualityMap::new`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawQualityMap {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawQualityMap> for QualityMap {
    type Error = NfiqError;

    fn try_from(raw: RawQualityMap) -> NfiqResult<Self> {
        Self::new(raw.width, raw.height, raw.cells)
    }
}

impl QualityMap {
    /// Create a map from row-major cells.
    ///
    /// Fails when the cell count does not match `width * height` or when any
    /// level exceeds 4.
    pub fn new(width: usize, height: usize, cells: Vec<u8>) -> NfiqResult<Self> {
        let expected = width.checked_mul(height).ok_or(NfiqError::InvalidInput {
            reason: "quality map dimensions overflow",
        })?;
        if cells.len() != expected {
            return Err(NfiqError::DimensionMismatch {
                what: "quality map cells",
                expected,
                actual: cells.len(),
            });
        }
        if cells.iter().any(|&level| level > MAX_QUALITY_LEVEL) {
            return Err(NfiqError::InvalidInput {
                reason: "quality level above 4",
            });
        }
        Ok(Self { width, height, cells })
    }

    /// Map with every cell set to `level` (clamped to 4)
    pub fn filled(width: usize, height: usize, level: u8) -> Self {
        Self {
            width,
            height,
            cells: alloc::vec![level.min(MAX_QUALITY_LEVEL); width * height],
        }
    }

    /// Width in blocks
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in blocks
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a zero-area map
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Level at block `(x, y)`, if inside the map
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    /// Row-major cell levels
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Count of cells at each level 0..=4
    pub fn histogram(&self) -> [usize; QUALITY_LEVELS] {
        let mut hist = [0usize; QUALITY_LEVELS];
        for &level in &self.cells {
            hist[level as usize] += 1;
        }
        hist
    }

    /// Number of non-background cells
    pub fn foreground(&self) -> usize {
        self.cells.iter().filter(|&&level| level != BACKGROUND_LEVEL).count()
    }
}
