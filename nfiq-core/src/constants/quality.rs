//! Quality Map Levels and Score Range
//!
//! The external detector grades every block of the fingerprint image into one
//! of five levels. Level 0 marks background with no usable ridge flow; levels
//! 1 through 4 are increasingly clean foreground.

// ===== QUALITY MAP =====

/// Number of distinct quality-map levels (0 through 4).
pub const QUALITY_LEVELS: usize = 5;

/// Highest valid quality-map level.
pub const MAX_QUALITY_LEVEL: u8 = 4;

/// Quality-map level of background blocks.
///
/// Cells at this level are excluded from the foreground count and from the
/// quality fractions.
pub const BACKGROUND_LEVEL: u8 = 0;

// ===== SCORE RANGE =====

/// Best possible NFIQ score (class 0).
pub const BEST_SCORE: u8 = 1;

/// Worst possible NFIQ score (class 4).
///
/// Also the sentinel score reported for degenerate images.
pub const WORST_SCORE: u8 = 5;

/// Confidence reported alongside the sentinel score for degenerate images.
pub const SENTINEL_CONFIDENCE: f64 = 1.0;

// ===== DEGENERATE INPUT =====

/// Minutiae count at or below which an image is not classified.
///
/// An image with `count <= MIN_MINUTIAE` short-circuits to the worst score
/// before feature extraction runs.
pub const MIN_MINUTIAE: usize = 5;
