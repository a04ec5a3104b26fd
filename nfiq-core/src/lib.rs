//! Core data model and feature engine for NFIQ
//!
//! Turns the output of an external minutiae detector into the normalized
//! feature vector the NFIQ quality classifier consumes.
//!
//! Key constraints:
//! - Pure computation, no I/O
//! - No global state; parameters are passed in explicitly
//! - Feature order and arithmetic match the legacy engine bit for bit
//!
//! ```no_run
//! use nfiq_core::{extract_features, Minutiae, QualityMap, ZNormParams};
//!
//! let map = QualityMap::filled(32, 32, 3);
//! let minutiae = Minutiae::new();
//! let params = ZNormParams::new(vec![0.0; 11], vec![1.0; 11]).unwrap();
//!
//! let mut extraction = extract_features(&minutiae, &map);
//! params.normalize(&mut extraction.features).unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Macros for optional logging
#[cfg(feature = "log")]
#[allow(unused_macros)]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub mod constants;
pub mod errors;
pub mod features;
pub mod minutiae;
pub mod quality_map;
pub mod traits;
pub mod znorm;

// Public API
pub use errors::{NfiqError, NfiqResult};
pub use features::{
    extract_features, reliability_bins, ExtractionOutcome, FeatureExtraction, FeatureVector,
};
pub use minutiae::{Direction, Minutia, MinutiaType, Minutiae};
pub use quality_map::QualityMap;
pub use traits::{Detection, DetectorParams, ImageRef, MinutiaeDetector};
pub use znorm::{compute_feature_stats, compute_stats, denormalize, normalize, ZNormParams};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
