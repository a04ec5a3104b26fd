//! MLP quality classifier and scoring pipeline for NFIQ
//!
//! ## Overview
//!
//! This crate turns the normalized feature vector produced by `nfiq-core`
//! into an NFIQ score from 1 (best) to 5 (worst):
//!
//! ```text
//! image → detector → minutiae + quality map → features → z-norm → MLP → score
//! ```
//!
//! The classifier is a single-hidden-layer perceptron evaluated over a packed
//! weight buffer. The buffer layout, activation definitions and tie-breaking
//! rule are all part of a legacy numeric contract: weight files trained for
//! the original engine load unchanged and produce identical scores.
//!
//! ## Parameters
//!
//! Population statistics and classifier weights travel together as an
//! [`NfiqParams`] set. An embedded default set ships with the crate; callers
//! can load their own from JSON or from a legacy flat weight file. Sets are
//! immutable once loaded and carry no global state, so one pipeline can serve
//! many threads.
//!
//! ## Memory Model
//!
//! ```text
//! Hidden activations: fixed-capacity stack buffer (≤ 1000 units)
//! Output activations: one small heap vector per call
//! Feature vector:     11 × f64 on the stack
//! ```
//!
//! ## Example
//!
//! ```rust
//! use nfiq_ml::{MlpClassifier, MlpConfig, MlpWeights, ActivationFunction};
//!
//! let config = MlpConfig {
//!     n_inputs: 2,
//!     n_hidden: 1,
//!     n_outputs: 2,
//!     hidden_activation: ActivationFunction::Linear,
//!     output_activation: ActivationFunction::Linear,
//! };
//! let weights = MlpWeights::new(config, vec![1.0, 1.0, 0.0, 1.0, -1.0, 0.0, 0.0]).unwrap();
//! let result = MlpClassifier::new(weights).unwrap().classify(&[1.0, 1.0]).unwrap();
//! assert_eq!(result.hyp_class, 0);
//! assert_eq!(result.confidence, 0.125);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod activation;
pub mod defaults;
pub mod mlp;
pub mod params;
pub mod pipeline;

pub use activation::ActivationFunction;
pub use mlp::{argmax, run_mlp, Classification, LayerView, MlpClassifier, MlpConfig, MlpWeights};
pub use params::NfiqParams;
pub use pipeline::{
    compute_quality, compute_quality_with_params, PipelineConfig, PipelineState, QualityPipeline,
    QualityPipelineBuilder, QualityReport, QualityStatus,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
