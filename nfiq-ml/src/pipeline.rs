//! Quality scoring pipeline
//!
//! Runs detection, feature extraction, normalization and classification for
//! one image and turns the winning class into an NFIQ score.
//!
//! ## Flow
//!
//! ```text
//! Start → DetectMinutiae → CheckCount → ExtractFeatures → CheckEmpty
//!       → Normalize → Classify → Done
//!            │             │                  │
//!            ▼             ▼                  ▼
//!      Detection err   TooFewMinutiae     EmptyImage
//!                      (score 5, 1.0)     (score 5, 1.0)
//! ```
//!
//! Degenerate images are successful results with a sentinel score and a
//! non-zero status. Detector and classifier failures are errors. Nothing is
//! retried; a failed call can simply be repeated by the caller.
//!
//! ```rust
//! use nfiq_core::{Detection, DetectorParams, ImageRef, MinutiaeDetector, Minutiae, QualityMap};
//! use nfiq_ml::{QualityPipeline, QualityStatus};
//!
//! struct BlankDetector;
//!
//! impl MinutiaeDetector for BlankDetector {
//!     fn detect(&self, image: &ImageRef<'_>, _: &DetectorParams) -> Result<Detection, i32> {
//!         Ok(Detection {
//!             minutiae: Minutiae::new(),
//!             quality_map: QualityMap::filled(8, 8, 0),
//!             binarized_width: image.width,
//!             binarized_height: image.height,
//!         })
//!     }
//! }
//!
//! let pixels = vec![255u8; 64 * 64];
//! let image = ImageRef::new(&pixels, 64, 64, 8, 500).unwrap();
//! let report = QualityPipeline::new(BlankDetector).compute_quality(&image).unwrap();
//! assert_eq!(report.status, QualityStatus::TooFewMinutiae);
//! assert_eq!(report.score, 5);
//! ```

use alloc::vec::Vec;
use core::fmt;

use nfiq_core::constants::{MIN_MINUTIAE, SENTINEL_CONFIDENCE, WORST_SCORE};
use nfiq_core::errors::DETECTOR_FAILURE_CODE;
use nfiq_core::{
    extract_features, Detection, DetectorParams, FeatureExtraction, FeatureVector, ImageRef,
    MinutiaeDetector, NfiqError, NfiqResult, ZNormParams,
};

use crate::mlp::{MlpClassifier, MlpConfig, MlpWeights};
use crate::params::NfiqParams;

/// Pipeline states, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing done yet
    Start,
    /// Waiting on the external detector
    DetectMinutiae,
    /// Checking the minutiae count against the minimum
    CheckCount,
    /// Building the feature vector
    ExtractFeatures,
    /// Checking for an all-background quality map
    CheckEmpty,
    /// Z-normalizing features
    Normalize,
    /// Running the classifier
    Classify,
    /// Score produced
    Done,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How a successful scoring call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityStatus {
    /// Image was classified
    Success,
    /// Quality map had no foreground
    EmptyImage,
    /// Too few minutiae to classify
    TooFewMinutiae,
}

impl QualityStatus {
    /// Legacy status code: 0, 1 or 2
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::EmptyImage => 1,
            Self::TooFewMinutiae => 2,
        }
    }

    /// True for the sentinel outcomes
    pub fn is_degenerate(self) -> bool {
        self != Self::Success
    }
}

/// Result of scoring one image
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    /// NFIQ score, 1 (best) to 5 (worst)
    pub score: u8,
    /// Winning output activation, or 1.0 for sentinel outcomes
    pub confidence: f64,
    /// How the call ended
    pub status: QualityStatus,
    /// Un-normalized features, when extraction ran
    pub features: Option<FeatureVector>,
    /// Every classifier output, when classification ran
    pub class_outputs: Option<Vec<f64>>,
}

impl QualityReport {
    fn sentinel(status: QualityStatus, features: Option<FeatureVector>) -> Self {
        Self {
            score: WORST_SCORE,
            confidence: SENTINEL_CONFIDENCE,
            status,
            features,
            class_outputs: None,
        }
    }
}

/// Tunables that are not part of the parameter set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Images with this many minutiae or fewer are not classified
    pub min_minutiae: usize,
    /// Passed through to the detector
    pub detector_params: DetectorParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_minutiae: MIN_MINUTIAE,
            detector_params: DetectorParams::default(),
        }
    }
}

/// Scoring pipeline bound to one detector and one parameter set.
///
/// Evaluation borrows `self` immutably, so a pipeline can be shared between
/// threads whenever the detector can.
pub struct QualityPipeline<D> {
    detector: D,
    znorm: ZNormParams,
    classifier: MlpClassifier,
    version: alloc::string::String,
    config: PipelineConfig,
}

impl<D: MinutiaeDetector> QualityPipeline<D> {
    /// Pipeline using the embedded default parameters
    pub fn new(detector: D) -> Self {
        let params = NfiqParams::default_v1();
        Self {
            detector,
            znorm: params.znorm,
            classifier: MlpClassifier::from_validated(params.mlp),
            version: params.version,
            config: PipelineConfig::default(),
        }
    }

    /// Pipeline using a caller-supplied parameter set
    pub fn with_params(detector: D, params: NfiqParams) -> NfiqResult<Self> {
        Self::builder(detector).params(params).build()
    }

    /// Start configuring a pipeline
    pub fn builder(detector: D) -> QualityPipelineBuilder<D> {
        QualityPipelineBuilder::new(detector)
    }

    /// Pipeline tunables
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Identifier of the active parameter set
    pub fn params_version(&self) -> &str {
        &self.version
    }

    /// Detect, extract, normalize and classify one image
    pub fn compute_quality(&self, image: &ImageRef<'_>) -> NfiqResult<QualityReport> {
        let detection = self.detect(image)?;
        self.score_detection(&detection)
    }

    /// Score an already-detected minutiae list and quality map
    pub fn score_detection(&self, detection: &Detection) -> NfiqResult<QualityReport> {
        enter(PipelineState::CheckCount);
        let count = detection.minutiae.len();
        if count <= self.config.min_minutiae {
            log_debug!(
                "{} minutiae at or below minimum {}, reporting worst score",
                count,
                self.config.min_minutiae
            );
            return Ok(QualityReport::sentinel(QualityStatus::TooFewMinutiae, None));
        }

        enter(PipelineState::ExtractFeatures);
        let extraction = extract_features(&detection.minutiae, &detection.quality_map);

        enter(PipelineState::CheckEmpty);
        if extraction.is_empty_image() {
            log_debug!("quality map has no foreground, reporting worst score");
            return Ok(QualityReport::sentinel(QualityStatus::EmptyImage, Some(extraction.features)));
        }
        let features = extraction.features;

        enter(PipelineState::Normalize);
        let mut normalized = features;
        self.znorm.normalize(&mut normalized)?;

        enter(PipelineState::Classify);
        let classification = self.classifier.classify(normalized.as_slice()).map_err(|err| {
            log_warn!("classification failed: {}", err);
            err
        })?;

        enter(PipelineState::Done);
        let score = u8::try_from(classification.hyp_class + 1).map_err(|_| NfiqError::Configuration {
            reason: "classifier produced an out-of-range class",
        })?;
        Ok(QualityReport {
            score,
            confidence: classification.confidence,
            status: QualityStatus::Success,
            features: Some(features),
            class_outputs: Some(classification.outputs),
        })
    }

    /// Detect and extract features without normalizing or classifying.
    ///
    /// Does not apply the minimum-minutiae check.
    pub fn features_only(&self, image: &ImageRef<'_>) -> NfiqResult<FeatureExtraction> {
        let detection = self.detect(image)?;
        enter(PipelineState::ExtractFeatures);
        Ok(extract_features(&detection.minutiae, &detection.quality_map))
    }

    fn detect(&self, image: &ImageRef<'_>) -> NfiqResult<Detection> {
        enter(PipelineState::Start);
        enter(PipelineState::DetectMinutiae);
        self.detector
            .detect(image, &self.config.detector_params)
            .map_err(|code| {
                log_warn!("minutiae detection failed with code {}", code);
                let code = if code < 0 { code } else { DETECTOR_FAILURE_CODE };
                NfiqError::Detection { code }
            })
    }
}

#[inline]
fn enter(state: PipelineState) {
    log_trace!("pipeline state: {}", state);
    let _ = state;
}

/// Builder for [`QualityPipeline`]
pub struct QualityPipelineBuilder<D> {
    detector: D,
    params: Option<NfiqParams>,
    config: PipelineConfig,
}

impl<D: MinutiaeDetector> QualityPipelineBuilder<D> {
    fn new(detector: D) -> Self {
        Self {
            detector,
            params: None,
            config: PipelineConfig::default(),
        }
    }

    /// Use this parameter set instead of the embedded default
    pub fn params(mut self, params: NfiqParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Override the minimum minutiae count
    pub fn min_minutiae(mut self, min_minutiae: usize) -> Self {
        self.config.min_minutiae = min_minutiae;
        self
    }

    /// Parameters handed to the detector on every call
    pub fn detector_params(mut self, detector_params: DetectorParams) -> Self {
        self.config.detector_params = detector_params;
        self
    }

    /// Validate the parameter set and build the pipeline
    pub fn build(self) -> NfiqResult<QualityPipeline<D>> {
        let params = self.params.unwrap_or_default();
        params.validate()?;
        let NfiqParams { version, znorm, mlp } = params;
        Ok(QualityPipeline {
            detector: self.detector,
            znorm,
            classifier: MlpClassifier::new(mlp)?,
            version,
            config: self.config,
        })
    }
}

/// Score an image with the embedded default parameters.
///
/// Returns the report; use [`QualityReport::score`] and
/// [`QualityReport::confidence`] for the legacy pair.
pub fn compute_quality<D: MinutiaeDetector>(detector: D, image: &ImageRef<'_>) -> NfiqResult<QualityReport> {
    QualityPipeline::new(detector).compute_quality(image)
}

/// Score an image with caller-supplied statistics and raw network parameters.
///
/// Activation codes, hidden-layer size and every buffer length are checked
/// before the detector runs.
#[allow(clippy::too_many_arguments)]
pub fn compute_quality_with_params<D: MinutiaeDetector>(
    detector: D,
    image: &ImageRef<'_>,
    means: &[f64],
    stddevs: &[f64],
    n_inputs: usize,
    n_hidden: usize,
    n_outputs: usize,
    hidden_activation: i32,
    output_activation: i32,
    weights: &[f64],
) -> NfiqResult<QualityReport> {
    let config = MlpConfig::from_codes(n_inputs, n_hidden, n_outputs, hidden_activation, output_activation)?;
    let params = NfiqParams::new(
        "caller-supplied",
        ZNormParams::new(means.to_vec(), stddevs.to_vec())?,
        MlpWeights::new(config, weights.to_vec())?,
    )?;
    QualityPipeline::with_params(detector, params)?.compute_quality(image)
}
