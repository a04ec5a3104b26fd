//! Scoring parameter sets
//!
//! A parameter set bundles the population statistics used for
//! Z-normalization with the packed classifier weights. Sets are loaded once,
//! validated, and then only read.
//!
//! Three sources are supported:
//!
//! 1. The embedded default set ([`NfiqParams::default_v1`])
//! 2. JSON documents produced by [`NfiqParams::to_json`] (requires `std`)
//! 3. Legacy flat weight files ([`MlpWeights::from_legacy_text`])
//!
//! ## Legacy Weight File
//!
//! Whitespace-separated tokens:
//!
//! ```text
//! n_inputs n_hidden n_outputs hidden_code output_code
//! w_0 w_1 ... w_(N-1)
//! ```
//!
//! where `N = n_hidden*n_inputs + n_hidden + n_outputs*n_hidden + n_outputs`
//! and the weights follow the W1, B1, W2, B2 order.

use alloc::string::String;
use core::fmt::Write as _;

use nfiq_core::constants::{NUM_FEATURES, NUM_QUALITY_CLASSES};
use nfiq_core::{NfiqError, NfiqResult, ZNormParams};

use crate::activation::ActivationFunction;
use crate::defaults;
use crate::mlp::{MlpConfig, MlpWeights};

/// Complete parameter set for the quality pipeline
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct NfiqParams {
    /// Identifier of this parameter set
    pub version: String,
    /// Population statistics for the 11 features
    pub znorm: ZNormParams,
    /// Classifier weights
    pub mlp: MlpWeights,
}

impl NfiqParams {
    /// Assemble and validate a parameter set
    pub fn new(version: impl Into<String>, znorm: ZNormParams, mlp: MlpWeights) -> NfiqResult<Self> {
        let params = Self { version: version.into(), znorm, mlp };
        params.validate()?;
        Ok(params)
    }

    /// The embedded, versioned default set
    pub fn default_v1() -> Self {
        let config = MlpConfig {
            n_inputs: NUM_FEATURES,
            n_hidden: defaults::N_HIDDEN,
            n_outputs: NUM_QUALITY_CLASSES,
            hidden_activation: ActivationFunction::Sigmoid,
            output_activation: ActivationFunction::Sigmoid,
        };
        Self {
            version: String::from(defaults::DEFAULT_PARAMS_VERSION),
            znorm: ZNormParams {
                means: defaults::ZNORM_MEANS.to_vec(),
                stddevs: defaults::ZNORM_STDDEVS.to_vec(),
            },
            mlp: MlpWeights {
                config,
                values: defaults::MLP_WEIGHTS.to_vec(),
            },
        }
    }

    /// Check the set is usable by the quality pipeline.
    ///
    /// Beyond per-part validation this requires 11 statistics, an 11-input
    /// network and exactly five output classes, so scores stay in 1..=5.
    pub fn validate(&self) -> NfiqResult<()> {
        self.znorm.validate()?;
        if self.znorm.len() != NUM_FEATURES {
            return Err(NfiqError::DimensionMismatch {
                what: "znorm means",
                expected: NUM_FEATURES,
                actual: self.znorm.len(),
            });
        }
        self.mlp.validate()?;
        if self.mlp.config.n_inputs != NUM_FEATURES {
            return Err(NfiqError::DimensionMismatch {
                what: "classifier inputs",
                expected: NUM_FEATURES,
                actual: self.mlp.config.n_inputs,
            });
        }
        if self.mlp.config.n_outputs != NUM_QUALITY_CLASSES {
            return Err(NfiqError::DimensionMismatch {
                what: "classifier outputs",
                expected: NUM_QUALITY_CLASSES,
                actual: self.mlp.config.n_outputs,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON parameter document
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> NfiqResult<Self> {
        let params: Self = serde_json::from_str(json).map_err(|_| NfiqError::Configuration {
            reason: "malformed parameter JSON",
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Serialize to a JSON document
    #[cfg(feature = "std")]
    pub fn to_json(&self) -> NfiqResult<String> {
        serde_json::to_string_pretty(self).map_err(|_| NfiqError::Configuration {
            reason: "parameter set not serializable",
        })
    }
}

impl Default for NfiqParams {
    fn default() -> Self {
        Self::default_v1()
    }
}

fn next_token<'a, I: Iterator<Item = &'a str>>(tokens: &mut I, reason: &'static str) -> NfiqResult<&'a str> {
    tokens.next().ok_or(NfiqError::Configuration { reason })
}

fn parse_usize(token: &str) -> NfiqResult<usize> {
    token.parse().map_err(|_| NfiqError::Configuration {
        reason: "weight file header is not an unsigned integer",
    })
}

fn parse_code(token: &str) -> NfiqResult<i32> {
    token.parse().map_err(|_| NfiqError::Configuration {
        reason: "weight file activation code is not an integer",
    })
}

impl MlpWeights {
    /// Read a legacy flat weight file
    pub fn from_legacy_text(text: &str) -> NfiqResult<Self> {
        let mut tokens = text.split_whitespace();
        let n_inputs = parse_usize(next_token(&mut tokens, "weight file missing input count")?)?;
        let n_hidden = parse_usize(next_token(&mut tokens, "weight file missing hidden count")?)?;
        let n_outputs = parse_usize(next_token(&mut tokens, "weight file missing output count")?)?;
        let hidden_code = parse_code(next_token(&mut tokens, "weight file missing hidden activation")?)?;
        let output_code = parse_code(next_token(&mut tokens, "weight file missing output activation")?)?;

        let config = MlpConfig::from_codes(n_inputs, n_hidden, n_outputs, hidden_code, output_code)?;

        let values = tokens
            .map(|t| {
                t.parse::<f64>().map_err(|_| NfiqError::Configuration {
                    reason: "weight file value is not a number",
                })
            })
            .collect::<NfiqResult<alloc::vec::Vec<f64>>>()?;

        Self::new(config, values)
    }

    /// Write in the legacy flat weight file format
    pub fn to_legacy_text(&self) -> String {
        let c = &self.config;
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{} {} {} {} {}",
            c.n_inputs,
            c.n_hidden,
            c.n_outputs,
            c.hidden_activation.code(),
            c.output_activation.code()
        );
        for chunk in self.values.chunks(8) {
            let mut first = true;
            for v in chunk {
                if !first {
                    out.push(' ');
                }
                first = false;
                let _ = write!(out, "{v:?}");
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn default_set_is_valid() {
        let params = NfiqParams::default_v1();
        params.validate().unwrap();
        assert_eq!(params.version, defaults::DEFAULT_PARAMS_VERSION);
        assert_eq!(params, NfiqParams::default());
    }

    #[test]
    fn legacy_text_parses() {
        let text = "2 1 2 0 0\n1 1\n0\n1 -1\n0 0\n";
        let weights = MlpWeights::from_legacy_text(text).unwrap();
        assert_eq!(weights.config.n_inputs, 2);
        assert_eq!(weights.config.hidden_activation, ActivationFunction::Linear);
        assert_eq!(weights.values, vec![1.0, 1.0, 0.0, 1.0, -1.0, 0.0, 0.0]);
    }

    #[test]
    fn legacy_text_rejects_bad_files() {
        assert!(MlpWeights::from_legacy_text("").is_err());
        assert!(MlpWeights::from_legacy_text("2 1 2 0").is_err());
        assert_eq!(
            MlpWeights::from_legacy_text("2 1 2 0 5 1 1 0 1 -1 0 0").unwrap_err(),
            NfiqError::UnsupportedActivation { code: 5 }
        );
        assert!(matches!(
            MlpWeights::from_legacy_text("2 1 2 0 0 1 1 0 1 -1 0").unwrap_err(),
            NfiqError::DimensionMismatch { expected: 7, actual: 6, .. }
        ));
        assert!(MlpWeights::from_legacy_text("2 1 2 0 0 1 1 0 1 -1 0 x").is_err());
    }

    #[test]
    fn legacy_text_preserves_values() {
        let weights = NfiqParams::default_v1().mlp;
        let reread = MlpWeights::from_legacy_text(&weights.to_legacy_text()).unwrap();
        assert_eq!(reread, weights);
    }

    #[test]
    fn validate_rejects_wrong_shapes() {
        let mut params = NfiqParams::default_v1();
        params.znorm.means.pop();
        params.znorm.stddevs.pop();
        assert!(params.validate().is_err());

        let mut params = NfiqParams::default_v1();
        params.mlp = MlpWeights::new(
            MlpConfig { n_outputs: 4, ..params.mlp.config },
            vec![0.0; MlpConfig { n_outputs: 4, ..params.mlp.config }.weight_count()],
        )
        .unwrap();
        assert!(matches!(
            params.validate(),
            Err(NfiqError::DimensionMismatch { what: "classifier outputs", .. })
        ));
    }

    #[cfg(feature = "std")]
    #[test]
    fn json_preserves_params() {
        let params = NfiqParams::default_v1();
        let json = params.to_json().unwrap();
        assert_eq!(NfiqParams::from_json(&json).unwrap(), params);
        assert!(NfiqParams::from_json("{\"version\": 1}").is_err());
    }
}
