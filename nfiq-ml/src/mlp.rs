//! Feedforward MLP classifier
//!
//! Evaluates a single-hidden-layer perceptron stored in the legacy packed
//! weight layout and picks the winning output class.
//!
//! ## Weight Layout
//!
//! All parameters live in one flat buffer, segmented in this order:
//!
//! ```text
//! | W1: n_hidden * n_inputs | B1: n_hidden | W2: n_outputs * n_hidden | B2: n_outputs |
//! ```
//!
//! The weight from input `i` to hidden unit `j` is `W1[i + j * n_inputs]`, and
//! from hidden unit `j` to output `k` is `W2[j + k * n_hidden]`. In other words
//! each unit's incoming weights are contiguous, which is what [`LayerView`]
//! exposes. The flat layout is what weight files store and must not change.
//!
//! ## Evaluation
//!
//! ```text
//! hidden[j] = f_hid(B1[j] + sum_i x[i] * W1[i + j*n_inputs])
//! output[k] = f_out(B2[k] + sum_j hidden[j] * W2[j + k*n_hidden])
//! class     = leftmost argmax_k output[k]
//! ```
//!
//! Every configuration problem is reported before any arithmetic runs.

use alloc::vec::Vec;

use nfiq_core::constants::MAX_HIDDEN_NODES;
use nfiq_core::{NfiqError, NfiqResult};

use crate::activation::ActivationFunction;

/// Network shape and activation choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct MlpConfig {
    /// Input width
    pub n_inputs: usize,
    /// Hidden units
    pub n_hidden: usize,
    /// Output classes
    pub n_outputs: usize,
    /// Hidden layer activation
    pub hidden_activation: ActivationFunction,
    /// Output layer activation
    pub output_activation: ActivationFunction,
}

impl MlpConfig {
    /// Build a configuration from legacy numeric activation codes
    pub fn from_codes(
        n_inputs: usize,
        n_hidden: usize,
        n_outputs: usize,
        hidden_code: i32,
        output_code: i32,
    ) -> NfiqResult<Self> {
        let config = Self {
            n_inputs,
            n_hidden,
            n_outputs,
            hidden_activation: ActivationFunction::from_code(hidden_code)?,
            output_activation: ActivationFunction::from_code(output_code)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check dimensions are positive and the hidden layer is within the cap
    pub fn validate(&self) -> NfiqResult<()> {
        if self.n_hidden > MAX_HIDDEN_NODES {
            return Err(NfiqError::HiddenLayerTooLarge {
                requested: self.n_hidden,
                max: MAX_HIDDEN_NODES,
            });
        }
        if self.n_inputs == 0 || self.n_hidden == 0 || self.n_outputs == 0 {
            return Err(NfiqError::Configuration {
                reason: "network dimensions must be positive",
            });
        }
        Ok(())
    }

    /// Length of the packed weight buffer for this shape
    pub fn weight_count(&self) -> usize {
        self.n_hidden * self.n_inputs + self.n_hidden + self.n_outputs * self.n_hidden + self.n_outputs
    }
}

/// Packed network parameters plus the shape they belong to
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct MlpWeights {
    /// Network shape
    pub config: MlpConfig,
    /// W1, B1, W2, B2 concatenated
    pub values: Vec<f64>,
}

impl MlpWeights {
    /// Pair a packed buffer with its shape, checking the length
    pub fn new(config: MlpConfig, values: Vec<f64>) -> NfiqResult<Self> {
        let weights = Self { config, values };
        weights.validate()?;
        Ok(weights)
    }

    /// Check the shape and that the buffer length matches it
    pub fn validate(&self) -> NfiqResult<()> {
        self.config.validate()?;
        let expected = self.config.weight_count();
        if self.values.len() != expected {
            return Err(NfiqError::DimensionMismatch {
                what: "mlp weights",
                expected,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    /// Split the buffer into its two layers, validating the shape first
    pub fn layers(&self) -> NfiqResult<(LayerView<'_>, LayerView<'_>)> {
        self.validate()?;
        Ok(self.split_layers())
    }

    // Caller guarantees the buffer length matches the config
    fn split_layers(&self) -> (LayerView<'_>, LayerView<'_>) {
        let MlpConfig { n_inputs, n_hidden, n_outputs, .. } = self.config;
        let (w1, rest) = self.values.split_at(n_hidden * n_inputs);
        let (b1, rest) = rest.split_at(n_hidden);
        let (w2, b2) = rest.split_at(n_outputs * n_hidden);
        (
            LayerView { weights: w1, biases: b1, fan_in: n_inputs },
            LayerView { weights: w2, biases: b2, fan_in: n_hidden },
        )
    }
}

/// Shaped view of one fully connected layer inside the packed buffer
#[derive(Debug, Clone, Copy)]
pub struct LayerView<'a> {
    weights: &'a [f64],
    biases: &'a [f64],
    fan_in: usize,
}

impl<'a> LayerView<'a> {
    /// Number of units in this layer
    pub fn units(&self) -> usize {
        self.biases.len()
    }

    /// Number of inputs feeding each unit
    pub fn fan_in(&self) -> usize {
        self.fan_in
    }

    /// Weight from input `from` into unit `to`
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        self.weights[from + to * self.fan_in]
    }

    /// Incoming weights of unit `unit`
    pub fn incoming(&self, unit: usize) -> &'a [f64] {
        &self.weights[unit * self.fan_in..(unit + 1) * self.fan_in]
    }

    /// Bias of unit `unit`
    pub fn bias(&self, unit: usize) -> f64 {
        self.biases[unit]
    }

    /// Write pre-activation sums for `input` into `out`
    fn forward(&self, input: &[f64], out: &mut [f64]) {
        for (unit, slot) in out.iter_mut().enumerate() {
            let mut acc = self.biases[unit];
            for (&x, &w) in input.iter().zip(self.incoming(unit)) {
                acc += x * w;
            }
            *slot = acc;
        }
    }
}

/// Winning class and the raw activations behind it
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Zero-based index of the highest output
    pub hyp_class: usize,
    /// Activation of the winning output
    pub confidence: f64,
    /// Every output activation
    pub outputs: Vec<f64>,
}

/// Stateless MLP evaluator over validated weights.
///
/// Holds no per-call state, so one classifier can serve many threads.
#[derive(Debug, Clone, PartialEq)]
pub struct MlpClassifier {
    weights: MlpWeights,
}

impl MlpClassifier {
    /// Validate `weights` and wrap them
    pub fn new(weights: MlpWeights) -> NfiqResult<Self> {
        weights.validate().map_err(|err| {
            log_warn!("rejecting classifier weights: {}", err);
            err
        })?;
        Ok(Self { weights })
    }

    // Caller guarantees `weights` already passed validation
    pub(crate) fn from_validated(weights: MlpWeights) -> Self {
        Self { weights }
    }

    /// Network shape
    pub fn config(&self) -> &MlpConfig {
        &self.weights.config
    }

    /// Underlying packed weights
    pub fn weights(&self) -> &MlpWeights {
        &self.weights
    }

    /// Run the network on `input` and pick the winning class
    pub fn classify(&self, input: &[f64]) -> NfiqResult<Classification> {
        let config = &self.weights.config;
        if input.len() != config.n_inputs {
            return Err(NfiqError::DimensionMismatch {
                what: "classifier input",
                expected: config.n_inputs,
                actual: input.len(),
            });
        }

        let (first, second) = self.weights.split_layers();

        let mut hidden: heapless::Vec<f64, MAX_HIDDEN_NODES> = heapless::Vec::new();
        hidden.resize(config.n_hidden, 0.0).map_err(|_| NfiqError::HiddenLayerTooLarge {
            requested: config.n_hidden,
            max: MAX_HIDDEN_NODES,
        })?;
        first.forward(input, &mut hidden);
        config.hidden_activation.apply(&mut hidden);

        let mut outputs = alloc::vec![0.0; config.n_outputs];
        second.forward(&hidden, &mut outputs);
        config.output_activation.apply(&mut outputs);

        let hyp_class = argmax(&outputs);
        Ok(Classification {
            hyp_class,
            confidence: outputs[hyp_class],
            outputs,
        })
    }
}

/// Index of the largest value; ties go to the lowest index
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// One-shot evaluation from raw legacy parameters.
///
/// Activation codes, hidden-layer cap and buffer lengths are all checked
/// before anything is computed.
pub fn run_mlp(
    config: MlpConfig,
    weights: &[f64],
    input: &[f64],
) -> NfiqResult<Classification> {
    MlpClassifier::new(MlpWeights::new(config, weights.to_vec())?)?.classify(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn linear_config(n_inputs: usize, n_hidden: usize, n_outputs: usize) -> MlpConfig {
        MlpConfig {
            n_inputs,
            n_hidden,
            n_outputs,
            hidden_activation: ActivationFunction::Linear,
            output_activation: ActivationFunction::Linear,
        }
    }

    #[test]
    fn two_input_linear_network() {
        // W1=[1,1] B1=[0] W2=[1,-1] B2=[0,0]
        let weights = [1.0, 1.0, 0.0, 1.0, -1.0, 0.0, 0.0];
        let result = run_mlp(linear_config(2, 1, 2), &weights, &[1.0, 1.0]).unwrap();
        assert_eq!(result.outputs, vec![0.125, -0.125]);
        assert_eq!(result.hyp_class, 0);
        assert_eq!(result.confidence, 0.125);
    }

    #[test]
    fn weight_indexing_follows_packed_layout() {
        // 2 inputs, 2 hidden, 2 outputs; distinct weights expose any transposition
        let config = linear_config(2, 2, 2);
        let values = vec![
            1.0, 2.0, // hidden 0 <- inputs 0,1
            3.0, 4.0, // hidden 1 <- inputs 0,1
            0.5, -0.5, // B1
            1.0, 0.0, // output 0 <- hidden 0,1
            0.0, 1.0, // output 1 <- hidden 0,1
            0.0, 0.0, // B2
        ];
        let weights = MlpWeights::new(config, values).unwrap();
        let (w1, w2) = weights.layers().unwrap();
        assert_eq!(w1.weight(1, 0), 2.0);
        assert_eq!(w1.weight(0, 1), 3.0);
        assert_eq!(w2.weight(1, 1), 1.0);

        // hidden = 0.25 * [0.5 + 1 + 2*2, -0.5 + 3 + 4*2] = [1.375, 2.625]
        let result = MlpClassifier::new(weights).unwrap().classify(&[1.0, 2.0]).unwrap();
        assert_eq!(result.outputs, vec![0.25 * 1.375, 0.25 * 2.625]);
        assert_eq!(result.hyp_class, 1);
    }

    #[test]
    fn layers_reject_short_buffer() {
        let weights = MlpWeights { config: linear_config(2, 1, 2), values: vec![1.0, 1.0] };
        assert!(matches!(
            weights.layers(),
            Err(NfiqError::DimensionMismatch { expected: 7, actual: 2, .. })
        ));
    }

    #[test]
    fn ties_pick_lowest_index() {
        assert_eq!(argmax(&[0.3, 0.7, 0.7, 0.1]), 1);
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[-1.0]), 0);
    }

    #[test]
    fn hidden_cap_checked_first() {
        let mut config = linear_config(2, MAX_HIDDEN_NODES + 1, 2);
        let err = MlpWeights::new(config, vec![]).unwrap_err();
        assert!(matches!(err, NfiqError::HiddenLayerTooLarge { .. }));

        config.n_hidden = MAX_HIDDEN_NODES;
        let values = vec![0.0; config.weight_count()];
        let result = run_mlp(config, &values, &[0.0, 0.0]).unwrap();
        assert_eq!(result.outputs, vec![0.0, 0.0]);
    }

    #[test]
    fn bad_activation_code_rejected() {
        assert_eq!(
            MlpConfig::from_codes(2, 1, 2, 0, 7),
            Err(NfiqError::UnsupportedActivation { code: 7 })
        );
        assert!(MlpConfig::from_codes(2, 1, 2, 1, 2).is_ok());
    }

    #[test]
    fn length_mismatches_rejected() {
        let config = linear_config(2, 1, 2);
        assert!(matches!(
            MlpWeights::new(config, vec![0.0; 6]),
            Err(NfiqError::DimensionMismatch { expected: 7, actual: 6, .. })
        ));
        let classifier = MlpClassifier::new(MlpWeights::new(config, vec![0.0; 7]).unwrap()).unwrap();
        assert!(classifier.classify(&[1.0]).is_err());
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(linear_config(0, 1, 1).validate().is_err());
        assert!(linear_config(1, 0, 1).validate().is_err());
        assert!(linear_config(1, 1, 0).validate().is_err());
    }
}
