//! Activation functions
//!
//! Scalar activations used by the MLP classifier, each with its derivative.
//! Inference only needs the value; derivatives are kept so training tools can
//! share the exact same definitions.
//!
//! ```text
//! LINEAR    f(x) = 0.25 x                  f'(x) = 0.25
//! SIGMOID   f(x) = 1 / (1 + e^-x)          f'(x) = f(x) (1 - f(x))
//!           f(x) = 0 for x < -1e6
//! SINUSOID  f(x) = 0.5 (1 + sin(0.5 x))    f'(x) = 0.25 cos(0.5 x)
//! ```

use core::fmt;

use nfiq_core::constants::SIGMOID_MIN_INPUT;
use nfiq_core::{NfiqError, NfiqResult};

/// Activation function with its legacy numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationFunction {
    /// Scaled identity
    Linear = 0,
    /// Logistic sigmoid
    Sigmoid = 1,
    /// Shifted, scaled sine
    Sinusoid = 2,
}

impl ActivationFunction {
    /// Legacy numeric code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Parse a legacy numeric code
    pub fn from_code(code: i32) -> NfiqResult<Self> {
        match code {
            0 => Ok(Self::Linear),
            1 => Ok(Self::Sigmoid),
            2 => Ok(Self::Sinusoid),
            _ => Err(NfiqError::UnsupportedActivation { code }),
        }
    }

    /// Function value at `x`
    #[inline]
    pub fn value(self, x: f64) -> f64 {
        match self {
            Self::Linear => linear(x),
            Self::Sigmoid => sigmoid(x),
            Self::Sinusoid => sinusoid(x),
        }
    }

    /// Derivative at `x`
    #[inline]
    pub fn derivative(self, x: f64) -> f64 {
        self.evaluate(x).1
    }

    /// Value and derivative at `x`
    pub fn evaluate(self, x: f64) -> (f64, f64) {
        match self {
            Self::Linear => (linear(x), 0.25),
            Self::Sigmoid => {
                let v = sigmoid(x);
                (v, v * (1.0 - v))
            }
            Self::Sinusoid => (sinusoid(x), 0.25 * libm::cos(0.5 * x)),
        }
    }

    /// Apply the function to every element in place
    pub fn apply(self, values: &mut [f64]) {
        for v in values {
            *v = self.value(*v);
        }
    }
}

impl TryFrom<i32> for ActivationFunction {
    type Error = NfiqError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::Sigmoid => "sigmoid",
            Self::Sinusoid => "sinusoid",
        };
        f.write_str(name)
    }
}

/// `0.25 x`
#[inline]
pub fn linear(x: f64) -> f64 {
    0.25 * x
}

/// Logistic sigmoid, flushed to zero far below the origin
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    if x < SIGMOID_MIN_INPUT {
        return 0.0;
    }
    1.0 / (1.0 + libm::exp(-x))
}

/// `0.5 (1 + sin(0.5 x))`
#[inline]
pub fn sinusoid(x: f64) -> f64 {
    0.5 * (1.0 + libm::sin(0.5 * x))
}
