use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Numeric precision a network is stored and computed in.
///
/// Written into model files so a loader can pick the matching `Scalar` type
/// before deserializing the parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    F32,
    F64,
}

impl Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::F32 => write!(f, "f32"),
            Precision::F64 => write!(f, "f64"),
        }
    }
}

/// Floating-point type the whole engine is generic over.
///
/// Implemented for `f32` and `f64` only. Everything the network, the loader
/// and the training loop need from a number is collected here so the engine
/// is written once and instantiated per precision.
pub trait Scalar:
    Float
    + SampleUniform
    + Default
    + Debug
    + Display
    + FromStr
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Tag stored alongside persisted parameters.
    const PRECISION: Precision;

    /// Converts a literal into this precision (rounding for `f32`).
    fn lit(value: f64) -> Self;

    /// Widens to `f64` for reporting.
    fn as_f64(self) -> f64;
}

impl Scalar for f32 {
    const PRECISION: Precision = Precision::F32;

    fn lit(value: f64) -> Self {
        value as f32
    }

    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Scalar for f64 {
    const PRECISION: Precision = Precision::F64;

    fn lit(value: f64) -> Self {
        value
    }

    fn as_f64(self) -> f64 {
        self
    }
}
