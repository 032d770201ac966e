use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of biases: one shared by all hidden units, one by all outputs.
pub const BIAS_COUNT: usize = 2;

/// Layer sizes of a one-hidden-layer network.
///
/// Also describes where each parameter group lives in the flat buffer:
///
/// ```text
/// [ bias_hidden, bias_output | W_ih (hidden x input) | W_ho (output x hidden) ]
/// ```
///
/// Both weight matrices are row-major: `W_ih[i][j]` connects input `j` to
/// hidden unit `i`, `W_ho[k][i]` connects hidden unit `i` to output `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
}

impl Shape {
    /// Validates that every layer has at least one unit.
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Result<Shape> {
        let shape = Shape { input_size, hidden_size, output_size };
        shape.validate()?;
        Ok(shape)
    }

    /// Shapes can also arrive through deserialization, so validation is
    /// available separately from `new`. A validated shape's parameter count
    /// fits in `usize`.
    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 {
            return Err(Error::EmptyLayer { layer: "input" });
        }
        if self.hidden_size == 0 {
            return Err(Error::EmptyLayer { layer: "hidden" });
        }
        if self.output_size == 0 {
            return Err(Error::EmptyLayer { layer: "output" });
        }
        if self.checked_param_count().is_none() {
            return Err(Error::ShapeOverflow {
                input_size: self.input_size,
                hidden_size: self.hidden_size,
                output_size: self.output_size,
            });
        }
        Ok(())
    }

    fn checked_param_count(&self) -> Option<usize> {
        self.input_size
            .checked_add(self.output_size)?
            .checked_mul(self.hidden_size)?
            .checked_add(BIAS_COUNT)
    }

    /// Total weights in both matrices: `hidden * (input + output)`.
    pub fn weight_count(&self) -> usize {
        self.hidden_size * (self.input_size + self.output_size)
    }

    /// Length of the flat parameter buffer.
    pub fn param_count(&self) -> usize {
        BIAS_COUNT + self.weight_count()
    }

    pub fn biases(&self) -> Range<usize> {
        0..BIAS_COUNT
    }

    pub fn input_hidden(&self) -> Range<usize> {
        BIAS_COUNT..BIAS_COUNT + self.hidden_size * self.input_size
    }

    pub fn hidden_output(&self) -> Range<usize> {
        self.input_hidden().end..self.param_count()
    }
}
