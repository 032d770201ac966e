//! Text forms of a parameter buffer.
//!
//! A trained model can be embedded in Rust source as a set of constants:
//!
//! ```text
//! pub const NIPS: usize = 2;
//! pub const NHID: usize = 3;
//! pub const NOPS: usize = 1;
//! pub const MODEL: [f64; 11] = [0.12, -0.3, ...];
//! ```
//!
//! and rebuilt with `Network::restore(NIPS, NHID, NOPS, &MODEL)`.

use crate::error::{Error, Result};
use crate::math::scalar::{Precision, Scalar};
use crate::network::layout::Shape;
use crate::network::model_file::ModelFile;
use crate::network::network::Network;

/// Decimal places used for predictions printed by the CLI.
pub const DEFAULT_DIGITS: usize = 6;

/// Joins `values` with `separator`.
///
/// `Some(digits)` prints a fixed number of decimals; `None` prints the
/// shortest text that parses back to the identical value.
pub fn format_values<T: Scalar>(values: &[T], separator: &str, digits: Option<usize>) -> String {
    values.iter()
        .map(|v| match digits {
            Some(d) => format!("{:.*}", d, v),
            // Debug always keeps a decimal point or exponent, so the text is
            // also a valid float literal.
            None => format!("{:?}", v),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Parses numbers separated by commas and/or whitespace. Surrounding
/// brackets are ignored, so the body of a `MODEL` constant parses as is.
pub fn parse_values<T: Scalar>(text: &str) -> Result<Vec<T>> {
    text.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<T>()
                .map_err(|_| Error::ModelText(format!("'{}' is not a valid number", token)))
        })
        .collect()
}

/// Renders the network as Rust constants.
pub fn to_source<T: Scalar>(network: &Network<T>, digits: Option<usize>) -> String {
    let shape = network.shape();
    let params = network.save();
    format!(
        "// Generated by ferrite-tinn.\n\
         pub const NIPS: usize = {};\n\
         pub const NHID: usize = {};\n\
         pub const NOPS: usize = {};\n\
         pub const MODEL: [{}; {}] = [{}];\n",
        shape.input_size,
        shape.hidden_size,
        shape.output_size,
        T::PRECISION,
        params.len(),
        format_values(&params, ", ", digits),
    )
}

/// Reads back text produced by `to_source`.
pub fn parse_source<T: Scalar>(text: &str) -> Result<ModelFile<T>> {
    let shape = Shape::new(
        usize_constant(text, "NIPS")?,
        usize_constant(text, "NHID")?,
        usize_constant(text, "NOPS")?,
    )?;

    let declaration = model_declaration(text)?;
    let precision = source_precision(text)?;
    if precision != T::PRECISION {
        return Err(Error::PrecisionMismatch { expected: T::PRECISION, found: precision });
    }

    let body = declaration.split_once('=')
        .map(|(_, rhs)| rhs.trim().trim_end_matches(';'))
        .ok_or_else(|| Error::ModelText("MODEL constant has no value".into()))?;

    Ok(ModelFile {
        shape,
        precision,
        params: parse_values(body)?,
    })
}

/// Element type of the `MODEL` constant, so callers can pick `T` before
/// calling `parse_source`.
pub fn source_precision(text: &str) -> Result<Precision> {
    match model_declaration(text)?.split(';').next().map(str::trim) {
        Some("f32") => Ok(Precision::F32),
        Some("f64") => Ok(Precision::F64),
        other => Err(Error::ModelText(format!("unknown element type {:?}", other))),
    }
}

fn model_declaration(text: &str) -> Result<&str> {
    text.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("pub const MODEL: ["))
        .ok_or_else(|| Error::ModelText("missing MODEL constant".into()))
}

fn usize_constant(text: &str, name: &str) -> Result<usize> {
    let prefix = format!("pub const {}: usize = ", name);
    text.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .and_then(|rest| rest.trim_end_matches(';').trim().parse().ok())
        .ok_or_else(|| Error::ModelText(format!("missing or invalid {}", name)))
}
