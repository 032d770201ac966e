//! Plain-text dataset loading.
//!
//! Format:
//! - one sample per line, numbers separated by any whitespace
//! - the first `input_size` numbers are the input vector, the next
//!   `output_size` numbers the target vector
//! - numbers after the first `input_size + output_size` are ignored
//! - blank lines are skipped; line numbers in errors are 1-based and count
//!   blank lines

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::math::scalar::Scalar;

/// One training example.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<T> {
    pub input: Vec<T>,
    pub target: Vec<T>,
}

#[derive(Debug, Clone)]
pub struct Dataset<T> {
    input_size: usize,
    output_size: usize,
    samples: Vec<Sample<T>>,
}

impl<T: Scalar> Dataset<T> {
    /// Wraps in-memory samples, checking every vector length.
    pub fn new(input_size: usize, output_size: usize, samples: Vec<Sample<T>>) -> Result<Dataset<T>> {
        check_sizes(input_size, output_size)?;
        for sample in &samples {
            if sample.input.len() != input_size {
                return Err(Error::DimensionMismatch {
                    what: "input",
                    expected: input_size,
                    actual: sample.input.len(),
                });
            }
            if sample.target.len() != output_size {
                return Err(Error::DimensionMismatch {
                    what: "target",
                    expected: output_size,
                    actual: sample.target.len(),
                });
            }
        }
        Ok(Dataset { input_size, output_size, samples })
    }

    /// Reads a dataset file.
    pub fn load<P: AsRef<Path>>(path: P, input_size: usize, output_size: usize) -> Result<Dataset<T>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Dataset::parse(BufReader::new(file), input_size, output_size)
    }

    pub fn parse_str(text: &str, input_size: usize, output_size: usize) -> Result<Dataset<T>> {
        Dataset::parse(text.as_bytes(), input_size, output_size)
    }

    pub fn parse<R: BufRead>(reader: R, input_size: usize, output_size: usize) -> Result<Dataset<T>> {
        check_sizes(input_size, output_size)?;

        let mut samples = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(mut values) = parse_row::<T>(&line, idx + 1, input_size + output_size)? {
                let target = values.split_off(input_size);
                samples.push(Sample { input: values, target });
            }
        }

        Ok(Dataset { input_size, output_size, samples })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn samples(&self) -> &[Sample<T>] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Reorders the samples in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.samples.shuffle(rng);
    }
}

/// Parses the first `count` whitespace-separated numbers of a line.
///
/// Returns `Ok(None)` for a blank line and `MalformedRow` when fewer than
/// `count` tokens are present. Tokens past `count` are not inspected.
pub fn parse_row<T: Scalar>(line: &str, line_no: usize, count: usize) -> Result<Option<Vec<T>>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(None);
    }
    if tokens.len() < count {
        return Err(Error::MalformedRow {
            line: line_no,
            expected: count,
            found: tokens.len(),
        });
    }

    tokens[..count].iter()
        .map(|token| {
            token.parse::<T>().map_err(|_| Error::InvalidNumber {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<T>>>()
        .map(Some)
}

fn check_sizes(input_size: usize, output_size: usize) -> Result<()> {
    if input_size == 0 {
        return Err(Error::EmptyLayer { layer: "input" });
    }
    if output_size == 0 {
        return Err(Error::EmptyLayer { layer: "output" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rows_split_into_input_and_target() {
        let data = Dataset::<f64>::parse_str("0.1 0.2 1 0\n0.3\t0.4  0 1\n", 2, 2).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.samples()[0], Sample { input: vec![0.1, 0.2], target: vec![1.0, 0.0] });
        assert_eq!(data.samples()[1], Sample { input: vec![0.3, 0.4], target: vec![0.0, 1.0] });
    }

    #[test]
    fn extra_tokens_are_ignored() {
        let data = Dataset::<f32>::parse_str("1 2 3 trailing junk\n", 2, 1).unwrap();
        assert_eq!(data.samples()[0].target, vec![3.0]);
    }

    #[test]
    fn blank_lines_are_skipped_but_counted() {
        let text = "1 2 3\n\n   \n4 5\n";
        match Dataset::<f64>::parse_str(text, 2, 1) {
            Err(Error::MalformedRow { line, expected, found }) => {
                assert_eq!((line, expected, found), (4, 3, 2));
            }
            other => panic!("expected MalformedRow, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn bad_number_reports_line_and_token() {
        match Dataset::<f64>::parse_str("1 2 3\n1 x 3\n", 2, 1) {
            Err(Error::InvalidNumber { line, token }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("expected InvalidNumber, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let result = Dataset::<f64>::load("/nonexistent/semeion.data", 256, 10);
        assert!(matches!(result, Err(Error::SourceUnavailable { .. })));
    }

    #[test]
    fn new_checks_vector_lengths() {
        let samples = vec![Sample { input: vec![1.0f64], target: vec![0.0] }];
        assert!(matches!(
            Dataset::new(2, 1, samples),
            Err(Error::DimensionMismatch { what: "input", expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let text: String = (0..20).map(|i| format!("{} {}\n", i, i)).collect();
        let mut data = Dataset::<f64>::parse_str(&text, 1, 1).unwrap();
        data.shuffle(&mut ChaCha8Rng::seed_from_u64(8));

        let mut seen: Vec<f64> = data.samples().iter().map(|s| s.input[0]).collect();
        assert_ne!(seen, (0..20).map(|i| i as f64).collect::<Vec<_>>());
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(seen, (0..20).map(|i| i as f64).collect::<Vec<_>>());
    }
}
