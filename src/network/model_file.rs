use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::scalar::{Precision, Scalar};
use crate::network::export;
use crate::network::layout::Shape;
use crate::network::network::Network;

/// On-disk form of a trained network.
///
/// `params` is exactly what `Network::save` returns; `shape` and `precision`
/// are stored next to it so the file can be restored without knowing the
/// architecture up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Scalar")]
pub struct ModelFile<T> {
    pub shape: Shape,
    pub precision: Precision,
    pub params: Vec<T>,
}

/// Just enough of a model file to decide which precision to load it as.
#[derive(Deserialize)]
struct ModelHeader {
    shape: Shape,
    precision: Precision,
}

impl<T: Scalar> ModelFile<T> {
    /// Serializes the model to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a model file written by `save_json`.
    ///
    /// Fails with `PrecisionMismatch` if the file was saved in the other
    /// precision; use `peek` first when the precision is not known.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<ModelFile<T>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let model: ModelFile<T> = serde_json::from_reader(reader)?;
        if model.precision != T::PRECISION {
            return Err(Error::PrecisionMismatch {
                expected: T::PRECISION,
                found: model.precision,
            });
        }
        Ok(model)
    }
}

/// Reads the shape and precision tag of a model file without keeping the
/// parameters.
pub fn peek<P: AsRef<Path>>(path: P) -> Result<(Shape, Precision)> {
    let file = File::open(path)?;
    let header: ModelHeader = serde_json::from_reader(BufReader::new(file))?;
    Ok((header.shape, header.precision))
}

/// Precision of a saved model, from either a JSON model file or a `.rs`
/// file written by `export::to_source`.
pub fn precision_of<P: AsRef<Path>>(path: P) -> Result<Precision> {
    let path = path.as_ref();
    if is_source(path) {
        export::source_precision(&std::fs::read_to_string(path)?)
    } else {
        Ok(peek(path)?.1)
    }
}

fn is_source(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "rs")
}

impl<T: Scalar> Network<T> {
    /// Loads a network from a JSON model file, or from exported constants
    /// when the path ends in `.rs`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Network<T>> {
        let path = path.as_ref();
        if is_source(path) {
            let model = export::parse_source::<T>(&std::fs::read_to_string(path)?)?;
            Network::from_model_file(&model)
        } else {
            Network::load_json(path)
        }
    }

    pub fn to_model_file(&self) -> ModelFile<T> {
        ModelFile {
            shape: self.shape(),
            precision: T::PRECISION,
            params: self.save(),
        }
    }

    /// Restores from a model file. The shape recorded in the file decides
    /// the expected parameter count.
    pub fn from_model_file(model: &ModelFile<T>) -> Result<Network<T>> {
        let Shape { input_size, hidden_size, output_size } = model.shape;
        Network::restore(input_size, hidden_size, output_size, &model.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ferrite_tinn_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn json_round_trip_is_exact() {
        let net = Network::<f64>::seeded(4, 3, 2, 11).unwrap();
        let path = temp_path("round_trip");

        net.save_json(&path).unwrap();
        let loaded = Network::<f64>::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.shape(), net.shape());
        assert_eq!(loaded.save(), net.save());
    }

    #[test]
    fn large_f64_network_survives_json_bit_for_bit() {
        for seed in 0..5 {
            let net = Network::<f64>::seeded(256, 28, 10, seed).unwrap();
            let text = serde_json::to_string(&net.to_model_file()).unwrap();
            let model: ModelFile<f64> = serde_json::from_str(&text).unwrap();

            let restored = Network::from_model_file(&model).unwrap();
            let bits = |params: &[f64]| params.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
            assert_eq!(bits(&restored.save()), bits(&net.save()), "seed {}", seed);
        }
    }

    #[test]
    fn overflowing_shape_in_file_is_an_error() {
        let model = ModelFile::<f64> {
            shape: Shape { input_size: usize::MAX / 2 + 1, hidden_size: 2, output_size: 1 },
            precision: Precision::F64,
            params: vec![0.0; 4],
        };
        assert!(matches!(Network::from_model_file(&model), Err(Error::ShapeOverflow { .. })));
    }

    #[test]
    fn peek_reports_shape_and_precision() {
        let net = Network::<f32>::seeded(3, 2, 1, 7).unwrap();
        let path = temp_path("peek");

        net.save_json(&path).unwrap();
        let (shape, precision) = peek(&path).unwrap();
        let wrong = ModelFile::<f64>::load_json(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(shape, Shape::new(3, 2, 1).unwrap());
        assert_eq!(precision, Precision::F32);
        assert!(matches!(
            wrong,
            Err(Error::PrecisionMismatch { expected: Precision::F64, found: Precision::F32 })
        ));
    }

    #[test]
    fn load_picks_format_by_extension() {
        let net = Network::<f32>::seeded(3, 4, 2, 19).unwrap();
        let json = temp_path("by_extension");
        let source = json.with_extension("rs");

        net.save_json(&json).unwrap();
        std::fs::write(&source, export::to_source(&net, None)).unwrap();

        let precisions = (precision_of(&json).unwrap(), precision_of(&source).unwrap());
        let from_json = Network::<f32>::load(&json).unwrap();
        let from_source = Network::<f32>::load(&source).unwrap();
        std::fs::remove_file(&json).ok();
        std::fs::remove_file(&source).ok();

        assert_eq!(precisions, (Precision::F32, Precision::F32));
        assert_eq!(from_json.save(), net.save());
        assert_eq!(from_source.save(), net.save());
    }

    #[test]
    fn tampered_parameter_count_is_rejected() {
        let mut model = Network::<f64>::seeded(2, 2, 2, 3).unwrap().to_model_file();
        model.params.pop();
        assert!(matches!(
            Network::from_model_file(&model),
            Err(Error::InvalidModelShape { expected: 10, actual: 9 })
        ));
    }
}
