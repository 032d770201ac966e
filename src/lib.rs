pub mod error;
pub mod math;
pub mod activation;
pub mod loss;
pub mod network;
pub mod data;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::scalar::{Precision, Scalar};
pub use network::network::Network;
pub use network::layout::Shape;
pub use network::model_file::ModelFile;
pub use data::dataset::{Dataset, Sample};
pub use optim::anneal::Annealing;
pub use train::{train_epoch, train_loop, EpochStats, TrainConfig};
