use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::optim::anneal::Annealing;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `learning_rate` - rate used for the first epoch
/// - `anneal`        - multiplier applied to the rate after every epoch
/// - `epochs`        - total number of full passes over the training data
/// - `progress_tx`   - optional channel sender; one `EpochStats` is sent per
///                     completed epoch.  If the receiver is dropped the loop
///                     terminates early (clean shutdown).
/// - `stop_flag`     - optional atomic flag; when set to `true` from another
///                     thread the loop terminates after the current epoch.
///
/// The three hyperparameters can be read from JSON; missing keys fall back
/// to the defaults (`1.0`, `0.99`, `128`). The channel and the flag are never
/// serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub anneal: f64,
    pub epochs: usize,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(1.0, 0.99, 128)
    }
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(learning_rate: f64, anneal: f64, epochs: usize) -> Self {
        TrainConfig {
            learning_rate,
            anneal,
            epochs,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn schedule(&self) -> Annealing {
        Annealing::new(self.learning_rate, self.anneal)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::Config(format!(
                "learning rate must be positive, got {}", self.learning_rate
            )));
        }
        if !(self.anneal.is_finite() && self.anneal > 0.0) {
            return Err(Error::Config(format!(
                "anneal factor must be positive, got {}", self.anneal
            )));
        }
        if self.epochs == 0 {
            return Err(Error::Config("epochs must be at least 1".into()));
        }
        Ok(())
    }

    /// Serializes the hyperparameters to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Deserializes hyperparameters from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<TrainConfig> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
