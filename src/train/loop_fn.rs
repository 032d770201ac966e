use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info};

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};
use crate::math::scalar::Scalar;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_epoch;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs and returns the mean training
/// error of the **last completed epoch**.
///
/// Every epoch shuffles `dataset` with the network's own random source, runs
/// one `train` call per sample at the current learning rate and then anneals
/// the rate. The dataset is left in the order of the last epoch.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// `Config` for invalid hyperparameters, `EmptyDataset` for a dataset with
/// no samples, `DimensionMismatch` if the dataset's vector sizes differ from
/// the network's.
pub fn train_loop<T: Scalar>(
    network: &mut Network<T>,
    dataset: &mut Dataset<T>,
    config: &TrainConfig,
) -> Result<T> {
    config.validate()?;
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }
    let shape = network.shape();
    if dataset.input_size() != shape.input_size {
        return Err(Error::DimensionMismatch {
            what: "dataset input",
            expected: shape.input_size,
            actual: dataset.input_size(),
        });
    }
    if dataset.output_size() != shape.output_size {
        return Err(Error::DimensionMismatch {
            what: "dataset target",
            expected: shape.output_size,
            actual: dataset.output_size(),
        });
    }

    debug!(
        "training {}-{}-{} network on {} samples for {} epochs",
        shape.input_size, shape.hidden_size, shape.output_size, dataset.len(), config.epochs
    );

    let mut last_error = T::zero();

    for (idx, rate) in config.schedule().rates().take(config.epochs).enumerate() {
        if stop_requested(config) {
            debug!("stop requested before epoch {}", idx + 1);
            break;
        }

        let t_start = Instant::now();

        // ── One shuffled pass over the training data ───────────────────────
        dataset.shuffle(network.rng_mut());
        let mean_error = train_epoch(network, dataset.samples(), T::lit(rate))?;
        last_error = mean_error;

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        info!("error {:.12} :: learning rate {:.6}", mean_error.as_f64(), rate);

        // ── Emit progress ─────────────────────────────────────────────────
        let stats = EpochStats {
            epoch: idx + 1,
            total_epochs: config.epochs,
            mean_error: mean_error.as_f64(),
            learning_rate: rate,
            elapsed_ms,
        };

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                debug!("progress receiver dropped after epoch {}", idx + 1);
                break;
            }
        }
    }

    Ok(last_error)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag
        .as_ref()
        .map(|flag| flag.load(Ordering::Relaxed))
        .unwrap_or(false)
}
