use crate::{
    data::dataset::Sample,
    error::{Error, Result},
    math::scalar::Scalar,
    network::network::Network,
};

/// One pass over `samples` in the given order, one `train` call per sample.
/// Returns the mean of the per-sample errors.
pub fn train_epoch<T: Scalar>(
    network: &mut Network<T>,
    samples: &[Sample<T>],
    rate: T,
) -> Result<T> {
    if samples.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut total_error = T::zero();
    for sample in samples {
        total_error = total_error + network.train(&sample.input, &sample.target, rate)?;
    }

    Ok(total_error / T::lit(samples.len() as f64))
}
