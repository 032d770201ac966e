use std::path::Path;

use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::activation::sigmoid::{sigmoid, sigmoid_prime};
use crate::error::{Error, Result};
use crate::loss::half_squared::HalfSquaredError;
use crate::math::matrix::{dot, MatrixView, MatrixViewMut};
use crate::math::scalar::Scalar;
use crate::network::layout::Shape;
use crate::network::model_file::ModelFile;

/// A fully connected network with exactly one hidden layer and sigmoid
/// activations on both the hidden and the output layer.
///
/// All parameters live in one flat buffer (see `Shape` for the layout), so
/// `save` is a plain copy and restoring is a plain assignment.
#[derive(Debug, Clone)]
pub struct Network<T: Scalar> {
    shape: Shape,
    params: Vec<T>,
    // Activations of the last forward pass. Never persisted.
    hidden: Vec<T>,
    output: Vec<T>,
    rng: ChaCha8Rng,
}

impl<T: Scalar> Network<T> {
    /// Builds a network with an entropy-seeded random source.
    ///
    /// With `params == None` every bias and weight is drawn uniformly from
    /// `[-0.5, 0.5)`. Otherwise `params` must hold exactly
    /// `2 + hidden * (input + output)` values and is copied verbatim.
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        params: Option<&[T]>,
    ) -> Result<Network<T>> {
        Network::with_rng(input_size, hidden_size, output_size, params, ChaCha8Rng::from_entropy())
    }

    /// Random initialization from a fixed seed; the same seed always yields
    /// the same parameters.
    pub fn seeded(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        seed: u64,
    ) -> Result<Network<T>> {
        Network::with_rng(input_size, hidden_size, output_size, None, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Reconstructs a network from a buffer previously returned by `save`.
    pub fn restore(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        params: &[T],
    ) -> Result<Network<T>> {
        Network::new(input_size, hidden_size, output_size, Some(params))
    }

    /// Like `new`, with an explicit random source. The source is only drawn
    /// from when `params` is `None`; afterwards it stays with the network and
    /// is available to the training driver through `rng_mut`.
    pub fn with_rng(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        params: Option<&[T]>,
        mut rng: ChaCha8Rng,
    ) -> Result<Network<T>> {
        let shape = Shape::new(input_size, hidden_size, output_size)?;

        let params = match params {
            Some(buffer) => {
                if buffer.len() != shape.param_count() {
                    return Err(Error::InvalidModelShape {
                        expected: shape.param_count(),
                        actual: buffer.len(),
                    });
                }
                buffer.to_vec()
            }
            None => {
                // Biases come first in the buffer, so they are drawn first.
                let dist = Uniform::<T>::new(T::lit(-0.5), T::lit(0.5));
                (0..shape.param_count()).map(|_| dist.sample(&mut rng)).collect()
            }
        };

        Ok(Network {
            shape,
            params,
            hidden: vec![T::zero(); hidden_size],
            output: vec![T::zero(); output_size],
            rng,
        })
    }

    /// Forward pass. Returns one value in `(0, 1)` per output unit.
    pub fn predict(&mut self, input: &[T]) -> Result<Vec<T>> {
        check_len("input", self.shape.input_size, input.len())?;
        self.forward(input);
        Ok(self.output.clone())
    }

    /// One step of stochastic gradient descent on a single sample.
    ///
    /// Runs the forward pass itself, updates both weight matrices in place
    /// and returns `Σ 0.5 * (target - output)²` measured before the update.
    /// Biases are not trained.
    pub fn train(&mut self, input: &[T], target: &[T], rate: T) -> Result<T> {
        check_len("input", self.shape.input_size, input.len())?;
        check_len("target", self.shape.output_size, target.len())?;

        self.forward(input);
        self.backward(input, target, rate);

        Ok(HalfSquaredError::loss(&self.output, target))
    }

    /// Copy of the flat parameter buffer:
    /// `[bias_hidden, bias_output, W_ih..., W_ho...]`.
    pub fn save(&self) -> Vec<T> {
        self.params.clone()
    }

    /// Writes the network to a pretty-printed JSON model file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_model_file().save_json(path)
    }

    /// Loads a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network<T>> {
        Network::from_model_file(&ModelFile::load_json(path)?)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> &[T] {
        &self.params
    }

    /// `[bias_hidden, bias_output]`
    pub fn biases(&self) -> &[T] {
        &self.params[self.shape.biases()]
    }

    /// Input-to-hidden weights, `hidden_size x input_size`.
    pub fn input_hidden(&self) -> MatrixView<'_, T> {
        MatrixView::new(
            &self.params[self.shape.input_hidden()],
            self.shape.hidden_size,
            self.shape.input_size,
        )
    }

    /// Hidden-to-output weights, `output_size x hidden_size`.
    pub fn hidden_output(&self) -> MatrixView<'_, T> {
        MatrixView::new(
            &self.params[self.shape.hidden_output()],
            self.shape.output_size,
            self.shape.hidden_size,
        )
    }

    /// The network's random source, for shuffling training data.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    fn forward(&mut self, input: &[T]) {
        let bias_hidden = self.params[0];
        let bias_output = self.params[1];

        let w_ih = MatrixView::new(
            &self.params[self.shape.input_hidden()],
            self.shape.hidden_size,
            self.shape.input_size,
        );
        for (i, h) in self.hidden.iter_mut().enumerate() {
            *h = sigmoid(dot(input, w_ih.row(i)) + bias_hidden);
        }

        let w_ho = MatrixView::new(
            &self.params[self.shape.hidden_output()],
            self.shape.output_size,
            self.shape.hidden_size,
        );
        for (k, o) in self.output.iter_mut().enumerate() {
            *o = sigmoid(dot(&self.hidden, w_ho.row(k)) + bias_output);
        }
    }

    /// Expects `forward` to have just run on `input`.
    fn backward(&mut self, input: &[T], target: &[T], rate: T) {
        let shape = self.shape;
        let (head, tail) = self.params.split_at_mut(shape.hidden_output().start);
        let mut w_ih = MatrixViewMut::new(
            &mut head[shape.input_hidden()],
            shape.hidden_size,
            shape.input_size,
        );
        let mut w_ho = MatrixViewMut::new(tail, shape.output_size, shape.hidden_size);

        // (∂E/∂o, ∂o/∂z) per output unit
        let output_grads: Vec<(T, T)> = self.output.iter().zip(target.iter())
            .map(|(&o, &t)| (HalfSquaredError::derivative(o, t), sigmoid_prime(o)))
            .collect();

        for (i, &h) in self.hidden.iter().enumerate() {
            // W_ho[k][i] is read into `sum` before it is overwritten, and no
            // other hidden unit touches column i.
            let mut sum = T::zero();
            for (k, &(p, q)) in output_grads.iter().enumerate() {
                let w = w_ho.get_mut(k, i);
                sum = sum + p * q * *w;
                *w = *w - rate * p * q * h;
            }

            let step = rate * sum * sigmoid_prime(h);
            for (w, &x) in w_ih.row_mut(i).iter_mut().zip(input.iter()) {
                *w = *w - step * x;
            }
        }
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::DimensionMismatch { what, expected, actual });
    }
    Ok(())
}
