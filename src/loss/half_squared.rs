use crate::math::scalar::Scalar;

/// Half squared error, the loss the network trains against.
pub struct HalfSquaredError;

impl HalfSquaredError {
    /// Error of a single output: `0.5 * (expected - predicted)²`
    pub fn unit<T: Scalar>(expected: T, predicted: T) -> T {
        let diff = expected - predicted;
        T::lit(0.5) * diff * diff
    }

    /// Total error: sum over outputs (not a mean).
    pub fn loss<T: Scalar>(predicted: &[T], expected: &[T]) -> T {
        predicted.iter().zip(expected.iter())
            .fold(T::zero(), |sum, (&p, &e)| sum + Self::unit(e, p))
    }

    /// Per-output gradient with respect to the prediction: predicted - expected
    pub fn derivative<T: Scalar>(predicted: T, expected: T) -> T {
        predicted - expected
    }
}
