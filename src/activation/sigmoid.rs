use crate::math::scalar::Scalar;

/// Logistic activation: `1 / (1 + e^-x)`, bounded in `(0, 1)`.
pub fn sigmoid<T: Scalar>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

/// Derivative of the sigmoid expressed on its *output*.
///
/// With `a = sigmoid(z)`, `d a / d z = a * (1 - a)`. The network keeps the
/// activations from the forward pass, so the pre-activation is never needed.
pub fn sigmoid_prime<T: Scalar>(activation: T) -> T {
    activation * (T::one() - activation)
}
