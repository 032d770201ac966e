pub mod matrix;
pub mod scalar;

pub use matrix::{MatrixView, MatrixViewMut};
pub use scalar::{Precision, Scalar};
