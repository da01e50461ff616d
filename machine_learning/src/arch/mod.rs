pub mod activations;
mod differentiable;
pub mod layers;
pub mod loss;
mod sequential;

use ndarray::{Array1, Array2};

pub use differentiable::Differentiable;
pub use sequential::Sequential;

/// An ordered sequence of values, e.g. one sample's features or one class distribution.
pub type Vector = Array1<f64>;

/// A batch of samples, one per row.
pub type Matrix = Array2<f64>;
