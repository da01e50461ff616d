use ndarray::ArrayView2;

use super::Matrix;
use crate::Result;

/// A component of the pipeline that can transform a batch and propagate a gradient back through
/// that transformation.
///
/// `forward` takes ownership of the batch so it can be cached for the following `backward`,
/// which receives the gradient of the loss with respect to this component's output (one row per
/// sample of the last forward batch) and returns the gradient with respect to its input.
pub trait Differentiable {
    /// Transforms a batch, caching whatever the backward pass needs.
    fn forward(&mut self, x: Matrix) -> Result<Matrix>;

    /// Consumes the downstream gradient and produces the gradient for the upstream component.
    ///
    /// The returned view borrows this component's cache of the last computed input gradient.
    fn backward<'a>(&'a mut self, d: ArrayView2<'a, f64>) -> Result<ArrayView2<'a, f64>>;
}
