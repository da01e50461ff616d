use ndarray::ArrayView2;

use crate::{
    Result,
    arch::{Matrix, Vector},
};

/// The end of the pipeline: scores a batch of predictions against integer class targets.
///
/// The loss is the start of the backward pass, so `backward` takes no upstream gradient.
pub trait LossFn {
    /// Computes one loss value per sample, caching the predictions and targets.
    fn forward(&mut self, y_pred: Matrix, targets: &[usize]) -> Result<Vector>;

    /// Computes the gradient of the loss with respect to the cached predictions.
    fn backward(&mut self) -> Result<ArrayView2<'_, f64>>;

    /// Returns the mean of the per-sample losses of the last forward pass.
    fn average_loss(&self) -> Result<f64>;
}
