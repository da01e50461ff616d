use crate::{Result, arch::layers::Dense};

/// Applies the gradients of the last backward pass to a layer's parameters.
pub trait Optimizer {
    /// Updates every neuron of `layer` using its stored gradients.
    ///
    /// # Returns
    /// `MlErr::NoPriorForward` if the layer was never backpropagated.
    fn update(&mut self, layer: &mut Dense) -> Result<()>;

    fn learning_rate(&self) -> f64;

    fn set_learning_rate(&mut self, learning_rate: f64);
}
