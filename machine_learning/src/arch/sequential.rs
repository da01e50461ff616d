use log::debug;
use ndarray::ArrayView2;
use rand::Rng;

use super::{
    Differentiable, Matrix,
    layers::{Dense, Layer},
};
use crate::Result;

/// A sequential model: information flows forward when computing an output and backward when
/// computing the gradients of its layers.
#[derive(Debug, Clone)]
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of, in forward order.
    ///
    /// # Returns
    /// A new `Sequential` instance.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Layer>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// Creates a randomly initialized classifier with one hidden layer:
    /// `Dense -> ReLU -> Dense -> ReLU -> Softmax`.
    ///
    /// # Arguments
    /// * `inputs` - The amount of features per sample.
    /// * `hidden` - The amount of neurons in the hidden layer.
    /// * `classes` - The amount of classes, that is, the width of the output distribution.
    /// * `rng` - The generator the parameters are sampled with.
    ///
    /// # Returns
    /// A new `Sequential` or `MlErr::InvalidDimension` if any of the sizes is 0.
    pub fn classifier<R: Rng + ?Sized>(
        inputs: usize,
        hidden: usize,
        classes: usize,
        rng: &mut R,
    ) -> Result<Self> {
        debug!("building classifier {inputs} -> {hidden} -> {classes}");

        let layers = [
            Layer::dense((inputs, hidden), rng)?,
            Layer::relu(),
            Layer::dense((hidden, classes), rng)?,
            Layer::relu(),
            Layer::softmax(),
        ];

        Ok(Self::new(layers))
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the trainable layers, in forward order.
    pub fn dense_layers_mut(&mut self) -> impl Iterator<Item = &mut Dense> {
        self.layers.iter_mut().filter_map(Layer::as_dense_mut)
    }

    /// Forwards `x` through every layer without caching anything, leaving the state of the last
    /// training pass as it was.
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Matrix> {
        let mut a = x.to_owned();

        for layer in &self.layers {
            a = layer.infer(a.view())?;
        }

        Ok(a)
    }
}

impl Differentiable for Sequential {
    fn forward(&mut self, mut x: Matrix) -> Result<Matrix> {
        for layer in self.layers.iter_mut() {
            x = layer.forward(x)?;
        }

        Ok(x)
    }

    fn backward<'a>(&'a mut self, mut d: ArrayView2<'a, f64>) -> Result<ArrayView2<'a, f64>> {
        for layer in self.layers.iter_mut().rev() {
            d = layer.backward(d)?;
        }

        Ok(d)
    }
}
