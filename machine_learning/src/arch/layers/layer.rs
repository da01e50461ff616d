use ndarray::ArrayView2;
use rand::Rng;

use super::Dense;
use crate::{
    Result,
    arch::{
        Differentiable, Matrix,
        activations::{Relu, Softmax},
    },
};

/// Any of the components a `Sequential` can be built from.
#[derive(Debug, Clone)]
pub enum Layer {
    Dense(Dense),
    Relu(Relu),
    Softmax(Softmax),
}

impl Layer {
    /// Creates a new randomly initialized `Dense` layer taking `dim.0` inputs and producing
    /// `dim.1` outputs.
    pub fn dense<R: Rng + ?Sized>(dim: (usize, usize), rng: &mut R) -> Result<Self> {
        Ok(Self::Dense(Dense::new(dim.1, dim.0, rng)?))
    }

    pub fn relu() -> Self {
        Self::Relu(Relu::new())
    }

    pub fn softmax() -> Self {
        Self::Softmax(Softmax::new())
    }

    /// Returns the inner `Dense` layer, if this is one.
    pub fn as_dense(&self) -> Option<&Dense> {
        match self {
            Self::Dense(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the inner `Dense` layer mutably, if this is one.
    pub fn as_dense_mut(&mut self) -> Option<&mut Dense> {
        match self {
            Self::Dense(l) => Some(l),
            _ => None,
        }
    }

    /// Forwards a batch without touching the cached state.
    pub fn infer(&self, x: ArrayView2<f64>) -> Result<Matrix> {
        match self {
            Self::Dense(l) => l.infer(x),
            Self::Relu(_) => Ok(Relu::infer(x)),
            Self::Softmax(_) => Ok(Softmax::infer(x)),
        }
    }

    /// Returns the gradient with respect to the input of the last backward pass.
    pub fn input_grad(&self) -> Option<ArrayView2<'_, f64>> {
        match self {
            Self::Dense(l) => l.input_grad(),
            Self::Relu(l) => l.input_grad(),
            Self::Softmax(l) => l.input_grad(),
        }
    }
}

impl Differentiable for Layer {
    fn forward(&mut self, x: Matrix) -> Result<Matrix> {
        match self {
            Self::Dense(l) => l.forward(x),
            Self::Relu(l) => l.forward(x),
            Self::Softmax(l) => l.forward(x),
        }
    }

    fn backward<'a>(&'a mut self, d: ArrayView2<'a, f64>) -> Result<ArrayView2<'a, f64>> {
        match self {
            Self::Dense(l) => l.backward(d),
            Self::Relu(l) => l.backward(d),
            Self::Softmax(l) => l.backward(d),
        }
    }
}

impl From<Dense> for Layer {
    fn from(layer: Dense) -> Self {
        Self::Dense(layer)
    }
}
