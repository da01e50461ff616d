use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::{MlErr, Result};

/// Range the initial weights are sampled from (both ends inclusive).
const WEIGHT_RANGE: (f64, f64) = (0.1, 1.0);

/// Range the initial bias is sampled from (both ends inclusive).
const BIAS_RANGE: (f64, f64) = (0.0, 1.0);

/// A single linear unit: `w · x + b`.
///
/// The gradients are only meaningful after a backward pass and get overwritten by every new one.
#[derive(Debug, Clone)]
pub struct Neuron {
    weights: Array1<f64>,
    bias: f64,

    // Backward metadata
    dw: Option<Array1<f64>>,
    db: f64,
    dx: Option<Array2<f64>>,
}

impl Neuron {
    /// Creates a new `Neuron` with random parameters.
    ///
    /// # Arguments
    /// * `inputs` - The amount of inputs, that is, the length of the weight vector.
    /// * `rng` - The generator the weights and bias are sampled with.
    ///
    /// # Returns
    /// A new `Neuron` or `MlErr::InvalidDimension` if `inputs` is 0.
    pub fn new<R: Rng + ?Sized>(inputs: usize, rng: &mut R) -> Result<Self> {
        if inputs == 0 {
            return Err(MlErr::InvalidDimension {
                what: "neuron inputs",
                got: inputs,
            });
        }

        let weight_dist = Uniform::new_inclusive(WEIGHT_RANGE.0, WEIGHT_RANGE.1)?;
        let bias_dist = Uniform::new_inclusive(BIAS_RANGE.0, BIAS_RANGE.1)?;

        let weights = Array1::random_using(inputs, weight_dist, rng);
        let bias = bias_dist.sample(rng);

        Ok(Self::with_params(weights, bias))
    }

    /// Creates a new `Neuron` from the given parameters.
    pub fn with_params(weights: Array1<f64>, bias: f64) -> Self {
        Self {
            weights,
            bias,
            dw: None,
            db: 0.0,
            dx: None,
        }
    }

    /// Returns the amount of inputs this neuron takes.
    pub fn inputs(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Returns the gradient of the loss with respect to the weights, if backpropagated.
    pub fn weight_grad(&self) -> Option<ArrayView1<'_, f64>> {
        self.dw.as_ref().map(|dw| dw.view())
    }

    /// Returns the gradient of the loss with respect to the bias of the last backward pass.
    pub fn bias_grad(&self) -> f64 {
        self.db
    }

    /// Returns this neuron's share of the input gradient, one row per sample.
    pub fn input_grad(&self) -> Option<ArrayView2<'_, f64>> {
        self.dx.as_ref().map(|dx| dx.view())
    }

    /// Computes the neuron's output for a single sample.
    ///
    /// The caller guarantees `x` has `inputs()` values.
    pub fn activate(&self, x: ArrayView1<f64>) -> f64 {
        self.weights.dot(&x) + self.bias
    }

    /// Computes the neuron's output for every sample (row) of `x`.
    pub(crate) fn activate_batch(&self, x: ArrayView2<f64>) -> Array1<f64> {
        x.dot(&self.weights) + self.bias
    }

    /// Computes and stores the gradients given the batch that was forwarded and the gradient of
    /// the loss with respect to this neuron's output for each of its samples.
    ///
    /// Weight and bias gradients are summed over the batch.
    pub(crate) fn backward(&mut self, x: ArrayView2<f64>, d: ArrayView1<f64>) {
        self.dw = Some(x.t().dot(&d));
        self.db = d.sum();

        let d = d.insert_axis(Axis(1));
        let w = self.weights.view().insert_axis(Axis(0));
        self.dx = Some(d.dot(&w));
    }

    /// Takes a step against the stored gradients.
    ///
    /// # Returns
    /// `MlErr::NoPriorForward` if there was no backward pass yet.
    pub(crate) fn descend(&mut self, learning_rate: f64) -> Result<()> {
        let dw = self
            .dw
            .as_ref()
            .ok_or(MlErr::NoPriorForward { component: "neuron" })?;

        self.weights.scaled_add(-learning_rate, dw);
        self.bias -= learning_rate * self.db;
        Ok(())
    }
}
