use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;

use super::Neuron;
use crate::{
    MlErr, Result,
    arch::{Differentiable, Matrix, Vector},
};

const COMPONENT: &str = "dense layer";

/// A fully connected layer: every neuron sees every input of a sample.
///
/// The input of the last forward pass is cached since the backward pass needs it to compute the
/// weight gradients.
#[derive(Debug, Clone)]
pub struct Dense {
    inputs: usize,
    neurons: Vec<Neuron>,

    // Forward metadata
    x: Option<Array2<f64>>,

    // Backward metadata
    d: Option<Array2<f64>>,
}

impl Dense {
    /// Creates a new `Dense` layer with randomly initialized neurons.
    ///
    /// # Arguments
    /// * `outputs` - The amount of neurons in the layer.
    /// * `inputs` - The amount of inputs each neuron takes.
    /// * `rng` - The generator the parameters are sampled with.
    ///
    /// # Returns
    /// A new `Dense` or `MlErr::InvalidDimension` if either dimension is 0.
    pub fn new<R: Rng + ?Sized>(outputs: usize, inputs: usize, rng: &mut R) -> Result<Self> {
        if outputs == 0 {
            return Err(MlErr::InvalidDimension {
                what: "layer outputs",
                got: outputs,
            });
        }

        if inputs == 0 {
            return Err(MlErr::InvalidDimension {
                what: "layer inputs",
                got: inputs,
            });
        }

        let neurons = (0..outputs)
            .map(|_| Neuron::new(inputs, rng))
            .collect::<Result<_>>()?;

        debug!("created dense layer: inputs={inputs} outputs={outputs}");
        Ok(Self::from_neurons(inputs, neurons))
    }

    /// Creates a new `Dense` layer from explicit parameters.
    ///
    /// # Arguments
    /// * `weights` - One weight vector per neuron, all of the same length.
    /// * `biases` - One bias per neuron.
    ///
    /// # Returns
    /// A new `Dense` or `MlErr::InvalidDimension` if there are no neurons, no biases, a different
    /// amount of each, or weight vectors of different lengths.
    pub fn from_params<I>(weights: I, biases: Vector) -> Result<Self>
    where
        I: IntoIterator<Item = Vector>,
    {
        let weights: Vec<_> = weights.into_iter().collect();

        if weights.is_empty() {
            return Err(MlErr::InvalidDimension {
                what: "layer neurons",
                got: 0,
            });
        }

        if biases.is_empty() {
            return Err(MlErr::InvalidDimension {
                what: "layer biases",
                got: 0,
            });
        }

        if weights.len() != biases.len() {
            return Err(MlErr::InvalidDimension {
                what: "layer biases (one per neuron)",
                got: biases.len(),
            });
        }

        let inputs = weights[0].len();
        if let Some(w) = weights.iter().find(|w| w.len() != inputs) {
            return Err(MlErr::InvalidDimension {
                what: "neuron weights (all neurons take the same inputs)",
                got: w.len(),
            });
        }

        if inputs == 0 {
            return Err(MlErr::InvalidDimension {
                what: "layer inputs",
                got: inputs,
            });
        }

        let neurons = weights
            .into_iter()
            .zip(biases)
            .map(|(w, b)| Neuron::with_params(w, b))
            .collect();

        Ok(Self::from_neurons(inputs, neurons))
    }

    fn from_neurons(inputs: usize, neurons: Vec<Neuron>) -> Self {
        Self {
            inputs,
            neurons,
            x: None,
            d: None,
        }
    }

    /// Returns the amount of inputs each sample must have.
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    /// Returns the amount of neurons, that is, the width of each output row.
    pub fn outputs(&self) -> usize {
        self.neurons.len()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub(crate) fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// Returns the gradient with respect to the input of the last backward pass.
    pub fn input_grad(&self) -> Option<ArrayView2<'_, f64>> {
        self.d.as_ref().map(|d| d.view())
    }

    /// Forwards a single sample, without caching it.
    ///
    /// # Returns
    /// One output per neuron, or `MlErr::DimensionMismatch` if `x` is not `inputs()` long.
    pub fn forward_single(&self, x: ArrayView1<f64>) -> Result<Vector> {
        if x.len() != self.inputs {
            return Err(MlErr::DimensionMismatch {
                what: "layer input",
                got: x.len(),
                expected: self.inputs,
            });
        }

        Ok(self.neurons.iter().map(|n| n.activate(x)).collect())
    }

    /// Forwards a batch without caching anything.
    ///
    /// # Returns
    /// One row per sample with one output per neuron, `MlErr::EmptyBatch` if `x` has no rows or
    /// `MlErr::DimensionMismatch` if its rows are not `inputs()` long.
    pub fn infer(&self, x: ArrayView2<f64>) -> Result<Matrix> {
        if x.nrows() == 0 {
            return Err(MlErr::EmptyBatch {
                component: COMPONENT,
            });
        }

        if x.ncols() != self.inputs {
            return Err(MlErr::DimensionMismatch {
                what: "layer input",
                got: x.ncols(),
                expected: self.inputs,
            });
        }

        let mut z = Array2::zeros((x.nrows(), self.outputs()));
        for (neuron, mut col) in self.neurons.iter().zip(z.columns_mut()) {
            col.assign(&neuron.activate_batch(x));
        }

        Ok(z)
    }
}

impl Differentiable for Dense {
    fn forward(&mut self, x: Matrix) -> Result<Matrix> {
        let z = self.infer(x.view())?;

        self.x = Some(x);
        self.d = None;
        Ok(z)
    }

    fn backward<'a>(&'a mut self, d: ArrayView2<'a, f64>) -> Result<ArrayView2<'a, f64>> {
        let x = self.x.as_ref().ok_or(MlErr::NoPriorForward {
            component: COMPONENT,
        })?;

        if d.nrows() != x.nrows() {
            return Err(MlErr::DimensionMismatch {
                what: "gradient rows",
                got: d.nrows(),
                expected: x.nrows(),
            });
        }

        if d.ncols() != self.neurons.len() {
            return Err(MlErr::DimensionMismatch {
                what: "gradient row length",
                got: d.ncols(),
                expected: self.neurons.len(),
            });
        }

        let mut dx = Array2::zeros(x.dim());
        for (neuron, d_col) in self.neurons.iter_mut().zip(d.axis_iter(Axis(1))) {
            neuron.backward(x.view(), d_col);

            if let Some(neuron_dx) = neuron.input_grad() {
                dx += &neuron_dx;
            }
        }

        Ok(self.d.insert(dx).view())
    }
}

/// Collects the layer's weights as one row per neuron, mostly useful for inspection.
impl From<&Dense> for Array2<f64> {
    fn from(layer: &Dense) -> Self {
        let mut w = Array2::zeros((layer.outputs(), layer.inputs()));
        for (neuron, mut row) in layer.neurons.iter().zip(w.rows_mut()) {
            row.assign(&neuron.weights());
        }

        w
    }
}

/// Collects the layer's biases, one per neuron.
impl From<&Dense> for Array1<f64> {
    fn from(layer: &Dense) -> Self {
        layer.neurons.iter().map(Neuron::bias).collect()
    }
}
