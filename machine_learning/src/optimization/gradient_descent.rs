use super::Optimizer;
use crate::{Result, arch::layers::Dense};

/// Gradient descent optimization algorithm.
#[derive(Debug, Clone)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update`.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    /// Updates the parameters according to the algorithm's learning rule, that is, making a step in
    /// the opposite direction of the gradient, with a length of `learning_rate`.
    ///
    /// # Arguments
    /// * `layer` - The layer whose neurons are going to be modified.
    fn update(&mut self, layer: &mut Dense) -> Result<()> {
        let lr = self.learning_rate;

        for neuron in layer.neurons_mut() {
            neuron.descend(lr)?;
        }

        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array1, Array2, array};

    use super::*;
    use crate::{MlErr, arch::Differentiable};

    fn layer() -> Dense {
        Dense::from_params(
            [array![2., 2., 4.], array![3., 5., 5.], array![5., 3., 1.]],
            array![1., 2., 2.],
        )
        .unwrap()
    }

    #[test]
    fn steps_against_the_gradient() {
        let mut layer = layer();
        layer.forward(array![[1., 3., 2.]]).unwrap();
        layer.backward(array![[1., 1., 1.]].view()).unwrap();

        let mut optimizer = GradientDescent::new(0.5);
        optimizer.update(&mut layer).unwrap();

        let w = Array2::from(&layer);
        let b = Array1::from(&layer);
        assert_eq!(
            w,
            array![[1.5, 0.5, 3.], [2.5, 3.5, 4.], [4.5, 1.5, 0.]]
        );
        assert_eq!(b, array![0.5, 1.5, 1.5]);
    }

    #[test]
    fn update_without_backward_fails() {
        let mut layer = layer();
        let mut optimizer = GradientDescent::new(0.1);

        assert_eq!(
            optimizer.update(&mut layer),
            Err(MlErr::NoPriorForward { component: "neuron" })
        );
        assert_eq!(Array2::from(&layer)[[0, 0]], 2.);
    }

    #[test]
    fn learning_rate_can_be_replaced() {
        let mut optimizer = GradientDescent::new(1.0);
        optimizer.set_learning_rate(0.25);
        assert_eq!(optimizer.learning_rate(), 0.25);
    }
}
