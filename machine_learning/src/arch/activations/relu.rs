use ndarray::{Array2, ArrayView2, Zip};

use crate::{
    MlErr, Result,
    arch::{Differentiable, Matrix},
};

const COMPONENT: &str = "relu";

/// Rectified linear unit, `max(0, x)` applied to every value of the batch.
#[derive(Debug, Clone, Default)]
pub struct Relu {
    // Forward metadata
    x: Option<Array2<f64>>,

    // Backward metadata
    d: Option<Array2<f64>>,
}

impl Relu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the activation without caching anything.
    pub fn infer(x: ArrayView2<f64>) -> Matrix {
        x.mapv(|z| z.max(0.0))
    }

    /// Returns the gradient with respect to the input of the last backward pass.
    pub fn input_grad(&self) -> Option<ArrayView2<'_, f64>> {
        self.d.as_ref().map(|d| d.view())
    }
}

impl Differentiable for Relu {
    fn forward(&mut self, x: Matrix) -> Result<Matrix> {
        let a = Self::infer(x.view());

        self.x = Some(x);
        self.d = None;
        Ok(a)
    }

    /// The gradient only flows through the values that were strictly positive, at exactly 0 it
    /// is 0.
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

        if d.ncols() != x.ncols() {
            return Err(MlErr::DimensionMismatch {
                what: "gradient row length",
                got: d.ncols(),
                expected: x.ncols(),
            });
        }

        let dx = Zip::from(&d)
            .and(x)
            .map_collect(|&d, &z| if z > 0.0 { d } else { 0.0 });

        Ok(self.d.insert(dx).view())
    }
}
