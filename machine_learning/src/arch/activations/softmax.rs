use ndarray::{Array2, ArrayView2, Zip};

use crate::{
    MlErr, Result,
    arch::{Differentiable, Matrix},
};

const COMPONENT: &str = "softmax";

/// Turns every row of the batch into a probability distribution.
///
/// Unlike `Relu`, the *output* is cached, the Jacobian is expressed in terms of it.
#[derive(Debug, Clone, Default)]
pub struct Softmax {
    // Forward metadata
    a: Option<Array2<f64>>,

    // Backward metadata
    d: Option<Array2<f64>>,
}

impl Softmax {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the activation without caching anything.
    pub fn infer(x: ArrayView2<f64>) -> Matrix {
        let mut a = x.to_owned();
        for mut row in a.rows_mut() {
            // shifting by the max leaves the result unchanged and keeps exp from overflowing
            let max = row.fold(f64::NEG_INFINITY, |m, &z| m.max(z));
            row.mapv_inplace(|z| (z - max).exp());

            let sum = row.sum();
            row /= sum;
        }

        a
    }

    /// Returns the gradient with respect to the input of the last backward pass.
    pub fn input_grad(&self) -> Option<ArrayView2<'_, f64>> {
        self.d.as_ref().map(|d| d.view())
    }
}

impl Differentiable for Softmax {
    fn forward(&mut self, x: Matrix) -> Result<Matrix> {
        let a = Self::infer(x.view());

        self.a = Some(a.clone());
        self.d = None;
        Ok(a)
    }

    /// Jacobian-vector product, row by row: `dx_i = a_i * (d_i - Σ_k d_k a_k)`.
    fn backward<'a>(&'a mut self, d: ArrayView2<'a, f64>) -> Result<ArrayView2<'a, f64>> {
        let a = self.a.as_ref().ok_or(MlErr::NoPriorForward {
            component: COMPONENT,
        })?;

        if d.nrows() != a.nrows() {
            return Err(MlErr::DimensionMismatch {
                what: "gradient rows",
                got: d.nrows(),
                expected: a.nrows(),
            });
        }

        if d.ncols() != a.ncols() {
            return Err(MlErr::DimensionMismatch {
                what: "gradient row length",
                got: d.ncols(),
                expected: a.ncols(),
            });
        }

        let mut dx = Array2::zeros(a.dim());
        Zip::from(dx.rows_mut())
            .and(a.rows())
            .and(d.rows())
            .for_each(|mut dx, a, d| {
                let dot = a.dot(&d);
                Zip::from(&mut dx)
                    .and(&a)
                    .and(&d)
                    .for_each(|dx, &a, &d| *dx = a * (d - dot));
            });

        Ok(self.d.insert(dx).view())
    }
}
