use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::LossFn;
use crate::{
    MlErr, Result,
    arch::{Matrix, Vector},
};

const COMPONENT: &str = "cross-entropy";

/// Probabilities are clipped into `[EPSILON, 1 - EPSILON]` before the logarithm.
const EPSILON: f64 = 1e-7;

/// Categorical cross-entropy over class probabilities and integer targets.
#[derive(Debug, Clone, Default)]
pub struct CrossEntropy {
    // Forward metadata
    y_pred: Option<Array2<f64>>,
    targets: Vec<usize>,
    losses: Option<Array1<f64>>,

    // Backward metadata
    d: Option<Array2<f64>>,
}

impl CrossEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the per-sample losses of the last forward pass.
    pub fn losses(&self) -> Option<ArrayView1<'_, f64>> {
        self.losses.as_ref().map(|l| l.view())
    }

    /// Returns the gradient with respect to the predictions of the last backward pass.
    pub fn input_grad(&self) -> Option<ArrayView2<'_, f64>> {
        self.d.as_ref().map(|d| d.view())
    }
}

impl LossFn for CrossEntropy {
    fn forward(&mut self, y_pred: Matrix, targets: &[usize]) -> Result<Vector> {
        if targets.len() != y_pred.nrows() {
            return Err(MlErr::DimensionMismatch {
                what: "targets (one per row)",
                got: targets.len(),
                expected: y_pred.nrows(),
            });
        }

        let losses = y_pred
            .rows()
            .into_iter()
            .zip(targets)
            .enumerate()
            .map(|(row, (p, &target))| {
                let Some(&p) = p.get(target) else {
                    return Err(MlErr::InvalidTarget {
                        row,
                        target,
                        classes: p.len(),
                    });
                };

                Ok(-p.clamp(EPSILON, 1.0 - EPSILON).ln())
            })
            .collect::<Result<Vector>>()?;

        self.y_pred = Some(y_pred);
        self.targets = targets.to_vec();
        self.losses = Some(losses.clone());
        self.d = None;
        Ok(losses)
    }

    /// Only the target class gets a gradient, `-1 / p`, with `p` the unclipped prediction.
    fn backward(&mut self) -> Result<ArrayView2<'_, f64>> {
        let y_pred = self.y_pred.as_ref().ok_or(MlErr::NoPriorForward {
            component: COMPONENT,
        })?;

        let mut d = Array2::zeros(y_pred.dim());
        for ((mut d, p), &target) in d.rows_mut().into_iter().zip(y_pred.rows()).zip(&self.targets)
        {
            d[target] = -1.0 / p[target];
        }

        Ok(self.d.insert(d).view())
    }

    fn average_loss(&self) -> Result<f64> {
        self.losses
            .as_ref()
            .and_then(|losses| losses.mean())
            .ok_or(MlErr::NoPriorOutput {
                component: COMPONENT,
            })
    }
}
