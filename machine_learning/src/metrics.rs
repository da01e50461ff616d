use ndarray::{ArrayView1, ArrayView2};

use crate::{MlErr, Result};

/// Returns the fraction of rows whose most probable class is the target.
///
/// # Arguments
/// * `probabilities` - One distribution per row, as produced by `Softmax`.
/// * `targets` - The expected class of each row.
///
/// # Returns
/// The accuracy in `[0, 1]`, `MlErr::EmptyBatch` if there are no rows or
/// `MlErr::DimensionMismatch` if the amount of targets and rows differ.
pub fn accuracy(probabilities: ArrayView2<f64>, targets: &[usize]) -> Result<f64> {
    if probabilities.nrows() == 0 {
        return Err(MlErr::EmptyBatch {
            component: "accuracy",
        });
    }

    if targets.len() != probabilities.nrows() {
        return Err(MlErr::DimensionMismatch {
            what: "targets",
            got: targets.len(),
            expected: probabilities.nrows(),
        });
    }

    let hits = probabilities
        .rows()
        .into_iter()
        .zip(targets)
        .filter(|(row, target)| argmax(*row) == Some(**target))
        .count();

    Ok(hits as f64 / targets.len() as f64)
}

/// Index of the first maximum of `row`.
fn argmax(row: ArrayView1<f64>) -> Option<usize> {
    row.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &p)| match best {
            Some((_, max)) if max >= p => best,
            _ => Some((i, p)),
        })
        .map(|(i, _)| i)
}
