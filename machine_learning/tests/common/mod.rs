#![allow(dead_code)]

use machine_learning::arch::{Matrix, Vector};
use ndarray::{ArrayView1, ArrayView2};

pub const EPS: f64 = 1e-6;

/// Central finite differences of `f` at every entry of `point`.
pub fn finite_diff_grad<F>(f: F, point: &Matrix) -> Matrix
where
    F: Fn(&Matrix) -> f64,
{
    let mut grad = Matrix::zeros(point.dim());
    let mut perturbed = point.clone();

    for (idx, g) in grad.indexed_iter_mut() {
        perturbed[idx] = point[idx] + EPS;
        let f_plus = f(&perturbed);

        perturbed[idx] = point[idx] - EPS;
        let f_minus = f(&perturbed);

        perturbed[idx] = point[idx];
        *g = (f_plus - f_minus) / (2.0 * EPS);
    }

    grad
}

/// Same as `finite_diff_grad`, for a single vector of variables.
pub fn finite_diff_grad_1d<F>(f: F, point: &Vector) -> Vector
where
    F: Fn(&Vector) -> f64,
{
    let mut grad = Vector::zeros(point.len());
    let mut perturbed = point.clone();

    for (i, g) in grad.iter_mut().enumerate() {
        perturbed[i] = point[i] + EPS;
        let f_plus = f(&perturbed);

        perturbed[i] = point[i] - EPS;
        let f_minus = f(&perturbed);

        perturbed[i] = point[i];
        *g = (f_plus - f_minus) / (2.0 * EPS);
    }

    grad
}

pub fn max_grad_error(a: ArrayView2<f64>, b: ArrayView2<f64>) -> f64 {
    assert_eq!(a.dim(), b.dim());
    a.iter()
        .zip(b.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}

pub fn max_grad_error_1d(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}

/// Turns a component's output into a scalar by weighting it with a fixed upstream gradient, so
/// the gradient of the scalar with respect to the input is exactly what `backward(upstream)`
/// computes.
pub fn weighted_sum(output: &Matrix, upstream: &Matrix) -> f64 {
    (output * upstream).sum()
}
