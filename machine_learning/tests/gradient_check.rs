mod common;

use common::{
    finite_diff_grad, finite_diff_grad_1d, max_grad_error, max_grad_error_1d, weighted_sum,
};
use machine_learning::arch::{
    Differentiable, Matrix, Sequential, Vector,
    activations::{Relu, Softmax},
    layers::{Dense, Layer},
    loss::{CrossEntropy, LossFn},
};
use ndarray::array;

const TOLERANCE: f64 = 1e-6;

fn weights() -> Vec<Vector> {
    vec![array![0.2, -0.5, 0.9], array![-0.3, 0.8, 0.1]]
}

fn biases() -> Vector {
    array![0.1, -0.2]
}

fn dense_with(weights: Vec<Vector>) -> Dense {
    Dense::from_params(weights, biases()).unwrap()
}

#[test]
fn dense_input_gradient() {
    let x = array![[1.0, -2.0, 0.5], [0.3, 0.7, -1.1]];
    let upstream = array![[0.4, -1.2], [2.0, 0.6]];

    let mut layer = dense_with(weights());
    layer.forward(x.clone()).unwrap();
    let analytic = layer.backward(upstream.view()).unwrap().to_owned();

    let numeric = finite_diff_grad(
        |x| {
            let mut layer = dense_with(weights());
            weighted_sum(&layer.forward(x.clone()).unwrap(), &upstream)
        },
        &x,
    );

    assert!(max_grad_error(analytic.view(), numeric.view()) < TOLERANCE);
}

#[test]
fn dense_parameter_gradients() {
    let x = array![[1.0, -2.0, 0.5], [0.3, 0.7, -1.1], [0.0, 1.5, 2.0]];
    let upstream = array![[0.4, -1.2], [2.0, 0.6], [-0.7, 1.0]];

    let mut layer = dense_with(weights());
    layer.forward(x.clone()).unwrap();
    layer.backward(upstream.view()).unwrap();

    for (n, neuron) in layer.neurons().iter().enumerate() {
        let numeric = finite_diff_grad_1d(
            |w| {
                let mut ws = weights();
                ws[n] = w.clone();
                let mut layer = dense_with(ws);
                weighted_sum(&layer.forward(x.clone()).unwrap(), &upstream)
            },
            &weights()[n],
        );
        let analytic = neuron.weight_grad().unwrap();
        assert!(max_grad_error_1d(analytic, numeric.view()) < TOLERANCE);

        // the output is linear in the bias, so its gradient is the column sum of the upstream
        let db = upstream.column(n).sum();
        assert!((neuron.bias_grad() - db).abs() < 1e-12);
    }
}

#[test]
fn relu_input_gradient() {
    let x = array![[1.5, -0.3, 0.7], [-2.0, 0.2, -0.9]];
    let upstream = array![[0.5, 1.0, -1.5], [2.0, -0.4, 0.3]];

    let mut relu = Relu::new();
    relu.forward(x.clone()).unwrap();
    let analytic = relu.backward(upstream.view()).unwrap().to_owned();

    let numeric = finite_diff_grad(
        |x| weighted_sum(&Relu::new().forward(x.clone()).unwrap(), &upstream),
        &x,
    );

    assert!(max_grad_error(analytic.view(), numeric.view()) < TOLERANCE);
}

#[test]
fn softmax_input_gradient() {
    let x = array![[2.0, 5.0, 6.0], [-1.0, 0.5, 0.0]];
    let upstream = array![[0.3, -1.0, 2.0], [1.5, 0.2, -0.6]];

    let mut softmax = Softmax::new();
    softmax.forward(x.clone()).unwrap();
    let analytic = softmax.backward(upstream.view()).unwrap().to_owned();

    let numeric = finite_diff_grad(
        |x| weighted_sum(&Softmax::new().forward(x.clone()).unwrap(), &upstream),
        &x,
    );

    assert!(max_grad_error(analytic.view(), numeric.view()) < TOLERANCE);
}

#[test]
fn cross_entropy_input_gradient() {
    let p = array![[0.1, 0.5, 0.4], [0.2, 0.3, 0.6], [0.03, 0.4985, 0.4985]];
    let targets = [1, 2, 0];

    let mut loss = CrossEntropy::new();
    loss.forward(p.clone(), &targets).unwrap();
    let analytic = loss.backward().unwrap().to_owned();

    let numeric = finite_diff_grad(
        |p| CrossEntropy::new().forward(p.clone(), &targets).unwrap().sum(),
        &p,
    );

    assert!(max_grad_error(analytic.view(), numeric.view()) < 1e-4);
}

fn pipeline(first: Vec<Vector>) -> Sequential {
    let hidden = Dense::from_params(first, array![0.1, 0.2]).unwrap();
    let output = Dense::from_params(
        [array![0.3, 0.9], array![0.6, 0.2], array![0.8, 0.5]],
        array![0.1, 0.0, 0.2],
    )
    .unwrap();

    Sequential::new([
        Layer::from(hidden),
        Layer::relu(),
        Layer::from(output),
        Layer::relu(),
        Layer::softmax(),
    ])
}

fn first_weights() -> Vec<Vector> {
    vec![array![0.5, 0.2, 0.7], array![0.4, 0.9, 0.1]]
}

fn pipeline_loss(model: &mut Sequential, x: &Matrix, targets: &[usize]) -> f64 {
    let y_pred = model.forward(x.clone()).unwrap();
    CrossEntropy::new().forward(y_pred, targets).unwrap().sum()
}

#[test]
fn full_pipeline_gradients() {
    let x = array![[0.5, 0.1, 0.9], [0.3, 0.8, 0.2], [0.9, 0.4, 0.6]];
    let targets = [2, 0, 1];

    let mut model = pipeline(first_weights());
    let mut loss = CrossEntropy::new();
    let y_pred = model.forward(x.clone()).unwrap();
    loss.forward(y_pred, &targets).unwrap();
    let analytic_dx = model.backward(loss.backward().unwrap()).unwrap().to_owned();

    let numeric_dx = finite_diff_grad(
        |x| pipeline_loss(&mut pipeline(first_weights()), x, &targets),
        &x,
    );
    assert!(max_grad_error(analytic_dx.view(), numeric_dx.view()) < TOLERANCE);

    let first = model.dense_layers_mut().next().unwrap();
    for (n, neuron) in first.neurons().iter().enumerate() {
        let numeric_dw = finite_diff_grad_1d(
            |w| {
                let mut ws = first_weights();
                ws[n] = w.clone();
                pipeline_loss(&mut pipeline(ws), &x, &targets)
            },
            &first_weights()[n],
        );

        let analytic_dw = neuron.weight_grad().unwrap();
        assert!(max_grad_error_1d(analytic_dw, numeric_dw.view()) < TOLERANCE);
    }
}
