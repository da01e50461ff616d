//! A small feed-forward classifier with hand-written forward and backward passes.
//!
//! Every component of the pipeline caches what its backward pass needs during `forward`, and
//! `backward` turns the gradient of its output into the gradient of its input, so chaining them
//! in reverse order backpropagates the loss down to every `Dense` layer.

pub mod arch;
pub mod error;
pub mod metrics;
pub mod optimization;
pub mod training;

pub use error::{MlErr, Result};
