mod dense;
mod layer;
mod neuron;

pub use dense::Dense;
pub use layer::Layer;
pub use neuron::Neuron;
