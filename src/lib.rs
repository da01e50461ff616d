//! Trains the `machine_learning` classifier on an Iris-style CSV dataset.

pub mod builder;
pub mod config;
pub mod dataset;
pub mod error;

pub use builder::{IrisTrainer, TrainerBuilder};
pub use config::TrainingConfig;
pub use dataset::{load_dataset, parse_dataset, Dataset};
pub use error::{ConfigErr, DatasetErr};
