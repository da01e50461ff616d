use machine_learning::{
    arch::{loss::CrossEntropy, Sequential},
    optimization::{GradientDescent, InverseTimeDecay},
    training::Trainer,
    Result,
};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::TrainingConfig,
    dataset::{CLASSES, FEATURES},
};

/// The trainer every run uses: gradient descent on cross-entropy with a decaying learning rate.
pub type IrisTrainer = Trainer<GradientDescent, CrossEntropy, InverseTimeDecay>;

/// Builds `IrisTrainer`s given a configuration.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `IrisTrainer` with a freshly initialized classifier.
    ///
    /// # Arguments
    /// * `config` - The configuration of the run.
    pub fn build(&self, config: &TrainingConfig) -> Result<IrisTrainer> {
        let mut rng = self.generate_rng(config.seed);
        let model = Sequential::classifier(FEATURES, config.hidden_size.get(), CLASSES, &mut rng)?;

        Ok(Trainer::new(
            model,
            GradientDescent::new(config.learning_rate),
            CrossEntropy::new(),
            config.schedule(),
            config.epochs.get(),
            config.log_interval,
        ))
    }

    fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
