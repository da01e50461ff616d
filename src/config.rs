use std::{
    fs::File,
    io::{BufReader, Read},
    num::NonZeroUsize,
    path::Path,
};

use machine_learning::optimization::InverseTimeDecay;
use serde::{Deserialize, Serialize};

use crate::error::ConfigErr;

const DEFAULT_EPOCHS: NonZeroUsize = NonZeroUsize::new(10_000).unwrap();
const DEFAULT_LOG_INTERVAL: NonZeroUsize = NonZeroUsize::new(100).unwrap();
const DEFAULT_HIDDEN_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Everything that can be tuned about a training run.
///
/// Every field is optional in the JSON representation, missing ones take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// How many times the whole dataset is forwarded, backpropagated and learnt from.
    pub epochs: NonZeroUsize,
    /// The learning rate at epoch 0.
    pub learning_rate: f64,
    /// The learning rate at epoch `e` is `learning_rate / (1 + decay * e)`.
    pub decay: f64,
    /// How many epochs apart progress is reported.
    pub log_interval: NonZeroUsize,
    /// The amount of neurons in the hidden layer.
    pub hidden_size: NonZeroUsize,
    /// Seed for the parameter initialization, a random one is drawn from the OS if missing.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: DEFAULT_EPOCHS,
            learning_rate: 1e-3,
            decay: 1e-8,
            log_interval: DEFAULT_LOG_INTERVAL,
            hidden_size: DEFAULT_HIDDEN_SIZE,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Loads and validates a `TrainingConfig` from a JSON file.
    ///
    /// # Errors
    /// `ConfigErr` if the file can not be read, is not a valid configuration or fails `validate`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigErr> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses and validates a `TrainingConfig` from JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigErr> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values the type system can not: the learning rate must be finite and positive
    /// and the decay finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigErr> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ConfigErr::Invalid {
                field: "learning_rate",
                reason: "must be finite and positive",
            });
        }

        if !self.decay.is_finite() || self.decay < 0.0 {
            return Err(ConfigErr::Invalid {
                field: "decay",
                reason: "must be finite and non-negative",
            });
        }

        Ok(())
    }

    pub fn schedule(&self) -> InverseTimeDecay {
        InverseTimeDecay::new(self.learning_rate, self.decay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<TrainingConfig, ConfigErr> {
        TrainingConfig::from_reader(json.as_bytes())
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = parse(r#"{ "epochs": 50, "seed": 7 }"#).unwrap();

        assert_eq!(config.epochs.get(), 50);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.learning_rate, TrainingConfig::default().learning_rate);
        assert_eq!(config.hidden_size, DEFAULT_HIDDEN_SIZE);
    }

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(parse("{}").unwrap(), TrainingConfig::default());
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(matches!(parse(r#"{ "epochs": 0 }"#), Err(ConfigErr::Json(_))));
        assert!(matches!(parse(r#"{ "log_interval": 0 }"#), Err(ConfigErr::Json(_))));
        assert!(matches!(parse(r#"{ "hidden_size": 0 }"#), Err(ConfigErr::Json(_))));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(parse(r#"{ "epoch": 10 }"#), Err(ConfigErr::Json(_))));
    }

    #[test]
    fn learning_rate_must_be_positive() {
        assert!(matches!(
            parse(r#"{ "learning_rate": 0.0 }"#),
            Err(ConfigErr::Invalid {
                field: "learning_rate",
                ..
            })
        ));
    }

    #[test]
    fn decay_must_be_non_negative() {
        assert!(matches!(
            parse(r#"{ "decay": -0.1 }"#),
            Err(ConfigErr::Invalid { field: "decay", .. })
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let config = TrainingConfig {
            learning_rate: f64::NAN,
            ..TrainingConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TrainingConfig {
            decay: f64::INFINITY,
            ..TrainingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
