/// Decides the learning rate used at each epoch.
pub trait LearningRateSchedule {
    fn learning_rate(&self, epoch: usize) -> f64;
}

/// Decays the learning rate inversely to the epoch: `initial / (1 + decay * epoch)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseTimeDecay {
    initial: f64,
    decay: f64,
}

impl InverseTimeDecay {
    /// Creates a new `InverseTimeDecay`.
    ///
    /// # Arguments
    /// * `initial` - The learning rate at epoch 0.
    /// * `decay` - How fast the rate shrinks, 0 keeps it constant.
    pub fn new(initial: f64, decay: f64) -> Self {
        Self { initial, decay }
    }
}

impl LearningRateSchedule for InverseTimeDecay {
    fn learning_rate(&self, epoch: usize) -> f64 {
        self.initial / (1.0 + self.decay * epoch as f64)
    }
}

/// Keeps the same learning rate throughout training.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant(pub f64);

impl LearningRateSchedule for Constant {
    fn learning_rate(&self, _epoch: usize) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_time_decay() {
        let schedule = InverseTimeDecay::new(1.0, 0.5);
        assert_eq!(schedule.learning_rate(0), 1.0);
        assert_eq!(schedule.learning_rate(2), 0.5);
        assert_eq!(schedule.learning_rate(6), 0.25);
    }

    #[test]
    fn zero_decay_is_constant() {
        let schedule = InverseTimeDecay::new(0.3, 0.0);
        assert_eq!(schedule.learning_rate(1), 0.3);
        assert_eq!(schedule.learning_rate(10_000), 0.3);
    }

    #[test]
    fn constant() {
        assert_eq!(Constant(0.01).learning_rate(123), 0.01);
    }
}
