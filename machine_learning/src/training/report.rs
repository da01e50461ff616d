use std::fmt::{self, Display};

/// The progress of training at the end of one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochReport {
    /// The epoch index, starting at 1.
    pub epoch: usize,
    /// The learning rate the epoch's update was made with.
    pub learning_rate: f64,
    /// The mean loss of the epoch's forward pass, before its update.
    pub average_loss: f64,
    /// The fraction of samples classified correctly by the epoch's forward pass.
    pub accuracy: f64,
}

impl Display for EpochReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "epoch {}: learning rate {:.6}, average loss {:.6}, accuracy {:.2}%",
            self.epoch,
            self.learning_rate,
            self.average_loss,
            self.accuracy * 100.0
        )
    }
}
