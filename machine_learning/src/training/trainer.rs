use std::num::NonZeroUsize;

use log::{debug, info};

use super::EpochReport;
use crate::{
    Result,
    arch::{Differentiable, Matrix, Sequential, loss::LossFn},
    metrics,
    optimization::{LearningRateSchedule, Optimizer},
};

/// A model `Trainer`. Contains the relevant components needed for training a model,
/// including the model itself.
pub struct Trainer<O, L, S>
where
    O: Optimizer,
    L: LossFn,
    S: LearningRateSchedule,
{
    model: Sequential,
    optimizer: O,
    loss_fn: L,
    schedule: S,

    epochs: usize,
    log_interval: NonZeroUsize,
}

impl<O, L, S> Trainer<O, L, S>
where
    O: Optimizer,
    L: LossFn,
    S: LearningRateSchedule,
{
    /// Returns a new `Trainer`.
    ///
    /// # Arguments
    /// * `model` - The model that will be trained.
    /// * `optimizer` - Applies the gradients to every `Dense` layer of the model.
    /// * `loss_fn` - The loss function used to measure the difference between a model's output and the expected one.
    /// * `schedule` - Decides the learning rate of each epoch.
    /// * `epochs` - The amount of epochs `train` runs.
    /// * `log_interval` - How many epochs apart the progress reports are.
    pub fn new(
        model: Sequential,
        optimizer: O,
        loss_fn: L,
        schedule: S,
        epochs: usize,
        log_interval: NonZeroUsize,
    ) -> Self {
        Self {
            model,
            optimizer,
            loss_fn,
            schedule,
            epochs,
            log_interval,
        }
    }

    pub fn model(&self) -> &Sequential {
        &self.model
    }

    /// Consumes the trainer, returning the trained model.
    pub fn into_model(self) -> Sequential {
        self.model
    }

    /// Runs a single epoch: forward pass, loss, backward pass and the update of every `Dense`
    /// layer, with the learning rate the schedule gives for `epoch`.
    ///
    /// # Arguments
    /// * `epoch` - The index of the epoch, fed to the learning rate schedule.
    /// * `inputs` - The whole batch of samples, one per row.
    /// * `targets` - The expected class of each sample.
    ///
    /// # Returns
    /// The epoch's report or the first error any of the components raised. The parameters are
    /// only modified once the whole backward pass succeeded.
    pub fn step(&mut self, epoch: usize, inputs: &Matrix, targets: &[usize]) -> Result<EpochReport> {
        let learning_rate = self.schedule.learning_rate(epoch);
        self.optimizer.set_learning_rate(learning_rate);

        let y_pred = self.model.forward(inputs.clone())?;
        let accuracy = metrics::accuracy(y_pred.view(), targets)?;

        self.loss_fn.forward(y_pred, targets)?;
        let average_loss = self.loss_fn.average_loss()?;

        let d = self.loss_fn.backward()?;
        self.model.backward(d)?;

        for layer in self.model.dense_layers_mut() {
            self.optimizer.update(layer)?;
        }

        debug!(epoch = epoch; "lr={learning_rate} loss={average_loss} accuracy={accuracy}");

        Ok(EpochReport {
            epoch,
            learning_rate,
            average_loss,
            accuracy,
        })
    }

    /// Performs `epochs` epochs of training over the whole dataset, numbered from 1.
    ///
    /// # Arguments
    /// * `inputs` - The whole batch of samples, one per row.
    /// * `targets` - The expected class of each sample.
    ///
    /// # Returns
    /// The reports of the first epoch and of every `log_interval` epochs after it.
    pub fn train(&mut self, inputs: &Matrix, targets: &[usize]) -> Result<Vec<EpochReport>> {
        let mut reports = Vec::with_capacity(self.epochs.div_ceil(self.log_interval.get()));
        self.train_with(inputs, targets, |report| reports.push(*report))?;
        Ok(reports)
    }

    /// Same as `train`, but hands every interval report to `on_report` as soon as its epoch is
    /// done instead of collecting them.
    ///
    /// # Arguments
    /// * `inputs` - The whole batch of samples, one per row.
    /// * `targets` - The expected class of each sample.
    /// * `on_report` - Receives the reports in epoch order.
    ///
    /// # Returns
    /// The first error any epoch raised. Reports of the epochs before it were already delivered.
    pub fn train_with<F>(
        &mut self,
        inputs: &Matrix,
        targets: &[usize],
        mut on_report: F,
    ) -> Result<()>
    where
        F: FnMut(&EpochReport),
    {
        let interval = self.log_interval.get();

        for epoch in 1..=self.epochs {
            let report = self.step(epoch, inputs, targets)?;

            if (epoch - 1) % interval == 0 {
                info!("{report}");
                on_report(&report);
            }
        }

        Ok(())
    }
}
