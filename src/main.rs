use std::env;

use anyhow::{Context, Result};
use iris_trainer::{load_dataset, TrainerBuilder, TrainingConfig};
use log::info;
use machine_learning::metrics;

const USAGE: &str = "usage: iris-trainer <dataset.csv> [config.json]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let dataset_path = args.next().context(USAGE)?;

    let config = match args.next() {
        Some(path) => TrainingConfig::from_file(&path)
            .with_context(|| format!("cannot load configuration '{path}'"))?,
        None => TrainingConfig::default(),
    };
    info!("training with {config:?}");

    let dataset = load_dataset(&dataset_path)
        .with_context(|| format!("cannot load dataset '{dataset_path}'"))?;
    info!("loaded {} samples from {dataset_path}", dataset.len());

    let mut trainer = TrainerBuilder::new().build(&config)?;
    trainer.train_with(&dataset.inputs, &dataset.targets, |report| {
        println!(
            "Learning Rate: {:.6}\nEpoch {} Average Loss: {:.6}\n",
            report.learning_rate, report.epoch, report.average_loss
        );
    })?;

    let probabilities = trainer.model().predict(dataset.inputs.view())?;
    let accuracy = metrics::accuracy(probabilities.view(), &dataset.targets)?;
    println!("Final accuracy: {:.2}%", accuracy * 100.0);

    Ok(())
}
