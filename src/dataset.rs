use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use machine_learning::arch::Matrix;

use crate::error::DatasetErr;

/// Amount of feature columns at the start of every row.
pub const FEATURES: usize = 4;

/// Amount of one-hot label columns after the features.
pub const CLASSES: usize = 3;

const FIELDS: usize = FEATURES + CLASSES;

/// An in-memory labelled dataset, one sample per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub inputs: Matrix,
    pub targets: Vec<usize>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Loads the dataset at `path`, see `parse_dataset`.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetErr> {
    let file = File::open(path)?;
    parse_dataset(file)
}

/// Parses a CSV dataset.
///
/// The first row is a header and is skipped. Every other row has `FEATURES` numeric features
/// followed by `CLASSES` label columns, exactly one of which is 1, the rest 0. The index of that
/// column is the sample's target.
///
/// # Returns
/// The parsed dataset or the first problem found, in file order.
pub fn parse_dataset<R: Read>(reader: R) -> Result<Dataset, DatasetErr> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut features = Vec::new();
    let mut targets = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != FIELDS {
            return Err(DatasetErr::FieldCount {
                line,
                got: record.len(),
                expected: FIELDS,
            });
        }

        let mut sample = [0.0; FEATURES];
        for (field, value) in sample.iter_mut().enumerate() {
            *value = parse_number(&record, line, field)?;
        }

        features.push(sample);

        targets.push(parse_target(&record, line)?);
    }

    if targets.is_empty() {
        return Err(DatasetErr::NoRows);
    }

    debug!("parsed {} samples", targets.len());
    Ok(Dataset {
        inputs: Matrix::from(features),
        targets,
    })
}

fn parse_number(record: &StringRecord, line: u64, field: usize) -> Result<f64, DatasetErr> {
    let value = &record[field];
    value.parse().map_err(|_| DatasetErr::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

/// Label values are truncated to integers before checking they are 0 or 1.
fn parse_target(record: &StringRecord, line: u64) -> Result<usize, DatasetErr> {
    let mut hot = Vec::with_capacity(1);

    for (class, field) in (FEATURES..FIELDS).enumerate() {
        let value = parse_number(record, line, field)?.trunc();

        if value == 1.0 {
            hot.push(class);
        } else if value != 0.0 {
            return Err(DatasetErr::InvalidLabel {
                line,
                field,
                value: record[field].to_string(),
            });
        }
    }

    match hot[..] {
        [class] => Ok(class),
        _ => Err(DatasetErr::HotLabels {
            line,
            got: hot.len(),
        }),
    }
}
