use std::{error::Error, fmt, io};

/// Failures reading or validating the dataset file.
#[derive(Debug)]
pub enum DatasetErr {
    Io(io::Error),
    Csv(csv::Error),
    /// The file holds nothing but (at most) the header row.
    NoRows,
    FieldCount {
        line: u64,
        got: usize,
        expected: usize,
    },
    InvalidNumber {
        line: u64,
        field: usize,
        value: String,
    },
    /// A label column whose integer value is neither 0 nor 1.
    InvalidLabel {
        line: u64,
        field: usize,
        value: String,
    },
    /// Zero or several label columns are set.
    HotLabels { line: u64, got: usize },
}

impl fmt::Display for DatasetErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetErr::Io(e) => write!(f, "io error: {e}"),
            DatasetErr::Csv(e) => write!(f, "csv error: {e}"),
            DatasetErr::NoRows => {
                write!(f, "the dataset contains no rows or only the header row")
            }
            DatasetErr::FieldCount {
                line,
                got,
                expected,
            } => write!(
                f,
                "line {line} has {got} values, every row must have exactly {expected}"
            ),
            DatasetErr::InvalidNumber { line, field, value } => {
                write!(f, "line {line}, field {field}: '{value}' is not a number")
            }
            DatasetErr::InvalidLabel { line, field, value } => write!(
                f,
                "line {line}, field {field}: label values must be integers 0 or 1, got '{value}'"
            ),
            DatasetErr::HotLabels { line, got } => write!(
                f,
                "line {line} has {got} label columns set to 1, expected exactly one"
            ),
        }
    }
}

impl Error for DatasetErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatasetErr::Io(e) => Some(e),
            DatasetErr::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DatasetErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for DatasetErr {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Failures loading or validating the training configuration.
#[derive(Debug)]
pub enum ConfigErr {
    Io(io::Error),
    Json(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::Io(e) => write!(f, "io error: {e}"),
            ConfigErr::Json(e) => write!(f, "invalid JSON: {e}"),
            ConfigErr::Invalid { field, reason } => write!(f, "invalid {field}: {reason}"),
        }
    }
}

impl Error for ConfigErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigErr::Io(e) => Some(e),
            ConfigErr::Json(e) => Some(e),
            ConfigErr::Invalid { .. } => None,
        }
    }
}

impl From<io::Error> for ConfigErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
