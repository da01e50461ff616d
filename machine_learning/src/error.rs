use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::uniform::Error as UniformError;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
///
/// Every variant is raised before any cached state is written, so a component that fails keeps
/// whatever it cached on its last successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    /// A component was constructed with a zero or inconsistent size.
    InvalidDimension { what: &'static str, got: usize },
    /// A batch or gradient does not line up with the component's dimensions or cached state.
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// A forward pass was given a batch with no rows.
    EmptyBatch { component: &'static str },
    /// A backward pass was requested before any forward pass.
    NoPriorForward { component: &'static str },
    /// A summary of the output was requested before any forward pass.
    NoPriorOutput { component: &'static str },
    /// A target class index falls outside of its row.
    InvalidTarget {
        row: usize,
        target: usize,
        classes: usize,
    },
    /// A sampling range was rejected by the distribution.
    InvalidDistribution(String),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::InvalidDimension { what, got } => {
                write!(f, "invalid dimension for {what}: got {got}")
            }
            MlErr::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a dimension mismatch for {what}, got {got} and expected {expected}"
            ),
            MlErr::EmptyBatch { component } => {
                write!(f, "{component} can not forward an empty batch")
            }
            MlErr::NoPriorForward { component } => {
                write!(f, "{component} has no previous forward pass, can not backpropagate")
            }
            MlErr::NoPriorOutput { component } => {
                write!(f, "{component} has no previous output")
            }
            MlErr::InvalidTarget {
                row,
                target,
                classes,
            } => write!(
                f,
                "target {target} at row {row} is out of bounds for a row of {classes} classes"
            ),
            MlErr::InvalidDistribution(msg) => write!(f, "invalid distribution: {msg}"),
        }
    }
}

impl Error for MlErr {}

impl From<UniformError> for MlErr {
    fn from(value: UniformError) -> Self {
        Self::InvalidDistribution(value.to_string())
    }
}
