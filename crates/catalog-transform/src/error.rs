use thiserror::Error;

/// The ways an input can fail to be a product table at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputKind {
    /// The top-level value is not a list of rows.
    NotAnArray,
    /// A row is not a key/value mapping.
    RowNotAnObject { index: usize },
    /// A cell holds something other than text, a number or null.
    UnsupportedCell { index: usize, column: String },
}

impl std::fmt::Display for InvalidInputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInputKind::NotAnArray => write!(f, "expected an array of rows"),
            InvalidInputKind::RowNotAnObject { index } => {
                write!(f, "row {index} is not an object")
            }
            InvalidInputKind::UnsupportedCell { index, column } => {
                write!(f, "row {index} column {column} is not a string, number or null")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("invalid input table: {kind}")]
    InvalidInput { kind: InvalidInputKind },

    #[error("cleaning stage {stage} failed: {reason}")]
    Stage { stage: &'static str, reason: String },
}
