use std::fmt;

/// Result type for somnotag-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug)]
pub enum Error {
    /// Store layer error
    Store(somnotag_store::Error),

    /// Model layer error
    Model(somnotag_types::Error),

    /// `compute_navigator` was called before `compute_labels`
    LabelsNotComputed,

    /// Algorithm selection index outside the registered list
    UnknownAlgorithm { index: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Store(err) => write!(f, "Store error: {}", err),
            Error::Model(err) => write!(f, "Model error: {}", err),
            Error::LabelsNotComputed => {
                write!(f, "Labels not computed: compute_labels must run before compute_navigator")
            }
            Error::UnknownAlgorithm { index } => {
                write!(f, "No algorithm registered at selection index {}", index)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            Error::Model(err) => Some(err),
            Error::LabelsNotComputed | Error::UnknownAlgorithm { .. } => None,
        }
    }
}

impl From<somnotag_store::Error> for Error {
    fn from(err: somnotag_store::Error) -> Self {
        Error::Store(err)
    }
}

impl From<somnotag_types::Error> for Error {
    fn from(err: somnotag_types::Error) -> Self {
        Error::Model(err)
    }
}
