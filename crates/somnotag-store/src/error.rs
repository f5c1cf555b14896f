use std::fmt;

/// Result type for somnotag-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the store layer
#[derive(Debug)]
pub enum Error {
    /// Model layer error
    Model(somnotag_types::Error),

    /// The nested raw channel data is missing a wrapper level
    CorruptChannelData,

    /// An epoch index outside the stored epoch list
    EpochOutOfRange { index: usize },

    /// A label index outside the stored label set
    LabelOutOfRange { index: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Model(err) => write!(f, "Model error: {}", err),
            Error::CorruptChannelData => {
                write!(f, "Corrupt channel data: missing nesting level in stored samples")
            }
            Error::EpochOutOfRange { index } => write!(f, "Epoch index {} out of range", index),
            Error::LabelOutOfRange { index } => write!(f, "Label index {} out of range", index),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Model(err) => Some(err),
            Error::CorruptChannelData
            | Error::EpochOutOfRange { .. }
            | Error::LabelOutOfRange { .. } => None,
        }
    }
}

impl From<somnotag_types::Error> for Error {
    fn from(err: somnotag_types::Error) -> Self {
        Error::Model(err)
    }
}
