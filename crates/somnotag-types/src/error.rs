use std::fmt;

/// Result type for somnotag-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the model layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A detector row was neither a point nor a `[start, end]` pair
    UnsupportedEventShape { arity: usize },

    /// One detector run produced both point and interval rows
    MixedEventShapes,

    /// A label position lies inside no epoch
    EpochNotFound { position: i64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedEventShape { arity } => write!(
                f,
                "Unsupported event shape: expected a point or a [start, end] pair, got {} values",
                arity
            ),
            Error::MixedEventShapes => {
                write!(f, "Detector output mixes point and interval events")
            }
            Error::EpochNotFound { position } => {
                write!(f, "No epoch contains sample position {}", position)
            }
        }
    }
}

impl std::error::Error for Error {}
