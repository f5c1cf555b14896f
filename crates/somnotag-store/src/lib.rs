pub mod container;
pub mod error;
pub mod recording;

pub use container::{RawChannelData, RecordingContainer, unwrap_raw};
pub use error::{Error, Result};
pub use recording::{DEFAULT_SAMPLING_RATE, Recording};
