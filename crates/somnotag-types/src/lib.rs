pub mod data_source;
pub mod epoch;
pub mod error;
pub mod event;
pub mod label;

pub use data_source::DataSource;
pub use epoch::{Epoch, find_epoch_index};
pub use error::{Error, Result};
pub use event::Event;
pub use label::{Label, LabelSet, LabelShape, classify_row};
