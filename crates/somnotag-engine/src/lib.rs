// Engine module - detection execution and label reconciliation
// This layer sits between the recording store and the presentation layer

pub mod algorithm;
pub mod engine;
pub mod error;
pub mod navigator;
pub mod processor;

pub use algorithm::{Algorithm, AlgorithmOption};
pub use engine::Engine;
pub use error::{Error, Result};
pub use navigator::Navigator;
pub use processor::Processor;
