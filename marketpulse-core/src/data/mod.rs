//! Bar sources: CSV ingestion and the synthetic random walk.

pub mod ingest;
pub mod synthetic;

pub use ingest::{load_bars, DataError};
pub use synthetic::{generate, SyntheticConfig};
