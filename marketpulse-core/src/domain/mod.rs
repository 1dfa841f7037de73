//! Domain types for the marketpulse engine.

pub mod analysis;
pub mod bar;
pub mod instrument;
pub mod position;

pub use analysis::{MarketAnalysis, MarketCondition, Signal, Trend};
pub use bar::{AnnotatedBar, Bar, Macd};
pub use instrument::Instrument;
pub use position::Position;
