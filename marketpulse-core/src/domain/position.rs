//! Open position state for the backtest simulator.

use serde::{Deserialize, Serialize};

/// The single open position maintained while replaying a bar sequence.
///
/// The entry price lives inside the directional variants, so "short with no
/// entry price" is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Position {
    Flat,
    Long { entry: f64 },
    Short { entry: f64 },
}

impl Position {
    pub fn is_long(&self) -> bool {
        matches!(self, Position::Long { .. })
    }

    pub fn is_short(&self) -> bool {
        matches!(self, Position::Short { .. })
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, Position::Flat)
    }
}
