//! Instrument metadata.
//!
//! The symbol labels output and decides display precision; it has no
//! numeric effect on any algorithm in the engine.

use serde::{Deserialize, Serialize};

/// A tradable instrument, identified by its symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    symbol: String,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display decimal places: JPY-quoted pairs print 3, everything else 5.
    pub fn price_decimals(&self) -> usize {
        if self.symbol.to_ascii_uppercase().contains("JPY") {
            3
        } else {
            5
        }
    }

    /// Format a price at this instrument's display precision.
    pub fn format_price(&self, price: f64) -> String {
        format!("{:.*}", self.price_decimals(), price)
    }
}
