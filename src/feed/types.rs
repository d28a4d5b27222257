//! Market data feed types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily closing-price observation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation timestamp
    pub timestamp: DateTime<Utc>,
    /// Closing price in the quote currency
    pub price: Decimal,
}
