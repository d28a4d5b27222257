//! Parlay types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Range admission errors
///
/// Surfaced to the caller on rejection; no leg is created. Intervals are
/// reported as percentages of the current price.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    /// No width band configured for the (asset, timeframe) pair
    #[error("no range band configured for {asset} at {timeframe}")]
    Unconfigured { asset: String, timeframe: String },
    /// Range narrower than the configured minimum
    #[error("range width {width_pct:.1}% is below the minimum; allowed {min_pct:.1}% to {max_pct:.1}% of price")]
    TooNarrow {
        width_pct: f64,
        min_pct: f64,
        max_pct: f64,
    },
    /// Range wider than the configured maximum
    #[error("range width {width_pct:.1}% is above the maximum; allowed {min_pct:.1}% to {max_pct:.1}% of price")]
    TooWide {
        width_pct: f64,
        min_pct: f64,
        max_pct: f64,
    },
    /// Live price missing or non-positive
    #[error("live price unavailable for {asset}")]
    PriceUnavailable { asset: String },
}

/// Price and volatility captured when a leg is accepted.
///
/// Authoritative for all later probability recomputation of the leg;
/// later live prices must not replace it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Spot price at capture time
    pub price: Decimal,
    /// Daily volatility at capture time
    pub daily_volatility: f64,
    /// Capture timestamp
    pub captured_at: DateTime<Utc>,
}

/// A single range bet within a parlay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    /// Unique leg identifier
    pub id: Uuid,
    /// Asset code (e.g. "BTC")
    pub asset: String,
    /// Timeframe label (e.g. "24-hour")
    pub timeframe: String,
    /// One bound of the target range (order-independent)
    pub lower_bound: Decimal,
    /// The other bound of the target range
    pub upper_bound: Decimal,
    /// Price/volatility snapshot captured at acceptance
    pub snapshot: PriceSnapshot,
}

/// A finalized, immutable parlay bet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlayTicket {
    /// Legs in the order they were added
    pub legs: Vec<Leg>,
    /// Stake in dollars
    pub bet_amount: Decimal,
    /// Placement timestamp
    pub placed_at: DateTime<Utc>,
}

/// Per-leg pricing output
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LegQuote {
    pub leg_id: Uuid,
    /// Win probability in [0, 0.25]
    pub probability: f64,
    /// Decimal payout odds after house edge
    pub odds: f64,
}

/// Whole-ticket pricing output
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParlayQuote {
    /// Combined win probability after correlation discount and bonus
    pub probability: f64,
    /// Decimal payout odds after house edge; 0 when probability is 0
    pub odds: f64,
    /// Total payout on a win
    pub payout: Decimal,
}
