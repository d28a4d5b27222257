//! Pricing model module
//!
//! Estimates daily volatility from price history and computes the
//! probability that price lands inside a target range at expiry.

mod range;
mod volatility;

pub use range::{TanhRangeModel, LEG_PROBABILITY_CAP};
pub use volatility::{DailyVolatility, VolatilityEstimator};

use crate::config::MarketCapTier;
use rust_decimal::Decimal;

/// Parameters for a single range-probability evaluation
#[derive(Debug, Clone)]
pub struct RangeParams {
    /// Current spot price
    pub current_price: Decimal,
    /// One bound of the target range (order-independent)
    pub lower_bound: Decimal,
    /// The other bound of the target range
    pub upper_bound: Decimal,
    /// Daily volatility estimate
    pub daily_volatility: f64,
    /// Bet horizon in hours
    pub timeframe_hours: u32,
    /// Market-cap tier of the underlying asset
    pub tier: MarketCapTier,
}

/// Trait for range-probability model implementations
pub trait RangeModel: Send + Sync {
    /// Probability that price is inside the range at expiry.
    ///
    /// Returns 0.0 for degenerate inputs; never NaN.
    fn probability(&self, params: &RangeParams) -> f64;
}
