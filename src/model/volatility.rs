//! Volatility estimation module
//!
//! Daily realized volatility from log returns, with a tail-risk
//! adjustment based on the count of large single-day moves.

use crate::feed::PricePoint;
use rust_decimal::Decimal;

/// A single-day move at or above this fraction counts as an outlier day
const OUTLIER_MOVE_THRESHOLD: f64 = 0.10;

/// Outlier counts are normalized against this fixed window, matching the
/// 90-day daily lookback, even when fewer samples were supplied
const OUTLIER_WINDOW: f64 = 90.0;

/// Upper bound on the tail-factor adjustment (+25%)
const TAIL_FACTOR_CAP: f64 = 0.25;

/// Daily volatility estimate with its tail-risk breakdown
#[derive(Debug, Clone, Copy)]
pub struct DailyVolatility {
    /// Tail-adjusted daily volatility
    pub value: f64,
    /// Multiplier applied for outlier days, in [1.0, 1.25]
    pub tail_factor: f64,
    /// Count of days with an absolute move >= 10%
    pub outlier_days: u32,
}

/// Volatility estimator over an ordered closing-price series
pub struct VolatilityEstimator {
    prices: Vec<Decimal>,
}

impl VolatilityEstimator {
    /// Create an empty estimator
    pub fn new() -> Self {
        Self { prices: Vec::new() }
    }

    /// Build an estimator from a fetched price history (oldest first)
    pub fn from_history(points: &[PricePoint]) -> Self {
        Self {
            prices: points.iter().map(|p| p.price).collect(),
        }
    }

    /// Append a closing price observation
    pub fn push(&mut self, price: Decimal) {
        self.prices.push(price);
    }

    /// Estimate daily volatility.
    ///
    /// Returns `None` when fewer than two usable prices are available or
    /// the computation degenerates; the caller falls back to the asset's
    /// baseline volatility.
    pub fn estimate(&self) -> Option<DailyVolatility> {
        // Drop non-positive prices before computing returns
        let prices: Vec<f64> = self
            .prices
            .iter()
            .map(|p| (*p).try_into().unwrap_or(0.0))
            .filter(|p: &f64| *p > 0.0)
            .collect();

        if prices.len() < 2 {
            return None;
        }

        let returns: Vec<f64> = prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect();

        // Population variance, divisor = return count
        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;

        let outlier_days = prices
            .windows(2)
            .filter(|w| ((w[1] - w[0]) / w[0]).abs() >= OUTLIER_MOVE_THRESHOLD)
            .count() as u32;

        let tail_factor = 1.0 + (outlier_days as f64 / OUTLIER_WINDOW).min(TAIL_FACTOR_CAP);
        let value = variance.sqrt() * tail_factor;

        if !value.is_finite() {
            return None;
        }

        Some(DailyVolatility {
            value,
            tail_factor,
            outlier_days,
        })
    }
}

impl Default for VolatilityEstimator {
    fn default() -> Self {
        Self::new()
    }
}
