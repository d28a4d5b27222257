//! Range-probability model
//!
//! P(lower <= price_at_expiry <= upper) under a log-normal-like spread
//! heuristic, using a tanh surrogate for the standard-normal CDF:
//! CDF(z) ~= 0.5 * (1 + tanh(sqrt(pi/8) * z))
//!
//! The surrogate is smooth, monotonic and bounded in (0, 1) but is not a
//! true Gaussian; quoted odds are calibrated against this exact form, so
//! it must not be swapped for a higher-fidelity CDF.

use super::{RangeModel, RangeParams};

/// Single-leg win probability is never quoted above this ceiling
pub const LEG_PROBABILITY_CAP: f64 = 0.25;

/// Tanh-surrogate range probability model
pub struct TanhRangeModel;

impl TanhRangeModel {
    /// Create a new model instance
    pub fn new() -> Self {
        Self
    }
}

impl Default for TanhRangeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeModel for TanhRangeModel {
    fn probability(&self, params: &RangeParams) -> f64 {
        let price: f64 = params.current_price.try_into().unwrap_or(0.0);
        let lower: f64 = params.lower_bound.try_into().unwrap_or(0.0);
        let upper: f64 = params.upper_bound.try_into().unwrap_or(0.0);

        if price <= 0.0 {
            return 0.0;
        }

        // Wider target ranges get a fatter assumed distribution
        let tail_risk = 1.0 + ((upper - lower).abs() / price).sqrt();

        // Volatility scales with sqrt of elapsed time vs a 24h baseline
        let hours = params.timeframe_hours as f64;
        let std_dev = price
            * params.daily_volatility
            * (hours / 24.0).sqrt()
            * params.tier.risk_multiplier()
            * tail_risk;

        if !std_dev.is_finite() || std_dev <= 0.0 {
            return 0.0;
        }

        let z_low = (lower.min(upper) - price) / std_dev;
        let z_high = (lower.max(upper) - price) / std_dev;
        let probability = surrogate_cdf(z_high) - surrogate_cdf(z_low);

        if !probability.is_finite() {
            return 0.0;
        }

        probability.clamp(0.0, LEG_PROBABILITY_CAP)
    }
}

/// Fast closed-form surrogate for the standard-normal CDF
fn surrogate_cdf(z: f64) -> f64 {
    0.5 * (1.0 + ((std::f64::consts::PI / 8.0).sqrt() * z).tanh())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarketCapTier;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn params(
        price: Decimal,
        lower: Decimal,
        upper: Decimal,
        vol: f64,
        hours: u32,
        tier: MarketCapTier,
    ) -> RangeParams {
        RangeParams {
            current_price: price,
            lower_bound: lower,
            upper_bound: upper,
            daily_volatility: vol,
            timeframe_hours: hours,
            tier,
        }
    }

    #[test]
    fn test_documented_btc_scenario() {
        // price 50_000, vol 0.02, 24h, Mega, range [49_000, 51_000]:
        // tail_risk = 1 + sqrt(2000/50000) = 1.2
        // std_dev = 50000 * 0.02 * 1 * 0.8 * 1.2 = 960
        // z = +-1000/960 ~= +-1.0417
        let model = TanhRangeModel::new();
        let p = model.probability(&params(
            dec!(50000),
            dec!(49000),
            dec!(51000),
            0.02,
            24,
            MarketCapTier::Mega,
        ));

        let z = 1000.0 / 960.0;
        let raw = surrogate_cdf(z) - surrogate_cdf(-z);
        assert!(raw > LEG_PROBABILITY_CAP, "scenario should hit the cap, raw={raw}");
        assert_eq!(p, LEG_PROBABILITY_CAP);
    }

    #[test]
    fn test_symmetric_in_bounds() {
        let model = TanhRangeModel::new();
        let a = model.probability(&params(
            dec!(100),
            dec!(98),
            dec!(103),
            0.08,
            24,
            MarketCapTier::Mid,
        ));
        let b = model.probability(&params(
            dec!(100),
            dec!(103),
            dec!(98),
            0.08,
            24,
            MarketCapTier::Mid,
        ));
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_bounded() {
        let model = TanhRangeModel::new();
        // Very wide range with low volatility: raw coverage near 1.0
        let p = model.probability(&params(
            dec!(100),
            dec!(50),
            dec!(150),
            0.01,
            24,
            MarketCapTier::Mid,
        ));
        assert_eq!(p, LEG_PROBABILITY_CAP);

        // Far out-of-the-money range: near zero, never negative
        let p = model.probability(&params(
            dec!(100),
            dec!(300),
            dec!(310),
            0.01,
            1,
            MarketCapTier::Mid,
        ));
        assert!((0.0..=LEG_PROBABILITY_CAP).contains(&p));
        assert!(p < 1e-6);
    }

    #[test]
    fn test_narrower_range_is_harder() {
        // Symmetric ranges around the spot, high enough volatility that
        // the 0.25 cap never masks the ordering
        let model = TanhRangeModel::new();
        let widths = [dec!(1), dec!(2), dec!(4)];
        let mut last = 0.0;
        for half_width in widths {
            let p = model.probability(&params(
                dec!(100),
                dec!(100) - half_width,
                dec!(100) + half_width,
                0.10,
                24,
                MarketCapTier::Mid,
            ));
            assert!(p < LEG_PROBABILITY_CAP);
            assert!(p >= last, "width {half_width}: {p} < {last}");
            last = p;
        }
    }

    #[test]
    fn test_zero_volatility_degenerates_to_zero() {
        let model = TanhRangeModel::new();
        let p = model.probability(&params(
            dec!(100),
            dec!(98),
            dec!(102),
            0.0,
            24,
            MarketCapTier::Mid,
        ));
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_zero_price_degenerates_to_zero() {
        let model = TanhRangeModel::new();
        let p = model.probability(&params(
            dec!(0),
            dec!(98),
            dec!(102),
            0.02,
            24,
            MarketCapTier::Mid,
        ));
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_nan_volatility_degenerates_to_zero() {
        let model = TanhRangeModel::new();
        let p = model.probability(&params(
            dec!(100),
            dec!(98),
            dec!(102),
            f64::NAN,
            24,
            MarketCapTier::Mid,
        ));
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_tier_scales_spread() {
        // Off-center range: a riskier tier widens the spread, which pulls
        // more mass toward a range sitting away from the spot
        let model = TanhRangeModel::new();
        let mega = model.probability(&params(
            dec!(100),
            dec!(106),
            dec!(108),
            0.02,
            24,
            MarketCapTier::Mega,
        ));
        let micro = model.probability(&params(
            dec!(100),
            dec!(106),
            dec!(108),
            0.02,
            24,
            MarketCapTier::Micro,
        ));
        assert!(micro > mega);
    }

    #[test]
    fn test_surrogate_cdf_properties() {
        assert!((surrogate_cdf(0.0) - 0.5).abs() < 1e-12);
        assert!(surrogate_cdf(-6.0) > 0.0 && surrogate_cdf(-6.0) < 0.01);
        assert!(surrogate_cdf(6.0) < 1.0 && surrogate_cdf(6.0) > 0.99);
        // Monotonic
        assert!(surrogate_cdf(0.5) < surrogate_cdf(1.0));
    }
}
