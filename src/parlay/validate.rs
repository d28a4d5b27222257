//! Range-width admission control
//!
//! The sole gate on leg creation: a requested [lower, upper] range must
//! have a relative width inside the band configured for its
//! (asset, timeframe) pair. Unconfigured pairs are always rejected.

use super::types::RangeError;
use crate::config::{Config, WidthBand};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Validates requested ranges against configured width bands
#[derive(Debug, Clone)]
pub struct RangeValidator {
    widths: BTreeMap<String, BTreeMap<String, WidthBand>>,
}

impl RangeValidator {
    /// Build a validator from the configured range-width table
    pub fn new(config: &Config) -> Self {
        Self {
            widths: config.range_widths.clone(),
        }
    }

    /// Accept or reject a requested range.
    ///
    /// Width is `|upper - lower| / current_price`; both band edges are
    /// inclusive. Pure decision function, no state is touched.
    pub fn validate(
        &self,
        asset: &str,
        timeframe: &str,
        lower_bound: Decimal,
        upper_bound: Decimal,
        current_price: Decimal,
    ) -> Result<(), RangeError> {
        let price: f64 = current_price.try_into().unwrap_or(0.0);
        if price <= 0.0 {
            return Err(RangeError::PriceUnavailable {
                asset: asset.to_string(),
            });
        }

        let band = self
            .widths
            .get(asset)
            .and_then(|table| table.get(timeframe))
            .ok_or_else(|| RangeError::Unconfigured {
                asset: asset.to_string(),
                timeframe: timeframe.to_string(),
            })?;

        let lower: f64 = lower_bound.try_into().unwrap_or(0.0);
        let upper: f64 = upper_bound.try_into().unwrap_or(0.0);
        let width = (upper - lower).abs() / price;

        if width < band.min {
            return Err(RangeError::TooNarrow {
                width_pct: width * 100.0,
                min_pct: band.min * 100.0,
                max_pct: band.max * 100.0,
            });
        }
        if width > band.max {
            return Err(RangeError::TooWide {
                width_pct: width * 100.0,
                min_pct: band.min * 100.0,
                max_pct: band.max * 100.0,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn validator() -> RangeValidator {
        RangeValidator::new(&Config::default())
    }

    #[test]
    fn test_accepts_width_inside_band() {
        // BTC 24-hour band is [0.01, 0.12]; width 2000/50000 = 0.04
        let result = validator().validate("BTC", "24-hour", dec!(49000), dec!(51000), dec!(50000));
        assert!(result.is_ok());
    }

    #[test]
    fn test_accepts_inclusive_boundaries() {
        let v = validator();
        // Exactly min: 500/50000 = 0.01
        assert!(v
            .validate("BTC", "24-hour", dec!(49750), dec!(50250), dec!(50000))
            .is_ok());
        // Exactly max: 6000/50000 = 0.12
        assert!(v
            .validate("BTC", "24-hour", dec!(47000), dec!(53000), dec!(50000))
            .is_ok());
    }

    #[test]
    fn test_rejects_too_narrow() {
        let err = validator()
            .validate("BTC", "24-hour", dec!(49900), dec!(50100), dec!(50000))
            .unwrap_err();
        assert!(matches!(err, RangeError::TooNarrow { .. }));
    }

    #[test]
    fn test_rejects_too_wide() {
        let err = validator()
            .validate("BTC", "24-hour", dec!(40000), dec!(60000), dec!(50000))
            .unwrap_err();
        assert!(matches!(err, RangeError::TooWide { .. }));
    }

    #[test]
    fn test_bound_order_does_not_matter() {
        let v = validator();
        let a = v.validate("BTC", "24-hour", dec!(51000), dec!(49000), dec!(50000));
        let b = v.validate("BTC", "24-hour", dec!(49000), dec!(51000), dec!(50000));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_unconfigured_pair_regardless_of_width() {
        let v = validator();
        // 4-hour is a known timeframe but no band is configured for it
        let err = v
            .validate("BTC", "4-hour", dec!(49000), dec!(51000), dec!(50000))
            .unwrap_err();
        assert!(matches!(err, RangeError::Unconfigured { .. }));

        let err = v
            .validate("XMR", "24-hour", dec!(49000), dec!(51000), dec!(50000))
            .unwrap_err();
        assert!(matches!(err, RangeError::Unconfigured { .. }));
    }

    #[test]
    fn test_rejects_missing_price() {
        let err = validator()
            .validate("BTC", "24-hour", dec!(49000), dec!(51000), dec!(0))
            .unwrap_err();
        assert_eq!(
            err,
            RangeError::PriceUnavailable {
                asset: "BTC".to_string()
            }
        );
    }

    #[test]
    fn test_rejection_message_lists_legal_interval() {
        let err = validator()
            .validate("BTC", "24-hour", dec!(49900), dec!(50100), dec!(50000))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("1.0% to 12.0%"), "unexpected message: {msg}");
    }
}
