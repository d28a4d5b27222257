//! Parlay probability aggregation and odds derivation
//!
//! Leg probabilities multiply under an independence assumption, then a
//! fixed correlation discount and a multi-leg bonus adjust the product.
//! Both constants are simplifying house parameters, not calibrated
//! figures. The combined probability is deliberately not re-capped after
//! the adjustments; only the per-leg 0.25 ceiling applies.

use super::types::ParlayQuote;
use rust_decimal::Decimal;

/// Legs are treated as positively correlated; dividing by this constant
/// inflates the naive independence product
pub const CORRELATION_DISCOUNT: f64 = 0.83;

/// Minimum leg count for the size bonus
pub const PARLAY_BONUS_LEGS: usize = 4;

/// Combined-probability bonus for large parlays
pub const PARLAY_BONUS: f64 = 1.05;

/// Fraction of fair odds paid out; encodes a fixed 7% house edge
pub const HOUSE_EDGE: f64 = 0.93;

/// Combine per-leg probabilities into a parlay probability.
///
/// Zero legs yield 0. Any leg at 0 or NaN short-circuits to 0: one dead
/// leg voids the whole parlay.
pub fn combine_probabilities(leg_probabilities: &[f64]) -> f64 {
    if leg_probabilities.is_empty() {
        return 0.0;
    }

    let mut product = 1.0;
    for &p in leg_probabilities {
        if p == 0.0 || p.is_nan() {
            return 0.0;
        }
        product *= p;
    }

    let bonus = if leg_probabilities.len() >= PARLAY_BONUS_LEGS {
        PARLAY_BONUS
    } else {
        1.0
    };

    (product / CORRELATION_DISCOUNT) * bonus
}

/// Decimal payout odds for a win probability, after house edge.
/// Zero probability quotes zero odds rather than dividing by zero.
pub fn decimal_odds(probability: f64) -> f64 {
    if probability == 0.0 || !probability.is_finite() {
        return 0.0;
    }
    (1.0 / probability) * HOUSE_EDGE
}

/// Price a parlay: combined probability, payout odds and total payout
/// for the given stake.
pub fn quote(leg_probabilities: &[f64], bet_amount: Decimal) -> ParlayQuote {
    let probability = combine_probabilities(leg_probabilities);
    let odds = decimal_odds(probability);
    let payout = bet_amount * Decimal::try_from(odds).unwrap_or_default();

    ParlayQuote {
        probability,
        odds,
        payout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_parlay_is_zero() {
        let q = quote(&[], dec!(100));
        assert_eq!(q.probability, 0.0);
        assert_eq!(q.odds, 0.0);
        assert_eq!(q.payout, dec!(0));
    }

    #[test]
    fn test_single_leg_no_bonus() {
        let p = combine_probabilities(&[0.2]);
        assert!((p - 0.2 / CORRELATION_DISCOUNT).abs() < 1e-12);
    }

    #[test]
    fn test_three_legs_no_bonus() {
        let p = combine_probabilities(&[0.2, 0.2, 0.2]);
        assert!((p - 0.008 / CORRELATION_DISCOUNT).abs() < 1e-12);
    }

    #[test]
    fn test_four_legs_get_bonus() {
        // 0.2^4 = 0.0016; (0.0016 / 0.83) * 1.05 ~= 0.002024
        let p = combine_probabilities(&[0.2, 0.2, 0.2, 0.2]);
        assert!((p - 0.00202410).abs() < 1e-6, "got {p}");
    }

    #[test]
    fn test_dead_leg_voids_parlay() {
        let q = quote(&[0.2, 0.0, 0.15], dec!(100));
        assert_eq!(q.probability, 0.0);
        assert_eq!(q.odds, 0.0);
        assert_eq!(q.payout, dec!(0));
    }

    #[test]
    fn test_nan_leg_voids_parlay() {
        let p = combine_probabilities(&[0.2, f64::NAN]);
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_combination_is_commutative() {
        let a = combine_probabilities(&[0.1, 0.2, 0.25]);
        let b = combine_probabilities(&[0.25, 0.1, 0.2]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_odds_encode_house_edge() {
        let odds = decimal_odds(0.25);
        assert!((odds - 4.0 * 0.93).abs() < 1e-12);
        assert_eq!(decimal_odds(0.0), 0.0);
    }

    #[test]
    fn test_payout_scales_with_stake() {
        let q100 = quote(&[0.2], dec!(100));
        let q200 = quote(&[0.2], dec!(200));
        assert_eq!(q200.payout, q100.payout * dec!(2));
    }

    #[test]
    fn test_combined_probability_not_recapped() {
        // A single capped leg at 0.25 combines to 0.25/0.83 > 0.25;
        // the aggregate is intentionally left above the per-leg ceiling
        let p = combine_probabilities(&[0.25]);
        assert!(p > 0.25);
        assert!((p - 0.25 / CORRELATION_DISCOUNT).abs() < 1e-12);
    }
}
