//! Quote command implementation
//!
//! Builds a parlay from leg specs, capturing one price/volatility
//! snapshot per asset at admission time, then prices the ticket.

use crate::config::Config;
use crate::feed::{CoinGeckoClient, MarketDataSource};
use crate::model::VolatilityEstimator;
use crate::parlay::{PriceSnapshot, TicketBook};
use anyhow::Context;
use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Leg spec as ASSET:TIMEFRAME:LOWER:UPPER (repeatable)
    #[arg(short, long = "leg", value_name = "SPEC", required = true)]
    pub legs: Vec<String>,

    /// Bet amount in dollars
    #[arg(short, long, default_value = "100")]
    pub amount: Decimal,
}

/// A parsed leg spec
#[derive(Debug, PartialEq)]
struct LegSpec {
    asset: String,
    timeframe: String,
    lower: Decimal,
    upper: Decimal,
}

fn parse_leg_spec(spec: &str) -> anyhow::Result<LegSpec> {
    let parts: Vec<&str> = spec.split(':').collect();
    let [asset, timeframe, lower, upper] = parts.as_slice() else {
        anyhow::bail!("expected ASSET:TIMEFRAME:LOWER:UPPER, got {spec:?}");
    };

    Ok(LegSpec {
        asset: asset.to_string(),
        timeframe: timeframe.to_string(),
        lower: lower.parse().with_context(|| format!("bad lower bound {lower:?}"))?,
        upper: upper.parse().with_context(|| format!("bad upper bound {upper:?}"))?,
    })
}

impl QuoteArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let feed = CoinGeckoClient::new(&config.feed)?;
        let mut book = TicketBook::new(config.clone());
        let mut snapshots: HashMap<String, PriceSnapshot> = HashMap::new();

        for spec in &self.legs {
            let leg = parse_leg_spec(spec)?;
            let asset = config
                .asset(&leg.asset)
                .with_context(|| format!("unknown asset {:?}", leg.asset))?;

            let snapshot = match snapshots.get(&asset.code) {
                Some(snapshot) => *snapshot,
                None => {
                    let snapshot = capture_snapshot(&feed, config, asset).await?;
                    snapshots.insert(asset.code.clone(), snapshot);
                    snapshot
                }
            };

            book.add_leg(&leg.asset, &leg.timeframe, leg.lower, leg.upper, snapshot)
                .with_context(|| format!("leg rejected: {spec}"))?;
        }

        let leg_quotes = book.leg_quotes();
        let placed = book.place(self.amount);

        println!("Parlay ticket ({} legs):", placed.ticket.legs.len());
        for (leg, quote) in placed.ticket.legs.iter().zip(&leg_quotes) {
            println!(
                "  {} | {} | {} - {} | p={:.2}% odds={:.2}x (snapshot price {})",
                leg.asset,
                leg.timeframe,
                leg.lower_bound,
                leg.upper_bound,
                quote.probability * 100.0,
                quote.odds,
                leg.snapshot.price
            );
        }
        println!(
            "Win probability: {:.2}% | Odds: {:.2}x | Payout on {}: {:.2}",
            placed.quote.probability * 100.0,
            placed.quote.odds,
            self.amount,
            placed.quote.payout
        );

        Ok(())
    }
}

/// Fetch the spot price and estimate volatility for one asset.
///
/// History failures fall back to the asset's baseline volatility; a spot
/// price failure aborts, since nothing can be priced without it.
async fn capture_snapshot(
    feed: &impl MarketDataSource,
    config: &Config,
    asset: &crate::config::AssetConfig,
) -> anyhow::Result<PriceSnapshot> {
    let price = feed
        .spot_price(asset)
        .await
        .with_context(|| format!("live price unavailable for {}", asset.code))?;

    let daily_volatility = match feed.price_history(asset, config.feed.lookback_days).await {
        Ok(history) => match VolatilityEstimator::from_history(&history).estimate() {
            Some(vol) => {
                tracing::info!(
                    asset = %asset.code,
                    volatility = vol.value,
                    tail_factor = vol.tail_factor,
                    outlier_days = vol.outlier_days,
                    "volatility estimated"
                );
                vol.value
            }
            None => {
                tracing::warn!(
                    asset = %asset.code,
                    baseline = asset.baseline_volatility,
                    "insufficient history, using baseline volatility"
                );
                asset.baseline_volatility
            }
        },
        Err(e) => {
            tracing::warn!(
                asset = %asset.code,
                error = %e,
                baseline = asset.baseline_volatility,
                "history fetch failed, using baseline volatility"
            );
            asset.baseline_volatility
        }
    };

    Ok(PriceSnapshot {
        price,
        daily_volatility,
        captured_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_leg_spec() {
        let leg = parse_leg_spec("BTC:24-hour:49000:51000").unwrap();
        assert_eq!(
            leg,
            LegSpec {
                asset: "BTC".to_string(),
                timeframe: "24-hour".to_string(),
                lower: dec!(49000),
                upper: dec!(51000),
            }
        );
    }

    #[test]
    fn test_parse_leg_spec_decimal_bounds() {
        let leg = parse_leg_spec("DOGE:30-day:0.055:0.085").unwrap();
        assert_eq!(leg.lower, dec!(0.055));
        assert_eq!(leg.upper, dec!(0.085));
    }

    #[test]
    fn test_parse_leg_spec_rejects_malformed() {
        assert!(parse_leg_spec("BTC:24-hour:49000").is_err());
        assert!(parse_leg_spec("BTC:24-hour:abc:51000").is_err());
        assert!(parse_leg_spec("").is_err());
    }
}
