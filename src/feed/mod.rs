//! Market data feed module
//!
//! Supplies the spot price and daily price history the pricing core
//! consumes. Fetch failures degrade downstream to baseline volatility
//! or a blocked (zero-probability) state; they never crash the core.

mod coingecko;
mod types;

pub use coingecko::CoinGeckoClient;
pub use types::PricePoint;

use crate::config::AssetConfig;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for market data source implementations
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Current spot price for an asset
    async fn spot_price(&self, asset: &AssetConfig) -> anyhow::Result<Decimal>;

    /// Daily closing-price history over a lookback window, oldest first
    async fn price_history(
        &self,
        asset: &AssetConfig,
        days: u32,
    ) -> anyhow::Result<Vec<PricePoint>>;
}
