//! CoinGecko market data client
//!
//! Fetches spot prices from `/simple/price` and daily closing-price
//! history from `/coins/{id}/market_chart`.

use super::{MarketDataSource, PricePoint};
use crate::config::{AssetConfig, FeedConfig};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const VS_CURRENCY: &str = "usd";

/// Market chart response; entries are [unix-millis, value] pairs
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

/// Client for the CoinGecko REST API
pub struct CoinGeckoClient {
    base_url: String,
    client: Client,
}

impl CoinGeckoClient {
    /// Create a client from feed configuration
    pub fn new(config: &FeedConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn spot_price(&self, asset: &AssetConfig) -> anyhow::Result<Decimal> {
        let url = format!("{}/simple/price", self.base_url);

        tracing::debug!(url = %url, asset = %asset.code, "fetching spot price");

        let response = self
            .client
            .get(&url)
            .query(&[("ids", asset.source_key.as_str()), ("vs_currencies", VS_CURRENCY)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("spot price request failed: {} - {}", status, body);
        }

        let body: HashMap<String, HashMap<String, f64>> = response.json().await?;
        let price = body
            .get(&asset.source_key)
            .and_then(|quotes| quotes.get(VS_CURRENCY))
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no {} quote for {}", VS_CURRENCY, asset.source_key))?;

        Decimal::try_from(price)
            .map_err(|e| anyhow::anyhow!("unrepresentable price {}: {}", price, e))
    }

    async fn price_history(
        &self,
        asset: &AssetConfig,
        days: u32,
    ) -> anyhow::Result<Vec<PricePoint>> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, asset.source_key);

        tracing::debug!(url = %url, days, "fetching price history");

        let days = days.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", VS_CURRENCY),
                ("days", days.as_str()),
                ("interval", "daily"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("price history request failed: {} - {}", status, body);
        }

        let chart: MarketChartResponse = response.json().await?;
        let points = chart
            .prices
            .into_iter()
            .filter_map(|(millis, price)| {
                let timestamp = Utc.timestamp_millis_opt(millis as i64).single()?;
                let price = Decimal::try_from(price).ok()?;
                Some(PricePoint { timestamp, price })
            })
            .collect();

        Ok(points)
    }
}
