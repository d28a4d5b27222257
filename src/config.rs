//! Configuration types for rangebet
//!
//! Static reference data (assets, timeframes, range-width bands) plus
//! feed and telemetry settings, loaded from TOML.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Bettable assets
    #[serde(default = "default_assets")]
    pub assets: Vec<AssetConfig>,
    /// Timeframe label -> duration in hours
    #[serde(default = "default_timeframes")]
    pub timeframes: BTreeMap<String, u32>,
    /// Asset code -> timeframe label -> allowed relative width band
    #[serde(default = "default_range_widths")]
    pub range_widths: BTreeMap<String, BTreeMap<String, WidthBand>>,
}

/// Market data feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Base URL of the CoinGecko-compatible API
    #[serde(default = "default_feed_base_url")]
    pub base_url: String,

    /// Daily-granularity lookback window for volatility estimation
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// One bettable asset's static reference data
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Short code used in leg specs (e.g. "BTC")
    pub code: String,
    /// Display name
    pub name: String,
    /// Identifier on the external data source (e.g. CoinGecko id)
    pub source_key: String,
    /// Fallback daily volatility when history-based estimation fails
    pub baseline_volatility: f64,
    /// Market-cap tier, scales assumed volatility risk
    #[serde(default)]
    pub tier: MarketCapTier,
}

/// Coarse market-cap classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCapTier {
    Mega,
    Large,
    #[default]
    Mid,
    Small,
    Micro,
}

impl MarketCapTier {
    /// Risk multiplier applied to the expiry-price standard deviation.
    /// Smaller caps are assumed riskier.
    pub fn risk_multiplier(&self) -> f64 {
        match self {
            MarketCapTier::Mega => 0.8,
            MarketCapTier::Large => 0.9,
            MarketCapTier::Mid => 1.0,
            MarketCapTier::Small => 1.1,
            MarketCapTier::Micro => 1.2,
        }
    }
}

/// Allowed relative range width, as a fraction of current price
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WidthBand {
    pub min: f64,
    pub max: f64,
}

fn default_feed_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}
fn default_lookback_days() -> u32 {
    90
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_feed_base_url(),
            lookback_days: default_lookback_days(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn asset(code: &str, name: &str, source_key: &str, vol: f64, tier: MarketCapTier) -> AssetConfig {
    AssetConfig {
        code: code.to_string(),
        name: name.to_string(),
        source_key: source_key.to_string(),
        baseline_volatility: vol,
        tier,
    }
}

fn default_assets() -> Vec<AssetConfig> {
    vec![
        asset("BTC", "Bitcoin", "bitcoin", 0.02, MarketCapTier::Mega),
        asset("ETH", "Ethereum", "ethereum", 0.025, MarketCapTier::Large),
        asset("SOL", "Solana", "solana", 0.035, MarketCapTier::Mid),
        asset("LINK", "Chainlink", "chainlink", 0.04, MarketCapTier::Small),
        asset("DOGE", "Dogecoin", "dogecoin", 0.06, MarketCapTier::Micro),
    ]
}

fn default_timeframes() -> BTreeMap<String, u32> {
    [
        ("1-hour", 1),
        ("4-hour", 4),
        ("24-hour", 24),
        ("48-hour", 48),
        ("3-day", 72),
        ("7-day", 168),
        ("14-day", 336),
        ("30-day", 720),
    ]
    .into_iter()
    .map(|(label, hours)| (label.to_string(), hours))
    .collect()
}

fn bands(entries: [(&str, f64, f64); 4]) -> BTreeMap<String, WidthBand> {
    entries
        .into_iter()
        .map(|(label, min, max)| (label.to_string(), WidthBand { min, max }))
        .collect()
}

/// Only four of the eight timeframes carry a width band per asset; the
/// rest are deliberately unconfigured and rejected by the validator.
fn default_range_widths() -> BTreeMap<String, BTreeMap<String, WidthBand>> {
    [
        (
            "BTC",
            bands([
                ("1-hour", 0.005, 0.05),
                ("24-hour", 0.01, 0.12),
                ("7-day", 0.015, 0.18),
                ("30-day", 0.025, 0.25),
            ]),
        ),
        (
            "ETH",
            bands([
                ("1-hour", 0.0075, 0.06),
                ("24-hour", 0.015, 0.15),
                ("7-day", 0.025, 0.22),
                ("30-day", 0.035, 0.30),
            ]),
        ),
        (
            "SOL",
            bands([
                ("1-hour", 0.01, 0.07),
                ("24-hour", 0.02, 0.17),
                ("7-day", 0.03, 0.25),
                ("30-day", 0.04, 0.35),
            ]),
        ),
        (
            "LINK",
            bands([
                ("1-hour", 0.01, 0.08),
                ("24-hour", 0.02, 0.18),
                ("7-day", 0.03, 0.26),
                ("30-day", 0.04, 0.36),
            ]),
        ),
        (
            "DOGE",
            bands([
                ("1-hour", 0.015, 0.10),
                ("24-hour", 0.025, 0.20),
                ("7-day", 0.035, 0.30),
                ("30-day", 0.05, 0.40),
            ]),
        ),
    ]
    .into_iter()
    .map(|(code, table)| (code.to_string(), table))
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            telemetry: TelemetryConfig::default(),
            assets: default_assets(),
            timeframes: default_timeframes(),
            range_widths: default_range_widths(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Look up an asset by code
    pub fn asset(&self, code: &str) -> Option<&AssetConfig> {
        self.assets.iter().find(|a| a.code == code)
    }

    /// Resolve a timeframe label to its duration in hours
    pub fn timeframe_hours(&self, label: &str) -> Option<u32> {
        self.timeframes.get(label).copied()
    }

    /// Look up the allowed width band for an (asset, timeframe) pair
    pub fn width_band(&self, asset: &str, timeframe: &str) -> Option<WidthBand> {
        self.range_widths.get(asset)?.get(timeframe).copied()
    }
}
