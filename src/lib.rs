//! rangebet: range-betting probability and parlay odds engine
//!
//! This library provides the core components for:
//! - Daily volatility estimation from historical closing prices
//! - Range-width validation against per-asset, per-timeframe bands
//! - Range-landing probability via a tanh CDF surrogate
//! - Parlay aggregation into combined probability, odds and payout
//! - Market data from CoinGecko (spot price and daily history)
//! - Ticket book for pending legs and placed-bet history

pub mod cli;
pub mod config;
pub mod feed;
pub mod model;
pub mod parlay;
pub mod telemetry;
