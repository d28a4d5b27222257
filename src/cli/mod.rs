//! CLI interface for rangebet
//!
//! Provides subcommands for:
//! - `quote`: price a parlay of range legs against live market data
//! - `assets`: list bettable assets and their width bands
//! - `config`: show the loaded configuration

mod quote;

pub use quote::QuoteArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rangebet")]
#[command(about = "Range-betting probability and parlay odds engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a parlay of range legs
    Quote(QuoteArgs),
    /// List bettable assets and their allowed range widths
    Assets,
    /// Show the loaded configuration
    Config,
}
