use clap::Parser;
use rangebet::cli::{Cli, Commands};
use rangebet::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration, falling back to the built-in reference tables
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    rangebet::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Quote(args) => {
            args.execute(&config).await?;
        }
        Commands::Assets => {
            println!("Bettable assets:");
            for asset in &config.assets {
                println!(
                    "  {} ({}) tier={:?} baseline_vol={}",
                    asset.code, asset.name, asset.tier, asset.baseline_volatility
                );
                if let Some(table) = config.range_widths.get(&asset.code) {
                    for (timeframe, band) in table {
                        println!(
                            "    {}: {:.1}% - {:.1}% of price",
                            timeframe,
                            band.min * 100.0,
                            band.max * 100.0
                        );
                    }
                }
            }
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Feed: {} ({}d lookback)", config.feed.base_url, config.feed.lookback_days);
            println!("  Assets: {}", config.assets.len());
            println!("  Timeframes: {}", config.timeframes.len());
            println!("  Log level: {}", config.telemetry.log_level);
        }
    }

    Ok(())
}
