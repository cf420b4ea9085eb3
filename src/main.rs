use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing::{info, warn};

use trending_collector::{capture_date, Config, Runner, SchemaVariant, YouTubeClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("trending_collector=info,warn")
        .init();

    let matches = Command::new("Trending Video Collector")
        .version("0.1.0")
        .about("Snapshots the YouTube trending chart into per-region CSV files")
        .arg(
            Arg::new("key-path")
                .short('k')
                .long("key-path")
                .value_name("FILE")
                .help("File containing the API key on its first line"),
        )
        .arg(
            Arg::new("country-code-path")
                .short('c')
                .long("country-code-path")
                .value_name("FILE")
                .help("File listing one region code per line"),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Directory for the output CSV files"),
        )
        .arg(
            Arg::new("variant")
                .long("variant")
                .value_name("SCHEMA")
                .value_parser(["extended", "compact"])
                .help("Column schema to emit"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Load configuration, CLI flags take precedence
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    });

    if let Some(key_path) = matches.get_one::<String>("key-path") {
        config.key_path = PathBuf::from(key_path);
    }
    if let Some(codes_path) = matches.get_one::<String>("country-code-path") {
        config.country_code_path = PathBuf::from(codes_path);
    }
    if let Some(output_dir) = matches.get_one::<String>("output-dir") {
        config.output_dir = PathBuf::from(output_dir);
    }
    if let Some(variant) = matches.get_one::<String>("variant") {
        // Value parser already restricted the choices
        config.variant = SchemaVariant::parse(variant).unwrap_or(config.variant);
    }
    if matches.get_flag("verbose") {
        info!("Verbose logging enabled");
    }

    config.validate()?;

    info!("🚀 Trending collector starting...");
    info!("📂 Output directory: {}", config.output_dir.display());
    info!("🗂 Schema variant: {:?}", config.variant);

    let api_key = config.load_api_key().await?;
    let regions = config.load_country_codes().await?;
    info!("🌍 Regions: {}", regions.join(", "));

    let client = YouTubeClient::new(api_key, config.variant, config.request_timeout_seconds)?;
    let mut runner = Runner::new(
        client,
        config.variant,
        config.output_dir.clone(),
        capture_date(),
    );

    let summary = runner.run(&regions).await?;

    info!("✅ Regions written: {}", summary.regions_completed);
    info!("📊 Total rows: {}", summary.rows_written);

    Ok(())
}
