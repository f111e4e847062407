use anyhow::{bail, Context};
use clap::Parser;
use soilsense::cli::{Cli, Commands};
use soilsense::config::Config;
use soilsense::demo::DemoDataProvider;
use soilsense::logic::{scoring, SoilAnalyzer};
use soilsense::models::{CropType, SoilReading};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; -v flags set the floor, RUST_LOG still wins
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = load_config(cli.config)?;

    match cli.command {
        Commands::Analyze {
            input,
            crop,
            pretty,
        } => analyze(&config, input, crop, pretty),
        Commands::Score { input } => score(&input),
        Commands::Demo { days, pretty } => demo(&config, days, pretty),
        Commands::Check => check(&config),
    }
}

fn load_config(config_override: Option<PathBuf>) -> anyhow::Result<Config> {
    if Config::exists(config_override.as_ref()) {
        Ok(Config::load(config_override)?)
    } else {
        tracing::warn!("no config file found, using defaults");
        Ok(Config::default())
    }
}

fn analyze(
    config: &Config,
    input: Option<PathBuf>,
    crop: Option<String>,
    pretty: bool,
) -> anyhow::Result<()> {
    let readings = match input {
        Some(path) => read_readings(&path)?,
        None if config.demo.enabled => {
            DemoDataProvider::from_config(&config.demo).readings(config.demo.days)
        }
        None => bail!("no --input file given and demo mode is disabled in config"),
    };

    // Restrict to the configured analysis window
    let cutoff = chrono::Utc::now() - chrono::Duration::days(config.analysis.window_days as i64);
    let windowed: Vec<SoilReading> = readings
        .into_iter()
        .filter(|r| r.timestamp >= cutoff)
        .collect();

    let mut farm = config.farm();
    if let Some(crop) = crop {
        farm.crop_type = CropType::from_str(&crop)
            .with_context(|| format!("unknown crop type '{}'", crop))?;
    }

    let analyzer = SoilAnalyzer::new().with_forecast_steps(config.analysis.forecast_steps);
    let report = analyzer.report(&farm, &windowed);
    print_json(&report, pretty)
}

fn score(input: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let reading: SoilReading =
        serde_json::from_str(&content).context("failed to parse soil reading")?;
    reading
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid reading: {}", e))?;

    println!("{}", scoring::score(&reading));
    Ok(())
}

fn demo(config: &Config, days: Option<u32>, pretty: bool) -> anyhow::Result<()> {
    let provider = DemoDataProvider::from_config(&config.demo);
    let readings = provider.readings(days.unwrap_or(config.demo.days));
    print_json(&readings, pretty)
}

fn check(config: &Config) -> anyhow::Result<()> {
    let farm = config.farm();
    println!("Config OK");
    println!("  Farm:      {} ({})", farm.name, farm.crop_type);
    println!("  Owner:     {}", farm.owner);
    println!("  Window:    {} days", config.analysis.window_days);
    println!(
        "  Demo mode: {}",
        if config.demo.enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

fn read_readings(path: &Path) -> anyhow::Result<Vec<SoilReading>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let readings: Vec<SoilReading> =
        serde_json::from_str(&content).context("failed to parse soil readings")?;

    for (index, reading) in readings.iter().enumerate() {
        if let Err(e) = reading.validate() {
            bail!("invalid reading at index {}: {}", index, e);
        }
    }

    Ok(readings)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
