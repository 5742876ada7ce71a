//! datagen: headless dataset generation runner.
//!
//! Usage:
//!   datagen flash_sale --seed 12345 --output-dir ./data
//!   datagen --config scenario.json --duration 14d --intensity 2.0

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use shopgen_core::{dataset::TableId, engine::GenEngine, scenario::ScenarioConfig};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let output_dir = string_arg(&args, "--output-dir").unwrap_or_else(|| "./data".to_string());

    let mut scenario = load_scenario(&args)?;
    apply_overrides(&mut scenario, &args);

    let start_ts = match string_arg(&args, "--start") {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .with_context(|| format!("invalid --start timestamp: {raw}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    println!("datagen — scenario dataset generator");
    println!("  scenario:  {}", scenario.kind.name());
    println!("  duration:  {}", scenario.duration);
    println!("  intensity: {}", scenario.intensity_multiplier);
    println!("  seed:      {seed}");
    println!("  output:    {output_dir}");
    println!();

    let mut engine = GenEngine::build(scenario, seed, start_ts)?;
    let run_result = engine.run();
    if let Err(e) = &run_result {
        log::error!("run failed: {e}; writing the tables that did generate");
    }

    // The engine keeps partially generated tables on failure; persist
    // and report them either way.
    let dataset = engine.into_dataset();
    write_tables(&dataset, Path::new(&output_dir))?;
    print_summary(&dataset);

    run_result?;
    Ok(())
}

/// Scenario source: `--config FILE` wins, then a positional preset name,
/// then the baseline preset.
fn load_scenario(args: &[String]) -> Result<ScenarioConfig> {
    if let Some(path) = string_arg(args, "--config") {
        let json = fs::read_to_string(&path)
            .with_context(|| format!("reading scenario config {path}"))?;
        return Ok(ScenarioConfig::from_json(&json)?);
    }

    let preset_name = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with("--") && !is_flag_value(args, a))
        .map(String::as_str)
        .unwrap_or("baseline");

    match ScenarioConfig::preset(preset_name) {
        Some(config) => Ok(config),
        None => bail!(
            "unknown scenario {preset_name:?}; available: {}",
            ScenarioConfig::preset_names().join(", ")
        ),
    }
}

fn apply_overrides(scenario: &mut ScenarioConfig, args: &[String]) {
    if let Some(duration) = string_arg(args, "--duration") {
        scenario.duration = duration;
    }
    scenario.intensity_multiplier =
        parse_arg(args, "--intensity", scenario.intensity_multiplier);
    scenario.orders_per_hour = parse_arg(args, "--orders-per-hour", scenario.orders_per_hour);
    scenario.customer_count = parse_arg(args, "--customers", scenario.customer_count);
    scenario.product_count = parse_arg(args, "--products", scenario.product_count);
}

/// One JSON file per table, named after the table.
fn write_tables(dataset: &shopgen_core::dataset::Dataset, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let tables = serde_json::to_value(dataset)?;
    for table in TableId::ALL {
        let path = out_dir.join(format!("{}.json", table.name()));
        let json = serde_json::to_string(&tables[table.name()])?;
        fs::write(&path, json)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn print_summary(dataset: &shopgen_core::dataset::Dataset) {
    println!("=== RUN SUMMARY ===");
    for table in TableId::ALL {
        println!("  {:<16} {} rows", table.name(), dataset.len(table));
    }
    println!("  {:<16} {} rows", "total", dataset.total_rows());

    let orders = dataset.orders.len();
    if orders > 0 {
        let tickets = dataset.support_tickets.len();
        println!(
            "  orders <-> support: {:.2} tickets per order ({tickets} tickets)",
            tickets as f64 / orders as f64
        );
        let abandoned = dataset.cart_abandonment.len();
        println!(
            "  cart abandonment:   {:.1}% of sessions",
            100.0 * abandoned as f64 / (abandoned + orders) as f64
        );
    }
}

fn parse_arg<T: FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg(args: &[String], flag: &str) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
}

/// True when `value` is the value slot of some `--flag value` pair.
fn is_flag_value(args: &[String], value: &str) -> bool {
    args.windows(2)
        .any(|w| w[0].starts_with("--") && w[1] == value)
}
