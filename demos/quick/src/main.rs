//! quick: one run of the Long-COVID ABM with a daily CSV time series.
//!
//! Usage: `quick [config.json]`.  Without an argument the default `Config`
//! is used with a 180-day horizon.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

use abm_core::Config;
use abm_output::{CsvWriter, SimOutputObserver};
use abm_sim::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT: usize = 10_000;
const SEED:        u64   = 42;
const SIM_DAYS:    u32   = 180;
const OUTPUT_DIR:  &str  = "output/quick";

const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

fn init_logging() -> Result<()> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn load_config() -> Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            Ok(Config::from_json_str(&json)?)
        }
        None => Ok(Config { max_days: SIM_DAYS, ..Config::default() }),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging()?;

    // 1. Configuration.
    let config = load_config()?;
    println!("=== quick: Long-COVID ABM ===");
    println!("Agents: {AGENT_COUNT}  |  Days: {}  |  Seed: {SEED}", config.max_days);
    println!();

    // 2. Build the run.
    let mut sim = SimBuilder::new(AGENT_COUNT, SEED, config).build()?;
    println!(
        "Contact network: {} edges (mean degree {:.2})",
        sim.network.edge_count(),
        sim.network.mean_degree()
    );

    // 3. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut obs = SimOutputObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?);

    // 4. Run.
    let t0 = Instant::now();
    let result = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  runtime_days     : {}", result.runtime_days);
    println!("  infected         : {}", result.infected);
    println!("  reinfected       : {}", result.reinfected);
    println!("  long_covid_cases : {}", result.long_covid_cases);
    println!("  min_productivity : {:.2}%", result.min_productivity);
    println!("  daily series     : {OUTPUT_DIR}/daily_series.csv");

    Ok(())
}
