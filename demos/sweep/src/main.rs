//! sweep: the default one-at-a-time parameter sweep, run in parallel.
//!
//! Writes one row per run to `output/sweep/runs.csv` and logs the mean
//! outcome for every parameter value.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use log::{LevelFilter, info};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

use abm_core::Config;
use abm_output::{CsvWriter, OutputWriter, RunRow};
use abm_sim::{RunRecord, default_sweep, run_batch};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:    usize = 2_000;
const BASE_SEED:      u64   = 1_000;
const RUNS_PER_VALUE: u32   = 5;
const OUTPUT_DIR:     &str  = "output/sweep";

const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

fn init_logging() -> Result<()> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    // Per-run progress lines from abm_sim would interleave across threads.
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .logger(log4rs::config::Logger::builder().build("abm_sim::sim", LevelFilter::Warn))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

/// Mean infected, LC cases, and minimum productivity over `records`.
fn means(records: &[&RunRecord]) -> (f64, f64, f64) {
    let n = records.len().max(1) as f64;
    let infected: usize = records.iter().map(|r| r.summary.infected).sum();
    let lc: usize = records.iter().map(|r| r.summary.long_covid_cases).sum();
    let prod: f64 = records.iter().map(|r| r.summary.min_productivity).sum();
    (infected as f64 / n, lc as f64 / n, prod / n)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging()?;

    // 1. Specs.
    let base = Config::default();
    let specs = default_sweep(RUNS_PER_VALUE, AGENT_COUNT, BASE_SEED);
    info!("{} runs of {AGENT_COUNT} agents, {RUNS_PER_VALUE} per value", specs.len());

    // 2. Run everything.
    let t0 = Instant::now();
    let records = run_batch(&base, &specs);
    info!("{} of {} runs finished in {:.1} s", records.len(), specs.len(), t0.elapsed().as_secs_f64());

    // 3. Persist one row per run.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let rows: Vec<RunRow> = records.iter().map(RunRow::from).collect();
    writer.write_runs(&rows)?;
    writer.finish()?;

    // 4. Per-value means, in sweep order.
    let mut seen: Vec<(&str, f64)> = Vec::new();
    for spec in &specs {
        let key = (spec.param_name.as_str(), spec.param_value);
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        let group: Vec<&RunRecord> = records
            .iter()
            .filter(|r| r.spec.param_name == key.0 && r.spec.param_value == key.1)
            .collect();
        let (infected, lc, prod) = means(&group);
        info!(
            "{:<24} {:>6}: infected {:>8.1}  long_covid {:>6.1}  min_productivity {:>6.2}%",
            key.0, key.1, infected, lc, prod,
        );
    }

    println!("runs written to {OUTPUT_DIR}/runs.csv");
    Ok(())
}
