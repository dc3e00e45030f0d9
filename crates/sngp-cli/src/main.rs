//! Command-line driver for single-node GP searches.

mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use logging::LogFormat;
use serde::Serialize;
use sngp_core::{RunStats, SearchConfig};
use sngp_problems::ProblemKind;
use sngp_search::SearchSession;
use std::path::PathBuf;
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

/// Evolve a node graph against a benchmark problem
#[derive(Parser, Debug)]
#[command(name = "sngp")]
#[command(about = "Single-node genetic programming search", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(short, long, env = "SNGP_CONFIG")]
    config: Option<PathBuf>,

    /// Problem to solve (multiplexer, even-parity-N, symbolic-regression)
    #[arg(short, long, default_value = "multiplexer")]
    problem: ProblemKind,

    /// Number of runs in the batch
    #[arg(short, long)]
    runs: Option<usize>,

    /// Generation budget per run
    #[arg(long)]
    max_generations: Option<u64>,

    /// Total node count, input slots included
    #[arg(long)]
    size: Option<usize>,

    /// Base seed for reproducible runs
    #[arg(long, env = "SNGP_SEED")]
    seed: Option<u64>,

    /// Interval between progress reports
    #[arg(long, default_value_t = 1000)]
    report_interval_ms: u64,

    /// Node whose program is printed at the end (defaults to the best node)
    #[arg(long)]
    node: Option<usize>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

impl Cli {
    fn search_config(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => SearchConfig::default(),
        };

        if let Some(runs) = self.runs {
            config.runs = runs;
        }
        if let Some(max_generations) = self.max_generations {
            config.max_generations = max_generations;
        }
        if let Some(size) = self.size {
            config.graph.size = size;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

#[derive(Serialize)]
struct Report {
    problem: String,
    stats: RunStats,
    node: usize,
    fitness: f64,
    program: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_format)?;

    let config = cli.search_config()?;
    let runs = config.runs;
    let provider = cli.problem.build()?;

    info!(
        problem = %cli.problem,
        runs,
        size = config.graph.size,
        max_generations = config.max_generations,
        seed = ?config.seed,
        "Starting sngp"
    );

    let mut session = SearchSession::new(provider, config).context("invalid search configuration")?;
    session.start(runs)?;

    let mut ticker = interval(Duration::from_millis(cli.report_interval_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                report_progress(&session.current_stats());
                if !session.is_running() {
                    break;
                }
            }
            result = signal::ctrl_c() => {
                if let Err(e) = result {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                }
                info!("Interrupted, pausing search");
                break;
            }
        }
    }

    tokio::task::block_in_place(|| session.pause())?;

    let report = final_report(&mut session, &cli)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn report_progress(stats: &RunStats) {
    info!(
        run = stats.runs + 1,
        generation = stats.generation,
        score = stats.avg_score,
        best_score = stats.best_score_ever,
        best_individual = stats.best_individual_score_ever,
        hits = stats.hits,
        elapsed_ms = stats.elapsed_ms(),
        "Progress"
    );
}

fn final_report(session: &mut SearchSession, cli: &Cli) -> Result<Report> {
    let node = cli.node.unwrap_or_else(|| session.best_node());
    let program = session
        .program_text(node)
        .with_context(|| format!("cannot list node {}", node))?;
    let fitness = session.current_fitness().get(node).copied().unwrap_or_default();

    Ok(Report {
        problem: cli.problem.to_string(),
        stats: session.current_stats(),
        node,
        fitness,
        program,
    })
}

fn print_report(report: &Report) {
    let stats = &report.stats;
    println!("Problem: {}", report.problem);
    println!(
        "Runs: {}  Hits: {}  Time: {} ms",
        stats.runs,
        stats.hits,
        stats.elapsed_ms()
    );
    println!(
        "Best total score: {}  Best node score: {}",
        stats.best_score_ever, stats.best_individual_score_ever
    );
    println!();
    println!("Program for node {} (score {}):", report.node, report.fitness);
    print!("{}", report.program);
}
