use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cvrp_search::io::read_instance;
use cvrp_search::solver::{solve, SolverConfig};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Instance file: header `customers vehicles capacity`, then `demand x y` lines
    instance: PathBuf,

    /// Maximum number of local search sweeps [default: 1000]
    #[arg(long)]
    max_sweeps: Option<usize>,

    /// Wall-clock limit for the local search, in seconds
    #[arg(long, value_name = "SECONDS")]
    time_limit: Option<f64>,

    /// Evaluate exchange candidates on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Scale applied to the largest remaining demand when deciding whether
    /// it must be placed next [default: 1.0]
    #[arg(long)]
    oversize_factor: Option<f64>,

    /// JSON solver configuration; explicit flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn solver_config(&self) -> anyhow::Result<SolverConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SolverConfig::default(),
        };

        if let Some(sweeps) = self.max_sweeps {
            config.search = config.search.with_max_sweeps(sweeps);
        }
        if let Some(secs) = self.time_limit {
            let limit = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("invalid time limit {secs}"))?;
            config.search = config.search.with_time_limit(limit);
        }
        if self.parallel {
            config.search = config.search.with_parallel(true);
        }
        if let Some(factor) = self.oversize_factor {
            config.construction = config.construction.with_oversize_factor(factor);
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.solver_config()?;
    let instance = read_instance(&cli.instance)
        .with_context(|| format!("loading instance {}", cli.instance.display()))?;
    info!(path = %cli.instance.display(), "solving");

    let report = solve(&instance, &config).context("solving instance")?;
    print!("{}", report.to_text(&instance)?);
    Ok(())
}
