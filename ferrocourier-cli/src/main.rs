use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ferrocourier_core::prelude::*;
use tracing_subscriber::EnvFilter;

mod report;
mod scenario;

use scenario::Scenario;

#[derive(Parser)]
#[command(name = "courier")]
#[command(version)]
#[command(about = "Plan restaurant deliveries over a street network", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter, e.g. `info` or `ferrocourier_core=debug`
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign every restaurant to a user
    Plan {
        /// TOML scenario with nodes, edges and solver settings
        scenario: PathBuf,

        /// Override the regularization strength
        #[arg(long)]
        epsilon: Option<f64>,

        /// Override the number of scaling rounds
        #[arg(long)]
        max_iter: Option<usize>,

        /// Stop once row sums are this close to their marginal
        #[arg(long)]
        tolerance: Option<f64>,

        /// Cost used for pairs with no route between them
        #[arg(long)]
        unreachable_penalty: Option<f64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the route between two nodes
    Route {
        scenario: PathBuf,

        #[arg(long)]
        from: NodeId,

        #[arg(long)]
        to: NodeId,

        /// Also list up to this many cycle-free alternatives
        #[arg(long, default_value_t = 0)]
        alternatives: usize,

        /// Longest alternative explored, in nodes
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Plan {
            scenario,
            epsilon,
            max_iter,
            tolerance,
            unreachable_penalty,
            json,
        } => {
            let scenario = Scenario::load(&scenario)?;
            let graph = scenario.graph()?;

            let mut config = scenario.pipeline_config();
            if let Some(epsilon) = epsilon {
                config.sinkhorn = config.sinkhorn.with_epsilon(epsilon);
            }
            if let Some(max_iter) = max_iter {
                config.sinkhorn = config.sinkhorn.with_max_iterations(max_iter);
            }
            if let Some(tolerance) = tolerance {
                config.sinkhorn = config.sinkhorn.with_tolerance(tolerance);
            }
            if unreachable_penalty.is_some() {
                config.unreachable_penalty = unreachable_penalty;
            }
            tracing::debug!(?config, "planning");

            let plan = plan_deliveries(&graph, &config).context("planning deliveries")?;
            if json {
                println!("{}", report::plan_json(&plan)?);
            } else {
                print!("{}", report::render_plan(&graph, &plan));
            }
        }
        Commands::Route {
            scenario,
            from,
            to,
            alternatives,
            max_depth,
        } => {
            let graph = Scenario::load(&scenario)?.graph()?;
            let route = shortest_path(&graph, from, to)?;
            let paths = if alternatives > 0 {
                alternative_paths(&graph, from, to, alternatives, max_depth)?
            } else {
                Vec::new()
            };
            print!("{}", report::render_route(&graph, &route, &paths));
        }
    }

    Ok(())
}
