use anyhow::Context;
use clap::Parser;
use contagion_core::{Model, SimConfig};

/// Run a contagion simulation to completion and report per-sample health
/// counts.
#[derive(Parser, Debug)]
#[command(name = "contagion", version, about)]
struct Args {
    /// Number of cells in the population
    #[arg(long, default_value_t = 40)]
    population: usize,

    /// Per-tick movement speed of every cell
    #[arg(long, default_value_t = 3.0)]
    speed: f64,

    /// Cells seeded infected (at least 1, below the population size)
    #[arg(long, default_value_t = 2)]
    infected: usize,

    /// Cells seeded immune
    #[arg(long, default_value_t = 0)]
    immune: usize,

    /// RNG seed; a fixed seed reproduces the run exactly
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Ticks an infected cell stays infected before turning immune
    #[arg(long, default_value_t = 60)]
    recovery_period: u32,

    /// Contact radius between cells
    #[arg(long, default_value_t = 15.0)]
    cell_radius: f64,

    /// Stop after this many ticks even if cells are still infected
    #[arg(long, default_value_t = 10_000)]
    max_steps: usize,

    /// Sample health counts every this many ticks
    #[arg(long, default_value_t = 10)]
    sample_every: usize,

    /// Emit the full run summary as JSON instead of a human-readable report
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = SimConfig {
        seed: args.seed,
        cell_radius: args.cell_radius,
        recovery_period: args.recovery_period,
        ..SimConfig::default()
    };
    let mut model = Model::try_new(
        args.population,
        args.speed,
        args.infected,
        args.immune,
        config,
    )
    .context("invalid simulation configuration")?;

    let summary = model
        .try_run_experiment(args.max_steps, args.sample_every)
        .context("experiment limits exceeded")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for sample in &summary.samples {
        println!(
            "tick {:>6}  vulnerable {:>5}  infected {:>5}  immune {:>5}",
            sample.time, sample.vulnerable, sample.infected, sample.immune
        );
    }
    if summary.completed {
        println!(
            "epidemic died out after {} ticks: {} vulnerable, {} immune",
            summary.steps_taken, summary.final_counts.vulnerable, summary.final_counts.immune
        );
    } else {
        println!(
            "stopped at the {}-tick limit with {} cells still infected",
            summary.steps_taken, summary.final_counts.infected
        );
    }
    Ok(())
}
