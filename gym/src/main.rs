use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use lib::ConfigError;

mod agents;
mod runner;
mod stats;

use agents::{Agent, Autopilot, GreedyAgent, RandomAgent};
use runner::{GameConfig, run_game};
use stats::{AgentStats, ComparisonStats, GameResult};

#[derive(Parser)]
#[command(name = "snake-gym")]
#[command(about = "Benchmarking gym for running the snake autopilot against baseline agents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone, Debug)]
struct BatchArgs {
    /// Number of games to run
    #[arg(short, long, default_value = "100")]
    games: usize,

    /// Maximum ticks per game
    #[arg(long, default_value = "10000")]
    max_ticks: u64,

    /// Base seed for food placement; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Run games in parallel
    #[arg(short, long)]
    parallel: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one agent for a number of games
    Run {
        /// Agent to run
        #[arg(short, long, default_value = "autopilot")]
        agent: AgentType,

        /// Grid width in cells
        #[arg(long, default_value = "20", value_parser = clap::value_parser!(i32).range(1..))]
        width: i32,

        /// Grid height in cells
        #[arg(long, default_value = "20", value_parser = clap::value_parser!(i32).range(1..))]
        height: i32,

        #[command(flatten)]
        batch: BatchArgs,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run several agents on the same seeds and compare them
    Compare {
        /// Agents to compare
        #[arg(short, long, value_delimiter = ',', default_value = "autopilot,greedy,random")]
        agents: Vec<AgentType>,

        /// Grid width in cells
        #[arg(long, default_value = "20", value_parser = clap::value_parser!(i32).range(1..))]
        width: i32,

        /// Grid height in cells
        #[arg(long, default_value = "20", value_parser = clap::value_parser!(i32).range(1..))]
        height: i32,

        #[command(flatten)]
        batch: BatchArgs,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the autopilot over a range of square grid sizes
    Sweep {
        /// Grid side lengths to test
        #[arg(long, value_delimiter = ',', default_value = "10,20,30")]
        sizes: Vec<i32>,

        #[command(flatten)]
        batch: BatchArgs,
    },
}

#[derive(Clone, Copy, ValueEnum, Debug, PartialEq)]
enum AgentType {
    Autopilot,
    Greedy,
    Random,
}

impl AgentType {
    fn create_agent(&self) -> Box<dyn Agent> {
        match self {
            AgentType::Autopilot => Box::new(Autopilot),
            AgentType::Greedy => Box::new(GreedyAgent::new()),
            AgentType::Random => Box::new(RandomAgent::new()),
        }
    }
}

fn main() -> Result<(), ConfigError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            agent,
            width,
            height,
            batch,
            json,
        } => run_cmd(&[agent], width, height, &batch, json, "Snake Gym Run"),
        Commands::Compare {
            agents,
            width,
            height,
            batch,
            json,
        } => run_cmd(&agents, width, height, &batch, json, "Snake Gym Comparison"),
        Commands::Sweep { sizes, batch } => run_sweep_cmd(&sizes, &batch),
    }
}

fn progress_bar(len: usize, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} {label} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})"
            ))
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

/// Plays `batch.games` games with `agent`, ticking the progress bar if any
fn play_batch(
    agent: &dyn Agent,
    config: &GameConfig,
    batch: &BatchArgs,
    pb: Option<&ProgressBar>,
) -> Result<Vec<GameResult>, ConfigError> {
    let play = |game: u64| {
        let result = run_game(agent, config, game);
        if let Some(pb) = pb {
            pb.inc(1);
        }
        result
    };

    if batch.parallel {
        use rayon::prelude::*;
        (0..batch.games as u64).into_par_iter().map(play).collect()
    } else {
        (0..batch.games as u64).map(play).collect()
    }
}

fn run_cmd(
    agent_types: &[AgentType],
    width: i32,
    height: i32,
    batch: &BatchArgs,
    json_output: bool,
    title: &str,
) -> Result<(), ConfigError> {
    let config = GameConfig {
        width,
        height,
        max_ticks: batch.max_ticks,
        seed: batch.seed,
    };
    // Fail before any progress output if the grid is unusable
    config.session_config(0)?;

    if !json_output {
        println!("\n{}", format!("=== {} ===", title).green().bold());
        println!(
            "Grid: {}x{} | Games: {} | Max ticks: {}",
            width, height, batch.games, batch.max_ticks
        );
        println!("Parallel: {} | Seed: {:?}", batch.parallel, batch.seed);
        println!();
    }

    let agents: Vec<Box<dyn Agent>> = agent_types.iter().map(|t| t.create_agent()).collect();

    let mut agent_stats = Vec::with_capacity(agents.len());
    for agent in &agents {
        let pb = (!json_output).then(|| progress_bar(batch.games, agent.name()));
        let results = play_batch(agent.as_ref(), &config, batch, pb.as_ref())?;
        if let Some(pb) = pb {
            pb.finish_with_message("Done!");
        }
        agent_stats.push(AgentStats::from_results(agent.name(), &results));
    }

    let stats = ComparisonStats::new(title, agent_stats);
    if json_output {
        println!("{}", stats.to_json());
    } else {
        stats.print_summary();
    }
    Ok(())
}

fn run_sweep_cmd(sizes: &[i32], batch: &BatchArgs) -> Result<(), ConfigError> {
    println!("\n{}", "=== Snake Gym Sweep ===".green().bold());
    println!("Autopilot over square grids of side {:?}", sizes);
    println!("Games per size: {}", batch.games);
    println!();

    for &size in sizes {
        let config = GameConfig::square(size)
            .with_max_ticks(batch.max_ticks)
            .with_seed(batch.seed);
        let pb = progress_bar(batch.games, &format!("{size}x{size}"));
        let results = play_batch(&Autopilot, &config, batch, Some(&pb))?;
        pb.finish();

        let stats = AgentStats::from_results("Autopilot", &results);
        let cells = (size * size) as f64;
        println!(
            "  {}x{}: avg score {:.1} ({:.1}% of grid), best {} | {} wall / {} self / {} filled / {} cut off",
            size,
            size,
            stats.avg_score(),
            (stats.avg_score() + 1.0) / cells * 100.0,
            stats.max_score.to_string().green(),
            stats.wall_deaths.to_string().red(),
            stats.self_collisions.to_string().red(),
            stats.grids_filled.to_string().cyan(),
            stats.cut_off.to_string().yellow()
        );
    }

    println!();
    Ok(())
}
