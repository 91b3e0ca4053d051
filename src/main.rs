use anyhow::Result;
use clap::{Parser, Subcommand};
use mealweek::cli::OutputFormat;

/// mealweek - weekly meal plans, nutrition totals and shopping lists
#[derive(Parser)]
#[command(name = "mealweek")]
#[command(about = "Plan a week of meals from a recipe catalog", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a weekly plan with nutrition totals and a shopping list
    Plan {
        /// Seed for a reproducible plan
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Generate a plan and print only its shopping list
    Shopping {
        /// Seed for a reproducible plan
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Validate the configuration and recipe catalog
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = mealweek::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealweek::observability::init_observability(
        "mealweek",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Plan { seed, format } => mealweek::cli::plan(config, seed, format),
        Commands::Shopping { seed } => mealweek::cli::shopping(config, seed),
        Commands::Check => mealweek::cli::check(config),
    }
}
