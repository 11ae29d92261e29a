mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rules")]
#[command(version, about = "Rule-wrapping validation engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in rules
    List {
        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate a single value with one rule
    Check {
        /// Rule name (e.g. isEmail, min, isIn)
        rule: String,

        /// Value to validate, as JSON; anything else is taken as a string.
        /// The literal `undefined` tests an absent value.
        value: String,

        /// Rule argument as JSON (repeatable)
        #[arg(short, long = "arg")]
        args: Vec<String>,

        /// Regular expression passed after the other arguments
        #[arg(short, long)]
        pattern: Option<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Run a check suite
    Run {
        /// Path to the suite file (YAML, TOML or JSON)
        suite: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::List { format } => commands::list::execute(&format),

        Commands::Check {
            rule,
            value,
            args,
            pattern,
            format,
        } => commands::check::execute(&rule, &value, &args, pattern, &format),

        Commands::Run { suite, format } => commands::run::execute(&suite, &format),
    }
}
