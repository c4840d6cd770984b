//! reagent - a tag-grammar ReAct agent for your terminal

use clap::{Parser, Subcommand};
use tracing::error;

mod commands;

use commands::{ask_command, init_command, tools_command};

/// reagent - minimal ReAct agent loop
#[derive(Parser)]
#[command(name = "reagent")]
#[command(about = "A minimal tag-grammar ReAct agent loop")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the config file
    Init,
    /// Ask the agent a question
    Ask {
        /// Question to ask; omit for interactive mode
        #[arg(short, long)]
        question: Option<String>,
        /// Maximum number of agent iterations
        #[arg(long)]
        max_iterations: Option<u32>,
        /// Model override
        #[arg(short, long)]
        model: Option<String>,
    },
    /// List the built-in tools
    Tools,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let result = match cli.command {
        Commands::Init => init_command().await,
        Commands::Ask {
            question,
            max_iterations,
            model,
        } => ask_command(question, max_iterations, model).await,
        Commands::Tools => tools_command(),
    };

    if let Err(e) = result {
        error!("command failed: {:#}", e);
        std::process::exit(1);
    }
}
