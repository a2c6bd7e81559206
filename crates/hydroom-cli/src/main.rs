use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "hydroom-cli", version, about = "Hydroom water tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log one glass of water
    Add,
    /// Print today's progress as JSON
    Status,
    /// Reset today's progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Print the motivational message for a glass count
    Message {
        count: u32,
    },
    /// Interactive session with reminders
    Session {
        /// Start reminders right away, every N minutes
        #[arg(long)]
        interval: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Add => commands::progress::add(),
        Commands::Status => commands::progress::status(),
        Commands::Reset { yes } => commands::progress::reset(yes),
        Commands::Message { count } => commands::progress::message(count),
        Commands::Session { interval } => commands::session::run(interval),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
