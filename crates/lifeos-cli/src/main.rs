use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lifeos", version, about = "LifeOS CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// V2G request tracking
    V2g {
        #[command(subcommand)]
        action: commands::v2g::V2gAction,
    },
    /// Time logging and analytics
    Time {
        #[command(subcommand)]
        action: commands::timelog::TimeAction,
    },
    /// Task and time statistics
    Stats,
    /// Recommend the next thing to work on right now
    Next {
        /// Show the score breakdown for the recommendation
        #[arg(long)]
        explain: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::V2g { action } => commands::v2g::run(action),
        Commands::Time { action } => commands::timelog::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Next { explain } => commands::next::run(explain),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
