//! lexdrill CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use lexdrill_core::model::SelectionMode;

mod commands;

#[derive(Parser)]
#[command(name = "lexdrill", version, about = "Exam practice from a question bank")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where to find the configuration and the bank.
#[derive(Args, Debug, Clone, Default)]
pub struct BankArgs {
    /// Bank directory containing manifest.json (overrides the config)
    #[arg(long)]
    bank: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a bank and report what was indexed
    Validate {
        #[command(flatten)]
        bank: BankArgs,
    },

    /// Print one question with shuffled options
    Show {
        /// Question id (e.g. "108-1301-001")
        #[arg(long)]
        id: Option<String>,

        /// Exam year, used with --subject and --no
        #[arg(long)]
        year: Option<String>,

        /// Subject code, used with --year and --no
        #[arg(long)]
        subject: Option<String>,

        /// Question number, used with --year and --subject
        #[arg(long)]
        no: Option<String>,

        /// Keep the source choice order instead of shuffling
        #[arg(long)]
        in_order: bool,

        /// Also print the answer key and explanation
        #[arg(long)]
        reveal: bool,

        #[command(flatten)]
        bank: BankArgs,
    },

    /// Practice one subject interactively
    Practice {
        /// Subject code (e.g. "1301")
        #[arg(long)]
        subject: String,

        /// Do not update the statistics file
        #[arg(long)]
        no_stats: bool,

        #[command(flatten)]
        bank: BankArgs,
    },

    /// Take a mock exam over a category interactively
    Mock {
        /// Category id or name (see `lexdrill categories`)
        #[arg(long)]
        category: String,

        /// Do not update the statistics file
        #[arg(long)]
        no_stats: bool,

        #[command(flatten)]
        bank: BankArgs,
    },

    /// Grade a single answer
    Grade {
        /// Question id
        #[arg(long)]
        id: String,

        /// Selected choice id (e.g. "c2")
        #[arg(long)]
        choice: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        bank: BankArgs,
    },

    /// Show learner statistics
    Stats {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List mock-exam categories and their pool sizes
    Categories {
        #[command(flatten)]
        bank: BankArgs,
    },

    /// Create a starter config and a sample bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lexdrill=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { bank } => commands::validate::execute(bank).await,
        Commands::Show {
            id,
            year,
            subject,
            no,
            in_order,
            reveal,
            bank,
        } => commands::show::execute(id, year, subject, no, in_order, reveal, bank).await,
        Commands::Practice {
            subject,
            no_stats,
            bank,
        } => commands::practice::execute(SelectionMode::Subject, subject, no_stats, bank).await,
        Commands::Mock {
            category,
            no_stats,
            bank,
        } => commands::practice::execute(SelectionMode::Mock, category, no_stats, bank).await,
        Commands::Grade {
            id,
            choice,
            json,
            bank,
        } => commands::grade::execute(id, choice, json, bank).await,
        Commands::Stats { config } => commands::stats::execute(config),
        Commands::Categories { bank } => commands::categories::execute(bank).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
