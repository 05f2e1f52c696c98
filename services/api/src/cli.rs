use crate::reports::{run_analytics, run_relations, AnalyticsArgs, RelationsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use organi::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "organi",
    about = "Serve and inspect the organization chart and its evaluator relationships",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print every employee's resolved evaluator and evaluatee count
    Relations(RelationsArgs),
    /// Print headcount, grade, and age statistics
    Analytics(AnalyticsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override ORGANI_DATA_FILE for this run
    #[arg(long)]
    pub(crate) data: Option<std::path::PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Relations(args) => run_relations(args),
        Command::Analytics(args) => run_analytics(args),
    }
}
