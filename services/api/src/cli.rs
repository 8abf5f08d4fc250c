use crate::check::{run_check, CheckArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use stranger_stories::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Stranger Stories",
    about = "Run the anonymous story service or screen story text from the command line",
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
    /// Run a story through the acceptance gate and print the verdict as JSON
    Check(CheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the directory holding index.html and admin.html
    #[arg(long)]
    pub(crate) public_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args),
    }
}
