mod check;
mod cli;
mod infra;
mod routes;
mod server;

use stranger_stories::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
