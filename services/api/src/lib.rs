mod cli;
mod infra;
mod menu;
mod render;
mod routes;
mod server;

use placement::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
