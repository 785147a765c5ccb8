mod app;
mod cli;
mod logging;

use clap::Parser;
use cli::Args;
use keystone_archive::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    app::run(args).await
}
