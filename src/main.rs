mod apply;
mod catalog;
mod cli;
mod cli_cmds;
mod config;
mod dispatch;
mod engine;
mod error;
mod scheduler;
mod state;
mod utils;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
