mod cli;
mod config;
mod main_lib;

use clap::Parser;
use cli::{run_cli, Cli};
use config::Config;
use main_lib::{build_services, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    let services = build_services(&config);
    run_cli(Cli::parse(), &services).await
}
