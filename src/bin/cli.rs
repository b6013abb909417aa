// src/bin/cli.rs
use color_eyre::eyre::{eyre, Result};
use gatherer_scrape::cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    cli::run().map_err(|e| eyre!("{e}"))
}
