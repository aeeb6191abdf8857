pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod league;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::league::PromotionEngine;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init() -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&database_path())?;
    let mut conn = database::get_connection(&pool)?;

    database::setup::init_database(&mut conn)?;
    database::leagues::seed_leagues(&mut conn, &config.rebalance.default_leagues)?;

    log::info!(
        "Seeded {} league settings",
        config.rebalance.default_leagues.len()
    );
    Ok(())
}

pub fn handle_rebalance() -> Result<()> {
    let pool = database::create_pool(&database_path())?;
    let engine = PromotionEngine::new(pool);
    engine.run_cycle()?;
    Ok(())
}

fn database_path() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| "skyjump_ranking.db".to_string())
}
