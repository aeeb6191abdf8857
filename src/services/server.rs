use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{error, info};
use tokio::sync::watch;
use tower_http::cors::CorsLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::settings::AppConfig;
use crate::database;
use crate::league::{PromotionEngine, Scheduler};
use crate::services::RatingService;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let db_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "skyjump_ranking.db".to_string());

        let pool = database::create_pool(&db_path)?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let scheduler = Scheduler::new(
            PromotionEngine::new(pool.clone()),
            Duration::from_secs(self.config.rebalance.interval_secs),
            shutdown_rx,
        );
        let scheduler_handle = tokio::spawn(scheduler.run());

        let state = Arc::new(AppState {
            ratings: RatingService::new(pool.clone(), self.config.leaderboard.default_top_count),
            engine: PromotionEngine::new(pool),
        });

        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        // Stop the scheduler after the listener closes; an in-flight
        // cycle finishes before the task exits.
        let _ = shutdown_tx.send(true);
        if let Err(e) = scheduler_handle.await {
            error!("Scheduler task ended abnormally: {e}");
        }

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}
