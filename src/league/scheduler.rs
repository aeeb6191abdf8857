use std::time::Duration;

use log::{error, info};
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use super::engine::PromotionEngine;

/// Drives the promotion engine on a fixed period, independent of request
/// handling. Cycles never overlap; a cycle that overruns its period only
/// delays the next tick.
pub struct Scheduler {
    engine: PromotionEngine,
    period: Duration,
    shutdown: watch::Receiver<bool>,
}

impl Scheduler {
    pub fn new(engine: PromotionEngine, period: Duration, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            engine,
            period,
            shutdown,
        }
    }

    /// Loops until the shutdown signal flips. The signal is only checked
    /// between cycles, so an in-flight cycle always finishes; a cycle
    /// error is logged and the loop carries on to the next tick.
    pub async fn run(mut self) {
        let mut ticker = time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval fires immediately; the first cycle should wait a full period
        ticker.tick().await;

        info!("League scheduler started (period: {:?})", self.period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.engine.run_cycle() {
                        error!("Rebalancing cycle failed: {e}");
                    }
                }
                _ = self.shutdown.changed() => {
                    info!("League scheduler stopping");
                    break;
                }
            }
        }
    }
}
