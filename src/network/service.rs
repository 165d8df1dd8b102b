//! Hunt Service
//!
//! The single shared store handed to every request handler. All state sits
//! behind one mutex; each operation takes it once, does its work without
//! awaiting anything else, and lets go. List requests only park a oneshot
//! while holding the lock and await the answer after releasing it.

use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::game::claim::{ClaimError, ClaimOutcome, ClaimRequest};
use crate::game::config::HuntConfig;
use crate::game::field::FieldSnapshot;
use crate::game::state::HuntState;
use crate::game::tick::TickResult;
use crate::game::waitqueue::{FlushReport, PendingList};
use crate::network::admin::{AdminError, AdminPolicy};
use crate::network::protocol::{leaderboard_view, LeaderboardView};

/// Shared hunt service.
pub struct HuntService {
    state: Mutex<HuntState>,
    admin: AdminPolicy,
}

impl HuntService {
    /// Create a service with fresh state.
    pub fn new(config: &HuntConfig, admin: AdminPolicy) -> Self {
        Self {
            state: Mutex::new(HuntState::new(config)),
            admin,
        }
    }

    /// Park a list request. The receiver resolves at the next tick.
    pub async fn list_diamonds(&self) -> PendingList {
        self.state.lock().await.enqueue_list()
    }

    /// Arbitrate a claim at the current time.
    ///
    /// The clock is read under the lock, so claims are timestamped in the
    /// order they are arbitrated.
    pub async fn claim(&self, request: &ClaimRequest) -> Result<ClaimOutcome, ClaimError> {
        let mut state = self.state.lock().await;
        state.claim(request, Utc::now())
    }

    /// Current leader board.
    pub async fn leaderboard(&self) -> LeaderboardView {
        leaderboard_view(&self.state.lock().await.leaderboard)
    }

    /// Current field, without waiting for a tick.
    pub async fn snapshot(&self) -> FieldSnapshot {
        self.state.lock().await.field.snapshot()
    }

    /// Number of parked list requests.
    pub async fn waiting_count(&self) -> usize {
        self.state.lock().await.waiting.len()
    }

    /// Run one spawn + flush tick.
    pub async fn run_tick(&self) -> TickResult {
        self.state.lock().await.run_tick()
    }

    /// Clear players and diamonds and re-enable spawning.
    pub async fn reset(&self, referer: Option<&str>) -> Result<FlushReport, AdminError> {
        self.admin.authorize(referer)?;
        let report = self.state.lock().await.reset_all();
        info!("Reset and creating diamonds");
        Ok(report)
    }

    /// Stop spawning new diamonds.
    pub async fn stop_spawning(&self, referer: Option<&str>) -> Result<(), AdminError> {
        self.admin.authorize(referer)?;
        self.state.lock().await.set_spawning(false);
        info!("Stopped creating diamonds");
        Ok(())
    }

    /// Resume spawning new diamonds.
    pub async fn start_spawning(&self, referer: Option<&str>) -> Result<(), AdminError> {
        self.admin.authorize(referer)?;
        self.state.lock().await.set_spawning(true);
        info!("Restarted creating diamonds");
        Ok(())
    }

    /// Spawn the background tick loop.
    ///
    /// Each tick runs in its own task, so a panic inside one tick is logged
    /// and the next tick still fires. The loop ends on `shutdown`.
    pub fn spawn_tick_loop(
        self: &Arc<Self>,
        period: Duration,
        mut shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        let service = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let tick_service = Arc::clone(&service);
                        match tokio::spawn(async move { tick_service.run_tick().await }).await {
                            Ok(result) => {
                                if !result.spawned.is_empty() {
                                    debug!("Diamonds added: {} (field: {})", result.spawned.len(), result.field_size);
                                }
                                debug!(
                                    "Tick {}: {} notified, {} abandoned",
                                    result.tick, result.flush.delivered, result.flush.abandoned
                                );
                            }
                            Err(e) => {
                                error!("Tick failed: {}", e);
                            }
                        }
                    }
                    _ = shutdown.recv() => {
                        info!("Tick loop stopping");
                        break;
                    }
                }
            }
        })
    }
}
