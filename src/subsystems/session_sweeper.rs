use std::time::Duration;

use async_trait::async_trait;
use tokio::select;
use tokio_graceful_shutdown::{IntoSubsystem, SubsystemHandle};
use tracing::{error, info};

use crate::{AppState, domain::auth::delete_expired_sessions};

/// Periodically removes sessions that have sat idle past their expiry.
pub struct SessionSweeper {
    state: AppState,
}

impl SessionSweeper {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl IntoSubsystem<anyhow::Error> for SessionSweeper {
    async fn run(self, subsys: SubsystemHandle) -> Result<(), anyhow::Error> {
        let interval =
            Duration::from_secs(u64::from(self.state.settings.session.sweep_interval_secs));
        loop {
            select!(
                _ = tokio::time::sleep(interval) => {
                    match delete_expired_sessions(&self.state.pool).await {
                        Ok(0) => {}
                        Ok(swept) => info!("SessionSweeper: removed {swept} expired sessions"),
                        Err(err) => error!("SessionSweeper: sweep failed with {err}"),
                    }
                }
                _ = subsys.on_shutdown_requested() => {
                    info!("Session sweeper shutdown");
                    return Ok(());
                }
            );
        }
    }
}
