use crate::application::services::{ApiTokenService, SessionService};
use crate::domain::ports::time_service::TimeService;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Rows removed by one sweep
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub sessions: u64,
    pub tokens: u64,
}

/// Periodically deletes expired sessions and API tokens
pub struct ExpirySweeper {
    session_service: SessionService,
    api_token_service: ApiTokenService,
    time_service: Arc<dyn TimeService>,
    interval: Duration,
}

impl ExpirySweeper {
    pub fn new(
        session_service: SessionService,
        api_token_service: ApiTokenService,
        time_service: Arc<dyn TimeService>,
        interval: Duration,
    ) -> Self {
        Self {
            session_service,
            api_token_service,
            time_service,
            interval,
        }
    }

    pub async fn run(&self) {
        info!("Starting ExpirySweeper (interval: {:?})", self.interval);
        loop {
            self.sweep_once().await;
            self.time_service.sleep(self.interval).await;
        }
    }

    /// Failures are logged and leave that count at zero
    pub async fn sweep_once(&self) -> SweepReport {
        let mut report = SweepReport::default();

        match self.session_service.cleanup_expired_sessions().await {
            Ok(count) => report.sessions = count,
            Err(e) => error!("Failed to clean up expired sessions: {}", e),
        }

        match self.api_token_service.cleanup_expired_tokens().await {
            Ok(count) => report.tokens = count,
            Err(e) => error!("Failed to clean up expired API tokens: {}", e),
        }

        if report.sessions > 0 || report.tokens > 0 {
            info!(
                "Removed {} expired sessions and {} expired API tokens",
                report.sessions, report.tokens
            );
        }

        report
    }
}
