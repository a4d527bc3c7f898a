use crate::application::services::*;
use crate::config::Config;
use crate::domain::ports::time_service::TimeService;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::Database;
use crate::infrastructure::runtime::tokio::TokioTimeService;
use crate::infrastructure::workers::ExpirySweeper;
use std::sync::Arc;
use std::time::Duration;

/// Wire services against the database using the system clock
pub fn build_app_state(db: Database, config: &Config) -> AppState {
    build_app_state_with_clock(db, config, Arc::new(TokioTimeService::new()))
}

/// Wire services against the database with an explicit clock
pub fn build_app_state_with_clock(
    db: Database,
    config: &Config,
    time_service: Arc<dyn TimeService>,
) -> AppState {
    let db = Arc::new(db);

    let session_service = SessionService::new(
        db.clone(),
        db.clone(),
        time_service.clone(),
        config.session_cookie_name.clone(),
        config.session_duration_hours,
    );

    let identity_resolver = IdentityResolver::new(
        Arc::new(session_service.clone()),
        db.clone(),
        time_service.clone(),
    );

    let auth_service = AuthService::new(
        db.clone(),
        session_service.clone(),
        config.registration_password.clone(),
    );

    let api_token_service = ApiTokenService::new(db.clone(), time_service);

    let file_service = FileService::new(db);

    tracing::info!("Application services initialized");

    AppState {
        identity_resolver,
        session_service,
        auth_service,
        api_token_service,
        file_service,
    }
}

/// Start the expired session/token sweeper on its own task
pub fn spawn_background_workers(state: &AppState, config: &Config) {
    let sweeper = ExpirySweeper::new(
        state.session_service.clone(),
        state.api_token_service.clone(),
        Arc::new(TokioTimeService::new()),
        Duration::from_secs(config.sweep_interval_secs),
    );

    tokio::spawn(async move {
        sweeper.run().await;
    });
    tracing::info!("Expiry sweeper started");
}
