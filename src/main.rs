//! Deployment advisor server.
//!
//! Loads configuration from the environment, wires adapters into the
//! wizard and recommendation handlers, and serves the HTTP API until
//! SIGINT/SIGTERM.

use std::error::Error;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use deployment_advisor::adapters::ai::build_provider_chain;
use deployment_advisor::adapters::http::{api_router, AppState};
use deployment_advisor::adapters::postgres::{self, PostgresOutcomeRecorder};
use deployment_advisor::adapters::{InMemoryOutcomeRecorder, InMemorySessionStore};
use deployment_advisor::application::{
    AdvisorService, AdvisorSettings, ComputeRecommendationHandler, SessionSweeper,
    SessionSweeperConfig, WizardController,
};
use deployment_advisor::config::{AppConfig, ServerConfig};
use deployment_advisor::domain::catalog::CriterionCatalog;
use deployment_advisor::ports::{OutcomeRecorder, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let catalog = Arc::new(match &config.wizard.catalog_path {
        Some(path) => {
            info!(path = %path.display(), "loading criterion catalog");
            CriterionCatalog::from_path(path)?
        }
        None => CriterionCatalog::builtin().clone(),
    });
    info!(criteria = catalog.len(), "criterion catalog ready");

    let provider = build_provider_chain(&config.ai)?;
    let provider_name = provider.provider_info().name;
    let advisor = Arc::new(AdvisorService::new(
        provider,
        catalog.clone(),
        AdvisorSettings {
            temperature: config.ai.temperature,
            max_tokens: config.ai.max_tokens,
            timeout: config.ai.advisor_timeout(),
        },
    ));

    let outcomes: Arc<dyn OutcomeRecorder> = match &config.database {
        Some(database) => {
            let pool = postgres::connect(database).await?;
            let recorder = PostgresOutcomeRecorder::new(pool);
            if database.ensure_schema {
                recorder.ensure_schema().await?;
            }
            info!("recording outcomes to PostgreSQL");
            Arc::new(recorder)
        }
        None => {
            warn!("no database configured, outcomes are kept in memory only");
            Arc::new(InMemoryOutcomeRecorder::new())
        }
    };

    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let controller = Arc::new(WizardController::new(
        catalog.clone(),
        sessions.clone(),
        outcomes,
        advisor.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = SessionSweeper::new(
        controller.clone(),
        SessionSweeperConfig::default()
            .with_interval(config.wizard.sweep_interval())
            .with_ttl(config.wizard.session_ttl()),
    );
    let sweeper_task = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

    let state = AppState {
        controller,
        recommend: Arc::new(ComputeRecommendationHandler::new(catalog.clone(), advisor)),
        catalog,
        sessions,
        ai_provider: provider_name,
    };
    let app = api_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "deployment advisor listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = sweeper_task.await {
        warn!(error = %e, "session sweeper task failed");
    }
    info!("shutdown complete");
    Ok(())
}

/// JSON lines in production, human-readable otherwise. `RUST_LOG`
/// overrides `server.log_level`.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.clone()));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("ctrl-c received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}
