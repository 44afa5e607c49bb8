use std::sync::Arc;
use std::time::Duration;

use backend::{
    api::{self, AppState},
    clients::{HttpFeedClient, HttpFlockClient},
    config::AppConfig,
    cost::{
        insert::InsertCostService, lifecycle::CostLifecycleService,
        repository_sqlx::SqlxCostRecordRepository, shed_lock::ShedLocks,
        update::UpdateCostService,
    },
    db::Db,
    logger::init_tracing,
};

/// Initializes DB, runs migrations and constructs the repository.
async fn init_repo(cfg: &AppConfig) -> anyhow::Result<Arc<SqlxCostRecordRepository>> {
    let db = Db::connect(&cfg.database_url).await?;
    db.migrate().await?;

    Ok(Arc::new(SqlxCostRecordRepository::new(db.pool.clone())))
}

fn build_state(
    cfg: &AppConfig,
    repo: Arc<SqlxCostRecordRepository>,
) -> anyhow::Result<AppState> {
    let timeout = Duration::from_millis(cfg.lookup_timeout_ms);

    let feed = Arc::new(HttpFeedClient::new(cfg.feed_service_url.clone(), timeout)?);
    let flock = Arc::new(HttpFlockClient::new(cfg.flock_service_url.clone(), timeout)?);
    let shed_locks = Arc::new(ShedLocks::new());

    Ok(AppState {
        insert: Arc::new(InsertCostService::new(
            feed.clone(),
            flock.clone(),
            repo.clone(),
            shed_locks,
        )),
        update: Arc::new(UpdateCostService::new(feed, flock, repo.clone())),
        lifecycle: Arc::new(CostLifecycleService::new(repo)),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sqlx::any::install_default_drivers();

    let is_production = std::env::var("APP_ENV").unwrap_or_default() == "production";
    init_tracing(is_production);

    tracing::info!("Starting feedcost backend...");

    let cfg = AppConfig::from_env();

    let repo = init_repo(&cfg).await?;
    let state = build_state(&cfg, repo)?;

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.http_addr).await?;
    tracing::info!(addr = %cfg.http_addr, "feedcost backend listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
