//! The Phishwatch server binary.
//!
//! Assembly order: configuration, logging, Postgres pool + migrations,
//! optional Redis cache, service wiring, then the axum server with
//! graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use api_adapters::{router, AppState, HttpMetrics, SiteMeta};
use configs::AppConfig;
use domains::StatsCache;
use services::{AnalyticsService, CaseService, EngagementService, StatsService};
use storage_adapters::{
    connect_postgres, PgAnalyticsRepo, PgCaseRepo, PgCommentRepo, PgLikeRepo, PgStatsRepo,
    RedisStatsCache, MIGRATOR,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(config.log.json);

    let pool = connect_postgres(
        config.database.url.expose_secret(),
        config.database.max_connections,
    )
    .await
    .context("connecting to postgres")?;
    MIGRATOR.run(&pool).await.context("running migrations")?;

    let cache: Option<Arc<dyn StatsCache>> = match &config.redis.url {
        Some(url) => {
            let redis = deadpool_redis::Config::from_url(url.clone())
                .create_pool(Some(deadpool_redis::Runtime::Tokio1))
                .context("creating redis pool")?;
            tracing::info!("statistics cache enabled");
            Some(Arc::new(RedisStatsCache::new(redis)))
        }
        None => {
            tracing::info!("statistics cache disabled, statistics reads go to postgres");
            None
        }
    };

    let case_repo = Arc::new(PgCaseRepo::new(pool.clone()));
    let comment_repo = Arc::new(PgCommentRepo::new(pool.clone()));
    let like_repo = Arc::new(PgLikeRepo::new(pool.clone()));
    let analytics_repo = Arc::new(PgAnalyticsRepo::new(pool.clone()));
    let stats_repo = Arc::new(PgStatsRepo::new(pool));

    let state = AppState {
        cases: Arc::new(CaseService::new(case_repo.clone())),
        engagement: Arc::new(EngagementService::new(case_repo, comment_repo, like_repo)),
        analytics: Arc::new(AnalyticsService::new(analytics_repo)),
        stats: Arc::new(StatsService::new(stats_repo, cache)),
        site: SiteMeta {
            base_url: config.site.base_url.clone(),
            name: config.site.name.clone(),
        },
        metrics: Arc::new(HttpMetrics::new()),
    };

    let app = router(state);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, site = %config.site.name, "phishwatch listening");

    // ConnectInfo keeps the peer address available as the like-identity
    // fallback when no proxy headers are present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("installing ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("installing sigterm handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
