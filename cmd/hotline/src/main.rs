//! # Hotline Binary
//!
//! Assembles the intake engine: configuration, storage adapters (Postgres or
//! in-memory), optional S3 attachment storage, the workflow services, and the
//! webhook shim the chat transport posts events to.
//!
//! The process refuses to serve until persistence is confirmed reachable.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chat_adapters::outbox::TracingChatSender;
use chat_adapters::{AppState, Dispatcher, Metrics};
use domains::ports::{
    BlockRegistry, ObjectStorage, RateLimitStore, SessionStore, TicketRepo, TicketSequencer,
};
use services::moderation::{ModerationNotifier, DEFAULT_SEND_TIMEOUT};
use services::{IntakeWorkflow, RateLimiter, StatusMachine};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct Stores {
    tickets: Arc<dyn TicketRepo>,
    sequencer: Arc<dyn TicketSequencer>,
    sessions: Arc<dyn SessionStore>,
    blocks: Arc<dyn BlockRegistry>,
    rates: Arc<dyn RateLimitStore>,
}

fn memory_stores() -> Stores {
    use storage_adapters::memory::{
        MemoryBlockRegistry, MemoryRateLimitStore, MemorySessionStore, MemoryTicketRepo,
        MemoryTicketSequencer,
    };
    Stores {
        tickets: Arc::new(MemoryTicketRepo::new()),
        sequencer: Arc::new(MemoryTicketSequencer::new()),
        sessions: Arc::new(MemorySessionStore::new()),
        blocks: Arc::new(MemoryBlockRegistry::new()),
        rates: Arc::new(MemoryRateLimitStore::new()),
    }
}

#[cfg(feature = "db-postgres")]
async fn postgres_stores(db: &configs::DatabaseSettings) -> anyhow::Result<Stores> {
    use secrecy::ExposeSecret;
    use storage_adapters::postgres::{
        self, PgBlockRegistry, PgRateLimitStore, PgSessionStore, PgTicketRepo, PgTicketSequencer,
    };

    let pool = postgres::connect(db.url.expose_secret()).context("building postgres pool")?;
    postgres::wait_for_db(&pool, Duration::from_secs(db.startup_window_secs)).await?;
    postgres::init_schema(&pool).await.context("initializing schema")?;

    Ok(Stores {
        tickets: Arc::new(PgTicketRepo::new(pool.clone())),
        sequencer: Arc::new(PgTicketSequencer::new(pool.clone())),
        sessions: Arc::new(PgSessionStore::new(pool.clone())),
        blocks: Arc::new(PgBlockRegistry::new(pool.clone())),
        rates: Arc::new(PgRateLimitStore::new(pool)),
    })
}

#[cfg(feature = "media-s3")]
async fn object_storage(settings: &configs::S3Settings) -> Arc<dyn ObjectStorage> {
    use storage_adapters::s3::S3ObjectStorage;

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = &settings.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }
    let shared = loader.load().await;
    let conf = aws_sdk_s3::config::Builder::from(&shared)
        .endpoint_url(&settings.endpoint)
        .force_path_style(true)
        .build();
    let client = aws_sdk_s3::Client::from_conf(conf);
    Arc::new(S3ObjectStorage::new(
        client,
        settings.bucket.clone(),
        settings.endpoint.clone(),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = configs::load().context("loading configuration")?;

    let stores = match &settings.database {
        #[cfg(feature = "db-postgres")]
        Some(db) => postgres_stores(db).await?,
        #[cfg(not(feature = "db-postgres"))]
        Some(_) => anyhow::bail!("database configured but binary built without db-postgres"),
        None => {
            warn!("no database configured, state is in-memory and lost on restart");
            memory_stores()
        }
    };

    let storage: Option<Arc<dyn ObjectStorage>> = match &settings.s3 {
        #[cfg(feature = "media-s3")]
        Some(s3) => Some(object_storage(s3).await),
        #[cfg(not(feature = "media-s3"))]
        Some(_) => {
            warn!("s3 configured but binary built without media-s3, attachments keep no URL");
            None
        }
        None => None,
    };

    let sender = Arc::new(TracingChatSender);
    let notifier = ModerationNotifier::new(sender, settings.mod_chat_id, DEFAULT_SEND_TIMEOUT);
    let rate_limiter = RateLimiter::new(
        stores.rates.clone(),
        Duration::from_secs(settings.rate_limit_seconds),
    );

    let workflow = Arc::new(IntakeWorkflow::new(
        stores.blocks.clone(),
        stores.sessions.clone(),
        stores.tickets.clone(),
        stores.sequencer.clone(),
        rate_limiter,
        notifier.clone(),
        storage,
    ));
    let status_machine = Arc::new(StatusMachine::new(
        stores.tickets.clone(),
        stores.sessions.clone(),
        notifier,
    ));

    let admin_ids: HashSet<i64> = settings.admin_ids.iter().copied().collect();
    let metrics = Arc::new(Metrics::new());
    let dispatcher = Arc::new(Dispatcher::new(
        workflow,
        status_machine,
        stores.sessions,
        stores.blocks,
        stores.tickets,
        admin_ids,
        metrics.clone(),
    ));

    let app = chat_adapters::router(AppState { dispatcher, metrics });
    let listener = tokio::net::TcpListener::bind(&settings.listen_addr)
        .await
        .with_context(|| format!("binding {}", settings.listen_addr))?;
    info!(addr = %settings.listen_addr, "hotline serving");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
