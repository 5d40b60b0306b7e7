mod config;
mod locks;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use locks::{KeyedLockGuard, KeyedLocks};
pub use repos::{IBookingRepo, ICreditRepo, IEventRepo, IPromoCodeRepo, IWaitlistRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::info;

#[derive(Clone)]
pub struct StudioContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
    pub locks: KeyedLocks,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl StudioContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string).await?,
            None => {
                info!("DATABASE_URL is not set, bookings will be kept in memory");
                Repos::create_inmemory()
            }
        };
        let config = Config::new();
        let notifier: Arc<dyn INotifier> = match &config.notification_webhook_url {
            Some(url) => Arc::new(WebhookNotifier::new(url.clone())),
            None => Arc::new(LogNotifier),
        };

        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
            locks: KeyedLocks::new(),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(InMemoryNotifier::new()),
            locks: KeyedLocks::new(),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<StudioContext> {
    StudioContext::create(ContextParams {
        postgres_connection_string: std::env::var("DATABASE_URL").ok(),
    })
    .await
}
