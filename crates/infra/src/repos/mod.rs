mod booking;
mod credit;
mod event;
mod promo_code;
mod shared;
mod waitlist;

pub use booking::IBookingRepo;
use booking::{InMemoryBookingRepo, PostgresBookingRepo};
pub use credit::ICreditRepo;
use credit::{InMemoryCreditRepo, PostgresCreditRepo};
pub use event::IEventRepo;
use event::{InMemoryEventRepo, PostgresEventRepo};
pub use promo_code::IPromoCodeRepo;
use promo_code::{InMemoryPromoCodeRepo, PostgresPromoCodeRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use waitlist::IWaitlistRepo;
use waitlist::{InMemoryWaitlistRepo, PostgresWaitlistRepo};

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub bookings: Arc<dyn IBookingRepo>,
    pub promo_codes: Arc<dyn IPromoCodeRepo>,
    pub waitlist: Arc<dyn IWaitlistRepo>,
    pub credits: Arc<dyn ICreditRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            bookings: Arc::new(PostgresBookingRepo::new(pool.clone())),
            promo_codes: Arc::new(PostgresPromoCodeRepo::new(pool.clone())),
            waitlist: Arc::new(PostgresWaitlistRepo::new(pool.clone())),
            credits: Arc::new(PostgresCreditRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
            bookings: Arc::new(InMemoryBookingRepo::new()),
            promo_codes: Arc::new(InMemoryPromoCodeRepo::new()),
            waitlist: Arc::new(InMemoryWaitlistRepo::new()),
            credits: Arc::new(InMemoryCreditRepo::new()),
        }
    }
}
