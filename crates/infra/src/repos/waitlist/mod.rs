mod inmemory;
mod postgres;

pub use inmemory::InMemoryWaitlistRepo;
pub use postgres::PostgresWaitlistRepo;
use studio_booking_domain::{WaitlistEntry, ID};

#[async_trait::async_trait]
pub trait IWaitlistRepo: Send + Sync {
    async fn insert(&self, entry: &WaitlistEntry) -> anyhow::Result<()>;
    async fn save(&self, entry: &WaitlistEntry) -> anyhow::Result<()>;
    async fn find(&self, entry_id: &ID) -> anyhow::Result<Option<WaitlistEntry>>;
    /// Entries of the `Event` ordered by position
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<WaitlistEntry>>;
    async fn delete(&self, entry_id: &ID) -> anyhow::Result<Option<WaitlistEntry>>;
    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()>;
}
