use super::IWaitlistRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::Mutex;
use studio_booking_domain::{WaitlistEntry, ID};

pub struct InMemoryWaitlistRepo {
    entries: Mutex<Vec<WaitlistEntry>>,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IWaitlistRepo for InMemoryWaitlistRepo {
    async fn insert(&self, entry: &WaitlistEntry) -> anyhow::Result<()> {
        let inserted = insert_unique(entry, &self.entries, |e| {
            e.event_id == entry.event_id && e.position == entry.position
        });
        if !inserted {
            anyhow::bail!(
                "Position: {} is already taken on the waitlist of event: {}",
                entry.position,
                entry.event_id
            );
        }
        Ok(())
    }

    async fn save(&self, entry: &WaitlistEntry) -> anyhow::Result<()> {
        save(entry, &self.entries);
        Ok(())
    }

    async fn find(&self, entry_id: &ID) -> anyhow::Result<Option<WaitlistEntry>> {
        Ok(find(entry_id, &self.entries))
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<WaitlistEntry>> {
        let mut entries = find_by(&self.entries, |e| e.event_id == *event_id);
        entries.sort_by_key(|e| e.position);
        Ok(entries)
    }

    async fn delete(&self, entry_id: &ID) -> anyhow::Result<Option<WaitlistEntry>> {
        Ok(delete(entry_id, &self.entries))
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()> {
        delete_by(&self.entries, |e| e.event_id == *event_id);
        Ok(())
    }
}
