use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::Mutex;
use studio_booking_domain::{Event, SpotAdjustment, ID};

pub struct InMemoryEventRepo {
    events: Mutex<Vec<Event>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, event: &Event) -> anyhow::Result<()> {
        insert(event, &self.events);
        Ok(())
    }

    async fn save(&self, event: &Event) -> anyhow::Result<()> {
        save(event, &self.events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        Ok(find(event_id, &self.events))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Event>> {
        let mut events = find_by(&self.events, |_| true);
        events.sort_by_key(|e| e.start_ts);
        Ok(events)
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        Ok(delete(event_id, &self.events))
    }

    async fn adjust_spots(
        &self,
        event_id: &ID,
        tier_id: Option<&ID>,
        delta: i64,
    ) -> anyhow::Result<Option<(Event, SpotAdjustment)>> {
        Ok(find_and_update(event_id, &self.events, |event| {
            event.apply_spot_delta(tier_id, delta)
        }))
    }

    async fn resize(
        &self,
        event_id: &ID,
        capacity: i64,
    ) -> anyhow::Result<Option<(Event, SpotAdjustment)>> {
        match find_and_update(event_id, &self.events, |event| event.resize(capacity)) {
            Some((event, Some(adjustment))) => Ok(Some((event, adjustment))),
            Some(_) => anyhow::bail!("Event {} can not take capacity {}", event_id, capacity),
            None => Ok(None),
        }
    }
}
