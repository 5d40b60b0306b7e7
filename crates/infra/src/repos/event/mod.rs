mod inmemory;
mod postgres;

pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;
use studio_booking_domain::{Event, SpotAdjustment, ID};

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, event: &Event) -> anyhow::Result<()>;
    async fn save(&self, event: &Event) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<Event>>;
    /// Every `Event` ordered by start time
    async fn find_all(&self) -> anyhow::Result<Vec<Event>>;
    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<Event>>;
    /// Applies a spot delta to the inventory of the `Event` atomically.
    /// Returns `None` if the `Event` does not exist.
    async fn adjust_spots(
        &self,
        event_id: &ID,
        tier_id: Option<&ID>,
        delta: i64,
    ) -> anyhow::Result<Option<(Event, SpotAdjustment)>>;
    /// Changes the capacity of a tier-less `Event` and moves its spot counter
    /// by the same delta in one write. Fails if the `Event` can not take the
    /// capacity and returns `None` if it does not exist.
    async fn resize(
        &self,
        event_id: &ID,
        capacity: i64,
    ) -> anyhow::Result<Option<(Event, SpotAdjustment)>>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use rust_decimal::Decimal;
    use studio_booking_domain::{Entity, Event, EventOptions, TicketTierOptions};

    fn event(capacity: i64) -> Event {
        Event::new(
            EventOptions {
                title: "Evening yin".into(),
                description: Some("Slow and deep".into()),
                start_ts: 1000,
                capacity: Some(capacity),
                price: Decimal::new(1999, 2),
                ticket_tiers: Vec::new(),
            },
            0,
        )
        .expect("To create event")
    }

    #[tokio::test]
    async fn create_and_delete() {
        let ctx = setup_context().await.expect("To setup context");
        let event = event(10);

        assert!(ctx.repos.events.insert(&event).await.is_ok());

        let res = ctx
            .repos
            .events
            .find(&event.id)
            .await
            .expect("To query event")
            .expect("To find event");
        assert!(res.eq(&event));
        assert_eq!(res.price, event.price);
        assert_eq!(res.available_spots, 10);

        let all = ctx.repos.events.find_all().await.expect("To list events");
        assert!(all.iter().any(|e| e.id == event.id));

        let deleted = ctx.repos.events.delete(&event.id).await.expect("To delete");
        assert!(deleted.expect("To return deleted event").eq(&event));
        assert!(ctx
            .repos
            .events
            .find(&event.id)
            .await
            .expect("To query event")
            .is_none());
    }

    #[tokio::test]
    async fn update() {
        let ctx = setup_context().await.expect("To setup context");
        let mut event = event(10);
        ctx.repos.events.insert(&event).await.expect("To insert");

        assert!(event.set_title("Sunrise yin".into()));
        ctx.repos.events.save(&event).await.expect("To save");

        let res = ctx
            .repos
            .events
            .find(&event.id)
            .await
            .expect("To query event")
            .expect("To find event");
        assert_eq!(res.title, "Sunrise yin");
    }

    #[tokio::test]
    async fn adjusts_spots_within_bounds() {
        let ctx = setup_context().await.expect("To setup context");
        let event = event(5);
        ctx.repos.events.insert(&event).await.expect("To insert");

        let (updated, adjustment) = ctx
            .repos
            .events
            .adjust_spots(&event.id, None, -3)
            .await
            .expect("To adjust")
            .expect("To find event");
        assert_eq!(updated.available_spots, 2);
        assert!(!adjustment.is_clamped());

        let (updated, adjustment) = ctx
            .repos
            .events
            .adjust_spots(&event.id, None, -4)
            .await
            .expect("To adjust")
            .expect("To find event");
        assert_eq!(updated.available_spots, 0);
        assert_eq!(adjustment.applied_delta, -2);
        assert!(adjustment.is_clamped());

        let missing = ctx
            .repos
            .events
            .adjust_spots(&Default::default(), None, 1)
            .await
            .expect("To adjust");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn resizes_capacity_and_counter_together() {
        let ctx = setup_context().await.expect("To setup context");
        let event = event(10);
        ctx.repos.events.insert(&event).await.expect("To insert");
        ctx.repos
            .events
            .adjust_spots(&event.id, None, -4)
            .await
            .expect("To adjust");

        let (updated, adjustment) = ctx
            .repos
            .events
            .resize(&event.id, 5)
            .await
            .expect("To resize")
            .expect("To find event");
        assert_eq!(updated.capacity, 5);
        assert_eq!(updated.available_spots, 1);
        assert_eq!(adjustment.applied_delta, -5);

        let stored = ctx
            .repos
            .events
            .find(&event.id)
            .await
            .expect("To query event")
            .expect("To find event");
        assert_eq!(stored.capacity, 5);
        assert_eq!(stored.available_spots, 1);

        assert!(ctx.repos.events.resize(&event.id, -1).await.is_err());
        let missing = ctx
            .repos
            .events
            .resize(&Default::default(), 3)
            .await
            .expect("To resize");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn adjusts_tier_spots() {
        let ctx = setup_context().await.expect("To setup context");
        let event = Event::new(
            EventOptions {
                title: "Workshop".into(),
                description: None,
                start_ts: 0,
                capacity: None,
                price: Decimal::ZERO,
                ticket_tiers: vec![
                    TicketTierOptions {
                        name: "Standard".into(),
                        price: Decimal::from(10),
                        capacity: 3,
                        benefits: Vec::new(),
                    },
                    TicketTierOptions {
                        name: "VIP".into(),
                        price: Decimal::from(25),
                        capacity: 2,
                        benefits: vec!["Front row".into()],
                    },
                ],
            },
            0,
        )
        .expect("To create event");
        ctx.repos.events.insert(&event).await.expect("To insert");
        let vip = event.ticket_tiers[1].id.clone();

        let (updated, _) = ctx
            .repos
            .events
            .adjust_spots(&event.id, Some(&vip), -2)
            .await
            .expect("To adjust")
            .expect("To find event");
        assert_eq!(updated.available_spots, 3);
        assert_eq!(updated.remaining_spots(Some(&vip)), Some(0));
        assert_eq!(updated.ticket_tiers[1].benefits, vec!["Front row".to_string()]);
    }
}
