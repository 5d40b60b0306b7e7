use super::IEventRepo;
use rust_decimal::Decimal;
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use studio_booking_domain::{Event, SpotAdjustment, TicketTier, ID};
use tracing::error;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    title: String,
    description: Option<String>,
    start_ts: i64,
    capacity: i64,
    available_spots: i64,
    price: Decimal,
    ticket_tiers: Json<Vec<TicketTier>>,
    created: i64,
    updated: i64,
}

impl From<EventRaw> for Event {
    fn from(e: EventRaw) -> Self {
        Self {
            id: e.event_uid.into(),
            title: e.title,
            description: e.description,
            start_ts: e.start_ts,
            capacity: e.capacity,
            available_spots: e.available_spots,
            price: e.price,
            ticket_tiers: e.ticket_tiers.0,
            created: e.created,
            updated: e.updated,
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, event: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events(event_uid, title, description, start_ts, capacity, available_spots, price, ticket_tiers, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(event.id.inner_ref())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.start_ts)
        .bind(event.capacity)
        .bind(event.available_spots)
        .bind(event.price)
        .bind(Json(&event.ticket_tiers))
        .bind(event.created)
        .bind(event.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert event: {:?}. DB returned error: {:?}",
                event, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, event: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE events
            SET title = $2,
            description = $3,
            start_ts = $4,
            capacity = $5,
            available_spots = $6,
            price = $7,
            ticket_tiers = $8,
            updated = $9
            WHERE event_uid = $1
            "#,
        )
        .bind(event.id.inner_ref())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.start_ts)
        .bind(event.capacity)
        .bind(event.available_spots)
        .bind(event.price)
        .bind(Json(&event.ticket_tiers))
        .bind(event.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save event: {:?}. DB returned error: {:?}",
                event, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        let event: Option<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(event.map(|e| e.into()))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Event>> {
        let events: Vec<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events AS e
            ORDER BY e.start_ts ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(events.into_iter().map(|e| e.into()).collect())
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        let event: Option<EventRaw> = sqlx::query_as(
            r#"
            DELETE FROM events AS e
            WHERE e.event_uid = $1
            RETURNING *
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(event.map(|e| e.into()))
    }

    async fn adjust_spots(
        &self,
        event_id: &ID,
        tier_id: Option<&ID>,
        delta: i64,
    ) -> anyhow::Result<Option<(Event, SpotAdjustment)>> {
        let mut tx = self.pool.begin().await?;

        let event: Option<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events AS e
            WHERE e.event_uid = $1
            FOR UPDATE
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&mut *tx)
        .await?;
        let mut event: Event = match event {
            Some(event) => event.into(),
            None => return Ok(None),
        };

        let adjustment = event.apply_spot_delta(tier_id, delta);

        sqlx::query(
            r#"
            UPDATE events
            SET available_spots = $2,
            ticket_tiers = $3
            WHERE event_uid = $1
            "#,
        )
        .bind(event.id.inner_ref())
        .bind(event.available_spots)
        .bind(Json(&event.ticket_tiers))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "Unable to adjust spots of event: {}. DB returned error: {:?}",
                event.id, e
            );
            e
        })?;
        tx.commit().await?;

        Ok(Some((event, adjustment)))
    }

    async fn resize(
        &self,
        event_id: &ID,
        capacity: i64,
    ) -> anyhow::Result<Option<(Event, SpotAdjustment)>> {
        let mut tx = self.pool.begin().await?;

        let event: Option<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events AS e
            WHERE e.event_uid = $1
            FOR UPDATE
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&mut *tx)
        .await?;
        let mut event: Event = match event {
            Some(event) => event.into(),
            None => return Ok(None),
        };

        let adjustment = match event.resize(capacity) {
            Some(adjustment) => adjustment,
            None => anyhow::bail!("Event {} can not take capacity {}", event_id, capacity),
        };

        sqlx::query(
            r#"
            UPDATE events
            SET capacity = $2,
            available_spots = $3
            WHERE event_uid = $1
            "#,
        )
        .bind(event.id.inner_ref())
        .bind(event.capacity)
        .bind(event.available_spots)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "Unable to resize event: {}. DB returned error: {:?}",
                event.id, e
            );
            e
        })?;
        tx.commit().await?;

        Ok(Some((event, adjustment)))
    }
}
