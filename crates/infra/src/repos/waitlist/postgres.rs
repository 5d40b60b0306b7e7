use super::IWaitlistRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use studio_booking_domain::{WaitlistEntry, ID};
use tracing::error;

pub struct PostgresWaitlistRepo {
    pool: PgPool,
}

impl PostgresWaitlistRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct WaitlistEntryRaw {
    entry_uid: Uuid,
    event_uid: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    position: i64,
    notified_at: Option<i64>,
    created: i64,
}

impl From<WaitlistEntryRaw> for WaitlistEntry {
    fn from(e: WaitlistEntryRaw) -> Self {
        Self {
            id: e.entry_uid.into(),
            event_id: e.event_uid.into(),
            name: e.name,
            email: e.email,
            phone: e.phone,
            position: e.position,
            notified_at: e.notified_at,
            created: e.created,
        }
    }
}

#[async_trait::async_trait]
impl IWaitlistRepo for PostgresWaitlistRepo {
    async fn insert(&self, entry: &WaitlistEntry) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO waitlist_entries(entry_uid, event_uid, name, email, phone, position, notified_at, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id.inner_ref())
        .bind(entry.event_id.inner_ref())
        .bind(&entry.name)
        .bind(&entry.email)
        .bind(&entry.phone)
        .bind(entry.position)
        .bind(entry.notified_at)
        .bind(entry.created)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert waitlist entry: {:?}. DB returned error: {:?}",
                entry, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, entry: &WaitlistEntry) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE waitlist_entries
            SET name = $2,
            email = $3,
            phone = $4,
            notified_at = $5
            WHERE entry_uid = $1
            "#,
        )
        .bind(entry.id.inner_ref())
        .bind(&entry.name)
        .bind(&entry.email)
        .bind(&entry.phone)
        .bind(entry.notified_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save waitlist entry: {:?}. DB returned error: {:?}",
                entry, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, entry_id: &ID) -> anyhow::Result<Option<WaitlistEntry>> {
        let entry: Option<WaitlistEntryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM waitlist_entries AS w
            WHERE w.entry_uid = $1
            "#,
        )
        .bind(entry_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry.map(|e| e.into()))
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<WaitlistEntry>> {
        let entries: Vec<WaitlistEntryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM waitlist_entries AS w
            WHERE w.event_uid = $1
            ORDER BY w.position ASC
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(entries.into_iter().map(|e| e.into()).collect())
    }

    async fn delete(&self, entry_id: &ID) -> anyhow::Result<Option<WaitlistEntry>> {
        let entry: Option<WaitlistEntryRaw> = sqlx::query_as(
            r#"
            DELETE FROM waitlist_entries AS w
            WHERE w.entry_uid = $1
            RETURNING *
            "#,
        )
        .bind(entry_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry.map(|e| e.into()))
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM waitlist_entries AS w
            WHERE w.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
