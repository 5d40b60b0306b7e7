use super::IBookingRepo;
use anyhow::Context;
use rust_decimal::Decimal;
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use studio_booking_domain::{Booking, PaymentStatus, Redeemer, ID};
use tracing::error;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BookingRaw {
    booking_uid: Uuid,
    event_uid: Uuid,
    ticket_tier_uid: Option<Uuid>,
    user_uid: Option<Uuid>,
    name: String,
    email: String,
    phone: Option<String>,
    spots: i64,
    unit_price: Decimal,
    discount: Decimal,
    total_amount: Decimal,
    promo_code_uid: Option<Uuid>,
    used_credits: Option<i64>,
    status: String,
    payment_status: String,
    confirmation_number: String,
    created: i64,
    updated: i64,
}

impl TryFrom<BookingRaw> for Booking {
    type Error = anyhow::Error;

    fn try_from(e: BookingRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: e.booking_uid.into(),
            event_id: e.event_uid.into(),
            ticket_tier_id: e.ticket_tier_uid.map(|id| id.into()),
            user_id: e.user_uid.map(|id| id.into()),
            name: e.name,
            email: e.email,
            phone: e.phone,
            spots: e.spots,
            unit_price: e.unit_price,
            discount: e.discount,
            total_amount: e.total_amount,
            promo_code_id: e.promo_code_uid.map(|id| id.into()),
            used_credits: e.used_credits,
            status: e
                .status
                .parse()
                .with_context(|| format!("Booking {} has a corrupt status", e.booking_uid))?,
            payment_status: e.payment_status.parse().with_context(|| {
                format!("Booking {} has a corrupt payment status", e.booking_uid)
            })?,
            confirmation_number: e.confirmation_number,
            created: e.created,
            updated: e.updated,
        })
    }
}

fn to_bookings(rows: Vec<BookingRaw>) -> anyhow::Result<Vec<Booking>> {
    rows.into_iter().map(Booking::try_from).collect()
}

#[async_trait::async_trait]
impl IBookingRepo for PostgresBookingRepo {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings(
                booking_uid, event_uid, ticket_tier_uid, user_uid, name, email, phone, spots,
                unit_price, discount, total_amount, promo_code_uid, used_credits, status,
                payment_status, confirmation_number, created, updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(booking.id.inner_ref())
        .bind(booking.event_id.inner_ref())
        .bind(booking.ticket_tier_id.as_ref().map(|id| *id.inner_ref()))
        .bind(booking.user_id.as_ref().map(|id| *id.inner_ref()))
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(booking.spots)
        .bind(booking.unit_price)
        .bind(booking.discount)
        .bind(booking.total_amount)
        .bind(booking.promo_code_id.as_ref().map(|id| *id.inner_ref()))
        .bind(booking.used_credits)
        .bind(booking.status.as_str())
        .bind(booking.payment_status.as_str())
        .bind(&booking.confirmation_number)
        .bind(booking.created)
        .bind(booking.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert booking: {:?}. DB returned error: {:?}",
                booking, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, booking: &Booking) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE bookings
            SET name = $2,
            email = $3,
            phone = $4,
            spots = $5,
            total_amount = $6,
            status = $7,
            updated = $8
            WHERE booking_uid = $1
            "#,
        )
        .bind(booking.id.inner_ref())
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(booking.spots)
        .bind(booking.total_amount)
        .bind(booking.status.as_str())
        .bind(booking.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save booking: {:?}. DB returned error: {:?}",
                booking, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, booking_id: &ID) -> anyhow::Result<Option<Booking>> {
        let booking: Option<BookingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM bookings AS b
            WHERE b.booking_uid = $1
            "#,
        )
        .bind(booking_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        booking.map(Booking::try_from).transpose()
    }

    async fn find_by_confirmation_number(
        &self,
        confirmation_number: &str,
    ) -> anyhow::Result<Option<Booking>> {
        let booking: Option<BookingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM bookings AS b
            WHERE b.confirmation_number = $1
            "#,
        )
        .bind(confirmation_number)
        .fetch_optional(&self.pool)
        .await?;
        booking.map(Booking::try_from).transpose()
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Booking>> {
        let bookings: Vec<BookingRaw> = sqlx::query_as(
            r#"
            SELECT * FROM bookings AS b
            WHERE b.event_uid = $1
            ORDER BY b.created ASC
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        to_bookings(bookings)
    }

    async fn count_redemptions(
        &self,
        promo_code_id: &ID,
        redeemer: &Redeemer,
    ) -> anyhow::Result<i64> {
        let count: (i64,) = match redeemer {
            Redeemer::User(user_id) => {
                sqlx::query_as(
                    r#"
                    SELECT COUNT(*) FROM bookings AS b
                    WHERE b.promo_code_uid = $1 AND b.user_uid = $2
                    "#,
                )
                .bind(promo_code_id.inner_ref())
                .bind(user_id.inner_ref())
                .fetch_one(&self.pool)
                .await?
            }
            Redeemer::Email(email) => {
                sqlx::query_as(
                    r#"
                    SELECT COUNT(*) FROM bookings AS b
                    WHERE b.promo_code_uid = $1 AND LOWER(TRIM(b.email)) = LOWER($2)
                    "#,
                )
                .bind(promo_code_id.inner_ref())
                .bind(email)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(count.0)
    }

    async fn transition_payment_status(
        &self,
        booking_id: &ID,
        from: PaymentStatus,
        to: PaymentStatus,
        now: i64,
    ) -> anyhow::Result<bool> {
        let rows = sqlx::query(
            r#"
            UPDATE bookings
            SET payment_status = $3,
            updated = $4
            WHERE booking_uid = $1 AND payment_status = $2
            "#,
        )
        .bind(booking_id.inner_ref())
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to transition payment status of booking: {} from {} to {}. DB returned error: {:?}",
                booking_id, from, to, e
            );
            e
        })?
        .rows_affected();
        Ok(rows == 1)
    }

    async fn delete(&self, booking_id: &ID) -> anyhow::Result<Option<Booking>> {
        let booking: Option<BookingRaw> = sqlx::query_as(
            r#"
            DELETE FROM bookings AS b
            WHERE b.booking_uid = $1
            RETURNING *
            "#,
        )
        .bind(booking_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        booking.map(Booking::try_from).transpose()
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM bookings AS b
            WHERE b.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
