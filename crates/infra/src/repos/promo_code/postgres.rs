use super::IPromoCodeRepo;
use anyhow::Context;
use rust_decimal::Decimal;
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use studio_booking_domain::{PromoCode, ID};
use tracing::error;

pub struct PostgresPromoCodeRepo {
    pool: PgPool,
}

impl PostgresPromoCodeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PromoCodeRaw {
    promo_code_uid: Uuid,
    code: String,
    description: Option<String>,
    discount_type: String,
    discount_value: Decimal,
    max_discount: Option<Decimal>,
    min_purchase: Decimal,
    usage_limit: Option<i64>,
    per_user_limit: i64,
    usage_count: i64,
    start_date: i64,
    expiry_date: Option<i64>,
    is_active: bool,
    event_uids: Vec<Uuid>,
    created: i64,
    updated: i64,
}

impl TryFrom<PromoCodeRaw> for PromoCode {
    type Error = anyhow::Error;

    fn try_from(e: PromoCodeRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: e.promo_code_uid.into(),
            code: e.code,
            description: e.description,
            discount_type: e.discount_type.parse().with_context(|| {
                format!("Promo code {} has a corrupt discount type", e.promo_code_uid)
            })?,
            discount_value: e.discount_value,
            max_discount: e.max_discount,
            min_purchase: e.min_purchase,
            usage_limit: e.usage_limit,
            per_user_limit: e.per_user_limit,
            usage_count: e.usage_count,
            start_date: e.start_date,
            expiry_date: e.expiry_date,
            is_active: e.is_active,
            event_ids: e.event_uids.into_iter().map(|id| id.into()).collect(),
            created: e.created,
            updated: e.updated,
        })
    }
}

fn event_uids(promo_code: &PromoCode) -> Vec<Uuid> {
    promo_code
        .event_ids
        .iter()
        .map(|id| *id.inner_ref())
        .collect()
}

#[async_trait::async_trait]
impl IPromoCodeRepo for PostgresPromoCodeRepo {
    async fn insert(&self, promo_code: &PromoCode) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO promo_codes(
                promo_code_uid, code, description, discount_type, discount_value, max_discount,
                min_purchase, usage_limit, per_user_limit, usage_count, start_date, expiry_date,
                is_active, event_uids, created, updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(promo_code.id.inner_ref())
        .bind(&promo_code.code)
        .bind(&promo_code.description)
        .bind(promo_code.discount_type.as_str())
        .bind(promo_code.discount_value)
        .bind(promo_code.max_discount)
        .bind(promo_code.min_purchase)
        .bind(promo_code.usage_limit)
        .bind(promo_code.per_user_limit)
        .bind(promo_code.usage_count)
        .bind(promo_code.start_date)
        .bind(promo_code.expiry_date)
        .bind(promo_code.is_active)
        .bind(event_uids(promo_code))
        .bind(promo_code.created)
        .bind(promo_code.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert promo code: {:?}. DB returned error: {:?}",
                promo_code, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, promo_code: &PromoCode) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE promo_codes
            SET description = $2,
            discount_type = $3,
            discount_value = $4,
            max_discount = $5,
            min_purchase = $6,
            usage_limit = $7,
            per_user_limit = $8,
            start_date = $9,
            expiry_date = $10,
            is_active = $11,
            event_uids = $12,
            updated = $13
            WHERE promo_code_uid = $1
            "#,
        )
        .bind(promo_code.id.inner_ref())
        .bind(&promo_code.description)
        .bind(promo_code.discount_type.as_str())
        .bind(promo_code.discount_value)
        .bind(promo_code.max_discount)
        .bind(promo_code.min_purchase)
        .bind(promo_code.usage_limit)
        .bind(promo_code.per_user_limit)
        .bind(promo_code.start_date)
        .bind(promo_code.expiry_date)
        .bind(promo_code.is_active)
        .bind(event_uids(promo_code))
        .bind(promo_code.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save promo code: {:?}. DB returned error: {:?}",
                promo_code, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, promo_code_id: &ID) -> anyhow::Result<Option<PromoCode>> {
        let promo_code: Option<PromoCodeRaw> = sqlx::query_as(
            r#"
            SELECT * FROM promo_codes AS p
            WHERE p.promo_code_uid = $1
            "#,
        )
        .bind(promo_code_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        promo_code.map(PromoCode::try_from).transpose()
    }

    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<PromoCode>> {
        let promo_code: Option<PromoCodeRaw> = sqlx::query_as(
            r#"
            SELECT * FROM promo_codes AS p
            WHERE p.code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        promo_code.map(PromoCode::try_from).transpose()
    }

    async fn find_all(&self) -> anyhow::Result<Vec<PromoCode>> {
        let promo_codes: Vec<PromoCodeRaw> = sqlx::query_as(
            r#"
            SELECT * FROM promo_codes AS p
            ORDER BY p.created ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        promo_codes.into_iter().map(PromoCode::try_from).collect()
    }

    async fn delete(&self, promo_code_id: &ID) -> anyhow::Result<Option<PromoCode>> {
        let promo_code: Option<PromoCodeRaw> = sqlx::query_as(
            r#"
            DELETE FROM promo_codes AS p
            WHERE p.promo_code_uid = $1
            RETURNING *
            "#,
        )
        .bind(promo_code_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        promo_code.map(PromoCode::try_from).transpose()
    }

    async fn redeem(&self, promo_code_id: &ID) -> anyhow::Result<bool> {
        let rows = sqlx::query(
            r#"
            UPDATE promo_codes
            SET usage_count = usage_count + 1
            WHERE promo_code_uid = $1
            AND (usage_limit IS NULL OR usage_count < usage_limit)
            "#,
        )
        .bind(promo_code_id.inner_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to redeem promo code: {}. DB returned error: {:?}",
                promo_code_id, e
            );
            e
        })?
        .rows_affected();
        Ok(rows == 1)
    }

    async fn release(&self, promo_code_id: &ID) -> anyhow::Result<bool> {
        let rows = sqlx::query(
            r#"
            UPDATE promo_codes
            SET usage_count = usage_count - 1
            WHERE promo_code_uid = $1
            AND usage_count > 0
            "#,
        )
        .bind(promo_code_id.inner_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to release promo code: {}. DB returned error: {:?}",
                promo_code_id, e
            );
            e
        })?
        .rows_affected();
        Ok(rows == 1)
    }
}
