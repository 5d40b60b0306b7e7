use super::ICreditRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use studio_booking_domain::{CreditAccount, ID};
use tracing::error;

pub struct PostgresCreditRepo {
    pool: PgPool,
}

impl PostgresCreditRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CreditAccountRaw {
    user_uid: Uuid,
    balance: i64,
}

impl From<CreditAccountRaw> for CreditAccount {
    fn from(e: CreditAccountRaw) -> Self {
        Self {
            user_id: e.user_uid.into(),
            balance: e.balance,
        }
    }
}

#[async_trait::async_trait]
impl ICreditRepo for PostgresCreditRepo {
    async fn find(&self, user_id: &ID) -> anyhow::Result<CreditAccount> {
        let account: Option<CreditAccountRaw> = sqlx::query_as(
            r#"
            SELECT * FROM credit_accounts AS c
            WHERE c.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(account
            .map(|a| a.into())
            .unwrap_or_else(|| CreditAccount::new(user_id)))
    }

    async fn grant(&self, user_id: &ID, amount: i64) -> anyhow::Result<CreditAccount> {
        if amount <= 0 {
            anyhow::bail!("Can not grant {} credits", amount);
        }
        let account: CreditAccountRaw = sqlx::query_as(
            r#"
            INSERT INTO credit_accounts(user_uid, balance)
            VALUES($1, $2)
            ON CONFLICT (user_uid)
            DO UPDATE SET balance = credit_accounts.balance + EXCLUDED.balance
            RETURNING *
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(amount)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to grant {} credits to user: {}. DB returned error: {:?}",
                amount, user_id, e
            );
            e
        })?;
        Ok(account.into())
    }

    async fn consume(&self, user_id: &ID, amount: i64) -> anyhow::Result<bool> {
        if amount <= 0 {
            return Ok(false);
        }
        let rows = sqlx::query(
            r#"
            UPDATE credit_accounts
            SET balance = balance - $2
            WHERE user_uid = $1 AND balance >= $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(amount)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(rows == 1)
    }
}
