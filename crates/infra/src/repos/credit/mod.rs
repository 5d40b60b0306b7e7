mod inmemory;
mod postgres;

pub use inmemory::InMemoryCreditRepo;
pub use postgres::PostgresCreditRepo;
use studio_booking_domain::{CreditAccount, ID};

#[async_trait::async_trait]
pub trait ICreditRepo: Send + Sync {
    /// Users without an account have a zero balance
    async fn find(&self, user_id: &ID) -> anyhow::Result<CreditAccount>;
    async fn grant(&self, user_id: &ID, amount: i64) -> anyhow::Result<CreditAccount>;
    /// Decrements the balance by `amount` if it covers it
    async fn consume(&self, user_id: &ID, amount: i64) -> anyhow::Result<bool>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use studio_booking_domain::ID;

    #[tokio::test]
    async fn grant_and_consume() {
        let ctx = setup_context().await.expect("To setup context");
        let user_id = ID::new();

        let account = ctx.repos.credits.find(&user_id).await.expect("To query");
        assert_eq!(account.balance, 0);
        assert!(!ctx.repos.credits.consume(&user_id, 1).await.expect("To consume"));

        let account = ctx.repos.credits.grant(&user_id, 5).await.expect("To grant");
        assert_eq!(account.balance, 5);
        let account = ctx.repos.credits.grant(&user_id, 2).await.expect("To grant");
        assert_eq!(account.balance, 7);

        assert!(ctx.repos.credits.consume(&user_id, 7).await.expect("To consume"));
        assert!(!ctx.repos.credits.consume(&user_id, 1).await.expect("To consume"));
        let account = ctx.repos.credits.find(&user_id).await.expect("To query");
        assert_eq!(account.balance, 0);
    }
}
