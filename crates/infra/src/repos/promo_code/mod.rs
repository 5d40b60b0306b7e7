mod inmemory;
mod postgres;

pub use inmemory::InMemoryPromoCodeRepo;
pub use postgres::PostgresPromoCodeRepo;
use studio_booking_domain::{PromoCode, ID};

#[async_trait::async_trait]
pub trait IPromoCodeRepo: Send + Sync {
    /// Fails if the code is already taken
    async fn insert(&self, promo_code: &PromoCode) -> anyhow::Result<()>;
    /// Persists every field except `usage_count`, which only changes through `redeem`
    async fn save(&self, promo_code: &PromoCode) -> anyhow::Result<()>;
    async fn find(&self, promo_code_id: &ID) -> anyhow::Result<Option<PromoCode>>;
    /// Expects a normalized code
    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<PromoCode>>;
    async fn find_all(&self) -> anyhow::Result<Vec<PromoCode>>;
    async fn delete(&self, promo_code_id: &ID) -> anyhow::Result<Option<PromoCode>>;
    /// Increments the usage count unless the usage limit has been reached.
    /// Returns whether the redemption was recorded.
    async fn redeem(&self, promo_code_id: &ID) -> anyhow::Result<bool>;
    /// Gives back a redemption of a booking that was never stored. Returns
    /// false if there was nothing to give back.
    async fn release(&self, promo_code_id: &ID) -> anyhow::Result<bool>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use rust_decimal::Decimal;
    use studio_booking_domain::{DiscountType, Entity, PromoCode, PromoCodeOptions, ID};

    fn promo_code(usage_limit: Option<i64>) -> PromoCode {
        PromoCode::new(
            PromoCodeOptions {
                code: format!("spring{}", &ID::new().as_string()[..6]),
                description: Some("Spring sale".into()),
                discount_type: DiscountType::Percentage,
                discount_value: Decimal::from(25),
                max_discount: Some(Decimal::from(40)),
                min_purchase: None,
                usage_limit,
                per_user_limit: Some(2),
                start_date: None,
                expiry_date: Some(10_000),
                is_active: None,
                event_ids: vec![ID::new()],
            },
            0,
        )
        .expect("To create promo code")
    }

    #[tokio::test]
    async fn create_find_and_delete() {
        let ctx = setup_context().await.expect("To setup context");
        let promo = promo_code(None);

        assert!(ctx.repos.promo_codes.insert(&promo).await.is_ok());
        // Codes are unique
        assert!(ctx.repos.promo_codes.insert(&promo).await.is_err());

        let res = ctx
            .repos
            .promo_codes
            .find_by_code(&promo.code)
            .await
            .expect("To query")
            .expect("To find promo code");
        assert!(res.eq(&promo));
        assert_eq!(res.max_discount, Some(Decimal::from(40)));
        assert_eq!(res.event_ids, promo.event_ids);
        assert_eq!(res.discount_type, DiscountType::Percentage);

        let all = ctx.repos.promo_codes.find_all().await.expect("To list");
        assert!(all.iter().any(|p| p.id == promo.id));

        let deleted = ctx
            .repos
            .promo_codes
            .delete(&promo.id)
            .await
            .expect("To delete");
        assert!(deleted.is_some());
        assert!(ctx
            .repos
            .promo_codes
            .find(&promo.id)
            .await
            .expect("To query")
            .is_none());
    }

    #[tokio::test]
    async fn redeem_respects_usage_limit() {
        let ctx = setup_context().await.expect("To setup context");
        let promo = promo_code(Some(2));
        ctx.repos.promo_codes.insert(&promo).await.expect("To insert");

        assert!(ctx.repos.promo_codes.redeem(&promo.id).await.expect("To redeem"));
        assert!(ctx.repos.promo_codes.redeem(&promo.id).await.expect("To redeem"));
        assert!(!ctx.repos.promo_codes.redeem(&promo.id).await.expect("To redeem"));

        let res = ctx
            .repos
            .promo_codes
            .find(&promo.id)
            .await
            .expect("To query")
            .expect("To find promo code");
        assert_eq!(res.usage_count, 2);
    }

    #[tokio::test]
    async fn release_gives_back_a_redemption() {
        let ctx = setup_context().await.expect("To setup context");
        let promo = promo_code(Some(1));
        ctx.repos.promo_codes.insert(&promo).await.expect("To insert");

        assert!(!ctx.repos.promo_codes.release(&promo.id).await.expect("To release"));
        assert!(ctx.repos.promo_codes.redeem(&promo.id).await.expect("To redeem"));
        assert!(ctx.repos.promo_codes.release(&promo.id).await.expect("To release"));
        // The freed redemption can be taken again
        assert!(ctx.repos.promo_codes.redeem(&promo.id).await.expect("To redeem"));

        let res = ctx
            .repos
            .promo_codes
            .find(&promo.id)
            .await
            .expect("To query")
            .expect("To find promo code");
        assert_eq!(res.usage_count, 1);
    }

    #[tokio::test]
    async fn save_keeps_usage_count() {
        let ctx = setup_context().await.expect("To setup context");
        let mut promo = promo_code(None);
        ctx.repos.promo_codes.insert(&promo).await.expect("To insert");
        ctx.repos.promo_codes.redeem(&promo.id).await.expect("To redeem");

        promo.is_active = false;
        promo.usage_count = 0;
        ctx.repos.promo_codes.save(&promo).await.expect("To save");

        let res = ctx
            .repos
            .promo_codes
            .find(&promo.id)
            .await
            .expect("To query")
            .expect("To find promo code");
        assert!(!res.is_active);
        assert_eq!(res.usage_count, 1);
    }
}
