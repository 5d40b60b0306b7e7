use super::IPromoCodeRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::Mutex;
use studio_booking_domain::{PromoCode, ID};

pub struct InMemoryPromoCodeRepo {
    promo_codes: Mutex<Vec<PromoCode>>,
}

impl InMemoryPromoCodeRepo {
    pub fn new() -> Self {
        Self {
            promo_codes: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPromoCodeRepo for InMemoryPromoCodeRepo {
    async fn insert(&self, promo_code: &PromoCode) -> anyhow::Result<()> {
        if !insert_unique(promo_code, &self.promo_codes, |p| p.code == promo_code.code) {
            anyhow::bail!("Promo code: {} already exists", promo_code.code);
        }
        Ok(())
    }

    async fn save(&self, promo_code: &PromoCode) -> anyhow::Result<()> {
        find_and_update(&promo_code.id, &self.promo_codes, |stored| {
            let usage_count = stored.usage_count;
            *stored = promo_code.clone();
            stored.usage_count = usage_count;
        });
        Ok(())
    }

    async fn find(&self, promo_code_id: &ID) -> anyhow::Result<Option<PromoCode>> {
        Ok(find(promo_code_id, &self.promo_codes))
    }

    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<PromoCode>> {
        let res = find_by(&self.promo_codes, |p| p.code == code);
        Ok(res.into_iter().next())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<PromoCode>> {
        let mut promo_codes = find_by(&self.promo_codes, |_| true);
        promo_codes.sort_by_key(|p| p.created);
        Ok(promo_codes)
    }

    async fn delete(&self, promo_code_id: &ID) -> anyhow::Result<Option<PromoCode>> {
        Ok(delete(promo_code_id, &self.promo_codes))
    }

    async fn redeem(&self, promo_code_id: &ID) -> anyhow::Result<bool> {
        let res = find_and_update(promo_code_id, &self.promo_codes, |promo| {
            if matches!(promo.usage_limit, Some(limit) if promo.usage_count >= limit) {
                return false;
            }
            promo.usage_count += 1;
            true
        });
        Ok(matches!(res, Some((_, true))))
    }

    async fn release(&self, promo_code_id: &ID) -> anyhow::Result<bool> {
        let res = find_and_update(promo_code_id, &self.promo_codes, |promo| {
            if promo.usage_count <= 0 {
                return false;
            }
            promo.usage_count -= 1;
            true
        });
        Ok(matches!(res, Some((_, true))))
    }
}
