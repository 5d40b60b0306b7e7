use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_booking_domain::{DiscountType, PromoCode, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeDTO {
    pub id: ID,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub max_discount: Option<Decimal>,
    pub min_purchase: Decimal,
    pub usage_limit: Option<i64>,
    pub per_user_limit: i64,
    pub usage_count: i64,
    pub start_date: i64,
    pub expiry_date: Option<i64>,
    pub is_active: bool,
    pub event_ids: Vec<ID>,
    pub created: i64,
    pub updated: i64,
}

impl PromoCodeDTO {
    pub fn new(promo_code: PromoCode) -> Self {
        Self {
            id: promo_code.id,
            code: promo_code.code,
            description: promo_code.description,
            discount_type: promo_code.discount_type,
            discount_value: promo_code.discount_value,
            max_discount: promo_code.max_discount,
            min_purchase: promo_code.min_purchase,
            usage_limit: promo_code.usage_limit,
            per_user_limit: promo_code.per_user_limit,
            usage_count: promo_code.usage_count,
            start_date: promo_code.start_date,
            expiry_date: promo_code.expiry_date,
            is_active: promo_code.is_active,
            event_ids: promo_code.event_ids,
            created: promo_code.created,
            updated: promo_code.updated,
        }
    }
}
