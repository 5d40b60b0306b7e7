use crate::{APIResponse, BaseClient, DiscountType, ID};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use std::sync::Arc;
use studio_booking_api_structs::*;

#[derive(Clone)]
pub struct PromoCodeClient {
    base: Arc<BaseClient>,
}

pub struct CreatePromoCodeInput {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub max_discount: Option<Decimal>,
    pub min_purchase: Option<Decimal>,
    pub usage_limit: Option<i64>,
    pub per_user_limit: Option<i64>,
    pub start_date: Option<i64>,
    pub expiry_date: Option<i64>,
    pub is_active: Option<bool>,
    pub event_ids: Vec<ID>,
}

impl CreatePromoCodeInput {
    pub fn new(code: &str, discount_type: DiscountType, discount_value: Decimal) -> Self {
        Self {
            code: code.into(),
            description: None,
            discount_type,
            discount_value,
            max_discount: None,
            min_purchase: None,
            usage_limit: None,
            per_user_limit: None,
            start_date: None,
            expiry_date: None,
            is_active: None,
            event_ids: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct UpdatePromoCodeInput {
    pub promo_code_id: ID,
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
    pub max_discount: Option<Decimal>,
    pub min_purchase: Option<Decimal>,
    pub usage_limit: Option<i64>,
    pub per_user_limit: Option<i64>,
    pub start_date: Option<i64>,
    pub expiry_date: Option<i64>,
    pub is_active: Option<bool>,
    pub event_ids: Option<Vec<ID>>,
}

pub struct ValidatePromoCodeInput {
    pub code: String,
    pub event_id: ID,
    pub amount: Decimal,
    pub user_id: Option<ID>,
    pub email: Option<String>,
}

impl PromoCodeClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreatePromoCodeInput,
    ) -> APIResponse<create_promo_code::APIResponse> {
        let body = create_promo_code::RequestBody {
            code: input.code,
            description: input.description,
            discount_type: input.discount_type,
            discount_value: input.discount_value,
            max_discount: input.max_discount,
            min_purchase: input.min_purchase,
            usage_limit: input.usage_limit,
            per_user_limit: input.per_user_limit,
            start_date: input.start_date,
            expiry_date: input.expiry_date,
            is_active: input.is_active,
            event_ids: input.event_ids,
        };

        self.base
            .post(body, "promo-codes".into(), StatusCode::CREATED)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_promo_codes::APIResponse> {
        self.base.get("promo-codes".into(), StatusCode::OK).await
    }

    pub async fn update(
        &self,
        input: UpdatePromoCodeInput,
    ) -> APIResponse<update_promo_code::APIResponse> {
        let promo_code_id = input.promo_code_id.clone();
        let body = update_promo_code::RequestBody {
            description: input.description,
            discount_type: input.discount_type,
            discount_value: input.discount_value,
            max_discount: input.max_discount,
            min_purchase: input.min_purchase,
            usage_limit: input.usage_limit,
            per_user_limit: input.per_user_limit,
            start_date: input.start_date,
            expiry_date: input.expiry_date,
            is_active: input.is_active,
            event_ids: input.event_ids,
        };

        self.base
            .put(body, format!("promo-codes/{}", promo_code_id), StatusCode::OK)
            .await
    }

    pub async fn delete(
        &self,
        promo_code_id: ID,
    ) -> APIResponse<delete_promo_code::APIResponse> {
        self.base
            .delete(format!("promo-codes/{}", promo_code_id), StatusCode::OK)
            .await
    }

    pub async fn validate(
        &self,
        input: ValidatePromoCodeInput,
    ) -> APIResponse<validate_promo_code::APIResponse> {
        let body = validate_promo_code::RequestBody {
            code: input.code,
            event_id: input.event_id,
            amount: input.amount,
            user_id: input.user_id,
            email: input.email,
        };

        self.base
            .post(body, "promo-codes/validate".into(), StatusCode::OK)
            .await
    }
}
