use crate::dtos::PromoCodeDTO;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_booking_domain::{DiscountType, PromoCode, PromoQuote, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeResponse {
    pub promo_code: PromoCodeDTO,
}

impl PromoCodeResponse {
    pub fn new(promo_code: PromoCode) -> Self {
        Self {
            promo_code: PromoCodeDTO::new(promo_code),
        }
    }
}

pub mod create_promo_code {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub code: String,
        #[serde(default)]
        pub description: Option<String>,
        pub discount_type: DiscountType,
        pub discount_value: Decimal,
        #[serde(default)]
        pub max_discount: Option<Decimal>,
        #[serde(default)]
        pub min_purchase: Option<Decimal>,
        #[serde(default)]
        pub usage_limit: Option<i64>,
        #[serde(default)]
        pub per_user_limit: Option<i64>,
        #[serde(default)]
        pub start_date: Option<i64>,
        #[serde(default)]
        pub expiry_date: Option<i64>,
        #[serde(default)]
        pub is_active: Option<bool>,
        #[serde(default)]
        pub event_ids: Vec<ID>,
    }

    pub type APIResponse = PromoCodeResponse;
}

pub mod get_promo_codes {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub promo_codes: Vec<PromoCodeDTO>,
    }

    impl APIResponse {
        pub fn new(promo_codes: Vec<PromoCode>) -> Self {
            Self {
                promo_codes: promo_codes.into_iter().map(PromoCodeDTO::new).collect(),
            }
        }
    }
}

pub mod update_promo_code {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub promo_code_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub discount_type: Option<DiscountType>,
        #[serde(default)]
        pub discount_value: Option<Decimal>,
        #[serde(default)]
        pub max_discount: Option<Decimal>,
        #[serde(default)]
        pub min_purchase: Option<Decimal>,
        #[serde(default)]
        pub usage_limit: Option<i64>,
        #[serde(default)]
        pub per_user_limit: Option<i64>,
        #[serde(default)]
        pub start_date: Option<i64>,
        #[serde(default)]
        pub expiry_date: Option<i64>,
        #[serde(default)]
        pub is_active: Option<bool>,
        #[serde(default)]
        pub event_ids: Option<Vec<ID>>,
    }

    pub type APIResponse = PromoCodeResponse;
}

pub mod delete_promo_code {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub promo_code_id: ID,
    }

    pub type APIResponse = PromoCodeResponse;
}

pub mod validate_promo_code {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub code: String,
        pub event_id: ID,
        pub amount: Decimal,
        #[serde(default)]
        pub user_id: Option<ID>,
        #[serde(default)]
        pub email: Option<String>,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub valid: bool,
        pub promo_code_id: ID,
        pub discount: Decimal,
        pub final_amount: Decimal,
    }

    impl APIResponse {
        pub fn new(promo_code_id: ID, quote: PromoQuote) -> Self {
            Self {
                valid: true,
                promo_code_id,
                discount: quote.discount,
                final_amount: quote.final_amount,
            }
        }
    }
}
