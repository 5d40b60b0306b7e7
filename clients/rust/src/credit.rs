use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use studio_booking_api_structs::*;

#[derive(Clone)]
pub struct CreditClient {
    base: Arc<BaseClient>,
}

impl CreditClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn grant(&self, user_id: ID, amount: i64) -> APIResponse<grant_credits::APIResponse> {
        let body = grant_credits::RequestBody { amount };
        self.base
            .post(body, format!("users/{}/credits", user_id), StatusCode::OK)
            .await
    }

    pub async fn get(&self, user_id: ID) -> APIResponse<get_credits::APIResponse> {
        self.base
            .get(format!("users/{}/credits", user_id), StatusCode::OK)
            .await
    }
}
