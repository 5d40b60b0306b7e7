use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use studio_booking_api_structs::*;

#[derive(Clone)]
pub struct WaitlistClient {
    base: Arc<BaseClient>,
}

pub struct JoinWaitlistInput {
    pub event_id: ID,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl WaitlistClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn join(&self, input: JoinWaitlistInput) -> APIResponse<join_waitlist::APIResponse> {
        let body = join_waitlist::RequestBody {
            event_id: input.event_id,
            name: input.name,
            email: input.email,
            phone: input.phone,
        };

        self.base
            .post(body, "waitlist".into(), StatusCode::CREATED)
            .await
    }

    pub async fn notify_next(
        &self,
        event_id: ID,
    ) -> APIResponse<notify_next_on_waitlist::APIResponse> {
        self.base
            .post((), format!("waitlist/notify/{}", event_id), StatusCode::OK)
            .await
    }

    pub async fn delete_entry(
        &self,
        entry_id: ID,
    ) -> APIResponse<delete_waitlist_entry::APIResponse> {
        self.base
            .delete(format!("waitlist/{}", entry_id), StatusCode::OK)
            .await
    }
}
