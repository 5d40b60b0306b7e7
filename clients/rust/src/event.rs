use crate::{APIResponse, BaseClient, TicketTierOptions, ID};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use std::sync::Arc;
use studio_booking_api_structs::*;

#[derive(Clone)]
pub struct EventClient {
    base: Arc<BaseClient>,
}

pub struct CreateEventInput {
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    /// Leave out for events with ticket tiers
    pub capacity: Option<i64>,
    pub price: Decimal,
    pub ticket_tiers: Option<Vec<TicketTierOptions>>,
}

#[derive(Default)]
pub struct UpdateEventInput {
    pub event_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_ts: Option<i64>,
    pub price: Option<Decimal>,
    pub capacity: Option<i64>,
}

impl EventClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateEventInput) -> APIResponse<create_event::APIResponse> {
        let body = create_event::RequestBody {
            title: input.title,
            description: input.description,
            start_ts: input.start_ts,
            capacity: input.capacity,
            price: input.price,
            ticket_tiers: input.ticket_tiers,
        };

        self.base
            .post(body, "events".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, event_id: ID) -> APIResponse<get_event::APIResponse> {
        self.base
            .get(format!("events/{}", event_id), StatusCode::OK)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_events::APIResponse> {
        self.base.get("events".into(), StatusCode::OK).await
    }

    pub async fn update(&self, input: UpdateEventInput) -> APIResponse<update_event::APIResponse> {
        let event_id = input.event_id.clone();
        let body = update_event::RequestBody {
            title: input.title,
            description: input.description,
            start_ts: input.start_ts,
            price: input.price,
            capacity: input.capacity,
        };

        self.base
            .put(body, format!("events/{}", event_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, event_id: ID) -> APIResponse<delete_event::APIResponse> {
        self.base
            .delete(format!("events/{}", event_id), StatusCode::OK)
            .await
    }

    pub async fn recalculate_spots(
        &self,
        event_id: ID,
    ) -> APIResponse<recalculate_event_spots::APIResponse> {
        self.base
            .post(
                (),
                format!("events/{}/recalculate-spots", event_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn bookings(&self, event_id: ID) -> APIResponse<get_event_bookings::APIResponse> {
        self.base
            .get(format!("events/{}/bookings", event_id), StatusCode::OK)
            .await
    }

    pub async fn waitlist(&self, event_id: ID) -> APIResponse<get_event_waitlist::APIResponse> {
        self.base
            .get(format!("events/{}/waitlist", event_id), StatusCode::OK)
            .await
    }
}
