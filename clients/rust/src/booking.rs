use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use std::sync::Arc;
use studio_booking_api_structs::*;

#[derive(Clone)]
pub struct BookingClient {
    base: Arc<BaseClient>,
}

pub struct CreateBookingInput {
    pub event_id: ID,
    pub ticket_tier_id: Option<ID>,
    pub spots: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub promo_code: Option<String>,
    pub use_credits: bool,
}

/// Statuses are sent as given so that the server decides what is valid
#[derive(Default)]
pub struct UpdateBookingStatusInput {
    pub booking_id: ID,
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

#[derive(Default)]
pub struct EditBookingInput {
    pub booking_id: ID,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub spots: Option<i64>,
    pub total_amount: Option<Decimal>,
}

impl BookingClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateBookingInput,
    ) -> APIResponse<create_booking::APIResponse> {
        let body = create_booking::RequestBody {
            event_id: input.event_id,
            ticket_tier_id: input.ticket_tier_id,
            spots: input.spots,
            name: input.name,
            email: input.email,
            phone: input.phone,
            promo_code: input.promo_code,
            use_credits: input.use_credits,
        };

        self.base
            .post(body, "bookings".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, booking_id: ID) -> APIResponse<get_booking::APIResponse> {
        self.base
            .get(format!("bookings/{}", booking_id), StatusCode::OK)
            .await
    }

    pub async fn get_by_confirmation_number(
        &self,
        confirmation_number: &str,
    ) -> APIResponse<get_booking_by_confirmation_number::APIResponse> {
        self.base
            .get(
                format!("bookings/confirmation/{}", confirmation_number),
                StatusCode::OK,
            )
            .await
    }

    pub async fn update_status(
        &self,
        input: UpdateBookingStatusInput,
    ) -> APIResponse<update_booking_status::APIResponse> {
        let booking_id = input.booking_id.clone();
        let body = update_booking_status::RequestBody {
            status: input.status,
            payment_status: input.payment_status,
        };

        self.base
            .patch(body, format!("bookings/{}/status", booking_id), StatusCode::OK)
            .await
    }

    pub async fn edit(&self, input: EditBookingInput) -> APIResponse<edit_booking::APIResponse> {
        let booking_id = input.booking_id.clone();
        let body = edit_booking::RequestBody {
            name: input.name,
            email: input.email,
            phone: input.phone,
            spots: input.spots,
            total_amount: input.total_amount,
        };

        self.base
            .put(body, format!("bookings/{}", booking_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, booking_id: ID) -> APIResponse<delete_booking::APIResponse> {
        self.base
            .delete(format!("bookings/{}", booking_id), StatusCode::OK)
            .await
    }
}
