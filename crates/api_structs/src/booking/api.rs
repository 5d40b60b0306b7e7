use crate::dtos::BookingDTO;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_booking_domain::{Booking, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking: BookingDTO,
}

impl BookingResponse {
    pub fn new(booking: Booking) -> Self {
        Self {
            booking: BookingDTO::new(booking),
        }
    }
}

pub mod create_booking {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub event_id: ID,
        #[serde(default)]
        pub ticket_tier_id: Option<ID>,
        pub spots: i64,
        pub name: String,
        pub email: String,
        #[serde(default)]
        pub phone: Option<String>,
        #[serde(default)]
        pub promo_code: Option<String>,
        #[serde(default)]
        pub use_credits: bool,
    }

    pub type APIResponse = BookingResponse;
}

pub mod get_booking {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub booking_id: ID,
    }

    pub type APIResponse = BookingResponse;
}

pub mod get_booking_by_confirmation_number {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub confirmation_number: String,
    }

    pub type APIResponse = BookingResponse;
}

pub mod update_booking_status {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub booking_id: ID,
    }

    /// Statuses are kept as plain strings here so that unknown values
    /// are reported as invalid transitions
    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub status: Option<String>,
        #[serde(default)]
        pub payment_status: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub booking: BookingDTO,
        /// Signed number of spots given back to the event
        pub spots_returned: i64,
        pub available_spots: i64,
    }

    impl APIResponse {
        pub fn new(booking: Booking, spots_returned: i64, available_spots: i64) -> Self {
            Self {
                booking: BookingDTO::new(booking),
                spots_returned,
                available_spots,
            }
        }
    }
}

pub mod edit_booking {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub booking_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub email: Option<String>,
        #[serde(default)]
        pub phone: Option<String>,
        #[serde(default)]
        pub spots: Option<i64>,
        #[serde(default)]
        pub total_amount: Option<Decimal>,
    }

    pub type APIResponse = BookingResponse;
}

pub mod delete_booking {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub booking_id: ID,
    }

    pub type APIResponse = BookingResponse;
}
