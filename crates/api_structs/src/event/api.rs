use crate::dtos::{BookingDTO, EventDTO, WaitlistEntryDTO};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_booking_domain::{Booking, Event, Reconciliation, TicketTierOptions, WaitlistEntry, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event: EventDTO,
}

impl EventResponse {
    pub fn new(event: Event) -> Self {
        Self {
            event: EventDTO::new(event),
        }
    }
}

pub mod create_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        pub start_ts: i64,
        /// Derived from the ticket tiers when they are given
        #[serde(default)]
        pub capacity: Option<i64>,
        pub price: Decimal,
        #[serde(default)]
        pub ticket_tiers: Option<Vec<TicketTierOptions>>,
    }

    pub type APIResponse = EventResponse;
}

pub mod get_events {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub events: Vec<EventDTO>,
    }

    impl APIResponse {
        pub fn new(events: Vec<Event>) -> Self {
            Self {
                events: events.into_iter().map(EventDTO::new).collect(),
            }
        }
    }
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = EventResponse;
}

pub mod update_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub start_ts: Option<i64>,
        #[serde(default)]
        pub price: Option<Decimal>,
        #[serde(default)]
        pub capacity: Option<i64>,
    }

    pub type APIResponse = EventResponse;
}

pub mod delete_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = EventResponse;
}

pub mod recalculate_event_spots {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub old_available_spots: i64,
        pub new_available_spots: i64,
        pub total_booked: i64,
        pub capacity: i64,
    }

    impl APIResponse {
        pub fn new(reconciliation: Reconciliation) -> Self {
            Self {
                old_available_spots: reconciliation.old_available_spots,
                new_available_spots: reconciliation.new_available_spots,
                total_booked: reconciliation.total_booked,
                capacity: reconciliation.capacity,
            }
        }
    }
}

pub mod get_event_bookings {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub bookings: Vec<BookingDTO>,
    }

    impl APIResponse {
        pub fn new(bookings: Vec<Booking>) -> Self {
            Self {
                bookings: bookings.into_iter().map(BookingDTO::new).collect(),
            }
        }
    }
}

pub mod get_event_waitlist {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub entries: Vec<WaitlistEntryDTO>,
    }

    impl APIResponse {
        pub fn new(entries: Vec<WaitlistEntry>) -> Self {
            Self {
                entries: entries.into_iter().map(WaitlistEntryDTO::new).collect(),
            }
        }
    }
}
