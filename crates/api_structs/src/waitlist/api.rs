use crate::dtos::WaitlistEntryDTO;
use serde::{Deserialize, Serialize};
use studio_booking_domain::{WaitlistEntry, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntryResponse {
    pub entry: WaitlistEntryDTO,
}

impl WaitlistEntryResponse {
    pub fn new(entry: WaitlistEntry) -> Self {
        Self {
            entry: WaitlistEntryDTO::new(entry),
        }
    }
}

pub mod join_waitlist {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub event_id: ID,
        pub name: String,
        pub email: String,
        #[serde(default)]
        pub phone: Option<String>,
    }

    pub type APIResponse = WaitlistEntryResponse;
}

pub mod notify_next_on_waitlist {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = WaitlistEntryResponse;
}

pub mod delete_waitlist_entry {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub entry_id: ID,
    }

    pub type APIResponse = WaitlistEntryResponse;
}
