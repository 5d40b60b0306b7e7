use serde::{Deserialize, Serialize};
use studio_booking_domain::{WaitlistEntry, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntryDTO {
    pub id: ID,
    pub event_id: ID,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: i64,
    pub notified_at: Option<i64>,
    pub created: i64,
}

impl WaitlistEntryDTO {
    pub fn new(entry: WaitlistEntry) -> Self {
        Self {
            id: entry.id,
            event_id: entry.event_id,
            name: entry.name,
            email: entry.email,
            phone: entry.phone,
            position: entry.position,
            notified_at: entry.notified_at,
            created: entry.created,
        }
    }
}
