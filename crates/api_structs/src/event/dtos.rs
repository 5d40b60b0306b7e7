use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_booking_domain::{Event, TicketTier, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TicketTierDTO {
    pub id: ID,
    pub name: String,
    pub price: Decimal,
    pub capacity: i64,
    pub available_spots: i64,
    pub benefits: Vec<String>,
}

impl TicketTierDTO {
    pub fn new(tier: TicketTier) -> Self {
        Self {
            id: tier.id,
            name: tier.name,
            price: tier.price,
            capacity: tier.capacity,
            available_spots: tier.available_spots,
            benefits: tier.benefits,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventDTO {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub capacity: i64,
    pub available_spots: i64,
    pub is_sold_out: bool,
    pub price: Decimal,
    pub ticket_tiers: Vec<TicketTierDTO>,
    pub created: i64,
    pub updated: i64,
}

impl EventDTO {
    pub fn new(event: Event) -> Self {
        Self {
            is_sold_out: event.is_sold_out(),
            id: event.id,
            title: event.title,
            description: event.description,
            start_ts: event.start_ts,
            capacity: event.capacity,
            available_spots: event.available_spots,
            price: event.price,
            ticket_tiers: event
                .ticket_tiers
                .into_iter()
                .map(TicketTierDTO::new)
                .collect(),
            created: event.created,
            updated: event.updated,
        }
    }
}
