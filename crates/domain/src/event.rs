use crate::{
    inventory::{BookedSpots, Reconciliation, SpotAdjustment},
    shared::entity::{Entity, ID},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A capacity limited studio `Event` that customers can book spots in.
///
/// The `available_spots` counter (and the counters of the `TicketTier`s) must
/// only be changed through `apply_spot_delta` and `reconcile`, which keep it
/// within `[0, capacity]`.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub capacity: i64,
    pub available_spots: i64,
    pub price: Decimal,
    /// When present the tiers partition the capacity of the `Event`
    pub ticket_tiers: Vec<TicketTier>,
    pub created: i64,
    pub updated: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketTier {
    pub id: ID,
    pub name: String,
    pub price: Decimal,
    pub capacity: i64,
    pub available_spots: i64,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTierOptions {
    pub name: String,
    pub price: Decimal,
    pub capacity: i64,
    #[serde(default)]
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EventOptions {
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub capacity: Option<i64>,
    pub price: Decimal,
    pub ticket_tiers: Vec<TicketTierOptions>,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidEventError {
    #[error("The event title can not be empty")]
    EmptyTitle,
    #[error("Capacity can not be negative")]
    NegativeCapacity,
    #[error("Price can not be negative")]
    NegativePrice,
    #[error("Capacity must be provided when the event has no ticket tiers")]
    MissingCapacity,
    #[error("Capacity {given} does not match the total tier capacity {expected}")]
    TierCapacityMismatch { given: i64, expected: i64 },
    #[error("Invalid ticket tier: {0}")]
    InvalidTier(String),
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl TicketTier {
    fn new(options: TicketTierOptions) -> Result<Self, InvalidEventError> {
        if options.name.trim().is_empty() {
            return Err(InvalidEventError::InvalidTier("name can not be empty".into()));
        }
        if options.capacity < 0 {
            return Err(InvalidEventError::InvalidTier(format!(
                "capacity of tier `{}` can not be negative",
                options.name
            )));
        }
        if options.price.is_sign_negative() {
            return Err(InvalidEventError::InvalidTier(format!(
                "price of tier `{}` can not be negative",
                options.name
            )));
        }

        Ok(Self {
            id: Default::default(),
            name: options.name,
            price: options.price,
            capacity: options.capacity,
            available_spots: options.capacity,
            benefits: options.benefits,
        })
    }
}

impl Event {
    pub fn new(options: EventOptions, now: i64) -> Result<Self, InvalidEventError> {
        if options.title.trim().is_empty() {
            return Err(InvalidEventError::EmptyTitle);
        }
        if options.price.is_sign_negative() {
            return Err(InvalidEventError::NegativePrice);
        }

        let ticket_tiers = options
            .ticket_tiers
            .into_iter()
            .map(TicketTier::new)
            .collect::<Result<Vec<_>, _>>()?;

        let capacity = if ticket_tiers.is_empty() {
            options.capacity.ok_or(InvalidEventError::MissingCapacity)?
        } else {
            let expected = ticket_tiers.iter().map(|t| t.capacity).sum::<i64>();
            match options.capacity {
                Some(given) if given != expected => {
                    return Err(InvalidEventError::TierCapacityMismatch { given, expected })
                }
                _ => expected,
            }
        };
        if capacity < 0 {
            return Err(InvalidEventError::NegativeCapacity);
        }

        Ok(Self {
            id: Default::default(),
            title: options.title,
            description: options.description,
            start_ts: options.start_ts,
            capacity,
            available_spots: capacity,
            price: options.price,
            ticket_tiers,
            created: now,
            updated: now,
        })
    }

    pub fn is_tiered(&self) -> bool {
        !self.ticket_tiers.is_empty()
    }

    pub fn is_sold_out(&self) -> bool {
        self.available_spots <= 0
    }

    pub fn find_tier(&self, tier_id: &ID) -> Option<&TicketTier> {
        self.ticket_tiers.iter().find(|tier| tier.id == *tier_id)
    }

    /// Spots that can still be booked for the given tier selection.
    /// `None` if the tier selection is not valid for this `Event`.
    pub fn remaining_spots(&self, tier_id: Option<&ID>) -> Option<i64> {
        match tier_id {
            Some(tier_id) => self.find_tier(tier_id).map(|tier| tier.available_spots),
            None if self.is_tiered() => None,
            None => Some(self.available_spots),
        }
    }

    pub fn unit_price(&self, tier_id: Option<&ID>) -> Option<Decimal> {
        match tier_id {
            Some(tier_id) => self.find_tier(tier_id).map(|tier| tier.price),
            None if self.is_tiered() => None,
            None => Some(self.price),
        }
    }

    /// Applies a (positive or negative) spot delta to the counter of the
    /// given tier, or to the event counter for tier-less events. The event
    /// counter of a tiered `Event` moves by what the tier actually took.
    pub fn apply_spot_delta(&mut self, tier_id: Option<&ID>, delta: i64) -> SpotAdjustment {
        let previous_spots = self.available_spots;
        let tier = tier_id.and_then(|id| self.ticket_tiers.iter_mut().find(|t| t.id == *id));

        match tier {
            Some(tier) => {
                let tier_adjustment = SpotAdjustment::apply(tier.available_spots, delta, tier.capacity);
                tier.available_spots = tier_adjustment.available_spots;
                self.available_spots = SpotAdjustment::apply(
                    self.available_spots,
                    tier_adjustment.applied_delta,
                    self.capacity,
                )
                .available_spots;
                SpotAdjustment {
                    previous_spots,
                    available_spots: self.available_spots,
                    requested_delta: delta,
                    applied_delta: tier_adjustment.applied_delta,
                }
            }
            None => {
                // Falls back to the event counter, reconciliation will rebalance the tiers
                let adjustment = SpotAdjustment::apply(self.available_spots, delta, self.capacity);
                self.available_spots = adjustment.available_spots;
                adjustment
            }
        }
    }

    /// Rebuilds the spot counters from what completed bookings hold
    pub fn reconcile(&mut self, booked: &BookedSpots) -> Reconciliation {
        let old_available_spots = self.available_spots;
        for tier in self.ticket_tiers.iter_mut() {
            tier.available_spots = (tier.capacity - booked.in_tier(&tier.id)).max(0);
        }
        self.available_spots = (self.capacity - booked.total).max(0);

        Reconciliation {
            old_available_spots,
            new_available_spots: self.available_spots,
            total_booked: booked.total,
            capacity: self.capacity,
        }
    }

    pub fn set_title(&mut self, title: String) -> bool {
        if title.trim().is_empty() {
            return false;
        }
        self.title = title;
        true
    }

    pub fn set_price(&mut self, price: Decimal) -> bool {
        if price.is_sign_negative() {
            return false;
        }
        self.price = price;
        true
    }

    /// Changes the capacity of a tier-less `Event` and returns the spot delta
    /// that has to be applied to the inventory afterwards.
    pub fn set_capacity(&mut self, capacity: i64) -> Option<i64> {
        if capacity < 0 || self.is_tiered() {
            return None;
        }
        let delta = capacity - self.capacity;
        self.capacity = capacity;
        Some(delta)
    }

    /// Changes the capacity of a tier-less `Event` and moves the event counter
    /// along with it, so the counter never exceeds the new capacity.
    pub fn resize(&mut self, capacity: i64) -> Option<SpotAdjustment> {
        let delta = self.set_capacity(capacity)?;
        Some(self.apply_spot_delta(None, delta))
    }
}
