use crate::{booking::Booking, shared::entity::ID};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// The outcome of applying a spot delta to a bounded spot counter.
///
/// A counter is always kept within `[0, capacity]`. If the requested delta
/// would have pushed it outside of that range the delta is clamped, and the
/// difference between `requested_delta` and `applied_delta` tells the caller
/// that the counter had drifted away from the booking ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotAdjustment {
    pub previous_spots: i64,
    pub available_spots: i64,
    pub requested_delta: i64,
    pub applied_delta: i64,
}

impl SpotAdjustment {
    pub fn apply(current: i64, delta: i64, capacity: i64) -> Self {
        let available_spots = current.saturating_add(delta).clamp(0, capacity.max(0));
        Self {
            previous_spots: current,
            available_spots,
            requested_delta: delta,
            applied_delta: available_spots - current,
        }
    }

    pub fn is_clamped(&self) -> bool {
        self.requested_delta != self.applied_delta
    }

    pub fn inconsistency(
        &self,
        event_id: &ID,
        tier_id: Option<&ID>,
    ) -> Option<InventoryInconsistencyError> {
        if !self.is_clamped() {
            return None;
        }
        Some(InventoryInconsistencyError {
            event_id: event_id.clone(),
            tier_id: tier_id.cloned(),
            requested_delta: self.requested_delta,
            applied_delta: self.applied_delta,
            available_spots: self.available_spots,
        })
    }
}

/// A spot adjustment had to be clamped to keep the counter within bounds.
/// Never surfaced to end users, recalculating the event spots repairs it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Spot adjustment of {requested_delta} on event {event_id} was clamped to {applied_delta}, {available_spots} spots left"
)]
pub struct InventoryInconsistencyError {
    pub event_id: ID,
    pub tier_id: Option<ID>,
    pub requested_delta: i64,
    pub applied_delta: i64,
    pub available_spots: i64,
}

/// Spots held by completed bookings, in total and per ticket tier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedSpots {
    pub total: i64,
    pub by_tier: HashMap<ID, i64>,
}

impl BookedSpots {
    pub fn from_bookings<'a, I>(bookings: I) -> Self
    where
        I: IntoIterator<Item = &'a Booking>,
    {
        let mut booked = Self::default();
        for booking in bookings {
            let held = booking.held_spots();
            if held == 0 {
                continue;
            }
            booked.total += held;
            if let Some(tier_id) = &booking.ticket_tier_id {
                *booked.by_tier.entry(tier_id.clone()).or_insert(0) += held;
            }
        }
        booked
    }

    pub fn in_tier(&self, tier_id: &ID) -> i64 {
        self.by_tier.get(tier_id).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub old_available_spots: i64,
    pub new_available_spots: i64,
    pub total_booked: i64,
    pub capacity: i64,
}

impl Reconciliation {
    pub fn has_drifted(&self) -> bool {
        self.old_available_spots != self.new_available_spots
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn applies_delta_within_bounds() {
        let adjustment = SpotAdjustment::apply(10, -3, 10);
        assert_eq!(adjustment.available_spots, 7);
        assert_eq!(adjustment.applied_delta, -3);
        assert!(!adjustment.is_clamped());
        assert!(adjustment.inconsistency(&ID::new(), None).is_none());
    }

    #[test]
    fn clamps_below_zero() {
        let adjustment = SpotAdjustment::apply(2, -5, 10);
        assert_eq!(adjustment.available_spots, 0);
        assert_eq!(adjustment.applied_delta, -2);
        assert!(adjustment.is_clamped());

        let event_id = ID::new();
        let err = adjustment
            .inconsistency(&event_id, None)
            .expect("To report inconsistency");
        assert_eq!(err.event_id, event_id);
        assert_eq!(err.requested_delta, -5);
        assert_eq!(err.applied_delta, -2);
    }

    #[test]
    fn clamps_above_capacity() {
        let adjustment = SpotAdjustment::apply(9, 4, 10);
        assert_eq!(adjustment.available_spots, 10);
        assert_eq!(adjustment.applied_delta, 1);
        assert!(adjustment.is_clamped());
    }

    #[test]
    fn pulls_out_of_range_counter_back_into_range() {
        let adjustment = SpotAdjustment::apply(12, 0, 10);
        assert_eq!(adjustment.available_spots, 10);
        assert!(adjustment.is_clamped());
    }
}
