use super::IBookingRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::Mutex;
use studio_booking_domain::{Booking, PaymentStatus, Redeemer, ID};

pub struct InMemoryBookingRepo {
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookingRepo {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IBookingRepo for InMemoryBookingRepo {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        let inserted = insert_unique(booking, &self.bookings, |b| {
            b.confirmation_number == booking.confirmation_number
        });
        if !inserted {
            anyhow::bail!(
                "Confirmation number: {} is already in use",
                booking.confirmation_number
            );
        }
        Ok(())
    }

    async fn save(&self, booking: &Booking) -> anyhow::Result<()> {
        find_and_update(&booking.id, &self.bookings, |stored| {
            let payment_status = stored.payment_status;
            *stored = booking.clone();
            stored.payment_status = payment_status;
        });
        Ok(())
    }

    async fn find(&self, booking_id: &ID) -> anyhow::Result<Option<Booking>> {
        Ok(find(booking_id, &self.bookings))
    }

    async fn find_by_confirmation_number(
        &self,
        confirmation_number: &str,
    ) -> anyhow::Result<Option<Booking>> {
        let res = find_by(&self.bookings, |b| {
            b.confirmation_number == confirmation_number
        });
        Ok(res.into_iter().next())
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Booking>> {
        Ok(find_by(&self.bookings, |b| b.event_id == *event_id))
    }

    async fn count_redemptions(
        &self,
        promo_code_id: &ID,
        redeemer: &Redeemer,
    ) -> anyhow::Result<i64> {
        let bookings = find_by(&self.bookings, |b| {
            b.promo_code_id.as_ref() == Some(promo_code_id)
        });
        Ok(redeemer.redemptions(promo_code_id, &bookings))
    }

    async fn transition_payment_status(
        &self,
        booking_id: &ID,
        from: PaymentStatus,
        to: PaymentStatus,
        now: i64,
    ) -> anyhow::Result<bool> {
        let res = find_and_update(booking_id, &self.bookings, |booking| {
            if booking.payment_status != from {
                return false;
            }
            booking.payment_status = to;
            booking.updated = now;
            true
        });
        Ok(matches!(res, Some((_, true))))
    }

    async fn delete(&self, booking_id: &ID) -> anyhow::Result<Option<Booking>> {
        Ok(delete(booking_id, &self.bookings))
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()> {
        delete_by(&self.bookings, |b| b.event_id == *event_id);
        Ok(())
    }
}
