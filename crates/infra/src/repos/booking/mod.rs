mod inmemory;
mod postgres;

pub use inmemory::InMemoryBookingRepo;
pub use postgres::PostgresBookingRepo;
use studio_booking_domain::{Booking, PaymentStatus, Redeemer, ID};

#[async_trait::async_trait]
pub trait IBookingRepo: Send + Sync {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()>;
    /// Persists every field except `payment_status`, which only changes
    /// through `transition_payment_status`
    async fn save(&self, booking: &Booking) -> anyhow::Result<()>;
    async fn find(&self, booking_id: &ID) -> anyhow::Result<Option<Booking>>;
    async fn find_by_confirmation_number(
        &self,
        confirmation_number: &str,
    ) -> anyhow::Result<Option<Booking>>;
    /// Bookings of the `Event` in creation order
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Booking>>;
    async fn count_redemptions(&self, promo_code_id: &ID, redeemer: &Redeemer)
        -> anyhow::Result<i64>;
    /// Compare and swap of the payment status. Returns false if the stored
    /// status was not `from`.
    async fn transition_payment_status(
        &self,
        booking_id: &ID,
        from: PaymentStatus,
        to: PaymentStatus,
        now: i64,
    ) -> anyhow::Result<bool>;
    async fn delete(&self, booking_id: &ID) -> anyhow::Result<Option<Booking>>;
    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()>;
}
