use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_booking_domain::{Booking, BookingStatus, PaymentStatus, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingDTO {
    pub id: ID,
    pub event_id: ID,
    pub ticket_tier_id: Option<ID>,
    pub user_id: Option<ID>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub spots: i64,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub total_amount: Decimal,
    pub promo_code_id: Option<ID>,
    pub used_credits: Option<i64>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub confirmation_number: String,
    pub created: i64,
    pub updated: i64,
}

impl BookingDTO {
    pub fn new(booking: Booking) -> Self {
        Self {
            id: booking.id,
            event_id: booking.event_id,
            ticket_tier_id: booking.ticket_tier_id,
            user_id: booking.user_id,
            name: booking.name,
            email: booking.email,
            phone: booking.phone,
            spots: booking.spots,
            unit_price: booking.unit_price,
            discount: booking.discount,
            total_amount: booking.total_amount,
            promo_code_id: booking.promo_code_id,
            used_credits: booking.used_credits,
            status: booking.status,
            payment_status: booking.payment_status,
            confirmation_number: booking.confirmation_number,
            created: booking.created,
            updated: booking.updated,
        }
    }
}
