use super::create_booking::CreateBookingUseCase;
use super::update_booking_status::{BookingStatusUpdate, UpdateBookingStatusUseCase};
use crate::shared::{notify::dispatch, usecase::Subscriber};
use serde_json::json;
use studio_booking_domain::{Booking, PaymentStatus};
use studio_booking_infra::{Notification, NotificationKind, StudioContext};

fn booking_payload(booking: &Booking) -> serde_json::Value {
    json!({
        "bookingId": booking.id,
        "eventId": booking.event_id,
        "confirmationNumber": booking.confirmation_number,
        "name": booking.name,
        "spots": booking.spots,
        "totalAmount": booking.total_amount,
    })
}

pub struct NotifyCustomerOnBookingCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateBookingUseCase> for NotifyCustomerOnBookingCreated {
    async fn notify(&self, booking: &Booking, ctx: &StudioContext) {
        let notification = Notification {
            recipient: booking.email.clone(),
            kind: NotificationKind::BookingReceived,
            payload: booking_payload(booking),
        };
        dispatch(notification, ctx).await;
    }
}

pub struct NotifyCustomerOnPaymentStatusChanged;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateBookingStatusUseCase> for NotifyCustomerOnPaymentStatusChanged {
    async fn notify(&self, update: &BookingStatusUpdate, ctx: &StudioContext) {
        let transition = match &update.transition {
            Some(transition) if !transition.is_noop() => transition,
            _ => return,
        };
        let kind = match transition.to {
            PaymentStatus::Completed => NotificationKind::PaymentCompleted,
            PaymentStatus::Failed => NotificationKind::PaymentFailed,
            PaymentStatus::Refunded => NotificationKind::PaymentRefunded,
            PaymentStatus::Pending => return,
        };

        let notification = Notification {
            recipient: update.booking.email.clone(),
            kind,
            payload: booking_payload(&update.booking),
        };
        dispatch(notification, ctx).await;
    }
}
