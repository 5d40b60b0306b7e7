use super::subscribers::NotifyCustomerOnPaymentStatusChanged;
use crate::error::StudioError;
use crate::event::inventory::adjust_inventory;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use std::str::FromStr;
use studio_booking_api_structs::update_booking_status::*;
use studio_booking_domain::{Booking, BookingStatus, PaymentStatus, PaymentTransition, ID};
use studio_booking_infra::StudioContext;
use tracing::error;

pub async fn update_booking_status_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateBookingStatusUseCase {
        booking_id: path_params.booking_id.clone(),
        status: body.status,
        payment_status: body.payment_status,
    };

    execute(usecase, &ctx)
        .await
        .map(|update| {
            HttpResponse::Ok().json(APIResponse::new(
                update.booking,
                update.spots_returned,
                update.available_spots,
            ))
        })
        .map_err(StudioError::from)
}

/// Moves a booking through its status and payment status. Only payment
/// transitions touch the event inventory.
#[derive(Debug)]
pub struct UpdateBookingStatusUseCase {
    pub booking_id: ID,
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

#[derive(Debug)]
pub struct BookingStatusUpdate {
    pub booking: Booking,
    pub transition: Option<PaymentTransition>,
    /// Signed number of spots given back to the event
    pub spots_returned: i64,
    pub available_spots: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidTransition(String),
    ConcurrentUpdate(ID),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(booking_id) => Self::NotFound(format!(
                "The booking with id: {}, was not found.",
                booking_id
            )),
            UseCaseError::InvalidTransition(msg) => Self::InvalidTransition(msg),
            UseCaseError::ConcurrentUpdate(booking_id) => Self::Conflict(format!(
                "The payment status of booking {} was changed by another request",
                booking_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl UpdateBookingStatusUseCase {
    fn parse(&self) -> Result<(Option<BookingStatus>, Option<PaymentStatus>), UseCaseError> {
        let status = self
            .status
            .as_deref()
            .map(BookingStatus::from_str)
            .transpose()
            .map_err(|e| UseCaseError::InvalidTransition(e.to_string()))?;
        let payment_status = self
            .payment_status
            .as_deref()
            .map(PaymentStatus::from_str)
            .transpose()
            .map_err(|e| UseCaseError::InvalidTransition(e.to_string()))?;
        Ok((status, payment_status))
    }

    async fn find_booking(&self, ctx: &StudioContext) -> Result<Booking, UseCaseError> {
        match ctx.repos.bookings.find(&self.booking_id).await {
            Ok(Some(booking)) => Ok(booking),
            Ok(None) => Err(UseCaseError::NotFound(self.booking_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }

    /// Swaps the payment status and moves the spots, or leaves both untouched
    async fn apply_transition(
        &self,
        booking: &Booking,
        transition: &PaymentTransition,
        ctx: &StudioContext,
    ) -> Result<Option<i64>, UseCaseError> {
        let now = ctx.sys.get_timestamp_millis();
        let swapped = ctx
            .repos
            .bookings
            .transition_payment_status(&booking.id, transition.from, transition.to, now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !swapped {
            return Err(UseCaseError::ConcurrentUpdate(booking.id.clone()));
        }
        if transition.spot_delta == 0 {
            return Ok(None);
        }

        let adjusted = adjust_inventory(
            &booking.event_id,
            booking.ticket_tier_id.as_ref(),
            transition.spot_delta,
            ctx,
        )
        .await;
        match adjusted {
            Ok(Some((event, _))) => Ok(Some(event.available_spots)),
            Ok(None) => Ok(None),
            Err(e) => {
                error!(
                    "Unable to adjust the inventory of event {}: {:?}",
                    booking.event_id, e
                );
                let reverted = ctx
                    .repos
                    .bookings
                    .transition_payment_status(&booking.id, transition.to, transition.from, now)
                    .await;
                if !matches!(reverted, Ok(true)) {
                    error!(
                        "Unable to revert the payment status of booking {}",
                        booking.id
                    );
                }
                Err(UseCaseError::StorageError)
            }
        }
    }

    async fn restore_credits(
        &self,
        booking: &Booking,
        transition: &PaymentTransition,
        ctx: &StudioContext,
    ) {
        let (credits, user_id) = match (booking.credits_to_restore(transition), &booking.user_id) {
            (Some(credits), Some(user_id)) => (credits, user_id),
            _ => return,
        };
        if let Err(e) = ctx.repos.credits.grant(user_id, credits).await {
            error!(
                "Unable to restore {} credits to user {} after refund: {:?}",
                credits, user_id, e
            );
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateBookingStatusUseCase {
    type Response = BookingStatusUpdate;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateBookingStatus";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let (status, payment_status) = self.parse()?;

        let booking = self.find_booking(ctx).await?;
        let _guard = ctx.locks.lock_event(&booking.event_id).await;
        // Read again now that no other transition of this event can interleave
        let mut booking = self.find_booking(ctx).await?;

        let transition = payment_status.map(|to| booking.payment_transition(to));
        let mut spots_returned = 0;
        let mut available_spots = None;
        if let Some(transition) = transition.as_ref().filter(|t| !t.is_noop()) {
            available_spots = self.apply_transition(&booking, transition, ctx).await?;
            spots_returned = transition.spot_delta;
            booking.payment_status = transition.to;
            self.restore_credits(&booking, transition, ctx).await;
        }

        let status_changed = matches!(status, Some(status) if status != booking.status);
        if let Some(status) = status {
            booking.status = status;
        }
        let payment_changed = transition.map_or(false, |t| !t.is_noop());
        if status_changed || payment_changed {
            booking.updated = ctx.sys.get_timestamp_millis();
            ctx.repos
                .bookings
                .save(&booking)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        let available_spots = match available_spots {
            Some(spots) => spots,
            None => match ctx.repos.events.find(&booking.event_id).await {
                Ok(Some(event)) => event.available_spots,
                Ok(None) => 0,
                Err(_) => return Err(UseCaseError::StorageError),
            },
        };

        Ok(BookingStatusUpdate {
            booking,
            transition,
            spots_returned,
            available_spots,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyCustomerOnPaymentStatusChanged)]
    }
}
