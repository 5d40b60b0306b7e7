use crate::error::StudioError;
use crate::event::inventory::adjust_inventory;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use studio_booking_api_structs::edit_booking::*;
use studio_booking_domain::{Booking, PaymentStatus, ID};
use studio_booking_infra::StudioContext;
use tracing::error;

pub async fn edit_booking_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = EditBookingUseCase {
        booking_id: path_params.booking_id.clone(),
        name: body.name,
        email: body.email,
        phone: body.phone,
        spots: body.spots,
        total_amount: body.total_amount,
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Ok().json(APIResponse::new(booking)))
        .map_err(StudioError::from)
}

/// Admin corrections of a booking. Discounts are never recomputed, an
/// admin overwrites `total_amount` explicitly if needed.
#[derive(Debug, Default)]
pub struct EditBookingUseCase {
    pub booking_id: ID,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub spots: Option<i64>,
    pub total_amount: Option<Decimal>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidName,
    InvalidEmail,
    InvalidSpots(i64),
    InvalidTotalAmount,
    CapacityExceeded { requested: i64, available: i64 },
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(booking_id) => Self::NotFound(format!(
                "The booking with id: {}, was not found.",
                booking_id
            )),
            UseCaseError::InvalidName => Self::BadClientData("Name can not be empty".into()),
            UseCaseError::InvalidEmail => {
                Self::BadClientData("A valid email has to be provided".into())
            }
            UseCaseError::InvalidSpots(spots) => Self::BadClientData(format!(
                "At least one spot has to be booked, got: {}",
                spots
            )),
            UseCaseError::InvalidTotalAmount => {
                Self::BadClientData("Total amount can not be negative".into())
            }
            UseCaseError::CapacityExceeded {
                requested,
                available,
            } => Self::CapacityExceeded {
                requested,
                available,
            },
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl EditBookingUseCase {
    async fn find_booking(&self, ctx: &StudioContext) -> Result<Booking, UseCaseError> {
        match ctx.repos.bookings.find(&self.booking_id).await {
            Ok(Some(booking)) => Ok(booking),
            Ok(None) => Err(UseCaseError::NotFound(self.booking_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }

    async fn remaining_spots(
        &self,
        booking: &Booking,
        ctx: &StudioContext,
    ) -> Result<i64, UseCaseError> {
        let event = match ctx.repos.events.find(&booking.event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => return Ok(0),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        Ok(event
            .remaining_spots(booking.ticket_tier_id.as_ref())
            .unwrap_or(event.available_spots))
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for EditBookingUseCase {
    type Response = Booking;

    type Error = UseCaseError;

    const NAME: &'static str = "EditBooking";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let booking = self.find_booking(ctx).await?;
        let _guard = ctx.locks.lock_event(&booking.event_id).await;
        let mut booking = self.find_booking(ctx).await?;

        if let Some(name) = &self.name {
            if !booking.set_name(name.trim().to_string()) {
                return Err(UseCaseError::InvalidName);
            }
        }
        if let Some(email) = &self.email {
            if !booking.set_email(email.trim().to_string()) {
                return Err(UseCaseError::InvalidEmail);
            }
        }
        if let Some(phone) = &self.phone {
            booking.phone = Some(phone.clone());
        }
        if let Some(total_amount) = self.total_amount {
            if !booking.set_total_amount(total_amount) {
                return Err(UseCaseError::InvalidTotalAmount);
            }
        }

        // Positive when spots are given back to the event
        let mut spot_delta = 0;
        if let Some(spots) = self.spots.filter(|spots| *spots != booking.spots) {
            let old_spots = booking.spots;
            if !booking.set_spots(spots) {
                return Err(UseCaseError::InvalidSpots(spots));
            }
            match booking.payment_status {
                PaymentStatus::Completed => {
                    let available = self.remaining_spots(&booking, ctx).await?;
                    let extra = spots - old_spots;
                    if extra > available {
                        return Err(UseCaseError::CapacityExceeded {
                            requested: extra,
                            available,
                        });
                    }
                    spot_delta = old_spots - spots;
                }
                PaymentStatus::Pending => {
                    let available = self.remaining_spots(&booking, ctx).await?;
                    if spots > available {
                        return Err(UseCaseError::CapacityExceeded {
                            requested: spots,
                            available,
                        });
                    }
                }
                PaymentStatus::Failed | PaymentStatus::Refunded => (),
            }
        }

        if spot_delta != 0 {
            adjust_inventory(
                &booking.event_id,
                booking.ticket_tier_id.as_ref(),
                spot_delta,
                ctx,
            )
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        }

        booking.updated = ctx.sys.get_timestamp_millis();
        if ctx.repos.bookings.save(&booking).await.is_err() {
            if spot_delta != 0 {
                let reverted = adjust_inventory(
                    &booking.event_id,
                    booking.ticket_tier_id.as_ref(),
                    -spot_delta,
                    ctx,
                )
                .await;
                if reverted.is_err() {
                    error!(
                        "Unable to revert the spot adjustment of event {}",
                        booking.event_id
                    );
                }
            }
            return Err(UseCaseError::StorageError);
        }

        Ok(booking)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{insert_booking, insert_event, setup};

    async fn available_spots(ctx: &StudioContext, event_id: &ID) -> i64 {
        ctx.repos
            .events
            .find(event_id)
            .await
            .expect("To query")
            .expect("To find event")
            .available_spots
    }

    async fn complete(ctx: &StudioContext, booking: &Booking) {
        ctx.repos
            .bookings
            .transition_payment_status(
                &booking.id,
                PaymentStatus::Pending,
                PaymentStatus::Completed,
                0,
            )
            .await
            .expect("To transition");
        ctx.repos
            .events
            .adjust_spots(&booking.event_id, None, -booking.spots)
            .await
            .expect("To adjust");
    }

    #[actix_web::test]
    async fn edits_contact_details_and_amount() {
        let ctx = setup();
        let event = insert_event(&ctx, 10).await;
        let booking = insert_booking(&ctx, &event, None, 2, PaymentStatus::Pending).await;

        let usecase = EditBookingUseCase {
            booking_id: booking.id.clone(),
            name: Some("Barbara".into()),
            phone: Some("+47 000 00 000".into()),
            total_amount: Some(Decimal::new(12345, 3)),
            ..Default::default()
        };
        let booking = execute(usecase, &ctx).await.expect("To edit booking");
        assert_eq!(booking.name, "Barbara");
        assert_eq!(booking.phone.as_deref(), Some("+47 000 00 000"));
        assert_eq!(booking.total_amount, Decimal::new(1234, 2));
    }

    #[actix_web::test]
    async fn spots_change_on_completed_booking_moves_inventory() {
        let ctx = setup();
        let event = insert_event(&ctx, 10).await;
        let booking = insert_booking(&ctx, &event, None, 3, PaymentStatus::Pending).await;
        complete(&ctx, &booking).await;
        assert_eq!(available_spots(&ctx, &event.id).await, 7);

        let usecase = EditBookingUseCase {
            booking_id: booking.id.clone(),
            spots: Some(1),
            ..Default::default()
        };
        execute(usecase, &ctx).await.expect("To edit booking");
        assert_eq!(available_spots(&ctx, &event.id).await, 9);

        let usecase = EditBookingUseCase {
            booking_id: booking.id.clone(),
            spots: Some(6),
            ..Default::default()
        };
        execute(usecase, &ctx).await.expect("To edit booking");
        assert_eq!(available_spots(&ctx, &event.id).await, 4);

        let usecase = EditBookingUseCase {
            booking_id: booking.id.clone(),
            spots: Some(11),
            ..Default::default()
        };
        let res = execute(usecase, &ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::CapacityExceeded {
                requested: 5,
                available: 4
            }
        );
        assert_eq!(available_spots(&ctx, &event.id).await, 4);
    }

    #[actix_web::test]
    async fn spots_change_on_pending_booking_is_checked_only() {
        let ctx = setup();
        let event = insert_event(&ctx, 5).await;
        let booking = insert_booking(&ctx, &event, None, 2, PaymentStatus::Pending).await;

        let usecase = EditBookingUseCase {
            booking_id: booking.id.clone(),
            spots: Some(5),
            ..Default::default()
        };
        let booking = execute(usecase, &ctx).await.expect("To edit booking");
        assert_eq!(booking.spots, 5);
        assert_eq!(available_spots(&ctx, &event.id).await, 5);

        let usecase = EditBookingUseCase {
            booking_id: booking.id.clone(),
            spots: Some(6),
            ..Default::default()
        };
        let res = execute(usecase, &ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::CapacityExceeded {
                requested: 6,
                available: 5
            }
        );
    }

    #[actix_web::test]
    async fn rejects_invalid_values() {
        let ctx = setup();
        let event = insert_event(&ctx, 5).await;
        let booking = insert_booking(&ctx, &event, None, 2, PaymentStatus::Pending).await;

        let usecase = EditBookingUseCase {
            booking_id: booking.id.clone(),
            spots: Some(0),
            ..Default::default()
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::InvalidSpots(0)
        );

        let usecase = EditBookingUseCase {
            booking_id: booking.id.clone(),
            email: Some("nope".into()),
            ..Default::default()
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::InvalidEmail
        );
    }
}
