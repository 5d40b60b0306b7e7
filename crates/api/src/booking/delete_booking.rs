use crate::error::StudioError;
use crate::event::inventory::adjust_inventory;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use studio_booking_api_structs::delete_booking::*;
use studio_booking_domain::{Booking, ID};
use studio_booking_infra::StudioContext;

pub async fn delete_booking_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = DeleteBookingUseCase {
        booking_id: path_params.booking_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Ok().json(APIResponse::new(booking)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct DeleteBookingUseCase {
    pub booking_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(booking_id) => Self::NotFound(format!(
                "The booking with id: {}, was not found.",
                booking_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteBookingUseCase {
    type Response = Booking;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteBooking";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let event_id = match ctx.repos.bookings.find(&self.booking_id).await {
            Ok(Some(booking)) => booking.event_id,
            Ok(None) => return Err(UseCaseError::NotFound(self.booking_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        let _guard = ctx.locks.lock_event(&event_id).await;

        let booking = match ctx.repos.bookings.delete(&self.booking_id).await {
            Ok(Some(booking)) => booking,
            Ok(None) => return Err(UseCaseError::NotFound(self.booking_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let held = booking.held_spots();
        if held > 0 {
            adjust_inventory(
                &booking.event_id,
                booking.ticket_tier_id.as_ref(),
                held,
                ctx,
            )
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(booking)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{insert_booking, insert_event, setup};
    use studio_booking_domain::PaymentStatus;

    #[actix_web::test]
    async fn releases_spots_of_completed_booking() {
        let ctx = setup();
        let event = insert_event(&ctx, 10).await;
        let booking = insert_booking(&ctx, &event, None, 4, PaymentStatus::Completed).await;
        ctx.repos
            .events
            .adjust_spots(&event.id, None, -4)
            .await
            .expect("To adjust");

        let usecase = DeleteBookingUseCase {
            booking_id: booking.id.clone(),
        };
        execute(usecase, &ctx).await.expect("To delete booking");

        let event = ctx
            .repos
            .events
            .find(&event.id)
            .await
            .expect("To query")
            .expect("To find event");
        assert_eq!(event.available_spots, 10);
        assert!(ctx
            .repos
            .bookings
            .find(&booking.id)
            .await
            .expect("To query")
            .is_none());
    }

    #[actix_web::test]
    async fn pending_booking_leaves_inventory() {
        let ctx = setup();
        let event = insert_event(&ctx, 10).await;
        let booking = insert_booking(&ctx, &event, None, 4, PaymentStatus::Pending).await;

        let usecase = DeleteBookingUseCase {
            booking_id: booking.id.clone(),
        };
        execute(usecase, &ctx).await.expect("To delete booking");

        let event = ctx
            .repos
            .events
            .find(&event.id)
            .await
            .expect("To query")
            .expect("To find event");
        assert_eq!(event.available_spots, 10);
    }

    #[actix_web::test]
    async fn missing_booking() {
        let ctx = setup();
        let booking_id = ID::default();
        let usecase = DeleteBookingUseCase {
            booking_id: booking_id.clone(),
        };
        let res = execute(usecase, &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(booking_id));
    }
}
