use crate::error::StudioError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use studio_booking_api_structs::get_booking_by_confirmation_number::*;
use studio_booking_domain::Booking;
use studio_booking_infra::StudioContext;

pub async fn get_booking_by_confirmation_number_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    let usecase = GetBookingByConfirmationNumberUseCase {
        confirmation_number: path_params.confirmation_number.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Ok().json(APIResponse::new(booking)))
        .map_err(StudioError::from)
}

/// Public lookup, the confirmation number is what customers get in their receipt
#[derive(Debug)]
pub struct GetBookingByConfirmationNumberUseCase {
    pub confirmation_number: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(String),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(confirmation_number) => Self::NotFound(format!(
                "The booking with confirmation number: {}, was not found.",
                confirmation_number
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetBookingByConfirmationNumberUseCase {
    type Response = Booking;

    type Error = UseCaseError;

    const NAME: &'static str = "GetBookingByConfirmationNumber";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let confirmation_number = self.confirmation_number.trim().to_uppercase();
        match ctx
            .repos
            .bookings
            .find_by_confirmation_number(&confirmation_number)
            .await
        {
            Ok(Some(booking)) => Ok(booking),
            Ok(None) => Err(UseCaseError::NotFound(self.confirmation_number.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{insert_booking, insert_event, setup};
    use studio_booking_domain::PaymentStatus;

    #[actix_web::test]
    async fn finds_booking_ignoring_case() {
        let ctx = setup();
        let event = insert_event(&ctx, 10).await;
        let booking = insert_booking(&ctx, &event, None, 1, PaymentStatus::Pending).await;

        let usecase = GetBookingByConfirmationNumberUseCase {
            confirmation_number: booking.confirmation_number.to_lowercase(),
        };
        let res = execute(usecase, &ctx).await.expect("To find booking");
        assert_eq!(res.id, booking.id);
    }

    #[actix_web::test]
    async fn unknown_confirmation_number() {
        let ctx = setup();
        let usecase = GetBookingByConfirmationNumberUseCase {
            confirmation_number: "SB-AAAAAAAA".into(),
        };
        let res = execute(usecase, &ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::NotFound("SB-AAAAAAAA".into())
        );
    }
}
