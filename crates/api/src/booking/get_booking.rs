use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use studio_booking_api_structs::get_booking::*;
use studio_booking_domain::{Booking, ID};
use studio_booking_infra::StudioContext;

pub async fn get_booking_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = GetBookingUseCase {
        booking_id: path_params.booking_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Ok().json(APIResponse::new(booking)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct GetBookingUseCase {
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
impl UseCase for GetBookingUseCase {
    type Response = Booking;

    type Error = UseCaseError;

    const NAME: &'static str = "GetBooking";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.bookings.find(&self.booking_id).await {
            Ok(Some(booking)) => Ok(booking),
            Ok(None) => Err(UseCaseError::NotFound(self.booking_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
