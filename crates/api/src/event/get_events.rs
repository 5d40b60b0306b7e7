use crate::error::StudioError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use studio_booking_api_structs::get_events::*;
use studio_booking_domain::Event;
use studio_booking_infra::StudioContext;

pub async fn get_events_controller(
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    execute(GetEventsUseCase {}, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(APIResponse::new(events)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct GetEventsUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventsUseCase {
    type Response = Vec<Event>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvents";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .events
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
