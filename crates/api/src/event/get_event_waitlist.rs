use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use studio_booking_api_structs::get_event_waitlist::*;
use studio_booking_domain::{WaitlistEntry, ID};
use studio_booking_infra::StudioContext;

pub async fn get_event_waitlist_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = GetEventWaitlistUseCase {
        event_id: path_params.event_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|entries| HttpResponse::Ok().json(APIResponse::new(entries)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct GetEventWaitlistUseCase {
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventWaitlistUseCase {
    type Response = Vec<WaitlistEntry>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEventWaitlist";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.events.find(&self.event_id).await {
            Ok(Some(_)) => (),
            Ok(None) => return Err(UseCaseError::NotFound(self.event_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        ctx.repos
            .waitlist
            .find_by_event(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
