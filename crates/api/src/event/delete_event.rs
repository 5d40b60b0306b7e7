use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use studio_booking_api_structs::delete_event::*;
use studio_booking_domain::{Event, ID};
use studio_booking_infra::StudioContext;

pub async fn delete_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = DeleteEventUseCase {
        event_id: path_params.event_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    OpenBookings(usize),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::OpenBookings(count) => Self::Conflict(format!(
                "The event still has {} open bookings",
                count
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteEvent";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let _guard = ctx.locks.lock_event(&self.event_id).await;

        match ctx.repos.events.find(&self.event_id).await {
            Ok(Some(_)) => (),
            Ok(None) => return Err(UseCaseError::NotFound(self.event_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let bookings = ctx
            .repos
            .bookings
            .find_by_event(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let open_bookings = bookings.iter().filter(|b| b.is_open()).count();
        if open_bookings > 0 {
            return Err(UseCaseError::OpenBookings(open_bookings));
        }

        ctx.repos
            .waitlist
            .delete_by_event(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .bookings
            .delete_by_event(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        match ctx.repos.events.delete(&self.event_id).await {
            Ok(Some(event)) => Ok(event),
            Ok(None) => Err(UseCaseError::NotFound(self.event_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
