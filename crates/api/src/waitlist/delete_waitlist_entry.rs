use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use studio_booking_api_structs::delete_waitlist_entry::*;
use studio_booking_domain::{WaitlistEntry, ID};
use studio_booking_infra::StudioContext;

pub async fn delete_waitlist_entry_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = DeleteWaitlistEntryUseCase {
        entry_id: path_params.entry_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|entry| HttpResponse::Ok().json(APIResponse::new(entry)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct DeleteWaitlistEntryUseCase {
    pub entry_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(entry_id) => Self::NotFound(format!(
                "The waitlist entry with id: {}, was not found.",
                entry_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteWaitlistEntryUseCase {
    type Response = WaitlistEntry;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteWaitlistEntry";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let event_id = match ctx.repos.waitlist.find(&self.entry_id).await {
            Ok(Some(entry)) => entry.event_id,
            Ok(None) => return Err(UseCaseError::NotFound(self.entry_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        let _guard = ctx.locks.lock_event(&event_id).await;

        match ctx.repos.waitlist.delete(&self.entry_id).await {
            Ok(Some(entry)) => Ok(entry),
            Ok(None) => Err(UseCaseError::NotFound(self.entry_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
