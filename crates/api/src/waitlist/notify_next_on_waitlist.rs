use super::subscribers::NotifyWaitlistEntryOnSpotAvailable;
use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use studio_booking_api_structs::notify_next_on_waitlist::*;
use studio_booking_domain::{WaitlistEntry, ID};
use studio_booking_infra::StudioContext;

pub async fn notify_next_on_waitlist_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = NotifyNextOnWaitlistUseCase {
        event_id: path_params.event_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|entry| HttpResponse::Ok().json(APIResponse::new(entry)))
        .map_err(StudioError::from)
}

/// Marks the first entry in the queue that has not been told about a free
/// spot yet. The actual notification is sent by the subscriber.
#[derive(Debug)]
pub struct NotifyNextOnWaitlistUseCase {
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyWaitlist,
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyWaitlist => Self::EmptyWaitlist,
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for NotifyNextOnWaitlistUseCase {
    type Response = WaitlistEntry;

    type Error = UseCaseError;

    const NAME: &'static str = "NotifyNextOnWaitlist";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let _guard = ctx.locks.lock_event(&self.event_id).await;

        let entries = ctx
            .repos
            .waitlist
            .find_by_event(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let mut entry = entries
            .into_iter()
            .filter(|e| !e.is_notified())
            .min_by_key(|e| e.position)
            .ok_or(UseCaseError::EmptyWaitlist)?;

        entry.mark_notified(ctx.sys.get_timestamp_millis());
        ctx.repos
            .waitlist
            .save(&entry)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(entry)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyWaitlistEntryOnSpotAvailable)]
    }
}
