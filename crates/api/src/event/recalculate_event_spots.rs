use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use studio_booking_api_structs::recalculate_event_spots::*;
use studio_booking_domain::{BookedSpots, Reconciliation, ID};
use studio_booking_infra::StudioContext;
use tracing::info;

pub async fn recalculate_event_spots_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = RecalculateEventSpotsUseCase {
        event_id: path_params.event_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reconciliation| HttpResponse::Ok().json(APIResponse::new(reconciliation)))
        .map_err(StudioError::from)
}

/// Rebuilds the spot counters of an event from its completed bookings.
/// Running it twice in a row yields the same counters.
#[derive(Debug)]
pub struct RecalculateEventSpotsUseCase {
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
impl UseCase for RecalculateEventSpotsUseCase {
    type Response = Reconciliation;

    type Error = UseCaseError;

    const NAME: &'static str = "RecalculateEventSpots";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let _guard = ctx.locks.lock_event(&self.event_id).await;

        let mut event = match ctx.repos.events.find(&self.event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => return Err(UseCaseError::NotFound(self.event_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        let bookings = ctx
            .repos
            .bookings
            .find_by_event(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let reconciliation = event.reconcile(&BookedSpots::from_bookings(&bookings));
        if reconciliation.has_drifted() {
            info!(
                event_id = %event.id,
                old_available_spots = reconciliation.old_available_spots,
                new_available_spots = reconciliation.new_available_spots,
                "Spot counter drifted from the booking ledger"
            );
        }

        event.updated = ctx.sys.get_timestamp_millis();
        ctx.repos
            .events
            .save(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reconciliation)
    }
}
