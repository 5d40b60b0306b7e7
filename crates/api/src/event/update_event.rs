use super::inventory::resize_inventory;
use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use studio_booking_api_structs::update_event::*;
use studio_booking_domain::{BookedSpots, Event, ID};
use studio_booking_infra::StudioContext;

pub async fn update_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateEventUseCase {
        event_id: path_params.event_id.clone(),
        title: body.title,
        description: body.description,
        start_ts: body.start_ts,
        price: body.price,
        capacity: body.capacity,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(StudioError::from)
}

#[derive(Debug, Default)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_ts: Option<i64>,
    pub price: Option<Decimal>,
    pub capacity: Option<i64>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidTitle,
    InvalidPrice,
    InvalidCapacity(i64),
    CapacityOnTieredEvent,
    CapacityBelowBooked { capacity: i64, booked: i64 },
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::InvalidTitle => {
                Self::BadClientData("The event title can not be empty".into())
            }
            UseCaseError::InvalidPrice => Self::BadClientData("Price can not be negative".into()),
            UseCaseError::InvalidCapacity(capacity) => {
                Self::BadClientData(format!("Invalid capacity: {}", capacity))
            }
            UseCaseError::CapacityOnTieredEvent => Self::BadClientData(
                "The capacity of an event with ticket tiers follows its tiers".into(),
            ),
            UseCaseError::CapacityBelowBooked { capacity, booked } => Self::BadClientData(
                format!(
                    "Capacity {} is below the {} spots that are already booked",
                    capacity, booked
                ),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let _guard = ctx.locks.lock_event(&self.event_id).await;

        let mut event = match ctx.repos.events.find(&self.event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => return Err(UseCaseError::NotFound(self.event_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        if let Some(title) = &self.title {
            if !event.set_title(title.clone()) {
                return Err(UseCaseError::InvalidTitle);
            }
        }
        if let Some(price) = self.price {
            if !event.set_price(price) {
                return Err(UseCaseError::InvalidPrice);
            }
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        if let Some(start_ts) = self.start_ts {
            event.start_ts = start_ts;
        }

        let new_capacity = self.capacity.filter(|capacity| *capacity != event.capacity);
        if let Some(capacity) = self.capacity {
            if event.is_tiered() {
                return Err(UseCaseError::CapacityOnTieredEvent);
            }
            if capacity < 0 {
                return Err(UseCaseError::InvalidCapacity(capacity));
            }
            let bookings = ctx
                .repos
                .bookings
                .find_by_event(&event.id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            let booked = BookedSpots::from_bookings(&bookings).total;
            if capacity < booked {
                return Err(UseCaseError::CapacityBelowBooked { capacity, booked });
            }
        }

        event.updated = ctx.sys.get_timestamp_millis();
        ctx.repos
            .events
            .save(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if let Some(capacity) = new_capacity {
            // Capacity and counter are written together
            match resize_inventory(&event.id, capacity, ctx).await {
                Ok(Some((resized, _))) => {
                    event.capacity = resized.capacity;
                    event.available_spots = resized.available_spots;
                }
                Ok(None) => return Err(UseCaseError::NotFound(event.id.clone())),
                Err(_) => return Err(UseCaseError::StorageError),
            }
        }

        Ok(event)
    }
}
