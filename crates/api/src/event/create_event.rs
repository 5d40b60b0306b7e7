use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use studio_booking_api_structs::create_event::*;
use studio_booking_domain::{Event, EventOptions, InvalidEventError, TicketTierOptions};
use studio_booking_infra::StudioContext;

pub async fn create_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateEventUseCase {
        title: body.title,
        description: body.description,
        start_ts: body.start_ts,
        capacity: body.capacity,
        price: body.price,
        ticket_tiers: body.ticket_tiers.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Created().json(APIResponse::new(event)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub capacity: Option<i64>,
    pub price: Decimal,
    pub ticket_tiers: Vec<TicketTierOptions>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidEvent(InvalidEventError),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEvent(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let options = EventOptions {
            title: self.title.clone(),
            description: self.description.clone(),
            start_ts: self.start_ts,
            capacity: self.capacity,
            price: self.price,
            ticket_tiers: self.ticket_tiers.clone(),
        };
        let event = Event::new(options, ctx.sys.get_timestamp_millis())
            .map_err(UseCaseError::InvalidEvent)?;

        ctx.repos
            .events
            .insert(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(event)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::setup;

    fn usecase(capacity: Option<i64>, ticket_tiers: Vec<TicketTierOptions>) -> CreateEventUseCase {
        CreateEventUseCase {
            title: "Yin yoga".into(),
            description: Some("Slow and deep".into()),
            start_ts: 0,
            capacity,
            price: Decimal::from(15),
            ticket_tiers,
        }
    }

    #[actix_web::test]
    async fn creates_event_with_all_spots_available() {
        let ctx = setup();
        let event = execute(usecase(Some(12), Vec::new()), &ctx)
            .await
            .expect("To create event");
        assert_eq!(event.capacity, 12);
        assert_eq!(event.available_spots, 12);

        let stored = ctx
            .repos
            .events
            .find(&event.id)
            .await
            .expect("To query")
            .expect("To find event");
        assert_eq!(stored.available_spots, 12);
    }

    #[actix_web::test]
    async fn derives_capacity_from_tiers() {
        let ctx = setup();
        let tiers = vec![
            TicketTierOptions {
                name: "Mat".into(),
                price: Decimal::from(10),
                capacity: 8,
                benefits: Vec::new(),
            },
            TicketTierOptions {
                name: "Mat and tea".into(),
                price: Decimal::from(14),
                capacity: 4,
                benefits: vec!["Tea".into()],
            },
        ];
        let event = execute(usecase(None, tiers), &ctx)
            .await
            .expect("To create event");
        assert_eq!(event.capacity, 12);
        assert_eq!(event.available_spots, 12);
        assert!(event.ticket_tiers.iter().all(|t| t.available_spots == t.capacity));
    }

    #[actix_web::test]
    async fn rejects_event_without_capacity() {
        let ctx = setup();
        let res = execute(usecase(None, Vec::new()), &ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidEvent(InvalidEventError::MissingCapacity)
        );
    }

    #[actix_web::test]
    async fn rejects_negative_capacity() {
        let ctx = setup();
        let res = execute(usecase(Some(-1), Vec::new()), &ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidEvent(InvalidEventError::NegativeCapacity)
        );
    }
}
