use crate::error::StudioError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use studio_booking_api_structs::join_waitlist::*;
use studio_booking_domain::{WaitlistEntry, ID};
use studio_booking_infra::StudioContext;

pub async fn join_waitlist_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    let body = body.0;
    let usecase = JoinWaitlistUseCase {
        event_id: body.event_id,
        name: body.name,
        email: body.email,
        phone: body.phone,
    };

    execute(usecase, &ctx)
        .await
        .map(|entry| HttpResponse::Created().json(APIResponse::new(entry)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct JoinWaitlistUseCase {
    pub event_id: ID,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyName,
    InvalidEmail,
    NotFound(ID),
    NotSoldOut(i64),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyName => Self::BadClientData("Name can not be empty".into()),
            UseCaseError::InvalidEmail => {
                Self::BadClientData("A valid email has to be provided".into())
            }
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::NotSoldOut(available_spots) => Self::EventNotSoldOut(available_spots),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for JoinWaitlistUseCase {
    type Response = WaitlistEntry;

    type Error = UseCaseError;

    const NAME: &'static str = "JoinWaitlist";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::EmptyName);
        }
        if !self.email.contains('@') {
            return Err(UseCaseError::InvalidEmail);
        }

        let _guard = ctx.locks.lock_event(&self.event_id).await;

        let event = match ctx.repos.events.find(&self.event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => return Err(UseCaseError::NotFound(self.event_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        if !event.is_sold_out() {
            return Err(UseCaseError::NotSoldOut(event.available_spots));
        }

        let entries = ctx
            .repos
            .waitlist
            .find_by_event(&event.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let entry = WaitlistEntry::new(
            &event.id,
            self.name.trim().to_string(),
            self.email.trim().to_string(),
            self.phone.clone(),
            WaitlistEntry::next_position(&entries),
            ctx.sys.get_timestamp_millis(),
        );

        ctx.repos
            .waitlist
            .insert(&entry)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(entry)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{insert_event, setup};

    fn usecase(event_id: &ID, name: &str) -> JoinWaitlistUseCase {
        JoinWaitlistUseCase {
            event_id: event_id.clone(),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
        }
    }

    #[actix_web::test]
    async fn appends_to_queue_of_sold_out_event() {
        let ctx = setup();
        let event = insert_event(&ctx, 0).await;

        let first = execute(usecase(&event.id, "Ada"), &ctx)
            .await
            .expect("To join waitlist");
        let second = execute(usecase(&event.id, "Alan"), &ctx)
            .await
            .expect("To join waitlist");
        assert_eq!(first.position, 1);
        assert_eq!(second.position, 2);
        assert!(!first.is_notified());
    }

    #[actix_web::test]
    async fn rejects_event_with_spots_left() {
        let ctx = setup();
        let event = insert_event(&ctx, 3).await;
        let res = execute(usecase(&event.id, "Ada"), &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotSoldOut(3));
    }

    #[actix_web::test]
    async fn rejects_unknown_event() {
        let ctx = setup();
        let event_id = ID::default();
        let res = execute(usecase(&event_id, "Ada"), &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(event_id));
    }
}
