#![allow(dead_code)]

use jsonwebtoken::{encode, EncodingKey, Header};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use studio_booking_api::Application;
use studio_booking_infra::{Config, InMemoryNotifier, Notification, StudioContext};
use studio_booking_sdk::{
    APIError, CreateBookingInput, CreateEventInput, Event, Role, StudioSDK,
    UpdateBookingStatusInput, UpdateBookingStatusResponse, ID,
};

pub struct TestApp {
    pub config: Config,
    pub address: String,
    notifier: Arc<InMemoryNotifier>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    exp: usize,
    user_id: ID,
    role: Role,
}

impl TestApp {
    pub fn admin(&self) -> StudioSDK {
        StudioSDK::new(self.address.clone(), self.config.admin_api_key.clone())
    }

    pub fn anonymous(&self) -> StudioSDK {
        StudioSDK::anonymous(self.address.clone())
    }

    pub fn customer(&self, user_id: &ID) -> StudioSDK {
        StudioSDK::with_token(self.address.clone(), self.token(user_id, Role::Customer))
    }

    pub fn token(&self, user_id: &ID, role: Role) -> String {
        let claims = Claims {
            exp: 10_000_000_000,
            user_id: user_id.clone(),
            role,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .expect("To encode token")
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifier.sent()
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let notifier = Arc::new(InMemoryNotifier::new());
    let mut ctx = StudioContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.notifier = notifier.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        config,
        address,
        notifier,
    }
}

pub async fn create_event(sdk: &StudioSDK, capacity: i64, price: i64) -> Event {
    sdk.event
        .create(CreateEventInput {
            title: "Morning flow".into(),
            description: None,
            start_ts: 1_900_000_000_000,
            capacity: Some(capacity),
            price: Decimal::from(price),
            ticket_tiers: None,
        })
        .await
        .expect("To create event")
        .event
}

pub fn booking_input(event_id: &ID, spots: i64, email: &str) -> CreateBookingInput {
    CreateBookingInput {
        event_id: event_id.clone(),
        ticket_tier_id: None,
        spots,
        name: "Grace".into(),
        email: email.into(),
        phone: None,
        promo_code: None,
        use_credits: false,
    }
}

pub async fn set_payment_status(
    sdk: &StudioSDK,
    booking_id: &ID,
    payment_status: &str,
) -> Result<UpdateBookingStatusResponse, APIError> {
    sdk.booking
        .update_status(UpdateBookingStatusInput {
            booking_id: booking_id.clone(),
            status: None,
            payment_status: Some(payment_status.into()),
        })
        .await
}

pub async fn available_spots(sdk: &StudioSDK, event_id: &ID) -> i64 {
    sdk.event
        .get(event_id.clone())
        .await
        .expect("To get event")
        .event
        .available_spots
}
