use actix_web::{http::StatusCode, HttpResponse};
use studio_booking_api_structs::ErrorResponse;
use studio_booking_domain::PromoRejection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("Forbidden request. Error message: `{0}`")]
    Forbidden(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
    #[error("Not enough spots left. Requested {requested} but only {available} are available")]
    CapacityExceeded { requested: i64, available: i64 },
    #[error("Invalid promo code. Error message: `{0}`")]
    InvalidPromo(PromoRejection),
    #[error("Invalid status transition. Error message: `{0}`")]
    InvalidTransition(String),
    #[error("There are no more entries to notify on the waitlist")]
    EmptyWaitlist,
    #[error("The event is not sold out, there are still {0} available spots")]
    EventNotSoldOut(i64),
    #[error("Not enough credits. Needed {needed} but the balance is {balance}")]
    InsufficientCredits { needed: i64, balance: i64 },
}

impl StudioError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InternalError => "internal",
            Self::BadClientData(_) => "bad_request",
            Self::Conflict(_) => "conflict",
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::InvalidPromo(_) => "invalid_promo",
            Self::InvalidTransition(_) => "invalid_transition",
            Self::EmptyWaitlist => "empty_waitlist",
            Self::EventNotSoldOut(_) => "event_not_sold_out",
            Self::InsufficientCredits { .. } => "insufficient_credits",
        }
    }

    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::InvalidPromo(rejection) => Some(rejection.reason()),
            _ => None,
        }
    }
}

impl actix_web::error::ResponseError for StudioError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadClientData(_)
            | Self::CapacityExceeded { .. }
            | Self::InvalidPromo(_)
            | Self::InvalidTransition(_)
            | Self::EmptyWaitlist
            | Self::EventNotSoldOut(_)
            | Self::InsufficientCredits { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            kind: self.kind().into(),
            reason: self.reason().map(String::from),
            message: self.to_string(),
        })
    }
}
