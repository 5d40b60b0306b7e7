use super::evaluate::{evaluate_promo_code, EvaluationError};
use crate::error::StudioError;
use crate::shared::{
    auth::get_identity,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use studio_booking_api_structs::validate_promo_code::*;
use studio_booking_domain::{PromoCode, PromoQuote, PromoRejection, Redeemer, ID};
use studio_booking_infra::StudioContext;

pub async fn validate_promo_code_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    let identity = get_identity(&http_req, &ctx)?;

    let body = body.0;
    // A signed in customer can not validate on behalf of someone else
    let user_id = identity
        .as_ref()
        .and_then(|i| i.user_id().cloned())
        .or(body.user_id);
    let usecase = ValidatePromoCodeUseCase {
        code: body.code,
        event_id: body.event_id,
        amount: body.amount,
        user_id,
        email: body.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|(promo_code, quote)| {
            HttpResponse::Ok().json(APIResponse::new(promo_code.id, quote))
        })
        .map_err(StudioError::from)
}

/// Quotes the discount a code would give without redeeming it
#[derive(Debug)]
pub struct ValidatePromoCodeUseCase {
    pub code: String,
    pub event_id: ID,
    pub amount: Decimal,
    pub user_id: Option<ID>,
    pub email: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidAmount(Decimal),
    Rejected(PromoRejection),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidAmount(amount) => {
                Self::BadClientData(format!("Invalid amount: {}", amount))
            }
            UseCaseError::Rejected(rejection) => Self::InvalidPromo(rejection),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<EvaluationError> for UseCaseError {
    fn from(e: EvaluationError) -> Self {
        match e {
            EvaluationError::Rejected(rejection) => Self::Rejected(rejection),
            EvaluationError::InvalidAmount(amount) => Self::InvalidAmount(amount),
            EvaluationError::StorageError => Self::StorageError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ValidatePromoCodeUseCase {
    type Response = (PromoCode, PromoQuote);

    type Error = UseCaseError;

    const NAME: &'static str = "ValidatePromoCode";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        if self.amount.is_sign_negative() {
            return Err(UseCaseError::InvalidAmount(self.amount));
        }
        let redeemer = Redeemer::identify(self.user_id.as_ref(), self.email.as_deref());
        let res =
            evaluate_promo_code(&self.code, &self.event_id, self.amount, redeemer.as_ref(), ctx)
                .await?;
        Ok(res)
    }
}
