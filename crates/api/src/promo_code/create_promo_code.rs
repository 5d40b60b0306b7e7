use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use studio_booking_api_structs::create_promo_code::*;
use studio_booking_domain::{InvalidPromoCodeError, PromoCode, PromoCodeOptions};
use studio_booking_infra::StudioContext;

pub async fn create_promo_code_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreatePromoCodeUseCase {
        options: PromoCodeOptions {
            code: body.code,
            description: body.description,
            discount_type: body.discount_type,
            discount_value: body.discount_value,
            max_discount: body.max_discount,
            min_purchase: body.min_purchase,
            usage_limit: body.usage_limit,
            per_user_limit: body.per_user_limit,
            start_date: body.start_date,
            expiry_date: body.expiry_date,
            is_active: body.is_active,
            event_ids: body.event_ids,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|promo_code| HttpResponse::Created().json(APIResponse::new(promo_code)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct CreatePromoCodeUseCase {
    pub options: PromoCodeOptions,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidPromoCode(InvalidPromoCodeError),
    CodeTaken(String),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidPromoCode(e) => Self::BadClientData(e.to_string()),
            UseCaseError::CodeTaken(code) => Self::Conflict(format!(
                "A promo code with the code: {}, already exists",
                code
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreatePromoCodeUseCase {
    type Response = PromoCode;

    type Error = UseCaseError;

    const NAME: &'static str = "CreatePromoCode";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let promo_code = PromoCode::new(self.options.clone(), ctx.sys.get_timestamp_millis())
            .map_err(UseCaseError::InvalidPromoCode)?;

        match ctx.repos.promo_codes.find_by_code(&promo_code.code).await {
            Ok(Some(_)) => return Err(UseCaseError::CodeTaken(promo_code.code)),
            Ok(None) => (),
            Err(_) => return Err(UseCaseError::StorageError),
        }

        ctx.repos
            .promo_codes
            .insert(&promo_code)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(promo_code)
    }
}
