use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use studio_booking_api_structs::get_promo_codes::*;
use studio_booking_domain::PromoCode;
use studio_booking_infra::StudioContext;

pub async fn get_promo_codes_controller(
    http_req: HttpRequest,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    execute(GetPromoCodesUseCase {}, &ctx)
        .await
        .map(|promo_codes| HttpResponse::Ok().json(APIResponse::new(promo_codes)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct GetPromoCodesUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPromoCodesUseCase {
    type Response = Vec<PromoCode>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetPromoCodes";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .promo_codes
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
