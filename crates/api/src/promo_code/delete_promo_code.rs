use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use studio_booking_api_structs::delete_promo_code::*;
use studio_booking_domain::{PromoCode, ID};
use studio_booking_infra::StudioContext;

pub async fn delete_promo_code_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = DeletePromoCodeUseCase {
        promo_code_id: path_params.promo_code_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|promo_code| HttpResponse::Ok().json(APIResponse::new(promo_code)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct DeletePromoCodeUseCase {
    pub promo_code_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(promo_code_id) => Self::NotFound(format!(
                "The promo code with id: {}, was not found.",
                promo_code_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeletePromoCodeUseCase {
    type Response = PromoCode;

    type Error = UseCaseError;

    const NAME: &'static str = "DeletePromoCode";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let _guard = ctx.locks.lock_promo_code(&self.promo_code_id).await;

        match ctx.repos.promo_codes.delete(&self.promo_code_id).await {
            Ok(Some(promo_code)) => Ok(promo_code),
            Ok(None) => Err(UseCaseError::NotFound(self.promo_code_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
