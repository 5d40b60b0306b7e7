use crate::error::StudioError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use studio_booking_api_structs::get_credits::*;
use studio_booking_domain::{CreditAccount, ID};
use studio_booking_infra::StudioContext;

pub async fn get_credits_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    let identity = protect_route(&http_req, &ctx)?;
    if !identity.can_access_user(&path_params.user_id) {
        return Err(StudioError::Forbidden(
            "Only the user or an administrator can see these credits".into(),
        ));
    }

    let usecase = GetCreditsUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|account| HttpResponse::Ok().json(APIResponse::new(account)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct GetCreditsUseCase {
    pub user_id: ID,
}

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
impl UseCase for GetCreditsUseCase {
    type Response = CreditAccount;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCredits";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .credits
            .find(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::setup;

    #[actix_web::test]
    async fn unknown_user_has_no_credits() {
        let ctx = setup();
        let user_id = ID::default();
        let usecase = GetCreditsUseCase {
            user_id: user_id.clone(),
        };
        let account = execute(usecase, &ctx).await.expect("To get credits");
        assert_eq!(account.user_id, user_id);
        assert_eq!(account.balance, 0);
    }
}
