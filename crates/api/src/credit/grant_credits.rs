use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use studio_booking_api_structs::grant_credits::*;
use studio_booking_domain::{CreditAccount, ID};
use studio_booking_infra::StudioContext;

pub async fn grant_credits_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = GrantCreditsUseCase {
        user_id: path_params.user_id.clone(),
        amount: body.amount,
    };

    execute(usecase, &ctx)
        .await
        .map(|account| HttpResponse::Ok().json(APIResponse::new(account)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct GrantCreditsUseCase {
    pub user_id: ID,
    pub amount: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidAmount(i64),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidAmount(amount) => Self::BadClientData(format!(
                "The amount of credits to grant has to be positive, got: {}",
                amount
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GrantCreditsUseCase {
    type Response = CreditAccount;

    type Error = UseCaseError;

    const NAME: &'static str = "GrantCredits";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        if self.amount <= 0 {
            return Err(UseCaseError::InvalidAmount(self.amount));
        }

        ctx.repos
            .credits
            .grant(&self.user_id, self.amount)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::setup;

    #[actix_web::test]
    async fn grants_credits() {
        let ctx = setup();
        let user_id = ID::default();
        for _ in 0..2 {
            let usecase = GrantCreditsUseCase {
                user_id: user_id.clone(),
                amount: 5,
            };
            execute(usecase, &ctx).await.expect("To grant credits");
        }

        let account = ctx.repos.credits.find(&user_id).await.expect("To query");
        assert_eq!(account.balance, 10);
    }

    #[actix_web::test]
    async fn rejects_non_positive_amount() {
        let ctx = setup();
        let usecase = GrantCreditsUseCase {
            user_id: ID::default(),
            amount: 0,
        };
        let res = execute(usecase, &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::InvalidAmount(0));
    }
}
