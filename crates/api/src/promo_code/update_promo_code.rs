use crate::error::StudioError;
use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use studio_booking_api_structs::update_promo_code::*;
use studio_booking_domain::{DiscountType, InvalidPromoCodeError, PromoCode, ID};
use studio_booking_infra::StudioContext;

pub async fn update_promo_code_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdatePromoCodeUseCase {
        promo_code_id: path_params.promo_code_id.clone(),
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
    };

    execute(usecase, &ctx)
        .await
        .map(|promo_code| HttpResponse::Ok().json(APIResponse::new(promo_code)))
        .map_err(StudioError::from)
}

/// The code itself and the usage count can not be changed
#[derive(Debug, Default)]
pub struct UpdatePromoCodeUseCase {
    pub promo_code_id: ID,
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
    pub max_discount: Option<Decimal>,
    pub min_purchase: Option<Decimal>,
    pub usage_limit: Option<i64>,
    pub per_user_limit: Option<i64>,
    pub start_date: Option<i64>,
    pub expiry_date: Option<i64>,
    pub is_active: Option<bool>,
    pub event_ids: Option<Vec<ID>>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidPromoCode(InvalidPromoCodeError),
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(promo_code_id) => Self::NotFound(format!(
                "The promo code with id: {}, was not found.",
                promo_code_id
            )),
            UseCaseError::InvalidPromoCode(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl UpdatePromoCodeUseCase {
    fn apply(&self, promo_code: &mut PromoCode) -> Result<(), InvalidPromoCodeError> {
        if self.discount_type.is_some() || self.discount_value.is_some() {
            promo_code.set_discount(
                self.discount_type.unwrap_or(promo_code.discount_type),
                self.discount_value.unwrap_or(promo_code.discount_value),
            )?;
        }
        if self.max_discount.is_some() {
            promo_code.set_max_discount(self.max_discount)?;
        }
        if let Some(min_purchase) = self.min_purchase {
            promo_code.set_min_purchase(min_purchase)?;
        }
        if self.usage_limit.is_some() {
            promo_code.set_usage_limit(self.usage_limit)?;
        }
        if let Some(per_user_limit) = self.per_user_limit {
            promo_code.set_per_user_limit(per_user_limit)?;
        }
        if self.start_date.is_some() || self.expiry_date.is_some() {
            promo_code.set_window(
                self.start_date.unwrap_or(promo_code.start_date),
                self.expiry_date.or(promo_code.expiry_date),
            )?;
        }
        if let Some(description) = &self.description {
            promo_code.description = Some(description.clone());
        }
        if let Some(is_active) = self.is_active {
            promo_code.is_active = is_active;
        }
        if let Some(event_ids) = &self.event_ids {
            promo_code.event_ids = event_ids.clone();
        }
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdatePromoCodeUseCase {
    type Response = PromoCode;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdatePromoCode";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        let _guard = ctx.locks.lock_promo_code(&self.promo_code_id).await;

        let mut promo_code = match ctx.repos.promo_codes.find(&self.promo_code_id).await {
            Ok(Some(promo_code)) => promo_code,
            Ok(None) => return Err(UseCaseError::NotFound(self.promo_code_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        self.apply(&mut promo_code)
            .map_err(UseCaseError::InvalidPromoCode)?;
        promo_code.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .promo_codes
            .save(&promo_code)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(promo_code)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{insert_promo_code, promo_options, setup, NOW};

    #[actix_web::test]
    async fn updates_promo_code() {
        let ctx = setup();
        let promo_code =
            insert_promo_code(&ctx, promo_options("AUTUMN", DiscountType::Fixed, 5)).await;
        let event_id = ID::default();

        let usecase = UpdatePromoCodeUseCase {
            promo_code_id: promo_code.id.clone(),
            discount_type: Some(DiscountType::Percentage),
            discount_value: Some(Decimal::from(30)),
            max_discount: Some(Decimal::from(15)),
            is_active: Some(false),
            event_ids: Some(vec![event_id.clone()]),
            ..Default::default()
        };
        let promo_code = execute(usecase, &ctx).await.expect("To update promo code");
        assert_eq!(promo_code.discount_type, DiscountType::Percentage);
        assert_eq!(promo_code.discount_value, Decimal::from(30));
        assert_eq!(promo_code.max_discount, Some(Decimal::from(15)));
        assert!(!promo_code.is_active);
        assert_eq!(promo_code.event_ids, vec![event_id]);
    }

    #[actix_web::test]
    async fn rejects_expiry_before_start() {
        let ctx = setup();
        let promo_code =
            insert_promo_code(&ctx, promo_options("AUTUMN", DiscountType::Fixed, 5)).await;

        let usecase = UpdatePromoCodeUseCase {
            promo_code_id: promo_code.id.clone(),
            expiry_date: Some(NOW - 1),
            ..Default::default()
        };
        let res = execute(usecase, &ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidPromoCode(InvalidPromoCodeError::ExpiryBeforeStart)
        );
    }

    #[actix_web::test]
    async fn keeps_usage_count() {
        let ctx = setup();
        let promo_code =
            insert_promo_code(&ctx, promo_options("AUTUMN", DiscountType::Fixed, 5)).await;
        ctx.repos
            .promo_codes
            .redeem(&promo_code.id)
            .await
            .expect("To redeem");

        let usecase = UpdatePromoCodeUseCase {
            promo_code_id: promo_code.id.clone(),
            description: Some("Autumn sale".into()),
            ..Default::default()
        };
        execute(usecase, &ctx).await.expect("To update promo code");

        let stored = ctx
            .repos
            .promo_codes
            .find(&promo_code.id)
            .await
            .expect("To query")
            .expect("To find promo code");
        assert_eq!(stored.usage_count, 1);
        assert_eq!(stored.description.as_deref(), Some("Autumn sale"));
    }
}
