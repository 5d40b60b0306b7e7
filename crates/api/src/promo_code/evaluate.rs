use rust_decimal::Decimal;
use studio_booking_domain::{PromoCode, PromoQuote, PromoRejection, Redeemer, ID};
use studio_booking_infra::StudioContext;

#[derive(Debug, PartialEq)]
pub enum EvaluationError {
    Rejected(PromoRejection),
    InvalidAmount(Decimal),
    StorageError,
}

impl From<PromoRejection> for EvaluationError {
    fn from(rejection: PromoRejection) -> Self {
        Self::Rejected(rejection)
    }
}

/// Looks up the code and runs every promo check against the current state
/// of the store. Without a redeemer nobody has redeemed the code before.
pub async fn evaluate_promo_code(
    code: &str,
    event_id: &ID,
    amount: Decimal,
    redeemer: Option<&Redeemer>,
    ctx: &StudioContext,
) -> Result<(PromoCode, PromoQuote), EvaluationError> {
    let promo_code = match ctx
        .repos
        .promo_codes
        .find_by_code(&PromoCode::normalize(code))
        .await
    {
        Ok(Some(promo_code)) => promo_code,
        Ok(None) => return Err(PromoRejection::NotFound.into()),
        Err(_) => return Err(EvaluationError::StorageError),
    };

    let prior_redemptions = match redeemer {
        Some(redeemer) => ctx
            .repos
            .bookings
            .count_redemptions(&promo_code.id, redeemer)
            .await
            .map_err(|_| EvaluationError::StorageError)?,
        None => 0,
    };

    promo_code.check(
        event_id,
        amount,
        prior_redemptions,
        ctx.sys.get_timestamp_millis(),
    )?;
    let quote = promo_code
        .quote(amount)
        .ok_or(EvaluationError::InvalidAmount(amount))?;

    Ok((promo_code, quote))
}
