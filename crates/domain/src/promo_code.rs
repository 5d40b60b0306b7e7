use crate::{
    booking::Booking,
    shared::entity::{Entity, ID},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }
}

impl FromStr for DiscountType {
    type Err = InvalidPromoCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            _ => Err(InvalidPromoCodeError::DiscountType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromoCode {
    pub id: ID,
    /// Always stored uppercase
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub max_discount: Option<Decimal>,
    pub min_purchase: Decimal,
    pub usage_limit: Option<i64>,
    pub per_user_limit: i64,
    pub usage_count: i64,
    pub start_date: i64,
    pub expiry_date: Option<i64>,
    pub is_active: bool,
    /// Empty means that the code can be used for every event
    pub event_ids: Vec<ID>,
    pub created: i64,
    pub updated: i64,
}

#[derive(Debug, Clone)]
pub struct PromoCodeOptions {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub max_discount: Option<Decimal>,
    pub min_purchase: Option<Decimal>,
    pub usage_limit: Option<i64>,
    pub per_user_limit: Option<i64>,
    pub start_date: Option<i64>,
    pub expiry_date: Option<i64>,
    pub is_active: Option<bool>,
    pub event_ids: Vec<ID>,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidPromoCodeError {
    #[error("The promo code can not be empty")]
    EmptyCode,
    #[error("Unknown discount type: {0}")]
    DiscountType(String),
    #[error("The discount value must be positive")]
    NonPositiveValue,
    #[error("A percentage discount can not be more than 100")]
    PercentageAbove100,
    #[error("Max discount can not be negative")]
    NegativeMaxDiscount,
    #[error("Minimum purchase can not be negative")]
    NegativeMinPurchase,
    #[error("Usage limit must be at least 1")]
    InvalidUsageLimit,
    #[error("Per user limit must be at least 1")]
    InvalidPerUserLimit,
    #[error("Expiry date must be after the start date")]
    ExpiryBeforeStart,
}

/// Why a promo code could not be applied. The checks are ordered and the
/// first failing one decides the rejection.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoRejection {
    #[error("Promo code was not found")]
    NotFound,
    #[error("Promo code is not active")]
    Inactive,
    #[error("Promo code is not valid yet")]
    NotStarted,
    #[error("Promo code has expired")]
    Expired,
    #[error("Promo code can not be used for this event")]
    NotApplicable,
    #[error("Purchase amount is below the minimum for this promo code")]
    BelowMinimum,
    #[error("Promo code has reached its usage limit")]
    UsageExhausted,
    #[error("Promo code has already been used the maximum number of times by this customer")]
    PerUserExhausted,
}

impl PromoRejection {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Inactive => "inactive",
            Self::NotStarted => "not_started",
            Self::Expired => "expired",
            Self::NotApplicable => "not_applicable",
            Self::BelowMinimum => "below_minimum",
            Self::UsageExhausted => "usage_exhausted",
            Self::PerUserExhausted => "per_user_exhausted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoQuote {
    pub amount: Decimal,
    pub discount: Decimal,
    pub final_amount: Decimal,
}

/// Who is redeeming a promo code. A user id wins over an email.
#[derive(Debug, Clone, PartialEq)]
pub enum Redeemer {
    User(ID),
    Email(String),
}

impl Redeemer {
    pub fn identify(user_id: Option<&ID>, email: Option<&str>) -> Option<Self> {
        match (user_id, email) {
            (Some(user_id), _) => Some(Self::User(user_id.clone())),
            (None, Some(email)) if !email.trim().is_empty() => {
                Some(Self::Email(email.trim().to_string()))
            }
            _ => None,
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            Self::User(user_id) => booking.user_id.as_ref() == Some(user_id),
            Self::Email(email) => booking.email.trim().eq_ignore_ascii_case(email),
        }
    }

    /// Number of the given bookings where this redeemer used the promo code
    pub fn redemptions<'a, I>(&self, promo_code_id: &ID, bookings: I) -> i64
    where
        I: IntoIterator<Item = &'a Booking>,
    {
        bookings
            .into_iter()
            .filter(|b| b.promo_code_id.as_ref() == Some(promo_code_id) && self.matches(b))
            .count() as i64
    }
}

impl Entity for PromoCode {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl PromoCode {
    pub fn new(options: PromoCodeOptions, now: i64) -> Result<Self, InvalidPromoCodeError> {
        let code = Self::normalize(&options.code);
        if code.is_empty() {
            return Err(InvalidPromoCodeError::EmptyCode);
        }

        let mut promo_code = Self {
            id: Default::default(),
            code,
            description: options.description,
            discount_type: options.discount_type,
            discount_value: Decimal::ZERO,
            max_discount: None,
            min_purchase: Decimal::ZERO,
            usage_limit: None,
            per_user_limit: 1,
            usage_count: 0,
            start_date: now,
            expiry_date: None,
            is_active: options.is_active.unwrap_or(true),
            event_ids: options.event_ids,
            created: now,
            updated: now,
        };

        promo_code.set_discount(options.discount_type, options.discount_value)?;
        promo_code.set_max_discount(options.max_discount)?;
        promo_code.set_min_purchase(options.min_purchase.unwrap_or(Decimal::ZERO))?;
        promo_code.set_usage_limit(options.usage_limit)?;
        promo_code.set_per_user_limit(options.per_user_limit.unwrap_or(1))?;
        promo_code.set_window(options.start_date.unwrap_or(now), options.expiry_date)?;

        Ok(promo_code)
    }

    /// Codes are matched case insensitively
    pub fn normalize(code: &str) -> String {
        code.trim().to_uppercase()
    }

    /// Runs every check after the lookup, in order, without side effects
    pub fn check(
        &self,
        event_id: &ID,
        amount: Decimal,
        prior_redemptions: i64,
        now: i64,
    ) -> Result<(), PromoRejection> {
        if !self.is_active {
            return Err(PromoRejection::Inactive);
        }
        if now < self.start_date {
            return Err(PromoRejection::NotStarted);
        }
        if matches!(self.expiry_date, Some(expiry) if now > expiry) {
            return Err(PromoRejection::Expired);
        }
        if !self.event_ids.is_empty() && !self.event_ids.contains(event_id) {
            return Err(PromoRejection::NotApplicable);
        }
        if amount < self.min_purchase {
            return Err(PromoRejection::BelowMinimum);
        }
        if matches!(self.usage_limit, Some(limit) if self.usage_count >= limit) {
            return Err(PromoRejection::UsageExhausted);
        }
        if prior_redemptions >= self.per_user_limit {
            return Err(PromoRejection::PerUserExhausted);
        }
        Ok(())
    }

    /// Prices the discount for the given amount. `None` if the amount is too
    /// large to be priced.
    pub fn quote(&self, amount: Decimal) -> Option<PromoQuote> {
        let amount = amount.max(Decimal::ZERO);
        let discount = match self.discount_type {
            DiscountType::Percentage => {
                let rate = self.discount_value.checked_div(Decimal::ONE_HUNDRED)?;
                let discount = amount.checked_mul(rate)?;
                match self.max_discount {
                    Some(max) => discount.min(max),
                    None => discount,
                }
            }
            DiscountType::Fixed => self.discount_value.min(amount),
        }
        .round_dp(2);

        Some(PromoQuote {
            amount,
            discount,
            final_amount: amount.checked_sub(discount)?.max(Decimal::ZERO).round_dp(2),
        })
    }

    pub fn set_discount(
        &mut self,
        discount_type: DiscountType,
        value: Decimal,
    ) -> Result<(), InvalidPromoCodeError> {
        if value <= Decimal::ZERO {
            return Err(InvalidPromoCodeError::NonPositiveValue);
        }
        if discount_type == DiscountType::Percentage && value > Decimal::ONE_HUNDRED {
            return Err(InvalidPromoCodeError::PercentageAbove100);
        }
        self.discount_type = discount_type;
        self.discount_value = value;
        Ok(())
    }

    pub fn set_max_discount(
        &mut self,
        max_discount: Option<Decimal>,
    ) -> Result<(), InvalidPromoCodeError> {
        if matches!(max_discount, Some(max) if max.is_sign_negative()) {
            return Err(InvalidPromoCodeError::NegativeMaxDiscount);
        }
        self.max_discount = max_discount;
        Ok(())
    }

    pub fn set_min_purchase(&mut self, min_purchase: Decimal) -> Result<(), InvalidPromoCodeError> {
        if min_purchase.is_sign_negative() {
            return Err(InvalidPromoCodeError::NegativeMinPurchase);
        }
        self.min_purchase = min_purchase;
        Ok(())
    }

    pub fn set_usage_limit(&mut self, usage_limit: Option<i64>) -> Result<(), InvalidPromoCodeError> {
        if matches!(usage_limit, Some(limit) if limit < 1) {
            return Err(InvalidPromoCodeError::InvalidUsageLimit);
        }
        self.usage_limit = usage_limit;
        Ok(())
    }

    pub fn set_per_user_limit(&mut self, per_user_limit: i64) -> Result<(), InvalidPromoCodeError> {
        if per_user_limit < 1 {
            return Err(InvalidPromoCodeError::InvalidPerUserLimit);
        }
        self.per_user_limit = per_user_limit;
        Ok(())
    }

    pub fn set_window(
        &mut self,
        start_date: i64,
        expiry_date: Option<i64>,
    ) -> Result<(), InvalidPromoCodeError> {
        if matches!(expiry_date, Some(expiry) if expiry < start_date) {
            return Err(InvalidPromoCodeError::ExpiryBeforeStart);
        }
        self.start_date = start_date;
        self.expiry_date = expiry_date;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::booking::BookingOptions;

    fn options(discount_type: DiscountType, value: i64) -> PromoCodeOptions {
        PromoCodeOptions {
            code: " summer20 ".into(),
            description: None,
            discount_type,
            discount_value: Decimal::from(value),
            max_discount: None,
            min_purchase: None,
            usage_limit: None,
            per_user_limit: None,
            start_date: None,
            expiry_date: None,
            is_active: None,
            event_ids: Vec::new(),
        }
    }

    fn booking_with(promo_code_id: Option<ID>, user_id: Option<ID>, email: &str) -> Booking {
        Booking::new(
            BookingOptions {
                event_id: ID::new(),
                ticket_tier_id: None,
                user_id,
                name: "Linus".into(),
                email: email.into(),
                phone: None,
                spots: 1,
                unit_price: Decimal::from(10),
                discount: Decimal::ZERO,
                promo_code_id,
                used_credits: None,
            },
            0,
        )
        .expect("To create booking")
    }

    #[test]
    fn creates_promo_code_with_defaults() {
        let promo = PromoCode::new(options(DiscountType::Fixed, 5), 1000).expect("To create");
        assert_eq!(promo.code, "SUMMER20");
        assert_eq!(promo.start_date, 1000);
        assert_eq!(promo.per_user_limit, 1);
        assert_eq!(promo.usage_count, 0);
        assert!(promo.is_active);
    }

    #[test]
    fn rejects_invalid_promo_codes() {
        let mut opts = options(DiscountType::Percentage, 101);
        assert_eq!(
            PromoCode::new(opts.clone(), 0).unwrap_err(),
            InvalidPromoCodeError::PercentageAbove100
        );
        opts.discount_value = Decimal::ZERO;
        assert_eq!(
            PromoCode::new(opts.clone(), 0).unwrap_err(),
            InvalidPromoCodeError::NonPositiveValue
        );
        let mut opts = options(DiscountType::Fixed, 5);
        opts.code = "  ".into();
        assert_eq!(
            PromoCode::new(opts, 0).unwrap_err(),
            InvalidPromoCodeError::EmptyCode
        );
        let mut opts = options(DiscountType::Fixed, 5);
        opts.start_date = Some(10);
        opts.expiry_date = Some(5);
        assert_eq!(
            PromoCode::new(opts, 0).unwrap_err(),
            InvalidPromoCodeError::ExpiryBeforeStart
        );
        let mut opts = options(DiscountType::Fixed, 5);
        opts.per_user_limit = Some(0);
        assert_eq!(
            PromoCode::new(opts, 0).unwrap_err(),
            InvalidPromoCodeError::InvalidPerUserLimit
        );
    }

    #[test]
    fn percentage_discount_is_capped() {
        let mut opts = options(DiscountType::Percentage, 50);
        opts.max_discount = Some(Decimal::from(20));
        let promo = PromoCode::new(opts, 0).expect("To create");

        let quote = promo.quote(Decimal::from(100)).expect("To quote");
        assert_eq!(quote.discount, Decimal::from(20));
        assert_eq!(quote.final_amount, Decimal::from(80));

        let quote = promo.quote(Decimal::from(30)).expect("To quote");
        assert_eq!(quote.discount, Decimal::from(15));
        assert_eq!(quote.final_amount, Decimal::from(15));
    }

    #[test]
    fn fixed_discount_never_exceeds_amount() {
        let promo = PromoCode::new(options(DiscountType::Fixed, 30), 0).expect("To create");
        let quote = promo.quote(Decimal::from(10)).expect("To quote");
        assert_eq!(quote.discount, Decimal::from(10));
        assert_eq!(quote.final_amount, Decimal::ZERO);
    }

    #[test]
    fn rounds_to_cents() {
        let promo = PromoCode::new(options(DiscountType::Percentage, 15), 0).expect("To create");
        let quote = promo.quote(Decimal::new(3333, 2)).expect("To quote");
        assert_eq!(quote.discount, Decimal::new(500, 2));
        assert_eq!(quote.final_amount, Decimal::new(2833, 2));
    }

    #[test]
    fn quotes_the_largest_amounts() {
        let promo = PromoCode::new(options(DiscountType::Percentage, 50), 0).expect("To create");
        let quote = promo.quote(Decimal::MAX).expect("To quote");
        assert!(quote.discount > Decimal::ZERO);
        assert!(quote.final_amount < Decimal::MAX);

        let promo = PromoCode::new(options(DiscountType::Fixed, 5), 0).expect("To create");
        let quote = promo.quote(Decimal::MAX).expect("To quote");
        assert_eq!(quote.discount, Decimal::from(5));
    }

    #[test]
    fn checks_run_in_order() {
        let event_id = ID::new();
        let mut opts = options(DiscountType::Fixed, 5);
        opts.start_date = Some(100);
        opts.expiry_date = Some(200);
        opts.min_purchase = Some(Decimal::from(50));
        opts.usage_limit = Some(2);
        let mut promo = PromoCode::new(opts, 0).expect("To create");
        let amount = Decimal::from(60);

        assert_eq!(promo.check(&event_id, amount, 0, 150), Ok(()));
        assert_eq!(
            promo.check(&event_id, amount, 0, 99),
            Err(PromoRejection::NotStarted)
        );
        assert_eq!(
            promo.check(&event_id, amount, 0, 201),
            Err(PromoRejection::Expired)
        );
        assert_eq!(promo.check(&event_id, amount, 0, 200), Ok(()));
        assert_eq!(
            promo.check(&event_id, Decimal::from(49), 0, 150),
            Err(PromoRejection::BelowMinimum)
        );
        assert_eq!(
            promo.check(&event_id, amount, 1, 150),
            Err(PromoRejection::PerUserExhausted)
        );

        promo.usage_count = 2;
        assert_eq!(
            promo.check(&event_id, amount, 1, 150),
            Err(PromoRejection::UsageExhausted)
        );

        promo.event_ids = vec![ID::new()];
        assert_eq!(
            promo.check(&event_id, Decimal::ZERO, 0, 150),
            Err(PromoRejection::NotApplicable)
        );

        promo.is_active = false;
        assert_eq!(
            promo.check(&event_id, amount, 0, 0),
            Err(PromoRejection::Inactive)
        );
    }

    #[test]
    fn rejection_reasons() {
        assert_eq!(PromoRejection::NotFound.reason(), "not_found");
        assert_eq!(PromoRejection::PerUserExhausted.reason(), "per_user_exhausted");
        assert_eq!(PromoRejection::BelowMinimum.reason(), "below_minimum");
    }

    #[test]
    fn counts_redemptions_per_redeemer() {
        let promo_id = ID::new();
        let user_id = ID::new();
        let bookings = vec![
            booking_with(Some(promo_id.clone()), Some(user_id.clone()), "a@example.com"),
            booking_with(Some(promo_id.clone()), None, "B@Example.com"),
            booking_with(Some(ID::new()), None, "b@example.com"),
            booking_with(None, None, "b@example.com"),
        ];

        let by_user = Redeemer::identify(Some(&user_id), Some("b@example.com"))
            .expect("To identify redeemer");
        assert_eq!(by_user, Redeemer::User(user_id.clone()));
        assert_eq!(by_user.redemptions(&promo_id, &bookings), 1);

        let by_email = Redeemer::identify(None, Some("b@example.com")).expect("To identify");
        assert_eq!(by_email.redemptions(&promo_id, &bookings), 1);

        assert!(Redeemer::identify(None, None).is_none());
        assert!(Redeemer::identify(None, Some(" ")).is_none());
    }
}
