use super::subscribers::NotifyCustomerOnBookingCreated;
use crate::error::StudioError;
use crate::promo_code::evaluate::{evaluate_promo_code, EvaluationError};
use crate::shared::{
    auth::get_identity,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use studio_booking_api_structs::create_booking::*;
use studio_booking_domain::{Booking, BookingOptions, PromoRejection, Redeemer, ID};
use studio_booking_infra::StudioContext;
use tracing::error;

pub async fn create_booking_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<StudioContext>,
) -> Result<HttpResponse, StudioError> {
    let identity = get_identity(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateBookingUseCase {
        event_id: body.event_id,
        ticket_tier_id: body.ticket_tier_id,
        user_id: identity.as_ref().and_then(|i| i.user_id().cloned()),
        spots: body.spots,
        name: body.name,
        email: body.email,
        phone: body.phone,
        promo_code: body.promo_code.filter(|code| !code.trim().is_empty()),
        use_credits: body.use_credits,
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Created().json(APIResponse::new(booking)))
        .map_err(StudioError::from)
}

#[derive(Debug)]
pub struct CreateBookingUseCase {
    pub event_id: ID,
    pub ticket_tier_id: Option<ID>,
    /// The customer behind the request, if a token was given
    pub user_id: Option<ID>,
    pub spots: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub promo_code: Option<String>,
    pub use_credits: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidSpots(i64),
    EmptyName,
    InvalidEmail,
    PromoCodeWithCredits,
    EventNotFound(ID),
    TierRequired,
    TierNotFound(ID),
    TierNotAllowed,
    CapacityExceeded { requested: i64, available: i64 },
    InvalidPromo(PromoRejection),
    InvalidAmount,
    CreditsRequireUser,
    InsufficientCredits { needed: i64, balance: i64 },
    StorageError,
}

impl From<UseCaseError> for StudioError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidSpots(spots) => Self::BadClientData(format!(
                "At least one spot has to be booked, got: {}",
                spots
            )),
            UseCaseError::EmptyName => Self::BadClientData("Name can not be empty".into()),
            UseCaseError::InvalidEmail => {
                Self::BadClientData("A valid email has to be provided".into())
            }
            UseCaseError::PromoCodeWithCredits => Self::BadClientData(
                "Promo codes can not be combined with credits".into(),
            ),
            UseCaseError::EventNotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::TierRequired => {
                Self::BadClientData("A ticket tier has to be chosen for this event".into())
            }
            UseCaseError::TierNotFound(tier_id) => Self::NotFound(format!(
                "The ticket tier with id: {}, was not found.",
                tier_id
            )),
            UseCaseError::TierNotAllowed => {
                Self::BadClientData("This event does not have ticket tiers".into())
            }
            UseCaseError::CapacityExceeded {
                requested,
                available,
            } => Self::CapacityExceeded {
                requested,
                available,
            },
            UseCaseError::InvalidPromo(rejection) => Self::InvalidPromo(rejection),
            UseCaseError::InvalidAmount => {
                Self::BadClientData("The booking amount is too large".into())
            }
            UseCaseError::CreditsRequireUser => {
                Self::Unauthorized("Booking with credits requires a signed in user".into())
            }
            UseCaseError::InsufficientCredits { needed, balance } => {
                Self::InsufficientCredits { needed, balance }
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<EvaluationError> for UseCaseError {
    fn from(e: EvaluationError) -> Self {
        match e {
            EvaluationError::Rejected(rejection) => Self::InvalidPromo(rejection),
            EvaluationError::InvalidAmount(_) => Self::InvalidAmount,
            EvaluationError::StorageError => Self::StorageError,
        }
    }
}

impl CreateBookingUseCase {
    fn validate_input(&self) -> Result<(), UseCaseError> {
        if self.spots < 1 {
            return Err(UseCaseError::InvalidSpots(self.spots));
        }
        if self.name.trim().is_empty() {
            return Err(UseCaseError::EmptyName);
        }
        if !self.email.contains('@') {
            return Err(UseCaseError::InvalidEmail);
        }
        if self.promo_code.is_some() && self.use_credits {
            return Err(UseCaseError::PromoCodeWithCredits);
        }
        Ok(())
    }

    async fn consume_credits(&self, ctx: &StudioContext) -> Result<ID, UseCaseError> {
        let user_id = self
            .user_id
            .clone()
            .ok_or(UseCaseError::CreditsRequireUser)?;

        let consumed = ctx
            .repos
            .credits
            .consume(&user_id, self.spots)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !consumed {
            let account = ctx
                .repos
                .credits
                .find(&user_id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            return Err(UseCaseError::InsufficientCredits {
                needed: self.spots,
                balance: account.balance,
            });
        }

        Ok(user_id)
    }

    /// Undoes the promo redemption and the credit consumption of a booking
    /// that was never stored
    async fn give_back(
        &self,
        promo_code_id: Option<&ID>,
        credit_user: Option<&ID>,
        ctx: &StudioContext,
    ) {
        if let Some(promo_code_id) = promo_code_id {
            match ctx.repos.promo_codes.release(promo_code_id).await {
                Ok(true) => (),
                Ok(false) => error!(
                    "Promo code {} had no redemption to release",
                    promo_code_id
                ),
                Err(e) => error!(
                    "Unable to release redemption of promo code {}: {:?}",
                    promo_code_id, e
                ),
            }
        }
        if let Some(user_id) = credit_user {
            if let Err(e) = ctx.repos.credits.grant(user_id, self.spots).await {
                error!(
                    "Unable to give back {} credits to user {}: {:?}",
                    self.spots, user_id, e
                );
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateBookingUseCase {
    type Response = Booking;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateBooking";

    async fn execute(&mut self, ctx: &StudioContext) -> Result<Self::Response, Self::Error> {
        self.validate_input()?;

        let event = match ctx.repos.events.find(&self.event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => return Err(UseCaseError::EventNotFound(self.event_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        match (&self.ticket_tier_id, event.is_tiered()) {
            (None, true) => return Err(UseCaseError::TierRequired),
            (Some(_), false) => return Err(UseCaseError::TierNotAllowed),
            (Some(tier_id), true) if event.find_tier(tier_id).is_none() => {
                return Err(UseCaseError::TierNotFound(tier_id.clone()))
            }
            _ => (),
        }
        let tier_id = self.ticket_tier_id.as_ref();

        // Nothing is held here, spots are taken when the payment completes
        let available = event.remaining_spots(tier_id).unwrap_or(0);
        if self.spots > available {
            return Err(UseCaseError::CapacityExceeded {
                requested: self.spots,
                available,
            });
        }

        let unit_price = event.unit_price(tier_id).ok_or(UseCaseError::TierRequired)?;
        let amount = unit_price
            .checked_mul(Decimal::from(self.spots))
            .ok_or(UseCaseError::InvalidAmount)?;

        let mut options = BookingOptions {
            event_id: event.id.clone(),
            ticket_tier_id: self.ticket_tier_id.clone(),
            user_id: self.user_id.clone(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.clone(),
            spots: self.spots,
            unit_price,
            discount: Decimal::ZERO,
            promo_code_id: None,
            used_credits: None,
        };

        let _promo_guard = match &self.promo_code {
            Some(code) => {
                // Resolve the code first so that the redemption can be serialized on its id
                let (promo_code, _) =
                    evaluate_promo_code(code, &event.id, amount, None, ctx).await?;
                let guard = ctx.locks.lock_promo_code(&promo_code.id).await;

                let redeemer =
                    Redeemer::identify(self.user_id.as_ref(), Some(options.email.as_str()));
                let (promo_code, quote) =
                    evaluate_promo_code(code, &event.id, amount, redeemer.as_ref(), ctx).await?;
                let redeemed = ctx
                    .repos
                    .promo_codes
                    .redeem(&promo_code.id)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                if !redeemed {
                    return Err(UseCaseError::InvalidPromo(PromoRejection::UsageExhausted));
                }

                options.discount = quote.discount;
                options.promo_code_id = Some(promo_code.id);
                Some(guard)
            }
            None => None,
        };

        let credit_user = if self.use_credits {
            let user_id = self.consume_credits(ctx).await?;
            options.used_credits = Some(self.spots);
            Some(user_id)
        } else {
            None
        };

        let promo_code_id = options.promo_code_id.clone();
        let booking = match Booking::new(options, ctx.sys.get_timestamp_millis()) {
            Ok(booking) => booking,
            Err(_) => {
                self.give_back(promo_code_id.as_ref(), credit_user.as_ref(), ctx)
                    .await;
                return Err(UseCaseError::InvalidAmount);
            }
        };
        if ctx.repos.bookings.insert(&booking).await.is_err() {
            self.give_back(promo_code_id.as_ref(), credit_user.as_ref(), ctx)
                .await;
            return Err(UseCaseError::StorageError);
        }

        Ok(booking)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyCustomerOnBookingCreated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{
        insert_event, insert_promo_code, insert_tiered_event, promo_options, setup,
        setup_with_notifier, NOW,
    };
    use std::sync::Arc;
    use studio_booking_domain::{BookingStatus, DiscountType, Event, EventOptions, PaymentStatus};
    use studio_booking_infra::{IBookingRepo, NotificationKind};

    /// Nobody has redeemed anything yet and nothing can be stored
    struct UnavailableBookingRepo;

    #[async_trait::async_trait]
    impl IBookingRepo for UnavailableBookingRepo {
        async fn insert(&self, _booking: &Booking) -> anyhow::Result<()> {
            anyhow::bail!("Connection refused")
        }
        async fn save(&self, _booking: &Booking) -> anyhow::Result<()> {
            anyhow::bail!("Connection refused")
        }
        async fn find(&self, _booking_id: &ID) -> anyhow::Result<Option<Booking>> {
            Ok(None)
        }
        async fn find_by_confirmation_number(
            &self,
            _confirmation_number: &str,
        ) -> anyhow::Result<Option<Booking>> {
            Ok(None)
        }
        async fn find_by_event(&self, _event_id: &ID) -> anyhow::Result<Vec<Booking>> {
            Ok(Vec::new())
        }
        async fn count_redemptions(
            &self,
            _promo_code_id: &ID,
            _redeemer: &Redeemer,
        ) -> anyhow::Result<i64> {
            Ok(0)
        }
        async fn transition_payment_status(
            &self,
            _booking_id: &ID,
            _from: PaymentStatus,
            _to: PaymentStatus,
            _now: i64,
        ) -> anyhow::Result<bool> {
            anyhow::bail!("Connection refused")
        }
        async fn delete(&self, _booking_id: &ID) -> anyhow::Result<Option<Booking>> {
            anyhow::bail!("Connection refused")
        }
        async fn delete_by_event(&self, _event_id: &ID) -> anyhow::Result<()> {
            anyhow::bail!("Connection refused")
        }
    }

    fn usecase(event_id: &ID, spots: i64) -> CreateBookingUseCase {
        CreateBookingUseCase {
            event_id: event_id.clone(),
            ticket_tier_id: None,
            user_id: None,
            spots,
            name: "Grace".into(),
            email: "grace@example.com".into(),
            phone: None,
            promo_code: None,
            use_credits: false,
        }
    }

    #[actix_web::test]
    async fn creates_pending_booking_without_holding_spots() {
        let (ctx, notifier) = setup_with_notifier();
        let event = insert_event(&ctx, 10).await;

        let booking = execute(usecase(&event.id, 3), &ctx)
            .await
            .expect("To create booking");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
        assert_eq!(booking.total_amount, Decimal::from(60));
        assert!(booking.confirmation_number.starts_with("SB-"));

        let event = ctx
            .repos
            .events
            .find(&event.id)
            .await
            .expect("To query")
            .expect("To find event");
        assert_eq!(event.available_spots, 10);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::BookingReceived);
        assert_eq!(sent[0].recipient, "grace@example.com");
    }

    #[actix_web::test]
    async fn rejects_more_spots_than_available() {
        let ctx = setup();
        let event = insert_event(&ctx, 2).await;
        let res = execute(usecase(&event.id, 3), &ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::CapacityExceeded {
                requested: 3,
                available: 2
            }
        );
    }

    #[actix_web::test]
    async fn rejects_invalid_input() {
        let ctx = setup();
        let event = insert_event(&ctx, 2).await;

        let res = execute(usecase(&event.id, 0), &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::InvalidSpots(0));

        let mut no_name = usecase(&event.id, 1);
        no_name.name = " ".into();
        assert_eq!(execute(no_name, &ctx).await.unwrap_err(), UseCaseError::EmptyName);

        let mut both = usecase(&event.id, 1);
        both.promo_code = Some("SPRING".into());
        both.use_credits = true;
        assert_eq!(
            execute(both, &ctx).await.unwrap_err(),
            UseCaseError::PromoCodeWithCredits
        );

        let missing = ID::default();
        assert_eq!(
            execute(usecase(&missing, 1), &ctx).await.unwrap_err(),
            UseCaseError::EventNotFound(missing)
        );
    }

    #[actix_web::test]
    async fn tiered_events_need_a_known_tier() {
        let ctx = setup();
        let event = insert_tiered_event(&ctx).await;

        let res = execute(usecase(&event.id, 1), &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::TierRequired);

        let unknown = ID::default();
        let mut with_unknown = usecase(&event.id, 1);
        with_unknown.ticket_tier_id = Some(unknown.clone());
        assert_eq!(
            execute(with_unknown, &ctx).await.unwrap_err(),
            UseCaseError::TierNotFound(unknown)
        );

        let private_room = event.ticket_tiers[1].clone();
        let mut too_many = usecase(&event.id, 3);
        too_many.ticket_tier_id = Some(private_room.id.clone());
        assert_eq!(
            execute(too_many, &ctx).await.unwrap_err(),
            UseCaseError::CapacityExceeded {
                requested: 3,
                available: 2
            }
        );

        let mut booking = usecase(&event.id, 2);
        booking.ticket_tier_id = Some(private_room.id.clone());
        let booking = execute(booking, &ctx).await.expect("To create booking");
        assert_eq!(booking.unit_price, private_room.price);
        assert_eq!(booking.total_amount, Decimal::from(500));
    }

    #[actix_web::test]
    async fn untiered_events_reject_tiers() {
        let ctx = setup();
        let event = insert_event(&ctx, 2).await;
        let mut booking = usecase(&event.id, 1);
        booking.ticket_tier_id = Some(ID::default());
        assert_eq!(
            execute(booking, &ctx).await.unwrap_err(),
            UseCaseError::TierNotAllowed
        );
    }

    #[actix_web::test]
    async fn applies_promo_code_and_counts_redemption() {
        let ctx = setup();
        let event = insert_event(&ctx, 10).await;
        let promo_code =
            insert_promo_code(&ctx, promo_options("spring", DiscountType::Percentage, 25)).await;

        let mut booking = usecase(&event.id, 2);
        booking.promo_code = Some("Spring".into());
        let booking = execute(booking, &ctx).await.expect("To create booking");
        assert_eq!(booking.discount, Decimal::from(10));
        assert_eq!(booking.total_amount, Decimal::from(30));
        assert_eq!(booking.promo_code_id, Some(promo_code.id.clone()));

        let promo_code = ctx
            .repos
            .promo_codes
            .find(&promo_code.id)
            .await
            .expect("To query")
            .expect("To find promo code");
        assert_eq!(promo_code.usage_count, 1);

        // Same customer, default per user limit of one
        let mut again = usecase(&event.id, 1);
        again.promo_code = Some("SPRING".into());
        again.email = "GRACE@example.com".into();
        assert_eq!(
            execute(again, &ctx).await.unwrap_err(),
            UseCaseError::InvalidPromo(PromoRejection::PerUserExhausted)
        );
    }

    #[actix_web::test]
    async fn rejects_unknown_and_exhausted_promo_codes() {
        let ctx = setup();
        let event = insert_event(&ctx, 10).await;

        let mut unknown = usecase(&event.id, 1);
        unknown.promo_code = Some("NOPE".into());
        assert_eq!(
            execute(unknown, &ctx).await.unwrap_err(),
            UseCaseError::InvalidPromo(PromoRejection::NotFound)
        );

        let mut options = promo_options("ONCE", DiscountType::Fixed, 5);
        options.usage_limit = Some(1);
        insert_promo_code(&ctx, options).await;

        let mut first = usecase(&event.id, 1);
        first.promo_code = Some("ONCE".into());
        execute(first, &ctx).await.expect("To create booking");

        let mut second = usecase(&event.id, 1);
        second.promo_code = Some("ONCE".into());
        second.email = "alan@example.com".into();
        assert_eq!(
            execute(second, &ctx).await.unwrap_err(),
            UseCaseError::InvalidPromo(PromoRejection::UsageExhausted)
        );
    }

    #[actix_web::test]
    async fn pays_with_credits() {
        let ctx = setup();
        let event = insert_event(&ctx, 10).await;
        let user_id = ID::default();
        ctx.repos
            .credits
            .grant(&user_id, 3)
            .await
            .expect("To grant credits");

        let mut booking = usecase(&event.id, 2);
        booking.use_credits = true;
        booking.user_id = Some(user_id.clone());
        let booking = execute(booking, &ctx).await.expect("To create booking");
        assert_eq!(booking.total_amount, Decimal::ZERO);
        assert_eq!(booking.used_credits, Some(2));

        let mut too_expensive = usecase(&event.id, 2);
        too_expensive.use_credits = true;
        too_expensive.user_id = Some(user_id.clone());
        assert_eq!(
            execute(too_expensive, &ctx).await.unwrap_err(),
            UseCaseError::InsufficientCredits {
                needed: 2,
                balance: 1
            }
        );

        let mut anonymous = usecase(&event.id, 1);
        anonymous.use_credits = true;
        assert_eq!(
            execute(anonymous, &ctx).await.unwrap_err(),
            UseCaseError::CreditsRequireUser
        );
    }

    #[actix_web::test]
    async fn gives_back_promo_redemption_and_credits_when_storing_fails() {
        let mut ctx = setup();
        ctx.repos.bookings = Arc::new(UnavailableBookingRepo);
        let event = insert_event(&ctx, 10).await;
        let mut options = promo_options("ONCE", DiscountType::Fixed, 5);
        options.usage_limit = Some(1);
        let promo_code = insert_promo_code(&ctx, options).await;

        let mut booking = usecase(&event.id, 1);
        booking.promo_code = Some("ONCE".into());
        assert_eq!(
            execute(booking, &ctx).await.unwrap_err(),
            UseCaseError::StorageError
        );
        let promo_code = ctx
            .repos
            .promo_codes
            .find(&promo_code.id)
            .await
            .expect("To query")
            .expect("To find promo code");
        assert_eq!(promo_code.usage_count, 0);

        let user_id = ID::default();
        ctx.repos
            .credits
            .grant(&user_id, 3)
            .await
            .expect("To grant credits");
        let mut booking = usecase(&event.id, 2);
        booking.use_credits = true;
        booking.user_id = Some(user_id.clone());
        assert_eq!(
            execute(booking, &ctx).await.unwrap_err(),
            UseCaseError::StorageError
        );
        let account = ctx.repos.credits.find(&user_id).await.expect("To query");
        assert_eq!(account.balance, 3);
    }

    #[actix_web::test]
    async fn rejects_amounts_that_can_not_be_represented() {
        let ctx = setup();
        let event = Event::new(
            EventOptions {
                title: "Gala".into(),
                description: None,
                start_ts: NOW,
                capacity: Some(10),
                price: Decimal::MAX,
                ticket_tiers: Vec::new(),
            },
            NOW,
        )
        .expect("To create event");
        ctx.repos.events.insert(&event).await.expect("To insert event");

        assert_eq!(
            execute(usecase(&event.id, 2), &ctx).await.unwrap_err(),
            UseCaseError::InvalidAmount
        );
        let booking = execute(usecase(&event.id, 1), &ctx)
            .await
            .expect("To create booking");
        assert_eq!(booking.total_amount, Decimal::MAX);
    }
}
