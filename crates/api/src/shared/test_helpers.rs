use rust_decimal::Decimal;
use std::sync::Arc;
use studio_booking_domain::{
    Booking, BookingOptions, DiscountType, Event, EventOptions, PaymentStatus, PromoCode,
    PromoCodeOptions, TicketTierOptions, ID,
};
use studio_booking_infra::{InMemoryNotifier, StaticTimeSys, StudioContext};

pub const NOW: i64 = 1_700_000_000_000;

pub fn setup() -> StudioContext {
    setup_with_notifier().0
}

pub fn setup_with_notifier() -> (StudioContext, Arc<InMemoryNotifier>) {
    let notifier = Arc::new(InMemoryNotifier::new());
    let mut ctx = StudioContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys { timestamp: NOW });
    ctx.notifier = notifier.clone();
    (ctx, notifier)
}

pub async fn insert_event(ctx: &StudioContext, capacity: i64) -> Event {
    let event = Event::new(
        EventOptions {
            title: "Vinyasa".into(),
            description: None,
            start_ts: NOW + 1000 * 60 * 60 * 24,
            capacity: Some(capacity),
            price: Decimal::from(20),
            ticket_tiers: Vec::new(),
        },
        NOW,
    )
    .expect("To create event");
    ctx.repos.events.insert(&event).await.expect("To insert event");
    event
}

pub async fn insert_tiered_event(ctx: &StudioContext) -> Event {
    let event = Event::new(
        EventOptions {
            title: "Retreat".into(),
            description: None,
            start_ts: NOW,
            capacity: None,
            price: Decimal::ZERO,
            ticket_tiers: vec![
                TicketTierOptions {
                    name: "Shared room".into(),
                    price: Decimal::from(100),
                    capacity: 4,
                    benefits: Vec::new(),
                },
                TicketTierOptions {
                    name: "Private room".into(),
                    price: Decimal::from(250),
                    capacity: 2,
                    benefits: vec!["Sea view".into()],
                },
            ],
        },
        NOW,
    )
    .expect("To create event");
    ctx.repos.events.insert(&event).await.expect("To insert event");
    event
}

/// Inserts a booking straight into the repo, bypassing inventory
pub async fn insert_booking(
    ctx: &StudioContext,
    event: &Event,
    tier_id: Option<ID>,
    spots: i64,
    payment_status: PaymentStatus,
) -> Booking {
    let mut booking = Booking::new(
        BookingOptions {
            event_id: event.id.clone(),
            ticket_tier_id: tier_id,
            user_id: None,
            name: "Edsger".into(),
            email: "edsger@example.com".into(),
            phone: None,
            spots,
            unit_price: event.price,
            discount: Decimal::ZERO,
            promo_code_id: None,
            used_credits: None,
        },
        NOW,
    )
    .expect("To create booking");
    booking.payment_status = payment_status;
    ctx.repos
        .bookings
        .insert(&booking)
        .await
        .expect("To insert booking");
    booking
}

pub fn promo_options(code: &str, discount_type: DiscountType, value: i64) -> PromoCodeOptions {
    PromoCodeOptions {
        code: code.into(),
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

pub async fn insert_promo_code(ctx: &StudioContext, options: PromoCodeOptions) -> PromoCode {
    let promo_code = PromoCode::new(options, NOW).expect("To create promo code");
    ctx.repos
        .promo_codes
        .insert(&promo_code)
        .await
        .expect("To insert promo code");
    promo_code
}
