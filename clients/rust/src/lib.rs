mod base;
mod booking;
mod credit;
mod event;
mod promo_code;
mod status;
mod waitlist;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use booking::BookingClient;
pub use booking::{CreateBookingInput, EditBookingInput, UpdateBookingStatusInput};
use credit::CreditClient;
use event::EventClient;
pub use event::{CreateEventInput, UpdateEventInput};
use promo_code::PromoCodeClient;
pub use promo_code::{CreatePromoCodeInput, UpdatePromoCodeInput, ValidatePromoCodeInput};
pub use reqwest::StatusCode;
use status::StatusClient;
use std::sync::Arc;
pub use studio_booking_api_structs::dtos::*;
pub use studio_booking_api_structs::ErrorResponse;
pub use studio_booking_domain::{
    BookingStatus, DiscountType, PaymentStatus, Role, TicketTierOptions, ID,
};
use waitlist::WaitlistClient;
pub use waitlist::JoinWaitlistInput;

// Domain
pub use studio_booking_api_structs::dtos::BookingDTO as Booking;
pub use studio_booking_api_structs::dtos::CreditAccountDTO as CreditAccount;
pub use studio_booking_api_structs::dtos::EventDTO as Event;
pub use studio_booking_api_structs::dtos::PromoCodeDTO as PromoCode;
pub use studio_booking_api_structs::dtos::TicketTierDTO as TicketTier;
pub use studio_booking_api_structs::dtos::WaitlistEntryDTO as WaitlistEntry;

pub use studio_booking_api_structs::recalculate_event_spots::APIResponse as SpotRecalculation;
pub use studio_booking_api_structs::update_booking_status::APIResponse as UpdateBookingStatusResponse;
pub use studio_booking_api_structs::validate_promo_code::APIResponse as PromoValidation;

/// Studio Booking Server SDK
///
/// The SDK contains methods for interacting with the studio booking server
/// API. Use an admin api key, a customer token or no credentials at all.
#[derive(Clone)]
pub struct StudioSDK {
    pub booking: BookingClient,
    pub credit: CreditClient,
    pub event: EventClient,
    pub promo_code: PromoCodeClient,
    pub status: StatusClient,
    pub waitlist: WaitlistClient,
}

impl StudioSDK {
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        Self::from_base(base)
    }

    /// Acts on behalf of the customer the token was issued to
    pub fn with_token<T: Into<String>>(address: String, token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_token(token.into());
        Self::from_base(base)
    }

    pub fn anonymous(address: String) -> Self {
        Self::from_base(BaseClient::new(address))
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let booking = BookingClient::new(base.clone());
        let credit = CreditClient::new(base.clone());
        let event = EventClient::new(base.clone());
        let promo_code = PromoCodeClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let waitlist = WaitlistClient::new(base);

        Self {
            booking,
            credit,
            event,
            promo_code,
            status,
            waitlist,
        }
    }
}
