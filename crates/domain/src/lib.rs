mod booking;
mod credit;
mod event;
mod identity;
mod inventory;
mod promo_code;
mod shared;
mod waitlist;

pub use booking::{
    Booking, BookingOptions, BookingStatus, InvalidBookingError, InvalidStatusError, PaymentStatus,
    PaymentTransition,
};
pub use credit::CreditAccount;
pub use event::{Event, EventOptions, InvalidEventError, TicketTier, TicketTierOptions};
pub use identity::{Identity, Role};
pub use inventory::{BookedSpots, InventoryInconsistencyError, Reconciliation, SpotAdjustment};
pub use promo_code::{
    DiscountType, InvalidPromoCodeError, PromoCode, PromoCodeOptions, PromoQuote, PromoRejection,
    Redeemer,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use waitlist::WaitlistEntry;
