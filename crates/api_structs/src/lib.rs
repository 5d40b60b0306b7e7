mod booking;
mod credit;
mod error;
mod event;
mod promo_code;
mod status;
mod waitlist;

pub mod dtos {
    pub use crate::booking::dtos::*;
    pub use crate::credit::dtos::*;
    pub use crate::event::dtos::*;
    pub use crate::promo_code::dtos::*;
    pub use crate::waitlist::dtos::*;
}

pub use crate::booking::api::*;
pub use crate::credit::api::*;
pub use crate::error::ErrorResponse;
pub use crate::event::api::*;
pub use crate::promo_code::api::*;
pub use crate::status::api::*;
pub use crate::waitlist::api::*;
