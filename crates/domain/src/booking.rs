use crate::shared::entity::{Entity, ID};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use studio_booking_utils::create_confirmation_code;
use thiserror::Error;

const CONFIRMATION_PREFIX: &str = "SB-";
const CONFIRMATION_CODE_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidStatusError {
    #[error("Unknown booking status: {0}")]
    BookingStatus(String),
    #[error("Unknown payment status: {0}")]
    PaymentStatus(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidBookingError {
    #[error("The amount of {spots} spots at {unit_price} can not be represented")]
    AmountOverflow { spots: i64, unit_price: Decimal },
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidStatusError::BookingStatus(s.to_string())),
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    /// Only completed payments count against the capacity of an event
    pub fn holds_spots(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl FromStr for PaymentStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(InvalidStatusError::PaymentStatus(s.to_string())),
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A change of `PaymentStatus` together with the number of spots that it
/// gives back to (positive) or takes from (negative) the event inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentTransition {
    pub from: PaymentStatus,
    pub to: PaymentStatus,
    pub spot_delta: i64,
}

impl PaymentTransition {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone)]
pub struct Booking {
    pub id: ID,
    pub event_id: ID,
    pub ticket_tier_id: Option<ID>,
    pub user_id: Option<ID>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub spots: i64,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub total_amount: Decimal,
    pub promo_code_id: Option<ID>,
    pub used_credits: Option<i64>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub confirmation_number: String,
    pub created: i64,
    pub updated: i64,
}

#[derive(Debug, Clone)]
pub struct BookingOptions {
    pub event_id: ID,
    pub ticket_tier_id: Option<ID>,
    pub user_id: Option<ID>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub spots: i64,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub promo_code_id: Option<ID>,
    pub used_credits: Option<i64>,
}

impl Entity for Booking {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Booking {
    /// Creates a new `Booking` in the `(pending, pending)` state. Credit priced
    /// bookings have nothing left to pay.
    pub fn new(options: BookingOptions, now: i64) -> Result<Self, InvalidBookingError> {
        let total_amount = if options.used_credits.is_some() {
            Decimal::ZERO
        } else {
            options
                .unit_price
                .checked_mul(Decimal::from(options.spots))
                .and_then(|amount| amount.checked_sub(options.discount))
                .ok_or(InvalidBookingError::AmountOverflow {
                    spots: options.spots,
                    unit_price: options.unit_price,
                })?
                .max(Decimal::ZERO)
                .round_dp(2)
        };

        Ok(Self {
            id: Default::default(),
            event_id: options.event_id,
            ticket_tier_id: options.ticket_tier_id,
            user_id: options.user_id,
            name: options.name,
            email: options.email,
            phone: options.phone,
            spots: options.spots,
            unit_price: options.unit_price,
            discount: options.discount,
            total_amount,
            promo_code_id: options.promo_code_id,
            used_credits: options.used_credits,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            confirmation_number: Self::generate_confirmation_number(),
            created: now,
            updated: now,
        })
    }

    pub fn generate_confirmation_number() -> String {
        format!(
            "{}{}",
            CONFIRMATION_PREFIX,
            create_confirmation_code(CONFIRMATION_CODE_LEN)
        )
    }

    /// Spots this `Booking` currently holds in the event inventory
    pub fn held_spots(&self) -> i64 {
        held(self.payment_status, self.spots)
    }

    pub fn payment_transition(&self, to: PaymentStatus) -> PaymentTransition {
        PaymentTransition {
            from: self.payment_status,
            to,
            spot_delta: held(self.payment_status, self.spots) - held(to, self.spots),
        }
    }

    /// Credits that should be given back to the customer after the transition
    pub fn credits_to_restore(&self, transition: &PaymentTransition) -> Option<i64> {
        if transition.is_noop() || transition.to != PaymentStatus::Refunded {
            return None;
        }
        self.used_credits.filter(|credits| *credits > 0)
    }

    /// A booking is open while it is not cancelled and its payment is pending or completed
    pub fn is_open(&self) -> bool {
        self.status != BookingStatus::Cancelled
            && matches!(
                self.payment_status,
                PaymentStatus::Pending | PaymentStatus::Completed
            )
    }

    pub fn set_spots(&mut self, spots: i64) -> bool {
        if spots < 1 {
            return false;
        }
        self.spots = spots;
        true
    }

    pub fn set_name(&mut self, name: String) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        self.name = name;
        true
    }

    pub fn set_email(&mut self, email: String) -> bool {
        if !email.contains('@') {
            return false;
        }
        self.email = email;
        true
    }

    pub fn set_total_amount(&mut self, total_amount: Decimal) -> bool {
        if total_amount.is_sign_negative() {
            return false;
        }
        self.total_amount = total_amount.round_dp(2);
        true
    }
}

fn held(payment_status: PaymentStatus, spots: i64) -> i64 {
    if payment_status.holds_spots() {
        spots
    } else {
        0
    }
}
