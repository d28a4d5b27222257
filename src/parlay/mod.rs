//! Parlay module
//!
//! Leg admission (range-width validation), ticket types, probability
//! aggregation into odds/payout, and the ticket book arena.

mod aggregate;
mod book;
mod types;
mod validate;

pub use aggregate::{combine_probabilities, decimal_odds, quote, CORRELATION_DISCOUNT, HOUSE_EDGE};
pub use book::{PlacedTicket, TicketBook};
pub use types::{Leg, LegQuote, ParlayQuote, ParlayTicket, PriceSnapshot, RangeError};
pub use validate::RangeValidator;
