//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`RfqId`], [`QuoteId`], [`EventId`]: UUID-based identifiers
//! - [`DealerId`]: String-based dealer identifier
//!
//! ## Numeric Types
//!
//! - [`Price`]: Positive decimal price
//! - [`Notional`]: Positive decimal notional amount
//!
//! ## Domain Enums
//!
//! - [`Side`]: Buy or Sell
//! - [`InstrumentType`], [`OptionType`], [`Tenor`]: instrument fields
//! - [`RfqState`]: RFQ lifecycle states
//!
//! ## Composite Types
//!
//! - [`CurrencyPair`]: two distinct 3-letter currency codes
//! - [`Instrument`], [`Strike`]: validated instrument description
//! - [`Timestamp`]: UTC timestamp with deadline arithmetic

pub mod currency_pair;
pub mod enums;
pub mod ids;
pub mod instrument;
pub mod notional;
pub mod price;
pub mod rfq_state;
pub mod timestamp;

pub use currency_pair::CurrencyPair;
pub use enums::{InstrumentType, OptionType, ParseEnumError, Side, Tenor};
pub use ids::{DealerId, EventId, QuoteId, RfqId};
pub use instrument::{Instrument, Strike};
pub use notional::Notional;
pub use price::Price;
pub use rfq_state::RfqState;
pub use timestamp::Timestamp;
