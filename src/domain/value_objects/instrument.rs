//! # Instrument Value Object
//!
//! Normalized instrument description after validation.
//!
//! An [`Instrument`] carries exactly the fields its type requires: a spot
//! trade has none, a forward has a tenor, an option adds a strike and call/put
//! direction, and a barrier option adds the barrier level. The shape makes
//! "strike present on a spot RFQ" unrepresentable once validation has run.
//!
//! # Examples
//!
//! ```
//! use fx_rfq::domain::value_objects::enums::{OptionType, Tenor};
//! use fx_rfq::domain::value_objects::instrument::{Instrument, Strike};
//! use fx_rfq::domain::value_objects::price::Price;
//!
//! let option = Instrument::VanillaOption {
//!     tenor: Tenor::OneMonth,
//!     option_type: OptionType::Call,
//!     strike: Strike::Fixed(Price::new(1.1000).unwrap()),
//! };
//! assert!(option.instrument_type().is_option());
//! ```

use crate::domain::value_objects::enums::{InstrumentType, OptionType, Tenor};
use crate::domain::value_objects::price::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strike specification for an option instrument.
///
/// A strike is either a fixed positive price or `AtTheMoney` (requested as
/// `"auto"`), in which case the prevailing market level is resolved by an
/// external collaborator, never by this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strike {
    /// Fixed strike price.
    Fixed(Price),
    /// At-the-money; resolved externally.
    AtTheMoney,
}

impl Strike {
    /// Returns the fixed strike price, if any.
    #[inline]
    #[must_use]
    pub const fn fixed(&self) -> Option<Price> {
        match self {
            Self::Fixed(price) => Some(*price),
            Self::AtTheMoney => None,
        }
    }

    /// Returns true if the strike is to be resolved at-the-money.
    #[inline]
    #[must_use]
    pub const fn is_atm(&self) -> bool {
        matches!(self, Self::AtTheMoney)
    }
}

impl fmt::Display for Strike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(price) => write!(f, "{price}"),
            Self::AtTheMoney => write!(f, "ATM"),
        }
    }
}

/// A validated, normalized instrument.
///
/// Constructed by the request validator in `domain::validation`;
/// fields required by each instrument type are guaranteed present and
/// forbidden fields are guaranteed absent by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "instrument_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Instrument {
    /// Spot FX trade.
    Spot,
    /// Forward FX trade.
    Forward {
        /// Settlement horizon.
        tenor: Tenor,
    },
    /// Plain call or put option.
    VanillaOption {
        /// Contract tenor.
        tenor: Tenor,
        /// Call or put.
        option_type: OptionType,
        /// Fixed or at-the-money strike.
        strike: Strike,
    },
    /// Barrier option.
    BarrierOption {
        /// Contract tenor.
        tenor: Tenor,
        /// Call or put.
        option_type: OptionType,
        /// Fixed or at-the-money strike.
        strike: Strike,
        /// Barrier trigger level; positive, distinct from a fixed strike.
        barrier: Price,
    },
}

impl Instrument {
    /// Returns the instrument type tag.
    #[must_use]
    pub const fn instrument_type(&self) -> InstrumentType {
        match self {
            Self::Spot => InstrumentType::Spot,
            Self::Forward { .. } => InstrumentType::Forward,
            Self::VanillaOption { .. } => InstrumentType::VanillaOption,
            Self::BarrierOption { .. } => InstrumentType::BarrierOption,
        }
    }

    /// Returns the tenor, if the instrument has one.
    #[must_use]
    pub const fn tenor(&self) -> Option<Tenor> {
        match self {
            Self::Spot => None,
            Self::Forward { tenor }
            | Self::VanillaOption { tenor, .. }
            | Self::BarrierOption { tenor, .. } => Some(*tenor),
        }
    }

    /// Returns the strike, if the instrument is an option.
    #[must_use]
    pub const fn strike(&self) -> Option<Strike> {
        match self {
            Self::VanillaOption { strike, .. } | Self::BarrierOption { strike, .. } => {
                Some(*strike)
            }
            Self::Spot | Self::Forward { .. } => None,
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spot => write!(f, "SPOT"),
            Self::Forward { tenor } => write!(f, "FORWARD {tenor}"),
            Self::VanillaOption {
                tenor,
                option_type,
                strike,
            } => write!(f, "VANILLA_OPTION {tenor} {option_type} K={strike}"),
            Self::BarrierOption {
                tenor,
                option_type,
                strike,
                barrier,
            } => write!(
                f,
                "BARRIER_OPTION {tenor} {option_type} K={strike} B={barrier}"
            ),
        }
    }
}
