//! # Domain Enums
//!
//! Enumeration types for FX RFQ domain concepts:
//!
//! - [`Side`] - Buy or Sell direction
//! - [`InstrumentType`] - Requested instrument category
//! - [`OptionType`] - Call or Put
//! - [`Tenor`] - Settlement horizon for forwards and options
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side indicating buy or sell direction.
///
/// The side determines which dealer price is "best": for a buy the lowest
/// quoted price wins, for a sell the highest.
///
/// # Examples
///
/// ```
/// use fx_rfq::domain::value_objects::enums::Side;
///
/// assert_eq!(Side::Buy.opposite(), Side::Sell);
/// assert_eq!(Side::Buy.to_string(), "BUY");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Side {
    /// Buy order - acquiring the base currency.
    Buy = 0,
    /// Sell order - disposing of the base currency.
    Sell = 1,
}

impl Side {
    /// Returns the opposite side.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Returns true if this is a buy order.
    #[inline]
    #[must_use]
    pub const fn is_buy(self) -> bool {
        matches!(self, Self::Buy)
    }

    /// Returns true if this is a sell order.
    #[inline]
    #[must_use]
    pub const fn is_sell(self) -> bool {
        matches!(self, Self::Sell)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            _ => Err(ParseEnumError::InvalidValue("Side", s.to_string())),
        }
    }
}

/// Category of instrument being requested.
///
/// Determines which instrument-specific fields are required on an RFQ
/// request: tenor for forwards and options, strike and option type for
/// options, barrier level for barrier options.
///
/// # Examples
///
/// ```
/// use fx_rfq::domain::value_objects::enums::InstrumentType;
///
/// assert!(InstrumentType::VanillaOption.is_option());
/// assert!(InstrumentType::Forward.requires_tenor());
/// assert!(!InstrumentType::Spot.requires_tenor());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum InstrumentType {
    /// Spot FX trade, settling immediately.
    Spot = 0,
    /// Forward FX trade with a deferred settlement date.
    Forward = 1,
    /// Plain call or put option.
    VanillaOption = 2,
    /// Option with a knock-in/knock-out barrier level.
    BarrierOption = 3,
}

impl InstrumentType {
    /// Returns true if this is an option instrument (vanilla or barrier).
    #[inline]
    #[must_use]
    pub const fn is_option(self) -> bool {
        matches!(self, Self::VanillaOption | Self::BarrierOption)
    }

    /// Returns true if this instrument requires a tenor.
    ///
    /// Tenor is required for forwards and options, forbidden for spot.
    #[inline]
    #[must_use]
    pub const fn requires_tenor(self) -> bool {
        !matches!(self, Self::Spot)
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spot => write!(f, "SPOT"),
            Self::Forward => write!(f, "FORWARD"),
            Self::VanillaOption => write!(f, "VANILLA_OPTION"),
            Self::BarrierOption => write!(f, "BARRIER_OPTION"),
        }
    }
}

impl FromStr for InstrumentType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "SPOT" => Ok(Self::Spot),
            "FORWARD" => Ok(Self::Forward),
            "VANILLA_OPTION" | "VANILLAOPTION" => Ok(Self::VanillaOption),
            "BARRIER_OPTION" | "BARRIEROPTION" => Ok(Self::BarrierOption),
            _ => Err(ParseEnumError::InvalidValue("InstrumentType", s.to_string())),
        }
    }
}

/// Option exercise direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum OptionType {
    /// Right to buy the underlying at the strike.
    Call = 0,
    /// Right to sell the underlying at the strike.
    Put = 1,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

impl FromStr for OptionType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CALL" => Ok(Self::Call),
            "PUT" => Ok(Self::Put),
            _ => Err(ParseEnumError::InvalidValue("OptionType", s.to_string())),
        }
    }
}

/// Contract tenor for forwards and options.
///
/// Only the standard broken-date-free tenors are accepted on an RFQ.
///
/// # Examples
///
/// ```
/// use fx_rfq::domain::value_objects::enums::Tenor;
///
/// let tenor: Tenor = "1M".parse().unwrap();
/// assert_eq!(tenor, Tenor::OneMonth);
/// assert_eq!(tenor.to_string(), "1M");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tenor {
    /// One week.
    #[serde(rename = "1W")]
    OneWeek = 0,
    /// Two weeks.
    #[serde(rename = "2W")]
    TwoWeeks = 1,
    /// One month.
    #[serde(rename = "1M")]
    OneMonth = 2,
    /// Three months.
    #[serde(rename = "3M")]
    ThreeMonths = 3,
    /// Six months.
    #[serde(rename = "6M")]
    SixMonths = 4,
    /// One year.
    #[serde(rename = "1Y")]
    OneYear = 5,
}

impl Tenor {
    /// All accepted tenors, shortest first.
    pub const ALL: [Self; 6] = [
        Self::OneWeek,
        Self::TwoWeeks,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
    ];

    /// Returns the approximate tenor length in calendar days.
    #[must_use]
    pub const fn approx_days(self) -> u32 {
        match self {
            Self::OneWeek => 7,
            Self::TwoWeeks => 14,
            Self::OneMonth => 30,
            Self::ThreeMonths => 91,
            Self::SixMonths => 182,
            Self::OneYear => 365,
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneWeek => write!(f, "1W"),
            Self::TwoWeeks => write!(f, "2W"),
            Self::OneMonth => write!(f, "1M"),
            Self::ThreeMonths => write!(f, "3M"),
            Self::SixMonths => write!(f, "6M"),
            Self::OneYear => write!(f, "1Y"),
        }
    }
}

impl FromStr for Tenor {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "1W" => Ok(Self::OneWeek),
            "2W" => Ok(Self::TwoWeeks),
            "1M" => Ok(Self::OneMonth),
            "3M" => Ok(Self::ThreeMonths),
            "6M" => Ok(Self::SixMonths),
            "1Y" => Ok(Self::OneYear),
            _ => Err(ParseEnumError::InvalidValue("Tenor", s.to_string())),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}
