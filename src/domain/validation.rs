//! # Request Validation
//!
//! Validates and normalizes an inbound RFQ request.
//!
//! [`validate`] is pure and side-effect free. Checks run in a fixed order —
//! pair, notional, then instrument-specific fields (tenor, option type,
//! strike, barrier) — and fail on the first violation, so the reported field
//! is reproducible for a given request. The accept/reject verdict does not
//! depend on the ordering, only the reported field does.
//!
//! # Examples
//!
//! ```
//! use fx_rfq::domain::validation::{validate, RfqRequest};
//! use fx_rfq::domain::value_objects::{InstrumentType, Side};
//!
//! let request = RfqRequest::new("EURUSD", Side::Buy, 1_000_000.0, InstrumentType::Spot);
//! let validated = validate(&request).unwrap();
//! assert_eq!(validated.pair.to_string(), "EURUSD");
//! ```

use crate::domain::errors::ValidationError;
use crate::domain::value_objects::{
    CurrencyPair, Instrument, InstrumentType, Notional, OptionType, Price, Side, Strike, Tenor,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An unvalidated RFQ request as received from the caller.
///
/// Field names mirror the inbound wire shape: `pair` is a free-form string,
/// `strike` is a decimal string or the literal `"auto"` (at-the-money),
/// and instrument-specific fields are optional until validation decides
/// whether they are required or forbidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfqRequest {
    /// Currency pair, e.g. `"EURUSD"`.
    pub pair: String,
    /// Buy or sell.
    pub side: Side,
    /// Notional amount in base currency units.
    pub notional: f64,
    /// Requested instrument category.
    pub instrument_type: InstrumentType,
    /// Tenor code, required for forwards and options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenor: Option<String>,
    /// Call or put, required for options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_type: Option<OptionType>,
    /// Strike: positive decimal string or `"auto"`, required for options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike: Option<String>,
    /// Barrier level, required for barrier options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barrier: Option<f64>,
}

impl RfqRequest {
    /// Creates a request with no instrument-specific fields set.
    #[must_use]
    pub fn new(
        pair: impl Into<String>,
        side: Side,
        notional: f64,
        instrument_type: InstrumentType,
    ) -> Self {
        Self {
            pair: pair.into(),
            side,
            notional,
            instrument_type,
            tenor: None,
            option_type: None,
            strike: None,
            barrier: None,
        }
    }

    /// Sets the tenor code.
    #[must_use]
    pub fn with_tenor(mut self, tenor: impl Into<String>) -> Self {
        self.tenor = Some(tenor.into());
        self
    }

    /// Sets the option type.
    #[must_use]
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = Some(option_type);
        self
    }

    /// Sets the strike (`"auto"` or a decimal string).
    #[must_use]
    pub fn with_strike(mut self, strike: impl Into<String>) -> Self {
        self.strike = Some(strike.into());
        self
    }

    /// Sets the barrier level.
    #[must_use]
    pub fn with_barrier(mut self, barrier: f64) -> Self {
        self.barrier = Some(barrier);
        self
    }
}

/// The normalized output of validation.
///
/// Carries everything the session manager needs to build an RFQ; identifier
/// and timestamps are deliberately not assigned here, keeping the validator
/// free of side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedRequest {
    /// Normalized currency pair.
    pub pair: CurrencyPair,
    /// Buy or sell.
    pub side: Side,
    /// Validated notional.
    pub notional: Notional,
    /// Normalized instrument with exactly the fields its type requires.
    pub instrument: Instrument,
}

/// Validates an RFQ request and produces its normalized form.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the first violated field, in the
/// fixed order: pair, notional, tenor, option_type, strike, barrier.
pub fn validate(request: &RfqRequest) -> Result<ValidatedRequest, ValidationError> {
    let pair = CurrencyPair::parse(&request.pair)
        .map_err(|e| ValidationError::new("pair", e.to_string()))?;

    let notional = Notional::new(request.notional)
        .map_err(|_| ValidationError::new("notional", "must be a positive number"))?;

    let instrument = match request.instrument_type {
        InstrumentType::Spot => {
            forbid(request.tenor.is_some(), "tenor", "not allowed for SPOT")?;
            forbid(
                request.option_type.is_some(),
                "option_type",
                "not allowed for SPOT",
            )?;
            forbid(request.strike.is_some(), "strike", "not allowed for SPOT")?;
            forbid(request.barrier.is_some(), "barrier", "not allowed for SPOT")?;
            Instrument::Spot
        }
        InstrumentType::Forward => {
            let tenor = required_tenor(request.tenor.as_deref())?;
            forbid(
                request.option_type.is_some(),
                "option_type",
                "not allowed for FORWARD",
            )?;
            forbid(
                request.strike.is_some(),
                "strike",
                "not allowed for FORWARD",
            )?;
            forbid(
                request.barrier.is_some(),
                "barrier",
                "not allowed for FORWARD",
            )?;
            Instrument::Forward { tenor }
        }
        InstrumentType::VanillaOption => {
            let tenor = required_tenor(request.tenor.as_deref())?;
            let option_type = required_option_type(request.option_type)?;
            let strike = required_strike(request.strike.as_deref())?;
            forbid(
                request.barrier.is_some(),
                "barrier",
                "not allowed for VANILLA_OPTION",
            )?;
            Instrument::VanillaOption {
                tenor,
                option_type,
                strike,
            }
        }
        InstrumentType::BarrierOption => {
            let tenor = required_tenor(request.tenor.as_deref())?;
            let option_type = required_option_type(request.option_type)?;
            let strike = required_strike(request.strike.as_deref())?;
            let barrier = required_barrier(request.barrier, strike)?;
            Instrument::BarrierOption {
                tenor,
                option_type,
                strike,
                barrier,
            }
        }
    };

    Ok(ValidatedRequest {
        pair,
        side: request.side,
        notional,
        instrument,
    })
}

fn forbid(present: bool, field: &'static str, reason: &str) -> Result<(), ValidationError> {
    if present {
        return Err(ValidationError::new(field, reason));
    }
    Ok(())
}

fn required_tenor(tenor: Option<&str>) -> Result<Tenor, ValidationError> {
    let raw = tenor.ok_or_else(|| ValidationError::new("tenor", "required for this instrument"))?;
    Tenor::from_str(raw).map_err(|_| {
        ValidationError::new("tenor", format!("must be one of 1W, 2W, 1M, 3M, 6M, 1Y; got '{raw}'"))
    })
}

fn required_option_type(option_type: Option<OptionType>) -> Result<OptionType, ValidationError> {
    option_type.ok_or_else(|| ValidationError::new("option_type", "required for options"))
}

fn required_strike(strike: Option<&str>) -> Result<Strike, ValidationError> {
    let raw = strike.ok_or_else(|| ValidationError::new("strike", "required for options"))?;
    if raw.trim().eq_ignore_ascii_case("auto") {
        return Ok(Strike::AtTheMoney);
    }
    let price = Price::from_str(raw.trim()).map_err(|_| {
        ValidationError::new("strike", "must be a positive number or \"auto\"")
    })?;
    Ok(Strike::Fixed(price))
}

fn required_barrier(barrier: Option<f64>, strike: Strike) -> Result<Price, ValidationError> {
    let raw =
        barrier.ok_or_else(|| ValidationError::new("barrier", "required for barrier options"))?;
    let level =
        Price::new(raw).map_err(|_| ValidationError::new("barrier", "must be a positive number"))?;
    if let Some(fixed) = strike.fixed()
        && fixed == level
    {
        return Err(ValidationError::new(
            "barrier",
            "must be distinct from the strike",
        ));
    }
    Ok(level)
}
