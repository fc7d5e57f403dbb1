//! Fixed-point token amounts.
//!
//! Converts between human readable decimal strings ("0.01") and the integer
//! base units a contract sees (wei for ether, 10^-decimals for ERC tokens).
//! The arithmetic is `alloy_primitives::utils`; this layer adds strictness:
//! input with more fractional digits than the token supports is rejected
//! instead of truncated, so `parse(format(x)) == x`.

use {
    alloy_primitives::{
        utils::{self, Unit},
        U256,
    },
    serde::{Serialize, Serializer},
    std::fmt,
};

mod amount_errors;

pub use amount_errors::AmountError;

/// Decimals of ether and of the platform tokens.
pub const ETHER_DECIMALS: u8 = 18;

/// Largest power of ten that fits in a U256.
pub const MAX_DECIMALS: u8 = 77;

fn unit(decimals: u8) -> Result<Unit, AmountError> {
    Unit::new(decimals).ok_or(AmountError::UnsupportedDecimals(decimals))
}

/// Parses a non-negative decimal string into base units.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, AmountError> {
    let input = amount.trim();
    if input.is_empty() {
        return Err(AmountError::Empty);
    }
    if input.starts_with('-') {
        return Err(AmountError::Negative(input.to_string()));
    }
    let unit = unit(decimals)?;

    let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(AmountError::Invalid(input.to_string()));
    }
    // alloy truncates excess precision; only trailing zeros may be dropped
    if fraction.trim_end_matches('0').len() > decimals as usize {
        return Err(AmountError::TooPrecise {
            input: input.to_string(),
            decimals,
        });
    }

    let whole = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).map_err(|_| AmountError::Overflow)?
    };
    whole.checked_mul(unit.wei()).ok_or(AmountError::Overflow)?;

    let raw = utils::parse_units(input, decimals)
        .map_err(|_| AmountError::Overflow)?
        .get_absolute();
    // the fraction must not have wrapped the sum
    if raw / unit.wei() != whole {
        return Err(AmountError::Overflow);
    }
    Ok(raw)
}

/// Formats base units as the shortest exact decimal string.
pub fn format_units(raw: U256, decimals: u8) -> Result<String, AmountError> {
    unit(decimals)?;
    let padded = utils::format_units(raw, decimals).map_err(|_| AmountError::Overflow)?;
    Ok(match padded.split_once('.') {
        Some((whole, fraction)) if fraction.trim_end_matches('0').is_empty() => whole.to_string(),
        Some(_) => padded.trim_end_matches('0').to_string(),
        None => padded,
    })
}

pub fn parse_ether(amount: &str) -> Result<U256, AmountError> {
    parse_units(amount, ETHER_DECIMALS)
}

pub fn format_ether(wei: U256) -> String {
    // 18 is always within MAX_DECIMALS
    format_units(wei, ETHER_DECIMALS).unwrap_or_else(|_| wei.to_string())
}

/// An amount together with the decimals it is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenAmount {
    raw: U256,
    decimals: u8,
}

impl TokenAmount {
    pub fn new(raw: U256, decimals: u8) -> Result<Self, AmountError> {
        unit(decimals)?;
        Ok(Self { raw, decimals })
    }

    pub const fn from_wei(raw: U256) -> Self {
        Self {
            raw,
            decimals: ETHER_DECIMALS,
        }
    }

    pub fn parse(amount: &str, decimals: u8) -> Result<Self, AmountError> {
        Ok(Self {
            raw: parse_units(amount, decimals)?,
            decimals,
        })
    }

    pub fn ether(amount: &str) -> Result<Self, AmountError> {
        Self::parse(amount, ETHER_DECIMALS)
    }

    pub const fn raw(&self) -> U256 {
        self.raw
    }

    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Lossy conversion for display math. Never use the result to build a
    /// transaction.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::MAX)
    }

    /// Converts this amount at `rate` target units per whole unit of self,
    /// e.g. ETH paid times tokens-per-ETH.
    pub fn convert_at_rate(&self, rate: U256, target_decimals: u8) -> Result<Self, AmountError> {
        let source_unit = unit(self.decimals)?.wei();
        let target_unit = unit(target_decimals)?.wei();
        let raw = self
            .raw
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(target_unit))
            .ok_or(AmountError::Overflow)?
            / source_unit;
        Ok(Self {
            raw,
            decimals: target_decimals,
        })
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format_units(self.raw, self.decimals).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
