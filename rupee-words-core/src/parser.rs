//! Rupee amount intake: decimal strings parsed with strict integer arithmetic,
//! plus float intake for callers holding a plain numeric total.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AmountError, Result};

/// Paise conversion constant: 1 rupee = 100 paise.
pub const PAISE_PER_RUPEE: u64 = 100;
/// Largest whole-rupee value a double represents exactly (2^53 - 1).
pub const MAX_FLOAT_RUPEES: u64 = 9_007_199_254_740_991;

/// A non-negative rupee amount with paise precision.
///
/// Ordering compares rupees first, then paise.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "RawAmount", into = "String")]
pub struct Amount {
    rupees: u64,
    paise: u8,
}

impl Amount {
    pub const ZERO: Amount = Amount {
        rupees: 0,
        paise: 0,
    };

    pub const fn from_rupees(rupees: u64) -> Self {
        Amount { rupees, paise: 0 }
    }

    /// Split a paise count into rupees and paise.
    pub const fn from_paise(total_paise: u64) -> Self {
        Amount {
            rupees: total_paise / PAISE_PER_RUPEE,
            paise: (total_paise % PAISE_PER_RUPEE) as u8,
        }
    }

    /// Accept a float total: rejects NaN, infinities and negatives, floors the
    /// rupees and rounds the fraction to the nearest paisa.
    pub fn from_f64(value: f64) -> Result<Self> {
        let checked = check_float(value);
        if let Err(err) = &checked {
            debug!(value, error = %err, "rejected float amount");
        }
        checked
    }

    /// Whole rupees; the paise are discarded (floored).
    pub const fn rupees(&self) -> u64 {
        self.rupees
    }

    pub const fn paise(&self) -> u8 {
        self.paise
    }

    pub const fn is_zero(&self) -> bool {
        self.rupees == 0 && self.paise == 0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        let paise = u64::from(self.paise) + u64::from(other.paise);
        let rupees = self
            .rupees
            .checked_add(other.rupees)?
            .checked_add(paise / PAISE_PER_RUPEE)?;
        Some(Amount {
            rupees,
            paise: (paise % PAISE_PER_RUPEE) as u8,
        })
    }

    /// Uppercase words for the whole rupees, e.g. `SEVENTEEN THOUSAND`.
    pub fn words(&self) -> String {
        crate::words::rupees_to_words(self.rupees)
    }

    /// Words wrapped for an invoice, e.g. `RUPEES SEVENTEEN THOUSAND ONLY`.
    pub fn rupee_words(&self) -> String {
        crate::words::rupees_to_rupee_words(self.rupees)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.rupees, self.paise)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self> {
        parse_amount(s)
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self> {
        Amount::from_f64(value)
    }
}

impl From<u64> for Amount {
    fn from(rupees: u64) -> Self {
        Amount::from_rupees(rupees)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

/// Wire shapes accepted for an amount: JSON integers, JSON floats, decimal
/// strings, or `null` (an unset charge, read as zero). Anything else lands in
/// `Other` so the caller sees an amount error rather than a serde one.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Null,
    Integer(u64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl TryFrom<RawAmount> for Amount {
    type Error = AmountError;

    fn try_from(raw: RawAmount) -> Result<Self> {
        match raw {
            RawAmount::Null => Ok(Amount::ZERO),
            RawAmount::Integer(rupees) => Ok(Amount::from_rupees(rupees)),
            RawAmount::Float(value) => Amount::try_from(value),
            RawAmount::Text(text) => text.parse(),
            RawAmount::Other(_) => Err(AmountError::InvalidCharacters),
        }
    }
}

fn check_float(value: f64) -> Result<Amount> {
    if !value.is_finite() {
        return Err(AmountError::NotFinite);
    }
    if value < 0.0 {
        return Err(AmountError::Negative);
    }

    let whole = value.floor();
    if whole > MAX_FLOAT_RUPEES as f64 {
        return Err(AmountError::ExceedsMaximum {
            max: MAX_FLOAT_RUPEES,
        });
    }

    let paise = ((value - whole) * 100.0).round().min(99.0);
    Ok(Amount {
        rupees: whole as u64,
        paise: paise as u8,
    })
}

fn all_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

fn parse_u64_digits(s: &str) -> Result<u64> {
    if s.is_empty() {
        return Ok(0);
    }
    if !all_digits(s) {
        return Err(AmountError::InvalidDigits);
    }
    s.parse::<u64>()
        .map_err(|_| AmountError::ExceedsMaximum { max: u64::MAX })
}

/// Parse a decimal rupee string (`"17000"`, `"17000.5"`, `".75"`) with no
/// floating-point math.
pub fn parse_amount(input: &str) -> Result<Amount> {
    let parsed = parse_decimal(input);
    if let Err(err) = &parsed {
        debug!(input, error = %err, "rejected amount text");
    }
    parsed
}

fn parse_decimal(input: &str) -> Result<Amount> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }

    if s.starts_with('-') {
        return Err(AmountError::Negative);
    }
    if s.starts_with('+') {
        return Err(AmountError::SignNotAllowed);
    }

    if !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(AmountError::InvalidCharacters);
    }

    if s.chars().filter(|c| *c == '.').count() > 1 {
        return Err(AmountError::MultipleDecimalPoints);
    }

    let mut iter = s.splitn(2, '.');
    let whole_str = iter.next().ok_or(AmountError::InvalidDigits)?;
    let frac_opt = iter.next();

    if whole_str.is_empty() && frac_opt.map_or(true, str::is_empty) {
        return Err(AmountError::InvalidDigits);
    }

    let rupees = parse_u64_digits(whole_str)?;

    let paise = match frac_opt {
        None => 0,
        Some(frac_str) => {
            if frac_str.len() > 2 {
                return Err(AmountError::TooManyDecimals);
            }
            let mut padded = frac_str.to_string();
            while padded.len() < 2 {
                padded.push('0');
            }
            parse_u64_digits(&padded)? as u8
        }
    };

    Ok(Amount { rupees, paise })
}
