//! Error taxonomy for amount intake and invoice arithmetic.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount is negative; only non-negative amounts can be written in words")]
    Negative,
    #[error("amount contains a '+' sign; signs are not allowed")]
    SignNotAllowed,
    #[error("amount contains invalid characters")]
    InvalidCharacters,
    #[error("amount has more than one decimal point")]
    MultipleDecimalPoints,
    #[error("amount has more than 2 decimal places")]
    TooManyDecimals,
    #[error("amount has invalid digits")]
    InvalidDigits,
    #[error("amount is not a finite number")]
    NotFinite,
    #[error("amount exceeds the maximum supported value of {max} rupees")]
    ExceedsMaximum { max: u64 },
    #[error("amount arithmetic overflow")]
    Overflow,
}

impl AmountError {
    /// True for errors caused by magnitude rather than malformed input.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, AmountError::ExceedsMaximum { .. } | AmountError::Overflow)
    }

    /// Stable machine-readable identifier for agent output.
    pub fn code(&self) -> &'static str {
        if self.is_out_of_range() {
            "out_of_range"
        } else {
            "invalid_amount"
        }
    }
}

pub type Result<T> = std::result::Result<T, AmountError>;
