//! Amount-in-words rendering using the Indian numbering scale
//! (thousand, lakh, crore).
//!
//! A whole-rupee value is split into magnitude groups, each group below one
//! thousand is rendered from static digit tables, and the non-zero groups are
//! joined with their scale words:
//!
//! ```
//! use rupee_words_core::{amount_to_words, number_to_words};
//!
//! assert_eq!(
//!     number_to_words(123456.0).unwrap(),
//!     "ONE LAKH TWENTY THREE THOUSAND FOUR HUNDRED FIFTY SIX"
//! );
//! assert_eq!(
//!     amount_to_words(17000.0).unwrap(),
//!     "RUPEES SEVENTEEN THOUSAND ONLY"
//! );
//! ```

use serde::Serialize;

use crate::error::Result;
use crate::parser::Amount;

pub const THOUSAND: u64 = 1_000;
pub const LAKH: u64 = 100_000;
pub const CRORE: u64 = 10_000_000;

const ONES: [&str; 10] = [
    "", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE",
];
const TENS: [&str; 10] = [
    "", "", "TWENTY", "THIRTY", "FORTY", "FIFTY", "SIXTY", "SEVENTY", "EIGHTY", "NINETY",
];
const TEENS: [&str; 10] = [
    "TEN",
    "ELEVEN",
    "TWELVE",
    "THIRTEEN",
    "FOURTEEN",
    "FIFTEEN",
    "SIXTEEN",
    "SEVENTEEN",
    "EIGHTEEN",
    "NINETEEN",
];

const ZERO_WORD: &str = "ZERO";
const CURRENCY_PREFIX: &str = "RUPEES";
const CURRENCY_SUFFIX: &str = "ONLY";

/// A whole-rupee value split into Indian magnitude buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MagnitudeGroups {
    /// Count of crores; unbounded above.
    pub crore: u64,
    /// 0..=99
    pub lakh: u8,
    /// 0..=99
    pub thousand: u8,
    /// 0..=999
    pub remainder: u16,
}

impl MagnitudeGroups {
    /// Recombine the buckets into the original value.
    pub fn reconstruct(&self) -> u64 {
        self.crore * CRORE
            + u64::from(self.lakh) * LAKH
            + u64::from(self.thousand) * THOUSAND
            + u64::from(self.remainder)
    }
}

/// Split `rupees` into crore / lakh / thousand / remainder buckets.
pub fn group(rupees: u64) -> MagnitudeGroups {
    MagnitudeGroups {
        crore: rupees / CRORE,
        lakh: ((rupees % CRORE) / LAKH) as u8,
        thousand: ((rupees % LAKH) / THOUSAND) as u8,
        remainder: (rupees % THOUSAND) as u16,
    }
}

fn below_thousand_tokens(n: u16) -> Vec<&'static str> {
    debug_assert!(n < 1000, "sub-thousand renderer called with {n}");

    let mut tokens = Vec::with_capacity(4);
    let hundreds = usize::from(n / 100);
    let rest = usize::from(n % 100);

    if hundreds > 0 {
        tokens.push(ONES[hundreds]);
        tokens.push("HUNDRED");
    }

    match rest {
        0 => {}
        1..=9 => tokens.push(ONES[rest]),
        10..=19 => tokens.push(TEENS[rest - 10]),
        _ => {
            tokens.push(TENS[rest / 10]);
            if rest % 10 > 0 {
                tokens.push(ONES[rest % 10]);
            }
        }
    }

    tokens
}

/// Render a value in `0..=999` as words; zero renders as an empty string.
pub fn render_below_thousand(n: u16) -> String {
    below_thousand_tokens(n).join(" ")
}

fn push_group(tokens: &mut Vec<&'static str>, value: u16, scale: &'static str) {
    if value > 0 {
        tokens.extend(below_thousand_tokens(value));
        tokens.push(scale);
    }
}

/// Whole rupees as uppercase words, e.g. `17000` -> `SEVENTEEN THOUSAND`.
///
/// A crore count of one hundred or more is itself written in words, so
/// `10_000_000_000` becomes `ONE THOUSAND CRORE`.
pub fn rupees_to_words(rupees: u64) -> String {
    if rupees == 0 {
        return ZERO_WORD.to_string();
    }

    let groups = group(rupees);
    let mut phrase = Vec::new();

    if groups.crore > 0 {
        phrase.push(format!("{} CRORE", rupees_to_words(groups.crore)));
    }

    let mut tokens = Vec::new();
    push_group(&mut tokens, u16::from(groups.lakh), "LAKH");
    push_group(&mut tokens, u16::from(groups.thousand), "THOUSAND");
    tokens.extend(below_thousand_tokens(groups.remainder));
    if !tokens.is_empty() {
        phrase.push(tokens.join(" "));
    }

    phrase.join(" ")
}

/// Whole rupees wrapped for an invoice, e.g. `RUPEES SEVENTEEN THOUSAND ONLY`.
pub fn rupees_to_rupee_words(rupees: u64) -> String {
    if rupees == 0 {
        return format!("{ZERO_WORD} {CURRENCY_PREFIX} {CURRENCY_SUFFIX}");
    }
    format!(
        "{CURRENCY_PREFIX} {} {CURRENCY_SUFFIX}",
        rupees_to_words(rupees)
    )
}

/// Numeric entry point: floors `amount` and renders it without a currency
/// wrapper. Negative, NaN and infinite inputs are rejected.
pub fn number_to_words(amount: f64) -> Result<String> {
    Amount::try_from(amount).map(|a| a.words())
}

/// Numeric entry point with the `RUPEES ... ONLY` wrapper.
pub fn amount_to_words(amount: f64) -> Result<String> {
    Amount::try_from(amount).map(|a| a.rupee_words())
}
