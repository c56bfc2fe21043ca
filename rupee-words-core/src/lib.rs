//! Core library for rupee-words: amount parsing, Indian-numbering words,
//! invoice totals and monthly statements.

pub mod error;
pub mod output;
pub mod parser;
pub mod statement;
pub mod types;
pub mod words;

pub use error::{AmountError, Result};
pub use output::{format_inr, truncate_text, AgentError, OutputMode, RowIssue};
pub use parser::{parse_amount, Amount, MAX_FLOAT_RUPEES, PAISE_PER_RUPEE};
pub use statement::{Statement, StatementError};
pub use types::{BatchReport, BatchRow, Invoice, InvoiceItem, InvoiceSummary};
pub use words::{
    amount_to_words, group, number_to_words, render_below_thousand, rupees_to_rupee_words,
    rupees_to_words, MagnitudeGroups, CRORE, LAKH, THOUSAND,
};
