//! Monthly statements: the invoices dated in one calendar month, their
//! combined total, and that total in words.

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::AmountError;
use crate::output::format_inr;
use crate::parser::Amount;
use crate::types::{Invoice, InvoiceSummary};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatementError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
    #[error("invoice {invoice_no} has an invalid date '{value}'; expected YYYY-MM-DD")]
    InvalidDate { invoice_no: String, value: String },
    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl StatementError {
    pub fn code(&self) -> &'static str {
        match self {
            StatementError::InvalidMonth(_) => "invalid_period",
            StatementError::InvalidDate { .. } => "invalid_invoice",
            StatementError::Amount(err) => err.code(),
        }
    }
}

/// Invoice totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub total_invoices: usize,
    pub total_amount: Amount,
    pub total_display: String,
    pub total_in_words: String,
    pub invoices: Vec<InvoiceSummary>,
}

/// Read an invoice date. A trailing time part (`2024-03-15T10:30:00`) is
/// ignored.
fn invoice_date(invoice: &Invoice) -> Result<Option<NaiveDate>, StatementError> {
    let Some(raw) = invoice.invoice_date.as_deref().map(str::trim) else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    let day = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| StatementError::InvalidDate {
            invoice_no: invoice.invoice_no.clone(),
            value: raw.to_string(),
        })
}

impl Statement {
    /// Collect the invoices dated in `year`/`month`, in input order.
    ///
    /// Undated invoices never belong to a month and are skipped; a date that
    /// does not parse fails the whole statement.
    pub fn monthly(invoices: &[Invoice], year: i32, month: u32) -> Result<Self, StatementError> {
        let month_name = u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or(StatementError::InvalidMonth(month))?
            .name()
            .to_string();

        let mut summaries = Vec::new();
        let mut total_amount = Amount::ZERO;
        for invoice in invoices {
            let Some(date) = invoice_date(invoice)? else {
                debug!(invoice_no = %invoice.invoice_no, "undated invoice left out of statement");
                continue;
            };
            if date.year() != year || date.month() != month {
                continue;
            }
            let summary = invoice.summarize()?;
            total_amount = total_amount
                .checked_add(summary.total_amount)
                .ok_or(AmountError::Overflow)?;
            summaries.push(summary);
        }

        debug!(year, month, invoices = summaries.len(), total = %total_amount, "built statement");

        Ok(Statement {
            year,
            month,
            month_name,
            total_invoices: summaries.len(),
            total_amount,
            total_display: format_inr(total_amount),
            total_in_words: total_amount.rupee_words(),
            invoices: summaries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InvoiceItem;

    fn invoice(no: &str, date: Option<&str>, amount: u64) -> Invoice {
        Invoice {
            invoice_no: no.to_string(),
            invoice_date: date.map(str::to_string),
            items: vec![InvoiceItem {
                amount: Amount::from_rupees(amount),
                ..InvoiceItem::default()
            }],
            ..Invoice::default()
        }
    }

    #[test]
    fn keeps_only_invoices_in_the_month() {
        let invoices = vec![
            invoice("INV-1", Some("2024-03-05"), 12_000),
            invoice("INV-2", Some("2024-04-01"), 9_000),
            invoice("INV-3", Some("2024-03-31"), 5_000),
            invoice("INV-4", Some("2023-03-10"), 1_000),
        ];
        let statement = Statement::monthly(&invoices, 2024, 3).unwrap();
        assert_eq!(statement.month_name, "March");
        assert_eq!(statement.total_invoices, 2);
        assert_eq!(statement.invoices[0].invoice_no, "INV-1");
        assert_eq!(statement.invoices[1].invoice_no, "INV-3");
        assert_eq!(statement.total_amount, Amount::from_rupees(17_000));
        assert_eq!(statement.total_display, "17,000.00");
        assert_eq!(statement.total_in_words, "RUPEES SEVENTEEN THOUSAND ONLY");
    }

    #[test]
    fn totals_include_additional_charges() {
        let mut charged = invoice("INV-9", Some("2024-11-02"), 99_000);
        charged.loading_charges = Amount::from_paise(100_050);
        let statement = Statement::monthly(&[charged], 2024, 11).unwrap();
        assert_eq!(statement.total_amount, Amount::from_paise(10_000_050));
        assert_eq!(statement.total_in_words, "RUPEES ONE LAKH ONLY");
    }

    #[test]
    fn empty_month_totals_zero() {
        let statement = Statement::monthly(&[], 2024, 2).unwrap();
        assert_eq!(statement.month_name, "February");
        assert_eq!(statement.total_invoices, 0);
        assert_eq!(statement.total_in_words, "ZERO RUPEES ONLY");
    }

    #[test]
    fn undated_invoices_are_skipped() {
        let invoices = vec![
            invoice("INV-1", None, 500),
            invoice("INV-2", Some(""), 500),
            invoice("INV-3", Some("2024-03-15T09:30:00"), 750),
        ];
        let statement = Statement::monthly(&invoices, 2024, 3).unwrap();
        assert_eq!(statement.total_invoices, 1);
        assert_eq!(statement.total_amount, Amount::from_rupees(750));
    }

    #[test]
    fn rejects_month_outside_calendar() {
        assert_eq!(
            Statement::monthly(&[], 2024, 13),
            Err(StatementError::InvalidMonth(13))
        );
        assert_eq!(
            Statement::monthly(&[], 2024, 0).unwrap_err().code(),
            "invalid_period"
        );
    }

    #[test]
    fn rejects_unparseable_date() {
        let err = Statement::monthly(&[invoice("INV-5", Some("15/03/2024"), 10)], 2024, 3)
            .unwrap_err();
        assert_eq!(err.code(), "invalid_invoice");
        assert!(err.to_string().contains("INV-5"));
    }

    #[test]
    fn overflowing_total_is_out_of_range() {
        let invoices = vec![
            invoice("INV-1", Some("2024-03-01"), u64::MAX),
            invoice("INV-2", Some("2024-03-02"), 1),
        ];
        let err = Statement::monthly(&invoices, 2024, 3).unwrap_err();
        assert_eq!(err, StatementError::Amount(AmountError::Overflow));
        assert_eq!(err.code(), "out_of_range");
    }
}
