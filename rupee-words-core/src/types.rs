//! Invoice data shared between CLI and core.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AmountError, Result};
use crate::output::format_inr;
use crate::parser::Amount;

/// One consignment line (lorry receipt) on a freight invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goods_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    pub amount: Amount,
}

/// A freight invoice as exchanged with the invoicing service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    pub invoice_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_gst: Option<String>,
    pub halting_charges: Amount,
    pub loading_charges: Amount,
    pub unloading_charges: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub items: Vec<InvoiceItem>,
}

fn checked_sum<I>(amounts: I) -> Result<Amount>
where
    I: IntoIterator<Item = Amount>,
{
    amounts
        .into_iter()
        .try_fold(Amount::ZERO, |acc, a| acc.checked_add(a))
        .ok_or(AmountError::Overflow)
}

impl Invoice {
    /// Sum of the line-item amounts.
    pub fn items_total(&self) -> Result<Amount> {
        checked_sum(self.items.iter().map(|item| item.amount))
    }

    /// Halting, loading and unloading charges together.
    pub fn additional_charges(&self) -> Result<Amount> {
        checked_sum([
            self.halting_charges,
            self.loading_charges,
            self.unloading_charges,
        ])
    }

    pub fn has_additional_charges(&self) -> bool {
        !(self.halting_charges.is_zero()
            && self.loading_charges.is_zero()
            && self.unloading_charges.is_zero())
    }

    /// Items total plus additional charges.
    pub fn grand_total(&self) -> Result<Amount> {
        self.items_total()?
            .checked_add(self.additional_charges()?)
            .ok_or(AmountError::Overflow)
    }

    /// Totals and amount-in-words for printing.
    pub fn summarize(&self) -> Result<InvoiceSummary> {
        let items_total = self.items_total()?;
        let additional_charges = self.additional_charges()?;
        let total_amount = items_total
            .checked_add(additional_charges)
            .ok_or(AmountError::Overflow)?;

        debug!(
            invoice_no = %self.invoice_no,
            items = self.items.len(),
            total = %total_amount,
            "summarized invoice"
        );

        Ok(InvoiceSummary {
            invoice_no: self.invoice_no.clone(),
            party_name: self.party_name.clone(),
            item_count: self.items.len(),
            items_total,
            additional_charges,
            total_amount,
            total_display: format_inr(total_amount),
            amount_in_words: total_amount.rupee_words(),
        })
    }
}

/// Printed totals for one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub invoice_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_name: Option<String>,
    pub item_count: usize,
    pub items_total: Amount,
    pub additional_charges: Amount,
    pub total_amount: Amount,
    pub total_display: String,
    pub amount_in_words: String,
}

/// One validated CSV batch row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRow {
    pub row: usize,
    pub invoice_no: String,
    pub amount: Amount,
    pub amount_display: String,
    pub amount_in_words: String,
}

impl BatchRow {
    pub fn new(row: usize, invoice_no: String, amount: Amount, plain: bool) -> Self {
        let amount_in_words = if plain {
            amount.words()
        } else {
            amount.rupee_words()
        };
        BatchRow {
            row,
            invoice_no,
            amount,
            amount_display: format_inr(amount),
            amount_in_words,
        }
    }
}

/// The report emitted for a fully valid batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub schema_version: String,
    pub row_count: usize,
    pub total_amount: Amount,
    pub total_display: String,
    pub total_in_words: String,
    pub rows: Vec<BatchRow>,
}

impl BatchReport {
    pub fn from_rows(rows: Vec<BatchRow>) -> Result<Self> {
        let total_amount = checked_sum(rows.iter().map(|row| row.amount))?;
        Ok(BatchReport {
            schema_version: "1.0".to_string(),
            row_count: rows.len(),
            total_amount,
            total_display: format_inr(total_amount),
            total_in_words: total_amount.rupee_words(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(amount: u64) -> InvoiceItem {
        InvoiceItem {
            amount: Amount::from_rupees(amount),
            ..InvoiceItem::default()
        }
    }

    #[test]
    fn grand_total_adds_items_and_charges() {
        let invoice = Invoice {
            invoice_no: "INV-7".to_string(),
            halting_charges: Amount::from_rupees(500),
            loading_charges: Amount::from_rupees(250),
            unloading_charges: Amount::from_rupees(250),
            items: vec![item(8000), item(8000)],
            ..Invoice::default()
        };
        assert_eq!(invoice.items_total().unwrap(), Amount::from_rupees(16_000));
        assert_eq!(invoice.grand_total().unwrap(), Amount::from_rupees(17_000));
        assert!(invoice.has_additional_charges());
    }

    #[test]
    fn summary_carries_words_for_grand_total() {
        let invoice = Invoice {
            invoice_no: "INV-1".to_string(),
            items: vec![item(17_000)],
            ..Invoice::default()
        };
        let summary = invoice.summarize().unwrap();
        assert_eq!(summary.amount_in_words, "RUPEES SEVENTEEN THOUSAND ONLY");
        assert_eq!(summary.total_display, "17,000.00");
        assert_eq!(summary.item_count, 1);
    }

    #[test]
    fn empty_invoice_totals_zero() {
        let summary = Invoice::default().summarize().unwrap();
        assert_eq!(summary.total_amount, Amount::ZERO);
        assert_eq!(summary.amount_in_words, "ZERO RUPEES ONLY");
    }

    #[test]
    fn overflowing_items_are_reported() {
        let invoice = Invoice {
            items: vec![item(u64::MAX), item(1)],
            ..Invoice::default()
        };
        assert_eq!(invoice.grand_total(), Err(AmountError::Overflow));
    }

    #[test]
    fn batch_rows_respect_plain_flag() {
        let wrapped = BatchRow::new(2, "A-1".to_string(), Amount::from_rupees(90), false);
        let plain = BatchRow::new(3, "A-2".to_string(), Amount::from_rupees(90), true);
        assert_eq!(wrapped.amount_in_words, "RUPEES NINETY ONLY");
        assert_eq!(plain.amount_in_words, "NINETY");
    }

    #[test]
    fn batch_report_totals_rows() {
        let report = BatchReport::from_rows(vec![
            BatchRow::new(2, "A-1".to_string(), Amount::from_rupees(100_000), false),
            BatchRow::new(3, "A-2".to_string(), Amount::from_paise(2_345_650), false),
        ])
        .unwrap();
        assert_eq!(report.row_count, 2);
        assert_eq!(report.total_amount, Amount::from_paise(12_345_650));
        assert_eq!(report.total_display, "1,23,456.50");
        assert_eq!(
            report.total_in_words,
            "RUPEES ONE LAKH TWENTY THREE THOUSAND FOUR HUNDRED FIFTY SIX ONLY"
        );
    }

    #[test]
    fn deserializes_camel_case_invoice_json() {
        let json = r#"{
            "invoiceNo": "INV-42",
            "partyName": "Shree Logistics",
            "haltingCharges": 1000,
            "loadingCharges": "250.50",
            "items": [
                {"lrNo": "LR-1", "fromLocation": "Pune", "toLocation": "Nashik", "amount": 12000},
                {"lrNo": "LR-2", "amount": 4500.25}
            ]
        }"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.unloading_charges, Amount::ZERO);
        assert_eq!(invoice.grand_total().unwrap(), Amount::from_paise(1_775_075));
    }

    #[test]
    fn null_charges_count_as_zero() {
        let json = r#"{
            "invoiceNo": "INV-43",
            "haltingCharges": null,
            "loadingCharges": null,
            "items": [{"amount": 17000}]
        }"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.halting_charges, Amount::ZERO);
        assert!(!invoice.has_additional_charges());
        assert_eq!(invoice.grand_total().unwrap(), Amount::from_rupees(17_000));
    }

    #[test]
    fn non_amount_value_names_the_amount_error() {
        let err = serde_json::from_str::<Invoice>(r#"{"items": [{"amount": true}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("amount contains invalid characters"));
    }
}
