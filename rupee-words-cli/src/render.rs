//! Human-mode rendering: headers, tables and spinners; agent-mode JSON on
//! stdout/stderr.

use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use rupee_words_core::{
    format_inr, truncate_text, AgentError, BatchRow, Invoice, InvoiceSummary, MagnitudeGroups,
    OutputMode, RowIssue,
};

pub fn spinner(mode: OutputMode, message: &str) -> Option<ProgressBar> {
    if mode != OutputMode::Human {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

pub fn human_header(title: &str) {
    println!(
        "{}",
        "╔═══════════════════════════════════════════════════════════════╗".bright_white()
    );
    println!("{}", format!("║  {:<61}║", title).bright_white());
    println!(
        "{}",
        "╚═══════════════════════════════════════════════════════════════╝".bright_white()
    );
    println!();
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

pub fn render_groups_table(groups: &MagnitudeGroups) -> Table {
    let mut table = new_table(&["Crore", "Lakh", "Thousand", "Remainder"]);
    table.add_row(vec![
        Cell::new(groups.crore),
        Cell::new(groups.lakh),
        Cell::new(groups.thousand),
        Cell::new(groups.remainder),
    ]);
    table
}

pub fn render_batch_table(rows: &[BatchRow]) -> Table {
    let mut table = new_table(&["Row", "Invoice", "Amount", "In words"]);
    for r in rows {
        table.add_row(vec![
            Cell::new(r.row),
            Cell::new(truncate_text(&r.invoice_no, 20)),
            Cell::new(&r.amount_display),
            Cell::new(&r.amount_in_words),
        ]);
    }
    table
}

pub fn render_items_table(invoice: &Invoice) -> Table {
    let mut table = new_table(&["#", "LR No", "From", "To", "Goods", "Amount"]);
    for (i, item) in invoice.items.iter().enumerate() {
        let text = |v: &Option<String>| truncate_text(v.as_deref().unwrap_or("-"), 24);
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(text(&item.lr_no)),
            Cell::new(text(&item.from_location)),
            Cell::new(text(&item.to_location)),
            Cell::new(text(&item.goods_description)),
            Cell::new(format_inr(item.amount)),
        ]);
    }

    if invoice.has_additional_charges() {
        for (label, amount) in [
            ("Halting charges", invoice.halting_charges),
            ("Loading charges", invoice.loading_charges),
            ("Unloading charges", invoice.unloading_charges),
        ] {
            if !amount.is_zero() {
                table.add_row(vec![
                    Cell::new(""),
                    Cell::new(label),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(format_inr(amount)),
                ]);
            }
        }
    }
    table
}

pub fn render_statement_table(invoices: &[InvoiceSummary]) -> Table {
    let mut table = new_table(&["Invoice", "Party", "Items", "Total"]);
    for summary in invoices {
        table.add_row(vec![
            Cell::new(truncate_text(&summary.invoice_no, 20)),
            Cell::new(truncate_text(summary.party_name.as_deref().unwrap_or("-"), 24)),
            Cell::new(summary.item_count),
            Cell::new(&summary.total_display),
        ]);
    }
    table
}

pub fn render_issues_table(issues: &[RowIssue]) -> Table {
    let mut table = new_table(&["Row", "Field", "Message"]);
    for issue in issues {
        table.add_row(vec![
            Cell::new(issue.row),
            Cell::new(&issue.field),
            Cell::new(&issue.message),
        ]);
    }
    table
}

pub fn labelled(label: &str, value: &str) {
    println!(
        "{} {}",
        label.bright_white().bold(),
        value.bright_white().bold()
    );
}

pub fn failure(message: &str) {
    println!("{} {}", "✗".red(), message.red());
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

pub fn emit_agent_error(err: &AgentError) -> Result<()> {
    let json = serde_json::to_string(err).context("failed to serialize agent error")?;
    eprintln!("{json}");
    Ok(())
}
