//! rupee-words CLI entry point: amount / CSV batch / invoice JSON / monthly
//! statement -> words -> output.

mod config;
mod render;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use colored::Colorize;
use is_terminal::IsTerminal;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rupee_words_core::{
    format_inr, group, AgentError, Amount, BatchReport, BatchRow, Invoice,
    MagnitudeGroups, OutputMode, RowIssue, Statement,
};

use crate::config::{Config, OutputFormat};
use crate::render::{
    emit_agent_error, emit_json, failure, human_header, labelled, render_batch_table,
    render_groups_table, render_issues_table, render_items_table, render_statement_table,
    spinner,
};

#[derive(Debug, Parser)]
#[command(name = "rupee-words", version)]
#[command(about = "Write invoice amounts in words using the Indian numbering system")]
struct Cli {
    /// Output format: auto (tty=human, pipe=agent), json (agent), human (operator).
    #[arg(long, value_enum, global = true)]
    output: Option<OutputFormat>,

    /// Optional TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a single amount, e.g. `17000` or `123456.50`.
    Words {
        amount: String,

        /// Omit the RUPEES/ONLY wrapper.
        #[arg(long)]
        plain: bool,
    },
    /// Convert every row of a CSV with `invoice_no` and `amount` columns.
    Batch {
        #[arg(long)]
        input: PathBuf,
    },
    /// Total an invoice JSON document and write its amount in words.
    Invoice {
        #[arg(long)]
        input: PathBuf,
    },
    /// Total the invoices of one month from a JSON array of invoices.
    Statement {
        #[arg(long)]
        input: PathBuf,

        /// Statement year; defaults to the current year.
        #[arg(long)]
        year: Option<i32>,

        /// Statement month (1-12); defaults to the current month.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WordsOutput {
    amount: Amount,
    amount_display: String,
    groups: MagnitudeGroups,
    amount_in_words: String,
}

/// Detect output mode based on CLI flags and TTY detection.
fn detect_output_mode(output: OutputFormat) -> OutputMode {
    match output {
        OutputFormat::Human => OutputMode::Human,
        OutputFormat::Json => OutputMode::Agent,
        OutputFormat::Auto => {
            if std::io::stdout().is_terminal() {
                OutputMode::Human
            } else {
                OutputMode::Agent
            }
        }
    }
}

/// Logs go to stderr so agent-mode stdout stays pure JSON.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn report_failure(
    mode: OutputMode,
    error: &str,
    code: i32,
    message: String,
    details: Option<Vec<RowIssue>>,
) -> Result<()> {
    match mode {
        OutputMode::Human => {
            human_header("RUPEE WORDS — Rejected");
            failure(&message);
            if let Some(issues) = &details {
                println!();
                println!("{}", render_issues_table(issues));
                println!();
                println!("{}", "Fix the errors above and re-run.".yellow());
            }
        }
        OutputMode::Agent => {
            emit_agent_error(&AgentError {
                error: error.to_string(),
                code,
                message: Some(message),
                details,
            })?;
        }
    }
    Ok(())
}

fn run_words(mode: OutputMode, input: &str, plain: bool) -> Result<i32> {
    let amount = match input.parse::<Amount>() {
        Ok(amount) => amount,
        Err(err) => {
            info!(input, error = %err, "amount rejected");
            report_failure(mode, err.code(), 1, err.to_string(), None)?;
            return Ok(1);
        }
    };

    let amount_in_words = if plain {
        amount.words()
    } else {
        amount.rupee_words()
    };
    let groups = group(amount.rupees());

    match mode {
        OutputMode::Human => {
            human_header("RUPEE WORDS — Amount");
            labelled("Amount:", &format_inr(amount));
            println!();
            println!("{}", render_groups_table(&groups));
            println!();
            labelled("In words:", &amount_in_words);
        }
        OutputMode::Agent => emit_json(&WordsOutput {
            amount,
            amount_display: format_inr(amount),
            groups,
            amount_in_words,
        })?,
    }
    Ok(0)
}

fn normalize_header(h: &str) -> String {
    h.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | ' ' | '-'))
        .collect::<String>()
        .to_ascii_lowercase()
}

fn run_batch(mode: OutputMode, input: &Path, config: &Config) -> Result<i32> {
    let pb = spinner(mode, "Reading CSV…");

    let file = File::open(input)
        .with_context(|| format!("failed to open input file: {}", input.display()))?;
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = rdr.headers().context("failed to read CSV header row")?.clone();
    let column = |name: &str| headers.iter().position(|h| normalize_header(h) == name);
    let (Some(invoice_col), Some(amount_col)) = (column("invoiceno"), column("amount")) else {
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        report_failure(
            mode,
            "invalid_header",
            1,
            "CSV header must contain 'invoice_no' and 'amount' columns".to_string(),
            None,
        )?;
        return Ok(1);
    };

    let plain = config.plain;
    let mut issues: Vec<RowIssue> = Vec::new();
    let mut rows: Vec<BatchRow> = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let row_num = i + 2;
        if i >= config.max_rows {
            issues.push(RowIssue {
                row: row_num,
                field: "csv".to_string(),
                message: format!("batch exceeds the limit of {} data rows", config.max_rows),
            });
            break;
        }

        let row_issue_start = issues.len();
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                issues.push(RowIssue {
                    row: row_num,
                    field: "csv".to_string(),
                    message: format!("csv parse error: {e}"),
                });
                continue;
            }
        };

        let invoice_no = record.get(invoice_col).unwrap_or("").trim().to_string();
        let amount_str = record.get(amount_col).unwrap_or("").trim();

        if invoice_no.is_empty() {
            issues.push(RowIssue {
                row: row_num,
                field: "invoice_no".to_string(),
                message: "invoice number is required".to_string(),
            });
        }

        let amount = match amount_str.parse::<Amount>() {
            Ok(v) => v,
            Err(e) => {
                issues.push(RowIssue {
                    row: row_num,
                    field: "amount".to_string(),
                    message: e.to_string(),
                });
                Amount::ZERO
            }
        };

        // Keep only rows that introduced no validation issues.
        if issues.len() == row_issue_start {
            debug!(row = row_num, invoice_no = %invoice_no, amount = %amount, "row accepted");
            rows.push(BatchRow::new(row_num, invoice_no, amount, plain));
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if !issues.is_empty() {
        info!(issues = issues.len(), "batch rejected");
        report_failure(
            mode,
            "validation_failed",
            1,
            "Validation failed. No amounts were converted.".to_string(),
            Some(issues),
        )?;
        return Ok(1);
    }

    let report = match BatchReport::from_rows(rows) {
        Ok(report) => report,
        Err(err) => {
            report_failure(mode, err.code(), 1, format!("batch total: {err}"), None)?;
            return Ok(1);
        }
    };
    info!(rows = report.row_count, total = %report.total_amount, "batch converted");

    match mode {
        OutputMode::Human => {
            human_header("RUPEE WORDS — Batch");
            println!("{}", render_batch_table(&report.rows));
            println!();
            labelled("Total:", &report.total_display);
            labelled("Rows:", &report.row_count.to_string());
            labelled("Total in words:", &report.total_in_words);
        }
        OutputMode::Agent => emit_json(&report)?,
    }
    Ok(0)
}

fn run_invoice(mode: OutputMode, input: &Path) -> Result<i32> {
    let file = File::open(input)
        .with_context(|| format!("failed to open input file: {}", input.display()))?;
    let invoice: Invoice = match serde_json::from_reader(BufReader::new(file)) {
        Ok(invoice) => invoice,
        Err(err) => {
            info!(error = %err, "invoice document rejected");
            report_failure(mode, "invalid_invoice", 1, format!("invalid invoice: {err}"), None)?;
            return Ok(1);
        }
    };

    let summary = match invoice.summarize() {
        Ok(summary) => summary,
        Err(err) => {
            report_failure(mode, err.code(), 1, format!("invoice total: {err}"), None)?;
            return Ok(1);
        }
    };
    info!(invoice_no = %summary.invoice_no, total = %summary.total_amount, "invoice summarized");

    match mode {
        OutputMode::Human => {
            human_header(&format!("RUPEE WORDS — Invoice {}", summary.invoice_no));
            if let Some(party) = &summary.party_name {
                labelled("Party:", party);
                println!();
            }
            println!("{}", render_items_table(&invoice));
            println!();
            labelled("Items total:", &format_inr(summary.items_total));
            if invoice.has_additional_charges() {
                labelled("Additional charges:", &format_inr(summary.additional_charges));
            }
            labelled("Total:", &summary.total_display);
            labelled("Amount in words:", &summary.amount_in_words);
        }
        OutputMode::Agent => emit_json(&summary)?,
    }
    Ok(0)
}

fn run_statement(
    mode: OutputMode,
    input: &Path,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<i32> {
    let today = chrono::Local::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());

    let pb = spinner(mode, "Reading invoices…");
    let file = File::open(input)
        .with_context(|| format!("failed to open input file: {}", input.display()))?;
    let parsed: serde_json::Result<Vec<Invoice>> = serde_json::from_reader(BufReader::new(file));
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let invoices = match parsed {
        Ok(invoices) => invoices,
        Err(err) => {
            info!(error = %err, "invoice list rejected");
            report_failure(mode, "invalid_invoice", 1, format!("invalid invoice list: {err}"), None)?;
            return Ok(1);
        }
    };

    let statement = match Statement::monthly(&invoices, year, month) {
        Ok(statement) => statement,
        Err(err) => {
            report_failure(mode, err.code(), 1, format!("statement: {err}"), None)?;
            return Ok(1);
        }
    };
    info!(
        year,
        month,
        invoices = statement.total_invoices,
        total = %statement.total_amount,
        "statement built"
    );

    match mode {
        OutputMode::Human => {
            human_header(&format!(
                "RUPEE WORDS — Statement {} {}",
                statement.month_name, statement.year
            ));
            if statement.invoices.is_empty() {
                println!("{}", "No invoices dated in this month.".yellow());
            } else {
                println!("{}", render_statement_table(&statement.invoices));
            }
            println!();
            labelled("Invoices:", &statement.total_invoices.to_string());
            labelled("Total:", &statement.total_display);
            labelled("Total in words:", &statement.total_in_words);
        }
        OutputMode::Agent => emit_json(&statement)?,
    }
    Ok(0)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let mode = detect_output_mode(cli.output.unwrap_or_default());
            report_failure(mode, "config_invalid", 2, format!("{err:#}"), None)?;
            std::process::exit(2);
        }
    };

    init_tracing(&config.log_filter);
    let mode = detect_output_mode(cli.output.unwrap_or(config.output));
    debug!(?mode, "output mode selected");

    let code = match &cli.command {
        Command::Words { amount, plain } => run_words(mode, amount, *plain || config.plain)?,
        Command::Batch { input } => run_batch(mode, input, &config)?,
        Command::Invoice { input } => run_invoice(mode, input)?,
        Command::Statement { input, year, month } => run_statement(mode, input, *year, *month)?,
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
