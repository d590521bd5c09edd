mod engine;
mod models;
mod normalizer;
mod query;
mod resolver;
mod stores;
mod types;

use std::fs;
use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{AccountStatement, Reconciler, StatementScope};
use crate::query::{filter_category, CategoryFilter};
use crate::stores::{Fixture, MemoryStores};
use crate::types::AccountId;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: wallet-ledger-engine [fixture].json [account_id] [log_level:optional] > [statement].csv");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let path = &args[1];
    let account_id: AccountId = args[2].parse()
        .with_context(|| format!("account_id must be a number, got '{}'", args[2]))?;
    let log_level = args.get(3)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Could not read fixture at path: {path}"))?;
    let fixture: Fixture = serde_json::from_str(&raw)
        .with_context(|| format!("Fixture at path {path} is not valid JSON"))?;
    let stores = MemoryStores::new(fixture);

    let reconciler = Reconciler::new(
        stores.clone(),
        stores.clone(),
        stores.clone(),
        stores.clone(),
        stores
    );

    let timer = Instant::now();
    let statement = reconciler.statement(account_id, StatementScope::Member).await?;
    let duration = timer.elapsed();

    info!("Reconciled {} transactions for account [{account_id}] in: {duration:?}", statement.transactions.len());
    info!(
        "Breakdown: {} received, {} sent, {} withdrawals",
        filter_category(&statement.transactions, CategoryFilter::Received).len(),
        filter_category(&statement.transactions, CategoryFilter::Sent).len(),
        filter_category(&statement.transactions, CategoryFilter::Withdrawals).len()
    );

    write_statement_to_stdout(&statement)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Statement output goes to stdout, so logging has to stay on stderr.
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_statement_to_stdout(statement: &AccountStatement) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "id,category,direction,amount,title,counterparty,status,occurred_at")?;

    for transaction in &statement.transactions {
        writeln!(
            output,
            "{},{},{},{},{},{},{},{}",
            transaction.id,
            transaction.category,
            transaction.direction,
            transaction.amount,
            csv_field(&transaction.title),
            csv_field(transaction.counterparty_handle.as_deref().unwrap_or("-")),
            transaction.status.map(|status| status.as_str()).unwrap_or(""),
            transaction.occurred_at.to_rfc3339()
        )?;
    }

    writeln!(output)?;
    writeln!(output, "balance,total_received,total_withdrawn,pending_withdrawals")?;
    writeln!(
        output,
        "{},{},{},{}",
        statement.summary.balance,
        statement.summary.total_received,
        statement.summary.total_withdrawn,
        statement.summary.pending_withdrawals
    )?;

    output.flush()?;

    Ok(())
}

// Free-text fields (titles, handles) can carry commas or quotes; quote them
// so the columns never shift. Machine-generated fields stay bare.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
