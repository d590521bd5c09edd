use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Result};
use tempfile::NamedTempFile;

fn run_statement(fixture: &Path, account_id: &str) -> Result<std::process::Output> {
    let binary_path = env!("CARGO_BIN_EXE_wallet-ledger-engine");

    Ok(Command::new(binary_path)
        .arg(fixture)
        .arg(account_id)
        .output()?)
}

#[test]
fn test_cli_prints_a_merged_statement_for_the_sample_fixture() -> Result<()> {
    let sample_path = Path::new("samples").join("sample.json");
    let output = run_statement(&sample_path, "1")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut sections = stdout.split("\n\n");
    let transactions = sections.next().ok_or_else(|| anyhow!("transactions section missing"))?;
    let summary = sections.next().ok_or_else(|| anyhow!("summary section missing"))?;

    let mut lines = transactions.lines();
    assert_eq!(lines.next(), Some("id,category,direction,amount,title,counterparty,status,occurred_at"));

    let mut rows = HashMap::new();
    let mut order = Vec::new();

    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 8);
        order.push(fields[0].to_string());
        rows.insert(fields[0].to_string(), fields.iter().map(|f| f.to_string()).collect::<Vec<_>>());
    }

    // Descending by timestamp: pending ledger row, withdrawal-tagged mirror
    // posting and the claim (member scope) are all absent. The self-pledge
    // shows up once, on the received side only.
    assert_eq!(order, vec!["wdr_2", "ldg_1", "ctr_1", "ctr_3", "cts_2", "wdr_1"]);

    let ledger_credit = rows.get("ldg_1").ok_or_else(|| anyhow!("ldg_1 missing from output"))?;
    assert_eq!(ledger_credit[1], "item-payment-received");
    assert_eq!(ledger_credit[3], "5000");
    assert_eq!(ledger_credit[4], "Graduation Gift");
    assert_eq!(ledger_credit[5], "jane");

    let received = rows.get("ctr_1").ok_or_else(|| anyhow!("ctr_1 missing from output"))?;
    assert_eq!(received[4], "New Laptop");
    assert_eq!(received[5], "jane");

    // The self-pledge carries no identity signals; the placeholder renders.
    let self_pledge = rows.get("ctr_3").ok_or_else(|| anyhow!("ctr_3 missing from output"))?;
    assert_eq!(self_pledge[1], "contribution-received");
    assert_eq!(self_pledge[3], "700");
    assert_eq!(self_pledge[5], "-");

    let pending_withdrawal = rows.get("wdr_2").ok_or_else(|| anyhow!("wdr_2 missing from output"))?;
    assert_eq!(pending_withdrawal[6], "requested");

    let mut summary_lines = summary.lines();
    assert_eq!(summary_lines.next(), Some("balance,total_received,total_withdrawn,pending_withdrawals"));
    assert_eq!(summary_lines.next(), Some("12700,15700,4500,1500"));

    Ok(())
}

#[test]
fn test_cli_fails_on_missing_fixture() -> Result<()> {
    let output = run_statement(Path::new("missing.json"), "1")?;

    assert!(!output.status.success());

    Ok(())
}

#[test]
fn test_cli_fails_on_malformed_fixture() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{{ not json")?;

    let output = run_statement(file.path(), "1")?;

    assert!(!output.status.success());

    Ok(())
}

#[test]
fn test_cli_prints_an_empty_statement_for_an_unknown_account() -> Result<()> {
    let sample_path = Path::new("samples").join("sample.json");
    let output = run_statement(&sample_path, "999")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut sections = stdout.split("\n\n");
    let transactions = sections.next().ok_or_else(|| anyhow!("transactions section missing"))?;
    let summary = sections.next().ok_or_else(|| anyhow!("summary section missing"))?;

    assert_eq!(transactions.lines().count(), 1);
    assert_eq!(summary.lines().nth(1), Some("0,0,0,0"));

    Ok(())
}
