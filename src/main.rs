use anyhow::{bail, Context, Result};
use receipt_points::{parse_receipt, ScoringEngine, VERSION};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::Path;

const USAGE: &str = "Usage: receipt-points <score|validate> <receipt.json>";
const RULE_WIDTH: usize = 41;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match (args.get(1).map(String::as_str), args.get(2)) {
        (Some("score"), Some(path)) => run_score(Path::new(path)),
        (Some("validate"), Some(path)) => run_validate(Path::new(path)),
        (Some("--version"), _) => {
            println!("receipt-points {}", VERSION);
            Ok(())
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

fn load_receipt(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read receipt file: {:?}", path))?;

    serde_json::from_str(&content).context("Failed to parse receipt JSON")
}

fn run_score(path: &Path) -> Result<()> {
    let raw = load_receipt(path)?;
    let report = score_report(&raw).with_context(|| format!("Rejected {:?}", path))?;
    println!("{}", report);
    Ok(())
}

fn run_validate(path: &Path) -> Result<()> {
    let raw = load_receipt(path)?;
    println!("{}", validate_report(&raw)?);
    Ok(())
}

/// Per-rule breakdown table for a raw receipt
fn score_report(raw: &Value) -> Result<String> {
    let receipt = parse_receipt(raw)?;
    let breakdown = ScoringEngine::new().breakdown(&receipt);

    let rule_line = "━".repeat(RULE_WIDTH);
    let mut lines = vec![
        format!("🧾 {} ({} items)", receipt.retailer, receipt.items.len()),
        rule_line.clone(),
    ];
    for contribution in &breakdown.contributions {
        lines.push(format!("{:>6}  {}", contribution.points, contribution.description));
    }
    lines.push(rule_line);
    lines.push(format!("{:>6}  total points", breakdown.total));

    Ok(lines.join("\n"))
}

/// Normalized receipt JSON, or the rejection reason as an error
fn validate_report(raw: &Value) -> Result<String> {
    match parse_receipt(raw) {
        Ok(receipt) => Ok(serde_json::to_string_pretty(&receipt)?),
        Err(reason) => bail!("❌ {}", reason),
    }
}
