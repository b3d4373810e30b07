use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::db::Database;
use crate::extract::MessageParser;
use crate::ledger::Ledger;
use crate::models::{Direction, ManualEntry};
use crate::sms::{ExportFileSource, SmsFilter};
use crate::ui;

/// Flags that take a value; their values are not positional arguments.
const VALUE_FLAGS: &[&str] = &["--date", "--max"];

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger<Database>, config: &Config) -> Result<()> {
    let Some(command) = args.get(1) else {
        return cli_summary(ledger);
    };
    let rest = &args[2..];

    match command.as_str() {
        "summary" | "s" => cli_summary(ledger),
        "list" | "ls" => cli_list(ledger),
        "add" => cli_add(rest, ledger),
        "delete" | "rm" => cli_delete(rest, ledger),
        "import-sms" => cli_import_sms(rest, ledger, config),
        "parse" => cli_parse(rest),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("smsledger {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("smsledger — personal ledger with bank SMS extraction");
    println!();
    println!("Usage: smsledger [command]");
    println!();
    println!("Commands:");
    println!("  (none), summary               Show total credit, total debit and net balance");
    println!("  list                          List all transactions with their index");
    println!("  add <amount> <description>    Add a transaction (debit by default)");
    println!("    --credit | --debit          Direction of the transaction");
    println!("    --date <date>               Date to record (default: today, YYYY-MM-DD)");
    println!("  delete <index>                Delete the transaction at <index>");
    println!("  import-sms <export>           Import transactions from an SMS export (JSON or CSV)");
    println!("    --max <n>                   Messages per import (default: 10)");
    println!("    --all                       Include messages already read");
    println!("  parse <message>               Show what would be extracted from one message");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment:");
    println!("  SMSLEDGER_DB                  Database file to use");
    println!("  RUST_LOG                      Log filter (e.g. smsledger=debug)");
}

fn cli_summary(ledger: &Ledger<Database>) -> Result<()> {
    println!("smsledger");
    println!("{}", "─".repeat(40));
    print!("{}", ui::render_summary(&ledger.summary()));
    Ok(())
}

fn cli_list(ledger: &Ledger<Database>) -> Result<()> {
    print!("{}", ui::render_list(ledger.records()));
    Ok(())
}

pub(crate) fn cli_add(args: &[String], ledger: &mut Ledger<Database>) -> Result<()> {
    let positional = positionals(args);
    let Some((amount, description)) = positional.split_first() else {
        anyhow::bail!("Usage: smsledger add <amount> <description> [--credit|--debit] [--date <date>]");
    };

    let mut entry = ManualEntry::new(amount.to_string(), description.join(" "));
    if has_flag(args, "--credit") && has_flag(args, "--debit") {
        anyhow::bail!("Use only one of --credit or --debit");
    }
    if has_flag(args, "--credit") {
        entry.direction = Direction::Credit;
    }
    if let Some(date) = flag_value(args, "--date") {
        entry.date = date.to_string();
    }

    let record = entry.into_record()?;
    ledger.add(record.clone())?;
    println!("Added: {}", ui::render_record(&record));
    Ok(())
}

pub(crate) fn cli_delete(args: &[String], ledger: &mut Ledger<Database>) -> Result<()> {
    let raw = positionals(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Usage: smsledger delete <index>"))?;
    let index: usize = raw
        .parse()
        .with_context(|| format!("Invalid index: {raw}"))?;

    match ledger.remove(index)? {
        Some(record) => println!("Deleted: {}", ui::render_record(&record)),
        None if ledger.is_empty() => anyhow::bail!("No transactions yet"),
        None => anyhow::bail!(
            "No transaction at index {index} (ledger has {} entries)",
            ledger.len()
        ),
    }
    Ok(())
}

fn cli_import_sms(args: &[String], ledger: &mut Ledger<Database>, config: &Config) -> Result<()> {
    let file = positionals(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Usage: smsledger import-sms <export> [--max <n>] [--all]"))?;

    let mut filter = SmsFilter {
        max_count: config.sms_batch,
        ..Default::default()
    };
    if let Some(max) = flag_value(args, "--max") {
        filter.max_count = max
            .parse()
            .with_context(|| format!("Invalid --max value: {max}"))?;
    }
    if has_flag(args, "--all") {
        filter.unread_only = false;
    }

    let source = ExportFileSource::new(Path::new(file));
    let parser = MessageParser::new()?;
    let today = chrono::Local::now().date_naive();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let report = runtime.block_on(crate::import::import_batch(&source, &filter, &parser, today));

    if let Some(warning) = &report.warning {
        eprintln!("Warning: {warning}");
        println!("No transactions imported from {}", source.path().display());
        return Ok(());
    }

    let (fetched, skipped) = (report.fetched, report.skipped());
    let count = ledger.extend(report.records)?;
    println!("Imported {count} transactions from {fetched} messages ({skipped} not recognised)");
    Ok(())
}

fn cli_parse(args: &[String]) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: smsledger parse <message>");
    }
    let body = args.join(" ");
    let parser = MessageParser::new()?;
    match parser.parse(&body) {
        Some(record) => println!("{}", ui::render_record(&record)),
        None => println!("Not a transaction"),
    }
    Ok(())
}

// ── Argument helpers ─────────────────────────────────────────

pub(crate) fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

pub(crate) fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither flags nor the value of a flag.
pub(crate) fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
