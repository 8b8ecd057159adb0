//! Export command handler: tab-delimited input to a signage CSV file

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use colored::*;

use crate::bulk::paste::parse_paste;
use crate::config::ValidationLimits;
use crate::entry::Entry;
use crate::export::{export_file_name, write_csv_file};
use crate::master::MasterData;

pub fn handle(file: &Path, output: Option<PathBuf>, verbose: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read input file: {}", file.display()))?;

    let masters = MasterData::defaults();
    let limits = ValidationLimits::default();
    let (rows, report) = parse_paste(&text, &masters, &limits);

    for skipped in &report.skipped {
        println!(
            "{} line {}: {}",
            "skipped".yellow(),
            skipped.line_no,
            skipped.reason
        );
    }

    let mut entries: Vec<Entry> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        if !row.valid {
            println!(
                "{} row {} left out: {}",
                "invalid".yellow(),
                i + 1,
                row.errors.join(" / ")
            );
            continue;
        }
        match row.to_entry() {
            Ok(entry) => entries.push(entry),
            Err(errors) => {
                println!(
                    "{} row {} left out: {}",
                    "invalid".yellow(),
                    i + 1,
                    errors.join(" / ")
                );
            }
        }
    }

    if entries.is_empty() {
        bail!("No valid rows to export");
    }

    let exported_at = Local::now().naive_local();
    let path =
        output.unwrap_or_else(|| PathBuf::from(export_file_name(&entries, exported_at)));
    write_csv_file(&path, &entries, exported_at)?;

    if verbose {
        println!("export timestamp: {}", exported_at.format("%Y/%m/%d [%H:%M:%S]"));
    }
    println!(
        "{} entries exported to {}",
        entries.len().to_string().bright_green(),
        path.display().to_string().bright_green()
    );
    Ok(())
}
