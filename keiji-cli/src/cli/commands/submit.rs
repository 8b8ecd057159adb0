//! Submit command handler: batch insert into the backend approval queue

use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::*;

use crate::api::{EntryRecord, SignageClient};
use crate::bulk::paste::parse_paste;
use crate::config::{BackendConfig, ValidationLimits};
use crate::entry::EntryStatus;
use crate::master::MasterData;

pub async fn handle(file: &Path, draft: bool, verbose: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read input file: {}", file.display()))?;

    let config = BackendConfig::from_env()?;
    let client = SignageClient::new(&config)?;

    // Masters and limits come from the backend; the built-in dataset covers
    // a backend that has not been seeded yet.
    let masters = match client.fetch_masters().await {
        Ok(m) => m,
        Err(e) => {
            log::warn!("falling back to built-in masters: {}", e);
            MasterData::defaults()
        }
    };
    let limits = match client.fetch_limits().await {
        Ok(l) => l,
        Err(e) => {
            log::warn!("falling back to default limits: {}", e);
            ValidationLimits::default()
        }
    };

    let (rows, report) = parse_paste(&text, &masters, &limits);
    for skipped in &report.skipped {
        println!(
            "{} line {}: {}",
            "skipped".yellow(),
            skipped.line_no,
            skipped.reason
        );
    }
    if rows.is_empty() {
        bail!("No rows to submit");
    }

    // The batch insert is all-or-nothing, so every row has to pass
    let mut problems = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        if !row.valid {
            problems.push(format!("row {}: {}", i + 1, row.errors.join(" / ")));
        }
    }
    if !problems.is_empty() {
        bail!("Cannot submit, invalid rows:\n{}", problems.join("\n"));
    }

    let user = client
        .current_user()
        .await
        .context("Failed to look up the authenticated user")?;
    if verbose {
        println!("submitting as user {}", user.id.dimmed());
    }

    let status = if draft {
        EntryStatus::Draft
    } else {
        EntryStatus::Pending
    };
    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        match row.to_entry() {
            Ok(entry) => records.push(EntryRecord::from_entry(&entry, status, &user.id)),
            Err(errors) => bail!("row {}: {}", i + 1, errors.join(" / ")),
        }
    }

    let inserted = client.insert_entries(&records).await?;
    println!(
        "{} entries submitted with status {}",
        inserted.to_string().bright_green(),
        status.as_str().bright_green()
    );
    Ok(())
}
