//! Pending command handler: list entries waiting in the approval queue

use anyhow::Result;
use colored::*;

use crate::api::SignageClient;
use crate::config::BackendConfig;

pub async fn handle() -> Result<()> {
    let client = SignageClient::new(&BackendConfig::from_env()?)?;
    let entries = client.pending_entries().await?;

    if entries.is_empty() {
        println!("no entries waiting for approval");
        return Ok(());
    }

    for e in &entries {
        println!(
            "{:>8}  {}  {}  {} {}〜{}",
            e.property_code.to_string().cyan(),
            e.terminal_id,
            e.vendor_name,
            e.inspection_type,
            e.start_date.format("%Y/%m/%d"),
            e.end_date
                .map(|d| d.format("%Y/%m/%d").to_string())
                .unwrap_or_default()
        );
    }
    println!("{} entries pending", entries.len().to_string().bright_green());
    Ok(())
}
