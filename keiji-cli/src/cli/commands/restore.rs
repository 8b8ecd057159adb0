//! Restore command handler: inspect or discard the auto-save snapshot

use anyhow::Result;
use colored::*;

use crate::bulk::autosave::AutosaveStore;

pub fn handle(user: &str, discard: bool) -> Result<()> {
    let store = AutosaveStore::new()?;

    if discard {
        store.discard(user)?;
        println!("snapshot for {} discarded", user.cyan());
        return Ok(());
    }

    match store.load(user)? {
        Some(snapshot) => {
            println!(
                "{} rows auto-saved {} hour(s) ago for {} {}",
                snapshot.rows.len().to_string().bright_green(),
                snapshot.age_hours(),
                snapshot.user_id.cyan(),
                format!("({})", snapshot.id).dimmed()
            );
            for (i, row) in snapshot.rows.iter().enumerate() {
                println!(
                    "  {:>3}  {} {} {}",
                    i + 1,
                    row.property_code,
                    row.vendor_name,
                    row.inspection_type
                );
            }
            println!("(re-import the rows, or run with --discard to drop the snapshot)");
        }
        None => println!("no restorable snapshot for {}", user.cyan()),
    }
    Ok(())
}
