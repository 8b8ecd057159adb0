//! Import command handler: parse a tab-delimited file and report validity

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use crate::bulk::autosave::AutosaveStore;
use crate::bulk::paste::parse_paste;
use crate::bulk::{parse_date, BulkGrid, BulkRow};
use crate::config::ValidationLimits;
use crate::master::MasterData;
use crate::preview::{format_date_line, render_preview, PreviewOverlay};

pub fn handle(file: &Path, user: &str, verbose: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read input file: {}", file.display()))?;

    let masters = MasterData::defaults();
    let limits = ValidationLimits::default();
    let (rows, report) = parse_paste(&text, &masters, &limits);
    let grid = BulkGrid::from_rows(rows);

    for skipped in &report.skipped {
        println!(
            "{} line {}: {}",
            "skipped".yellow(),
            skipped.line_no,
            skipped.reason
        );
    }

    for (i, row) in grid.rows.iter().enumerate() {
        if row.valid {
            println!(
                "{} {:>3}  {} {} {}",
                "ok".green(),
                i + 1,
                row.property_code,
                row.vendor_name,
                row.inspection_type
            );
            if verbose {
                print_preview(&masters, row);
            }
        } else {
            println!(
                "{} {:>3}  {} {} {} — {}",
                "ng".red(),
                i + 1,
                row.property_code,
                row.vendor_name,
                row.inspection_type,
                row.errors.join(" / ").red()
            );
        }
    }

    println!(
        "{} rows imported ({} invalid), {} lines skipped",
        report.imported,
        grid.invalid_count(),
        report.skipped.len()
    );

    if snapshot_grid(&AutosaveStore::new()?, user, &grid)? {
        println!(
            "auto-saved for {} (`keiji-cli restore --user {}` lists the rows)",
            user.cyan(),
            user
        );
    }
    Ok(())
}

/// Persist the grid so `restore` can surface it later. Empty grids are not
/// written.
fn snapshot_grid(store: &AutosaveStore, user: &str, grid: &BulkGrid) -> Result<bool> {
    if grid.rows.is_empty() {
        return Ok(false);
    }
    store.save(user, &grid.rows)?;
    Ok(true)
}

/// Show what the poster preview would render for a row
fn print_preview(masters: &MasterData, row: &BulkRow) {
    let Some(start) = parse_date(&row.start_date) else {
        return;
    };
    let end = parse_date(&row.end_date);
    let template_no = row.template_no.trim().parse().ok();
    match render_preview(
        masters,
        template_no,
        &row.notice_text,
        start,
        end,
        &row.remarks,
    ) {
        PreviewOverlay::Poster { template_image, .. } => {
            println!(
                "       {} {} / {}",
                "preview".dimmed(),
                format_date_line(start, end),
                template_image
            );
        }
        PreviewOverlay::Placeholder { message } => {
            println!("       {} {}", "preview".dimmed(), message.yellow());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> AutosaveStore {
        let dir = std::env::temp_dir().join(format!("keiji-import-{}", uuid::Uuid::new_v4()));
        AutosaveStore::with_dir(dir)
    }

    #[test]
    fn test_imported_rows_survive_until_restore() {
        let masters = MasterData::defaults();
        let limits = ValidationLimits::default();
        let (rows, _) = parse_paste(
            "2010\t九州エレベーター工業\tエレベーター定期点検\t2025-12-15\t\t点検のため",
            &masters,
            &limits,
        );
        let grid = BulkGrid::from_rows(rows);

        let store = temp_store();
        assert!(snapshot_grid(&store, "user-9", &grid).unwrap());

        let snapshot = store.load("user-9").unwrap().unwrap();
        assert_eq!(snapshot.rows.len(), grid.rows.len());
        assert_eq!(snapshot.rows[0].property_code, "2010");
        assert_eq!(snapshot.rows[0].vendor_name, "九州エレベーター工業");
    }

    #[test]
    fn test_empty_grid_writes_no_snapshot() {
        let store = temp_store();
        assert!(!snapshot_grid(&store, "user-0", &BulkGrid::new()).unwrap());
        assert!(store.load("user-0").unwrap().is_none());
    }
}
