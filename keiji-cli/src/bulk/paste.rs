//! Tab-delimited paste import for the bulk grid
//!
//! Each pasted line is split on tabs. Lines with fewer than 3 fields are
//! skipped and reported; a first line matching a known header pattern is
//! skipped. Two layouts are recognized: a 6-column simple form (property,
//! vendor, inspection, start, end, remarks) and a ≥10-column full form
//! carrying the complete entry schema. Unknown master values are imported
//! as literal text; validation flags the row afterwards.

use regex::Regex;

use super::BulkRow;
use crate::config::ValidationLimits;
use crate::entry::PosterType;
use crate::master::MasterData;

/// Where the full layout's columns live, 0-based
const FULL_LAYOUT_MIN_COLS: usize = 10;

/// Outcome of a paste import
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<SkippedLine>,
}

/// A pasted line that was not turned into a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the pasted text
    pub line_no: usize,
    pub reason: String,
}

/// Parse pasted text into validated grid rows
pub fn parse_paste(
    text: &str,
    masters: &MasterData,
    limits: &ValidationLimits,
) -> (Vec<BulkRow>, ImportReport) {
    let mut rows = Vec::new();
    let mut report = ImportReport::default();
    let mut first_content_line = true;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').map(|f| f.trim()).collect();

        if first_content_line {
            first_content_line = false;
            if is_header_line(&fields) {
                report.skipped.push(SkippedLine {
                    line_no,
                    reason: "ヘッダー行をスキップしました".to_string(),
                });
                continue;
            }
        }

        if fields.len() < 3 {
            report.skipped.push(SkippedLine {
                line_no,
                reason: format!("列数が不足しています({}列)", fields.len()),
            });
            continue;
        }

        let mut row = if fields.len() >= FULL_LAYOUT_MIN_COLS {
            full_layout_row(&fields)
        } else {
            simple_layout_row(&fields)
        };
        resolve_masters(&mut row, masters);
        row.validate(masters, limits);
        rows.push(row);
    }

    report.imported = rows.len();
    (rows, report)
}

/// True when the first cell looks like a column header rather than data
fn is_header_line(fields: &[&str]) -> bool {
    let Some(first) = fields.first() else {
        return false;
    };
    Regex::new(r"(?i)^(物件|プロパティ|property)")
        .map(|re| re.is_match(first))
        .unwrap_or(false)
}

/// property, vendor, inspection, start, end, remarks
fn simple_layout_row(fields: &[&str]) -> BulkRow {
    let mut row = BulkRow::new();
    row.property_code = cell(fields, 0);
    row.vendor_name = cell(fields, 1);
    row.inspection_type = cell(fields, 2);
    let start = cell(fields, 3);
    if !start.is_empty() {
        row.start_date = start;
    }
    row.end_date = cell(fields, 4);
    row.remarks = cell(fields, 5);
    row
}

/// property, terminal, vendor, inspection, start, end, remarks, notice
/// text, display time, position, then the optional display-window columns
fn full_layout_row(fields: &[&str]) -> BulkRow {
    let mut row = BulkRow::new();
    row.property_code = cell(fields, 0);
    row.terminal_id = cell(fields, 1);
    row.vendor_name = cell(fields, 2);
    row.inspection_type = cell(fields, 3);
    let start = cell(fields, 4);
    if !start.is_empty() {
        row.start_date = start;
    }
    row.end_date = cell(fields, 5);
    row.remarks = cell(fields, 6);
    row.notice_text = cell(fields, 7);
    let display_time = cell(fields, 8);
    if !display_time.is_empty() {
        row.display_time = display_time;
    }
    let position = cell(fields, 9);
    if !position.is_empty() {
        row.position = position;
    }
    let display_start = cell(fields, 10);
    if !display_start.is_empty() {
        row.display_start_date = display_start;
    }
    row.display_end_date = cell(fields, 11);
    row.display_start_time = cell(fields, 12);
    row.display_end_time = cell(fields, 13);
    if let Some(flag) = fields.get(14) {
        row.show_on_board = parse_bool(flag);
    }
    if let Some(kind) = fields.get(15) {
        row.poster_type = parse_poster_type(kind);
    }
    row
}

/// Denormalize resolvable master values into the row; unknown values are
/// left as the pasted literal text
fn resolve_masters(row: &mut BulkRow, masters: &MasterData) {
    if let Some(vendor) = masters.vendor(row.vendor_name.trim()) {
        row.emergency_contact = vendor.emergency_contact.clone();
    }
    if let Some(notice) = masters.notice_by_name(row.inspection_type.trim()) {
        row.template_no = notice.template_no.to_string();
        if row.notice_text.is_empty() {
            row.notice_text = notice.default_text.clone();
            row.show_on_board = notice.show_on_board;
        }
    }
}

fn cell(fields: &[&str], index: usize) -> String {
    fields.get(index).copied().unwrap_or("").to_string()
}

fn parse_bool(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

fn parse_poster_type(text: &str) -> PosterType {
    match text.trim() {
        "追加" | "custom" => PosterType::Custom,
        _ => PosterType::Template,
    }
}
