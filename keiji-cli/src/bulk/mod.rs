//! Bulk-entry grid: multi-row editing over Entry-shaped records
//!
//! Each row is an independent text-backed record with its own validity flag.
//! Unknown master values stay as literal text; the row is only flagged
//! invalid when a required lookup (the property's terminal list) cannot
//! resolve or a typed field does not parse.

pub mod autosave;
pub mod paste;

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::ValidationLimits;
use crate::entry::{Entry, PosterType};
use crate::form::{notice_text_violations, remarks_violations};
use crate::master::MasterData;

/// One grid row. Fields are kept as entered so unknown master values
/// survive import; parsing happens at validation/submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkRow {
    pub property_code: String,
    pub terminal_id: String,
    pub vendor_name: String,
    pub emergency_contact: String,
    pub inspection_type: String,
    pub template_no: String,
    pub start_date: String,
    pub end_date: String,
    pub remarks: String,
    pub notice_text: String,
    pub display_time: String,
    pub display_start_date: String,
    pub display_end_date: String,
    pub display_start_time: String,
    pub display_end_time: String,
    pub position: String,
    pub show_on_board: bool,
    pub poster_type: PosterType,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl BulkRow {
    pub fn new() -> Self {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        Self {
            property_code: String::new(),
            terminal_id: String::new(),
            vendor_name: String::new(),
            emergency_contact: String::new(),
            inspection_type: String::new(),
            template_no: String::new(),
            start_date: today.clone(),
            end_date: String::new(),
            remarks: String::new(),
            notice_text: String::new(),
            display_time: "6".to_string(),
            display_start_date: today,
            display_end_date: String::new(),
            display_start_time: String::new(),
            display_end_time: String::new(),
            position: "2".to_string(),
            show_on_board: true,
            poster_type: PosterType::Template,
            image_ref: String::new(),
            valid: false,
            errors: Vec::new(),
        }
    }

    /// Recompute the validity flag. Auto-fills the terminal from the
    /// property's primary terminal when it is blank and resolvable.
    pub fn validate(&mut self, masters: &MasterData, limits: &ValidationLimits) {
        let mut errors = Vec::new();

        if self.property_code.trim().is_empty() {
            errors.push("物件を選択してください".to_string());
        } else {
            match self.property_code.trim().parse::<u32>() {
                Ok(code) => {
                    let terminals = masters.terminals_for(code);
                    if terminals.is_empty() {
                        errors.push("端末リストを解決できません".to_string());
                    } else if self.terminal_id.trim().is_empty() {
                        self.terminal_id = terminals[0].clone();
                    }
                }
                Err(_) => errors.push("物件コードが不正です".to_string()),
            }
        }

        if self.vendor_name.trim().is_empty() {
            errors.push("業者を選択してください".to_string());
        }
        match self.poster_type {
            PosterType::Template => {
                if self.inspection_type.trim().is_empty() {
                    errors.push("点検工事案内を選択してください".to_string());
                }
            }
            PosterType::Custom => {
                if self.image_ref.trim().is_empty() {
                    errors.push("ポスター画像を指定してください".to_string());
                }
            }
        }

        match self.display_time.trim().parse::<u32>() {
            Ok(v) if (1..=limits.display_time_max).contains(&v) => {}
            _ => errors.push(format!(
                "表示時間は1〜{}秒で入力してください",
                limits.display_time_max
            )),
        }
        match self.position.trim().parse::<u8>() {
            Ok(v) if v <= 4 => {}
            _ => errors.push("表示位置は0〜4で選択してください".to_string()),
        }

        if parse_date(&self.start_date).is_none() {
            errors.push("開始日が不正です".to_string());
        }
        if !self.end_date.trim().is_empty() && parse_date(&self.end_date).is_none() {
            errors.push("終了日が不正です".to_string());
        }

        errors.extend(remarks_violations(&self.remarks, limits));
        errors.extend(notice_text_violations(&self.notice_text, limits));

        self.valid = errors.is_empty();
        self.errors = errors;
    }

    /// Convert into a typed entry. Assumes `validate` passed; any field
    /// that still fails to parse is reported.
    pub fn to_entry(&self) -> Result<Entry, Vec<String>> {
        let mut errors = Vec::new();
        let property_code = match self.property_code.trim().parse::<u32>() {
            Ok(v) => v,
            Err(_) => {
                errors.push("物件コードが不正です".to_string());
                0
            }
        };
        let start_date = match parse_date(&self.start_date) {
            Some(d) => d,
            None => {
                errors.push("開始日が不正です".to_string());
                Local::now().date_naive()
            }
        };
        let display_time = match self.display_time.trim().parse::<u32>() {
            Ok(v) => v,
            Err(_) => {
                errors.push("表示時間が不正です".to_string());
                0
            }
        };
        let position = match self.position.trim().parse::<u8>() {
            Ok(v) => v,
            Err(_) => {
                errors.push("表示位置が不正です".to_string());
                0
            }
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Entry {
            property_code,
            terminal_id: self.terminal_id.trim().to_string(),
            vendor_name: self.vendor_name.trim().to_string(),
            emergency_contact: self.emergency_contact.trim().to_string(),
            inspection_type: self.inspection_type.trim().to_string(),
            template_no: self.template_no.trim().parse().ok(),
            notice_text: self.notice_text.clone(),
            remarks: self.remarks.clone(),
            start_date,
            end_date: parse_date(&self.end_date),
            display_start_date: parse_date(&self.display_start_date).unwrap_or(start_date),
            display_end_date: parse_date(&self.display_end_date),
            display_start_time: parse_time(&self.display_start_time),
            display_end_time: parse_time(&self.display_end_time),
            display_time,
            frame_no: 0,
            position,
            show_on_board: self.show_on_board,
            poster_type: self.poster_type,
            image_ref: if self.image_ref.trim().is_empty() {
                None
            } else {
                Some(self.image_ref.trim().to_string())
            },
        })
    }
}

impl Default for BulkRow {
    fn default() -> Self {
        Self::new()
    }
}

/// Fields targeted by a bulk overwrite over the selected rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkField {
    VendorName,
    InspectionType,
    StartDate,
    EndDate,
    DisplayTime,
    DisplayStartDate,
    DisplayEndDate,
    Position,
    Remarks,
}

/// The bulk page's grid: rows, multi-row selection, and a row clipboard
#[derive(Debug, Clone, Default)]
pub struct BulkGrid {
    pub rows: Vec<BulkRow>,
    selection: BTreeSet<usize>,
    clipboard: Option<BulkRow>,
}

impl BulkGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<BulkRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Append a fresh row, returning its index
    pub fn add_row(&mut self) -> usize {
        self.rows.push(BulkRow::new());
        self.rows.len() - 1
    }

    /// Insert a copy of row `index` directly below it
    pub fn duplicate_row(&mut self, index: usize) -> Option<usize> {
        let row = self.rows.get(index)?.clone();
        self.rows.insert(index + 1, row);
        self.selection.clear();
        Some(index + 1)
    }

    pub fn insert_above(&mut self, index: usize) -> Option<usize> {
        if index > self.rows.len() {
            return None;
        }
        self.rows.insert(index, BulkRow::new());
        self.selection.clear();
        Some(index)
    }

    pub fn insert_below(&mut self, index: usize) -> Option<usize> {
        if index >= self.rows.len() {
            return None;
        }
        self.rows.insert(index + 1, BulkRow::new());
        self.selection.clear();
        Some(index + 1)
    }

    pub fn delete_row(&mut self, index: usize) -> Option<BulkRow> {
        if index >= self.rows.len() {
            return None;
        }
        self.selection.clear();
        Some(self.rows.remove(index))
    }

    /// Drag-reorder: move the row at `from` so it lands at `to`
    pub fn move_row(&mut self, from: usize, to: usize) -> bool {
        if from >= self.rows.len() || to >= self.rows.len() {
            return false;
        }
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        self.selection.clear();
        true
    }

    pub fn copy_row(&mut self, index: usize) -> bool {
        match self.rows.get(index) {
            Some(row) => {
                self.clipboard = Some(row.clone());
                true
            }
            None => false,
        }
    }

    /// Overwrite row `index` with the clipboard row
    pub fn paste_row(&mut self, index: usize) -> bool {
        match (&self.clipboard, self.rows.get_mut(index)) {
            (Some(clip), Some(row)) => {
                *row = clip.clone();
                true
            }
            _ => false,
        }
    }

    pub fn toggle_select(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        if !self.selection.remove(&index) {
            self.selection.insert(index);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected(&self) -> Vec<usize> {
        self.selection.iter().copied().collect()
    }

    /// Overwrite one field across every selected row, returning the number
    /// of rows touched
    pub fn bulk_apply(&mut self, field: BulkField, value: &str) -> usize {
        let mut touched = 0;
        for &i in &self.selection {
            if let Some(row) = self.rows.get_mut(i) {
                apply_field(row, field, value);
                touched += 1;
            }
        }
        touched
    }

    pub fn validate_all(&mut self, masters: &MasterData, limits: &ValidationLimits) {
        for row in &mut self.rows {
            row.validate(masters, limits);
        }
    }

    pub fn valid_rows(&self) -> impl Iterator<Item = &BulkRow> {
        self.rows.iter().filter(|r| r.valid)
    }

    pub fn invalid_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.valid).count()
    }
}

fn apply_field(row: &mut BulkRow, field: BulkField, value: &str) {
    let value = value.to_string();
    match field {
        BulkField::VendorName => row.vendor_name = value,
        BulkField::InspectionType => row.inspection_type = value,
        BulkField::StartDate => row.start_date = value,
        BulkField::EndDate => row.end_date = value,
        BulkField::DisplayTime => row.display_time = value,
        BulkField::DisplayStartDate => row.display_start_date = value,
        BulkField::DisplayEndDate => row.display_end_date = value,
        BulkField::Position => row.position = value,
        BulkField::Remarks => row.remarks = value,
    }
}

/// Client-side substring filter for long dropdown option lists
pub fn filter_options<'a>(options: &'a [String], query: &str) -> Vec<&'a str> {
    let query = query.trim().to_lowercase();
    options
        .iter()
        .filter(|o| query.is_empty() || o.to_lowercase().contains(&query))
        .map(|o| o.as_str())
        .collect()
}

/// Accept the entry form (`2025-12-15`) and the legacy form (`2025/12/15`)
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y/%m/%d"))
        .ok()
}

pub(crate) fn parse_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_row() -> BulkRow {
        let mut row = BulkRow::new();
        row.property_code = "2010".to_string();
        row.vendor_name = "九州エレベーター工業".to_string();
        row.inspection_type = "エレベーター定期点検".to_string();
        row.start_date = "2025-12-15".to_string();
        row
    }

    #[test]
    fn test_valid_row_passes_and_autofills_terminal() {
        let masters = MasterData::defaults();
        let limits = ValidationLimits::default();
        let mut row = valid_row();
        row.validate(&masters, &limits);
        assert!(row.valid, "errors: {:?}", row.errors);
        assert_eq!(row.terminal_id, "h0001A00");
    }

    #[test]
    fn test_unresolvable_terminal_list_flags_invalid_but_keeps_text() {
        let masters = MasterData::defaults();
        let limits = ValidationLimits::default();
        let mut row = valid_row();
        row.property_code = "888888".to_string();
        row.validate(&masters, &limits);
        assert!(!row.valid);
        assert!(row.errors.iter().any(|e| e.contains("端末")));
        assert_eq!(row.property_code, "888888");
        assert_eq!(row.vendor_name, "九州エレベーター工業");
    }

    #[test]
    fn test_display_time_and_position_parsing() {
        let masters = MasterData::defaults();
        let limits = ValidationLimits::default();
        let mut row = valid_row();
        row.display_time = "abc".to_string();
        row.position = "9".to_string();
        row.validate(&masters, &limits);
        assert!(!row.valid);
        assert!(row.errors.iter().any(|e| e.contains("表示時間")));
        assert!(row.errors.iter().any(|e| e.contains("表示位置")));
    }

    #[test]
    fn test_to_entry_round_trip() {
        let masters = MasterData::defaults();
        let limits = ValidationLimits::default();
        let mut row = valid_row();
        row.end_date = "2025-12-16".to_string();
        row.display_time = "8".to_string();
        row.validate(&masters, &limits);
        let entry = row.to_entry().unwrap();
        assert_eq!(entry.property_code, 2010);
        assert_eq!(entry.terminal_id, "h0001A00");
        assert_eq!(entry.display_time, 8);
        assert_eq!(
            entry.end_date,
            NaiveDate::from_ymd_opt(2025, 12, 16)
        );
    }

    #[test]
    fn test_grid_duplicate_and_move() {
        let mut grid = BulkGrid::new();
        grid.add_row();
        grid.rows[0].property_code = "2010".to_string();
        grid.add_row();
        grid.rows[1].property_code = "1203".to_string();

        let dup = grid.duplicate_row(0).unwrap();
        assert_eq!(dup, 1);
        assert_eq!(grid.rows[1].property_code, "2010");
        assert_eq!(grid.rows.len(), 3);

        assert!(grid.move_row(2, 0));
        assert_eq!(grid.rows[0].property_code, "1203");
        assert!(!grid.move_row(9, 0));
    }

    #[test]
    fn test_grid_insert_and_delete() {
        let mut grid = BulkGrid::new();
        grid.add_row();
        grid.rows[0].remarks = "既存".to_string();

        grid.insert_above(0).unwrap();
        assert!(grid.rows[0].remarks.is_empty());
        grid.insert_below(1).unwrap();
        assert_eq!(grid.rows.len(), 3);

        let removed = grid.delete_row(1).unwrap();
        assert_eq!(removed.remarks, "既存");
        assert!(grid.delete_row(10).is_none());
    }

    #[test]
    fn test_copy_paste_row() {
        let mut grid = BulkGrid::new();
        grid.add_row();
        grid.rows[0].vendor_name = "福岡ビルメンテナンス".to_string();
        grid.add_row();

        assert!(grid.copy_row(0));
        assert!(grid.paste_row(1));
        assert_eq!(grid.rows[1].vendor_name, "福岡ビルメンテナンス");
        assert!(!grid.paste_row(5));
    }

    #[test]
    fn test_bulk_apply_over_selection() {
        let mut grid = BulkGrid::new();
        for _ in 0..3 {
            grid.add_row();
        }
        grid.toggle_select(0);
        grid.toggle_select(2);
        let touched = grid.bulk_apply(BulkField::DisplayTime, "15");
        assert_eq!(touched, 2);
        assert_eq!(grid.rows[0].display_time, "15");
        assert_eq!(grid.rows[1].display_time, "6");
        assert_eq!(grid.rows[2].display_time, "15");
    }

    #[test]
    fn test_toggle_select() {
        let mut grid = BulkGrid::new();
        grid.add_row();
        grid.toggle_select(0);
        assert_eq!(grid.selected(), vec![0]);
        grid.toggle_select(0);
        assert!(grid.selected().is_empty());
        grid.toggle_select(7); // out of range, ignored
        assert!(grid.selected().is_empty());
    }

    #[test]
    fn test_filter_options() {
        let options = vec![
            "エレベーター定期点検".to_string(),
            "定期清掃".to_string(),
            "工事のお知らせ".to_string(),
        ];
        assert_eq!(filter_options(&options, "定期").len(), 2);
        assert_eq!(filter_options(&options, "").len(), 3);
        assert!(filter_options(&options, "xyz").is_empty());
    }

    #[test]
    fn test_parse_date_both_forms() {
        assert!(parse_date("2025-12-15").is_some());
        assert!(parse_date("2025/12/15").is_some());
        assert!(parse_date("12/15").is_none());
    }
}
