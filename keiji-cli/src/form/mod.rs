//! Form/state controller for the single-entry page
//!
//! `FormState` owns the form fields, the ordered entry list and the editing
//! index. Every mutating operation goes through it; there is no module-level
//! state. Selects are keyed by stable keys (property code, vendor name,
//! notice id), never by option index.

use chrono::{Local, NaiveDate, NaiveTime};

use crate::config::ValidationLimits;
use crate::entry::{Entry, PosterType};
use crate::master::MasterData;

/// Every rule violated by an attempted add/update, in check order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages.join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}

/// All mutable page state: form fields, entry list, editing index
#[derive(Debug, Clone)]
pub struct FormState {
    pub masters: MasterData,
    pub limits: ValidationLimits,

    pub property_code: Option<u32>,
    pub terminal_id: Option<String>,
    /// Terminal sublist for the selected property, in master order
    pub terminal_options: Vec<String>,
    pub vendor_name: Option<String>,
    /// Read-only display field, denormalized on vendor selection
    pub emergency_contact: String,
    /// Selected notice name; empty selection is `None`
    pub inspection_type: Option<String>,
    pub template_no: Option<u32>,
    pub notice_text: String,
    pub remarks: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub display_start_date: NaiveDate,
    pub display_end_date: Option<NaiveDate>,
    pub display_start_time: Option<NaiveTime>,
    pub display_end_time: Option<NaiveTime>,
    pub display_time: u32,
    pub frame_no: u32,
    pub position: u8,
    pub show_on_board: bool,
    pub poster_type: PosterType,
    pub image_ref: Option<String>,

    pub entries: Vec<Entry>,
    editing: Option<usize>,
}

impl FormState {
    pub fn new(masters: MasterData, limits: ValidationLimits) -> Self {
        let today = Local::now().date_naive();
        Self {
            masters,
            limits,
            property_code: None,
            terminal_id: None,
            terminal_options: Vec::new(),
            vendor_name: None,
            emergency_contact: String::new(),
            inspection_type: None,
            template_no: None,
            notice_text: String::new(),
            remarks: String::new(),
            start_date: today,
            end_date: None,
            display_start_date: today,
            display_end_date: None,
            display_start_time: None,
            display_end_time: None,
            display_time: 6,
            frame_no: 0,
            position: 2,
            show_on_board: true,
            poster_type: PosterType::Template,
            image_ref: None,
            entries: Vec::new(),
            editing: None,
        }
    }

    /// Index of the entry currently loaded for editing, if any
    pub fn editing_index(&self) -> Option<usize> {
        self.editing
    }

    /// Select a property: refresh the terminal sublist and auto-select the
    /// first terminal, clearing the selection when the property has none
    pub fn select_property(&mut self, code: u32) {
        self.property_code = Some(code);
        self.terminal_options = self.masters.terminals_for(code);
        self.terminal_id = self.terminal_options.first().cloned();
    }

    /// Select a vendor by name, denormalizing its emergency contact into the
    /// display field. `None` (or an unknown name) clears both.
    pub fn select_vendor(&mut self, name: Option<&str>) {
        match name.and_then(|n| self.masters.vendor(n)) {
            Some(v) => {
                self.vendor_name = Some(v.name.clone());
                self.emergency_contact = v.emergency_contact.clone();
            }
            None => {
                self.vendor_name = None;
                self.emergency_contact.clear();
            }
        }
    }

    /// Select an inspection notice by stable id, copying its display flag,
    /// default text and template number into the form
    pub fn select_inspection_type(&mut self, id: Option<&str>) {
        match id.and_then(|i| self.masters.notice(i)) {
            Some(n) => {
                self.inspection_type = Some(n.name.clone());
                self.template_no = Some(n.template_no);
                self.notice_text = n.default_text.clone();
                self.show_on_board = n.show_on_board;
            }
            None => {
                self.inspection_type = None;
                self.template_no = None;
            }
        }
    }

    /// Clamp-adjust the display time by `delta` seconds (stepper controls)
    pub fn step_display_time(&mut self, delta: i32) {
        let next = self.display_time as i64 + delta as i64;
        // The upper bound never drops below the lower one, whatever the
        // limits hold
        let max = i64::from(self.limits.display_time_max).max(1);
        self.display_time = next.clamp(1, max) as u32;
    }

    /// Validate the current form and append a new entry, or replace the
    /// entry being edited. On failure nothing changes and every violated
    /// rule is returned.
    pub fn add_or_update_entry(&mut self) -> Result<usize, ValidationErrors> {
        let messages = self.validate();
        if !messages.is_empty() {
            return Err(ValidationErrors::new(messages));
        }
        let entry = self.build_entry();
        match self.editing.take() {
            Some(i) if i < self.entries.len() => {
                self.entries[i] = entry;
                Ok(i)
            }
            _ => {
                self.entries.push(entry);
                Ok(self.entries.len() - 1)
            }
        }
    }

    /// Load an entry back into the form for editing. Returns false when the
    /// index is out of range.
    pub fn edit_entry(&mut self, index: usize) -> bool {
        let Some(e) = self.entries.get(index).cloned() else {
            return false;
        };
        self.property_code = Some(e.property_code);
        self.terminal_options = self.masters.terminals_for(e.property_code);
        // The stored terminal wins even if it no longer appears in the
        // master list; entries stay valid after master drift.
        self.terminal_id = Some(e.terminal_id.clone());
        self.vendor_name = Some(e.vendor_name.clone());
        self.emergency_contact = e.emergency_contact.clone();
        self.inspection_type = if e.inspection_type.is_empty() {
            None
        } else {
            Some(e.inspection_type.clone())
        };
        self.template_no = e.template_no;
        self.notice_text = e.notice_text.clone();
        self.remarks = e.remarks.clone();
        self.start_date = e.start_date;
        self.end_date = e.end_date;
        self.display_start_date = e.display_start_date;
        self.display_end_date = e.display_end_date;
        self.display_start_time = e.display_start_time;
        self.display_end_time = e.display_end_time;
        self.display_time = e.display_time;
        self.frame_no = e.frame_no;
        self.position = e.position;
        self.show_on_board = e.show_on_board;
        self.poster_type = e.poster_type;
        self.image_ref = e.image_ref.clone();
        self.editing = Some(index);
        true
    }

    /// Remove the entry at `index`. The caller is responsible for asking the
    /// user to confirm before calling this.
    pub fn delete_entry(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            return None;
        }
        if self.editing == Some(index) {
            self.editing = None;
        }
        Some(self.entries.remove(index))
    }

    /// Reset every form field to its default; the entry list is kept
    pub fn clear_form(&mut self) {
        let today = Local::now().date_naive();
        self.property_code = None;
        self.terminal_id = None;
        self.terminal_options.clear();
        self.vendor_name = None;
        self.emergency_contact.clear();
        self.inspection_type = None;
        self.template_no = None;
        self.notice_text.clear();
        self.remarks.clear();
        self.start_date = today;
        self.end_date = None;
        self.display_start_date = today;
        self.display_end_date = None;
        self.display_start_time = None;
        self.display_end_time = None;
        self.display_time = 6;
        self.frame_no = 0;
        self.position = 2;
        self.show_on_board = true;
        self.poster_type = PosterType::Template;
        self.image_ref = None;
        self.editing = None;
    }

    /// Collect every violated rule for the current form values
    fn validate(&self) -> Vec<String> {
        let mut messages = Vec::new();

        if self.property_code.is_none() {
            messages.push("物件を選択してください".to_string());
        }
        if self.vendor_name.as_deref().unwrap_or("").is_empty() {
            messages.push("業者を選択してください".to_string());
        }
        match self.poster_type {
            PosterType::Template => {
                if self.inspection_type.as_deref().unwrap_or("").is_empty() {
                    messages.push("点検工事案内を選択してください".to_string());
                }
            }
            PosterType::Custom => {
                if self.image_ref.as_deref().unwrap_or("").is_empty() {
                    messages.push("ポスター画像を指定してください".to_string());
                }
            }
        }
        if self.display_time < 1 || self.display_time > self.limits.display_time_max {
            messages.push(format!(
                "表示時間は1〜{}秒で入力してください",
                self.limits.display_time_max
            ));
        }
        if self.position > 4 {
            messages.push("表示位置は0〜4で選択してください".to_string());
        }
        messages.extend(remarks_violations(&self.remarks, &self.limits));
        messages.extend(notice_text_violations(&self.notice_text, &self.limits));

        messages
    }

    /// Materialize an entry from the current form values
    fn build_entry(&self) -> Entry {
        Entry {
            property_code: self.property_code.unwrap_or(0),
            terminal_id: self.terminal_id.clone().unwrap_or_default(),
            vendor_name: self.vendor_name.clone().unwrap_or_default(),
            emergency_contact: self.emergency_contact.clone(),
            inspection_type: self.inspection_type.clone().unwrap_or_default(),
            template_no: self.template_no,
            notice_text: self.notice_text.clone(),
            remarks: self.remarks.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            display_start_date: self.display_start_date,
            display_end_date: self.display_end_date,
            display_start_time: self.display_start_time,
            display_end_time: self.display_end_time,
            display_time: self.display_time,
            frame_no: self.frame_no,
            position: self.position,
            show_on_board: self.show_on_board,
            poster_type: self.poster_type,
            image_ref: self.image_ref.clone(),
        }
    }
}

/// Remarks line-count and line-length rules, shared with the bulk grid
pub(crate) fn remarks_violations(remarks: &str, limits: &ValidationLimits) -> Vec<String> {
    let mut messages = Vec::new();
    if remarks.is_empty() {
        return messages;
    }
    let lines: Vec<&str> = remarks.split('\n').collect();
    if lines.len() > limits.remarks_max_lines {
        messages.push(format!(
            "備考は{}行以内で入力してください",
            limits.remarks_max_lines
        ));
    }
    if lines
        .iter()
        .any(|l| l.chars().count() > limits.remarks_chars_per_line)
    {
        messages.push(format!(
            "備考は1行{}文字以内で入力してください",
            limits.remarks_chars_per_line
        ));
    }
    messages
}

/// Notice-text length rule, shared with the bulk grid
pub(crate) fn notice_text_violations(notice_text: &str, limits: &ValidationLimits) -> Vec<String> {
    if notice_text.chars().count() > limits.notice_text_max_chars {
        vec![format!(
            "案内文は{}文字以内で入力してください",
            limits.notice_text_max_chars
        )]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormState {
        FormState::new(MasterData::defaults(), ValidationLimits::default())
    }

    fn filled_form() -> FormState {
        let mut f = form();
        f.select_property(2010);
        f.select_vendor(Some("九州エレベーター工業"));
        f.select_inspection_type(Some("elevator-periodic"));
        f
    }

    #[test]
    fn test_select_property_auto_selects_first_terminal() {
        let mut f = form();
        f.select_property(2010);
        assert_eq!(f.terminal_options.len(), 7);
        assert_eq!(f.terminal_id.as_deref(), Some("h0001A00"));

        f.select_property(120406);
        assert_eq!(f.terminal_options, vec!["z1003A01".to_string()]);
        assert_eq!(f.terminal_id.as_deref(), Some("z1003A01"));
    }

    #[test]
    fn test_select_property_without_terminals_clears_selection() {
        let mut f = form();
        f.select_property(2010);
        f.select_property(999999);
        assert!(f.terminal_options.is_empty());
        assert!(f.terminal_id.is_none());
    }

    #[test]
    fn test_select_vendor_copies_contact() {
        let mut f = form();
        f.select_vendor(Some("九州エレベーター工業"));
        assert_eq!(f.emergency_contact, "092-934-0407");

        f.select_vendor(None);
        assert!(f.vendor_name.is_none());
        assert!(f.emergency_contact.is_empty());
    }

    #[test]
    fn test_select_inspection_copies_notice_fields() {
        let mut f = form();
        f.select_inspection_type(Some("water-outage"));
        assert_eq!(f.inspection_type.as_deref(), Some("断水のお知らせ"));
        assert_eq!(f.template_no, Some(4));
        assert!(!f.show_on_board);
        assert!(f.notice_text.contains("断水"));
    }

    #[test]
    fn test_add_entry_denormalizes_vendor_contact() {
        let mut f = filled_form();
        let idx = f.add_or_update_entry().unwrap();
        assert_eq!(idx, 0);
        assert_eq!(f.entries[0].emergency_contact, "092-934-0407");
        assert_eq!(f.entries[0].property_code, 2010);
    }

    #[test]
    fn test_add_without_inspection_reports_rule_and_leaves_state() {
        let mut f = filled_form();
        f.select_inspection_type(None);
        let err = f.add_or_update_entry().unwrap_err();
        assert!(err.to_string().contains("点検工事案内"));
        assert!(f.entries.is_empty());
    }

    #[test]
    fn test_multiple_violations_all_reported() {
        let mut f = form();
        f.display_time = 45;
        let err = f.add_or_update_entry().unwrap_err();
        let joined = err.to_string();
        assert!(joined.contains("物件"));
        assert!(joined.contains("業者"));
        assert!(joined.contains("表示時間は1〜30秒"));
        assert!(f.entries.is_empty());
    }

    #[test]
    fn test_display_time_out_of_range_rejected() {
        let mut f = filled_form();
        f.display_time = 0;
        assert!(f.add_or_update_entry().is_err());
        f.display_time = 31;
        assert!(f.add_or_update_entry().is_err());
        f.display_time = 30;
        assert!(f.add_or_update_entry().is_ok());
    }

    #[test]
    fn test_stepper_clamps_to_range() {
        let mut f = form();
        f.step_display_time(100);
        assert_eq!(f.display_time, 30);
        f.step_display_time(-100);
        assert_eq!(f.display_time, 1);
        f.step_display_time(1);
        assert_eq!(f.display_time, 2);
    }

    #[test]
    fn test_remarks_limits() {
        let mut f = filled_form();
        f.remarks = "あ\n".repeat(6).trim_end().to_string();
        let err = f.add_or_update_entry().unwrap_err();
        assert!(err.to_string().contains("5行以内"));

        f.remarks = "あ".repeat(26);
        let err = f.add_or_update_entry().unwrap_err();
        assert!(err.to_string().contains("25文字以内"));

        f.remarks = "通路側をご利用ください".to_string();
        assert!(f.add_or_update_entry().is_ok());
    }

    #[test]
    fn test_notice_text_max_chars() {
        let mut f = filled_form();
        f.notice_text = "あ".repeat(201);
        let err = f.add_or_update_entry().unwrap_err();
        assert!(err.to_string().contains("200文字以内"));
    }

    #[test]
    fn test_custom_poster_requires_image_not_inspection() {
        let mut f = form();
        f.select_property(2010);
        f.select_vendor(Some("福岡ビルメンテナンス"));
        f.poster_type = PosterType::Custom;
        let err = f.add_or_update_entry().unwrap_err();
        assert!(err.to_string().contains("ポスター画像"));
        assert!(!err.to_string().contains("点検工事案内"));

        f.image_ref = Some("uploads/poster-001.png".to_string());
        assert!(f.add_or_update_entry().is_ok());
    }

    #[test]
    fn test_add_then_edit_round_trips_every_field() {
        let mut f = filled_form();
        f.remarks = "ご協力をお願いします".to_string();
        f.start_date = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
        f.end_date = NaiveDate::from_ymd_opt(2025, 12, 16);
        f.display_start_date = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
        f.display_end_date = NaiveDate::from_ymd_opt(2025, 12, 16);
        f.display_start_time = NaiveTime::from_hms_opt(9, 0, 0);
        f.display_end_time = NaiveTime::from_hms_opt(18, 30, 0);
        f.display_time = 12;
        f.position = 4;
        f.add_or_update_entry().unwrap();

        let snapshot = f.entries[0].clone();
        f.clear_form();
        assert!(f.edit_entry(0));
        assert_eq!(f.editing_index(), Some(0));
        assert_eq!(f.property_code, Some(2010));
        assert_eq!(f.terminal_id.as_deref(), Some("h0001A00"));
        assert_eq!(f.vendor_name.as_deref(), Some("九州エレベーター工業"));
        assert_eq!(f.emergency_contact, "092-934-0407");
        assert_eq!(f.inspection_type.as_deref(), Some("エレベーター定期点検"));
        assert_eq!(f.display_time, 12);
        assert_eq!(f.position, 4);

        // Re-adding reproduces the exact record
        f.add_or_update_entry().unwrap();
        assert_eq!(f.entries.len(), 1);
        assert_eq!(f.entries[0], snapshot);
    }

    #[test]
    fn test_update_replaces_entry_at_edit_index() {
        let mut f = filled_form();
        f.add_or_update_entry().unwrap();
        f.select_vendor(Some("福岡ビルメンテナンス"));
        f.add_or_update_entry().unwrap();
        assert_eq!(f.entries.len(), 2);

        f.edit_entry(0);
        f.display_time = 20;
        let idx = f.add_or_update_entry().unwrap();
        assert_eq!(idx, 0);
        assert_eq!(f.entries.len(), 2);
        assert_eq!(f.entries[0].display_time, 20);
        assert!(f.editing_index().is_none());
    }

    #[test]
    fn test_failed_update_keeps_edit_mode() {
        let mut f = filled_form();
        f.add_or_update_entry().unwrap();
        f.edit_entry(0);
        f.display_time = 0;
        assert!(f.add_or_update_entry().is_err());
        assert_eq!(f.editing_index(), Some(0));
        assert_eq!(f.entries[0].display_time, 6);
    }

    #[test]
    fn test_delete_entry() {
        let mut f = filled_form();
        f.add_or_update_entry().unwrap();
        assert!(f.delete_entry(5).is_none());
        let removed = f.delete_entry(0).unwrap();
        assert_eq!(removed.property_code, 2010);
        assert!(f.entries.is_empty());
    }

    #[test]
    fn test_stepper_tolerates_zero_max() {
        let mut f = filled_form();
        f.limits.display_time_max = 0;
        f.step_display_time(5);
        assert_eq!(f.display_time, 1);
        f.step_display_time(-5);
        assert_eq!(f.display_time, 1);
    }

    #[test]
    fn test_clear_form_resets_defaults() {
        let mut f = filled_form();
        f.add_or_update_entry().unwrap();
        f.remarks = "メモ".to_string();
        f.display_time = 20;
        f.position = 0;
        f.poster_type = PosterType::Custom;
        f.end_date = NaiveDate::from_ymd_opt(2025, 12, 20);
        f.clear_form();

        let today = Local::now().date_naive();
        assert!(f.property_code.is_none());
        assert!(f.vendor_name.is_none());
        assert!(f.inspection_type.is_none());
        assert_eq!(f.display_time, 6);
        assert_eq!(f.position, 2);
        assert_eq!(f.poster_type, PosterType::Template);
        assert_eq!(f.start_date, today);
        assert_eq!(f.display_start_date, today);
        assert!(f.end_date.is_none());
        assert!(f.display_end_date.is_none());
        // Clearing the form does not touch the entry list
        assert_eq!(f.entries.len(), 1);
    }

    #[test]
    fn test_edit_mode_failed_validation_keeps_state_unchanged() {
        let mut f = filled_form();
        f.add_or_update_entry().unwrap();
        let before = f.entries.clone();
        f.edit_entry(0);
        f.notice_text = "あ".repeat(300);
        assert!(f.add_or_update_entry().is_err());
        assert_eq!(f.entries, before);
    }
}
