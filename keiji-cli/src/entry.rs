//! The Entry record: one poster/notice instance
//!
//! Entries denormalize vendor contact and notice text at creation time, so
//! an entry stays valid and exportable even after the master lists change.

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Whether the poster uses a stock template or an uploaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterType {
    Template,
    Custom,
}

impl PosterType {
    /// Label emitted in the legacy CSV (ポスター種別 column)
    pub fn csv_label(&self) -> &'static str {
        match self {
            PosterType::Template => "テンプレート",
            PosterType::Custom => "追加",
        }
    }
}

impl Default for PosterType {
    fn default() -> Self {
        PosterType::Template
    }
}

impl std::fmt::Display for PosterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PosterType::Template => write!(f, "template"),
            PosterType::Custom => write!(f, "custom"),
        }
    }
}

/// Approval-workflow status carried on submitted records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Draft => "draft",
            EntryStatus::Pending => "pending",
            EntryStatus::Approved => "approved",
            EntryStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One poster/notice record accumulated before export or submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub property_code: u32,
    pub terminal_id: String,
    pub vendor_name: String,
    /// Copied from the vendor master at entry-creation time
    pub emergency_contact: String,
    pub inspection_type: String,
    pub template_no: Option<u32>,
    pub notice_text: String,
    pub remarks: String,
    /// Inspection window; `end_date` defaults to `start_date` on export
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Signage display window, distinct from the inspection window
    pub display_start_date: NaiveDate,
    pub display_end_date: Option<NaiveDate>,
    pub display_start_time: Option<NaiveTime>,
    pub display_end_time: Option<NaiveTime>,
    /// Seconds on screen, 1..=display_time_max
    pub display_time: u32,
    pub frame_no: u32,
    /// Layout slot, 0..=4
    pub position: u8,
    pub show_on_board: bool,
    pub poster_type: PosterType,
    /// Uploaded image reference, required when `poster_type` is custom
    pub image_ref: Option<String>,
}

impl Default for Entry {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            property_code: 0,
            terminal_id: String::new(),
            vendor_name: String::new(),
            emergency_contact: String::new(),
            inspection_type: String::new(),
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
        }
    }
}
