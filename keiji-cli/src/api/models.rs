//! Wire types for the backend REST interface

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryStatus, PosterType};

/// One entry row as inserted into the backend (snake_case schema)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub property_code: u32,
    pub terminal_id: String,
    pub vendor_name: String,
    pub emergency_contact: String,
    pub inspection_type: String,
    pub template_no: Option<u32>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub remarks: String,
    pub notice_text: String,
    pub display_time: u32,
    pub display_start_date: NaiveDate,
    pub display_end_date: Option<NaiveDate>,
    pub display_start_time: Option<NaiveTime>,
    pub display_end_time: Option<NaiveTime>,
    pub show_on_board: bool,
    pub poster_type: PosterType,
    pub position: u8,
    pub status: EntryStatus,
    pub user_id: String,
}

impl EntryRecord {
    /// Build the insert payload for an entry
    pub fn from_entry(entry: &Entry, status: EntryStatus, user_id: &str) -> Self {
        Self {
            property_code: entry.property_code,
            terminal_id: entry.terminal_id.clone(),
            vendor_name: entry.vendor_name.clone(),
            emergency_contact: entry.emergency_contact.clone(),
            inspection_type: entry.inspection_type.clone(),
            template_no: entry.template_no,
            start_date: entry.start_date,
            end_date: entry.end_date,
            remarks: entry.remarks.clone(),
            notice_text: entry.notice_text.clone(),
            display_time: entry.display_time,
            display_start_date: entry.display_start_date,
            display_end_date: entry.display_end_date,
            display_start_time: entry.display_start_time,
            display_end_time: entry.display_end_time,
            show_on_board: entry.show_on_board,
            poster_type: entry.poster_type,
            position: entry.position,
            status,
            user_id: user_id.to_string(),
        }
    }
}

/// The authenticated user, as returned by the auth endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// One key→value row from the settings table
#[derive(Debug, Clone, Deserialize)]
pub struct SettingRow {
    pub key: String,
    pub value: String,
}
