//! Poster preview composition
//!
//! Pure functions from the current form values to the preview overlay.
//! Dates render as `M月D日(曜)` with the Japanese weekday abbreviations,
//! appending `〜M月D日(曜)` when the end date differs from the start.

use chrono::{Datelike, NaiveDate};

use crate::master::MasterData;

const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// What the preview pane shows for the current form values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOverlay {
    /// A template background with the text overlay composed on top
    Poster {
        template_image: String,
        notice_text: String,
        date_line: String,
        remarks: String,
    },
    /// No template resolved for the selection
    Placeholder { message: String },
}

/// Compose the preview overlay for the selected template and form values
pub fn render_preview(
    masters: &MasterData,
    template_no: Option<u32>,
    notice_text: &str,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    remarks: &str,
) -> PreviewOverlay {
    let image = template_no.and_then(|no| masters.template_image(no));
    match image {
        Some(image) => PreviewOverlay::Poster {
            template_image: image.to_string(),
            notice_text: notice_text.to_string(),
            date_line: format_date_line(start_date, end_date),
            remarks: remarks.to_string(),
        },
        None => PreviewOverlay::Placeholder {
            message: "テンプレートが見つかりません".to_string(),
        },
    }
}

/// `M月D日(曜)`, with `〜M月D日(曜)` appended when the end date differs
pub fn format_date_line(start: NaiveDate, end: Option<NaiveDate>) -> String {
    let mut line = format_md(start);
    if let Some(end) = end {
        if end != start {
            line.push('〜');
            line.push_str(&format_md(end));
        }
    }
    line
}

fn format_md(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    format!("{}月{}日({})", date.month(), date.day(), weekday)
}
