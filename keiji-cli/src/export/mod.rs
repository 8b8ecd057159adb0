//! CSV serialization for the signage pipeline
//!
//! Emits the fixed 28-column legacy schema: dates as `YYYY/MM/DD`, the
//! display time as `0:00:SS`, booleans as `True`/`False`, embedded newlines
//! CRLF-normalized, and RFC-4180 quoting (a field is quoted iff it contains
//! a comma, double quote or newline). Files are written with a UTF-8 BOM.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::entry::Entry;

/// The fixed legacy header, in schema order
pub const CSV_HEADER: [&str; 28] = [
    "物件コード",
    "端末ID",
    "業者名",
    "緊急連絡先",
    "点検種別",
    "テンプレートNo",
    "点検開始日",
    "点検終了日",
    "案内文",
    "備考",
    "表示開始日",
    "表示終了日",
    "表示開始時刻",
    "表示終了時刻",
    "表示時間",
    "フレームNo",
    "表示位置",
    "掲示板表示",
    "ポスター種別",
    "統合ポリシー",
    "制御",
    "コンテンツID",
    "グループID",
    "スケジュールID",
    "画像ファイル",
    "作成者",
    "承認状態",
    "エクスポート日時",
];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Serialize entries to CSV text (no BOM; the file writer adds it)
pub fn generate_csv(entries: &[Entry], exported_at: NaiveDateTime) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut wtr = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .from_writer(&mut buf);
        wtr.write_record(CSV_HEADER)
            .context("Failed to write CSV header")?;
        for entry in entries {
            wtr.write_record(&entry_row(entry, exported_at))
                .context("Failed to write CSV row")?;
        }
        wtr.flush().context("Failed to flush CSV writer")?;
    }
    String::from_utf8(buf).context("CSV output was not valid UTF-8")
}

/// Write the CSV to `path` with a UTF-8 BOM prefix
pub fn write_csv_file(path: &Path, entries: &[Entry], exported_at: NaiveDateTime) -> Result<()> {
    let csv = generate_csv(entries, exported_at)?;
    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + csv.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(csv.as_bytes());
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    log::info!("CSV file exported to: {}", path.display());
    Ok(())
}

/// `{first property code|"export"}-全端末-{compact timestamp}.csv`
pub fn export_file_name(entries: &[Entry], exported_at: NaiveDateTime) -> String {
    let prefix = entries
        .first()
        .map(|e| e.property_code.to_string())
        .unwrap_or_else(|| "export".to_string());
    // ISO 8601 with colons and hyphens stripped is exactly 15 characters
    let stamp = exported_at.format("%Y%m%dT%H%M%S").to_string();
    format!("{}-全端末-{}.csv", prefix, stamp)
}

fn entry_row(entry: &Entry, exported_at: NaiveDateTime) -> Vec<String> {
    let end_date = entry.end_date.unwrap_or(entry.start_date);
    let display_end = entry.display_end_date.unwrap_or(end_date);
    vec![
        entry.property_code.to_string(),
        entry.terminal_id.clone(),
        entry.vendor_name.clone(),
        entry.emergency_contact.clone(),
        entry.inspection_type.clone(),
        entry
            .template_no
            .map(|n| n.to_string())
            .unwrap_or_default(),
        fmt_date(entry.start_date),
        fmt_date(end_date),
        crlf(&entry.notice_text),
        crlf(&entry.remarks),
        fmt_date(entry.display_start_date),
        fmt_date(display_end),
        entry
            .display_start_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default(),
        entry
            .display_end_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default(),
        format!("0:00:{:02}", entry.display_time),
        entry.frame_no.to_string(),
        entry.position.to_string(),
        if entry.show_on_board { "True" } else { "False" }.to_string(),
        entry.poster_type.csv_label().to_string(),
        String::new(), // 統合ポリシー
        String::new(), // 制御
        String::new(), // コンテンツID
        String::new(), // グループID
        String::new(), // スケジュールID
        entry.image_ref.clone().unwrap_or_default(),
        String::new(), // 作成者
        String::new(), // 承認状態
        exported_at.format("%Y/%m/%d [%H:%M:%S]").to_string(),
    ]
}

fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// Normalize embedded newlines to CRLF before quoting
fn crlf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}
