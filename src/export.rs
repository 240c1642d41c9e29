//! Spreadsheet export
//!
//! Serializes channel reports to XLSX workbooks: one single-sheet workbook
//! per channel, plus a combined workbook with one sheet per channel. Sheet
//! names are limited to 31 characters by the format; two channel titles that
//! truncate to the same name are disambiguated with a ` (n)` counter suffix
//! so neither sheet is silently overwritten.

use crate::aggregation::ChannelReport;
use crate::error::Result;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::HashSet;

/// XLSX limit on worksheet name length
const MAX_SHEET_NAME_LEN: usize = 31;

/// Column headers for the exported table
const HEADERS: [&str; 4] = ["Title", "Upload Date", "Views", "Video Link"];

/// Characters the XLSX format forbids in sheet names
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Render one channel report as a single-sheet workbook
pub fn channel_workbook(report: &ChannelReport) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name(&report.channel_title))?;
    write_sheet(sheet, report)?;
    Ok(workbook.save_to_buffer()?)
}

/// Render every report as one workbook, one sheet per channel
///
/// Sheets appear in report order under their (possibly disambiguated)
/// channel titles.
pub fn combined_workbook<'a>(
    reports: impl IntoIterator<Item = &'a ChannelReport>,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let mut used_names = HashSet::new();

    for report in reports {
        let name = unique_sheet_name(&report.channel_title, &mut used_names);
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        write_sheet(sheet, report)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// File name for a per-channel export, safe for common filesystems
pub fn export_file_name(channel_title: &str) -> String {
    let stem: String = channel_title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();
    format!("{}_report.xlsx", stem.trim())
}

/// Export file name that is unique within one output directory
///
/// Two channels with the same display title would otherwise map to the same
/// path and the second write would clobber the first. Same counter policy as
/// [`unique_sheet_name`]; the used-set is tracked lowercased since common
/// filesystems compare names case-insensitively.
pub fn unique_export_file_name(channel_title: &str, used: &mut HashSet<String>) -> String {
    let base = export_file_name(channel_title);
    if used.insert(base.to_lowercase()) {
        return base;
    }

    let stem = base
        .strip_suffix("_report.xlsx")
        .unwrap_or(&base)
        .to_string();
    for n in 2.. {
        let candidate = format!("{stem}_report ({n}).xlsx");
        if used.insert(candidate.to_lowercase()) {
            return candidate;
        }
    }
    unreachable!("counter suffix search is unbounded")
}

/// Write the report table: headers plus one row per video, report order
fn write_sheet(sheet: &mut Worksheet, report: &ChannelReport) -> Result<()> {
    let header_format = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, video) in report.videos.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, video.title.as_str())?;
        sheet.write_string(
            row,
            1,
            video.published_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        )?;
        sheet.write_number(row, 2, video.view_count as f64)?;
        sheet.write_string(row, 3, video.video_url.as_str())?;
    }

    sheet.set_column_width(0, 50)?;
    sheet.set_column_width(1, 20)?;
    sheet.set_column_width(2, 12)?;
    sheet.set_column_width(3, 45)?;

    Ok(())
}

/// Sanitize and truncate a channel title into a legal sheet name
fn sheet_name(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| {
            if FORBIDDEN_SHEET_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .take(MAX_SHEET_NAME_LEN)
        .collect();

    let trimmed = sanitized.trim().to_string();
    if trimmed.is_empty() {
        "Channel".to_string()
    } else {
        trimmed
    }
}

/// Sheet name that is unique within the workbook
///
/// Sheet names compare case-insensitively in the format, so the used-set is
/// tracked lowercased. On collision the name is re-truncated to leave room
/// for a ` (n)` suffix, counting up until free.
fn unique_sheet_name(title: &str, used: &mut HashSet<String>) -> String {
    let base = sheet_name(title);
    if used.insert(base.to_lowercase()) {
        return base;
    }

    for n in 2.. {
        let suffix = format!(" ({n})");
        let keep = MAX_SHEET_NAME_LEN - suffix.len();
        let candidate = format!(
            "{}{}",
            base.chars().take(keep).collect::<String>().trim_end(),
            suffix
        );
        if used.insert(candidate.to_lowercase()) {
            return candidate;
        }
    }
    unreachable!("counter suffix search is unbounded")
}
