use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, info};

use super::CaseDetail;
use crate::errors::{CaseStatsError, CaseStatsResult};

/// Header row every import must start with, in this exact order.
pub const REQUIRED_HEADERS: [&str; 8] = [
    "序号",
    "时间",
    "区",
    "街镇",
    "登记来源",
    "类型",
    "登记时间",
    "当前办理状态",
];

/// Parse the first worksheet of an uploaded workbook into detail records.
///
/// The workbook format (xlsx, xls, ods) is detected from the bytes.
pub fn parse_details(bytes: &[u8]) -> CaseStatsResult<Vec<CaseDetail>> {
    if bytes.is_empty() {
        return Err(CaseStatsError::EmptyFile);
    }

    let cursor = Cursor::new(bytes);
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|err| CaseStatsError::InvalidSpreadsheet(err.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(CaseStatsError::EmptySheet)?
        .map_err(|err| CaseStatsError::InvalidSpreadsheet(err.to_string()))?;

    parse_range(&range)
}

/// Validate the header and convert every non-blank data row.
pub fn parse_range(range: &Range<Data>) -> CaseStatsResult<Vec<CaseDetail>> {
    // The used range starts at the first non-empty cell; the header must sit at A1
    match range.start() {
        None => return Err(CaseStatsError::EmptySheet),
        Some((0, 0)) => {}
        Some(_) => return Err(CaseStatsError::InvalidHeader),
    }
    if range.height() < 2 {
        return Err(CaseStatsError::EmptySheet);
    }

    let mut rows = range.rows();
    let header = rows.next().ok_or(CaseStatsError::EmptySheet)?;
    if !header_matches(header) {
        return Err(CaseStatsError::InvalidHeader);
    }

    let mut details = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        let detail = CaseDetail {
            serial_no: cell_string(row.first()),
            event_time: cell_string(row.get(1)),
            district: cell_string(row.get(2)),
            street_town: cell_string(row.get(3)),
            register_source: cell_string(row.get(4)),
            case_type: cell_string(row.get(5)),
            register_time: cell_string(row.get(6)),
            current_status: cell_string(row.get(7)),
        };
        if detail.is_blank() {
            skipped += 1;
            continue;
        }
        details.push(detail);
    }

    if skipped > 0 {
        debug!("Skipped {} blank rows", skipped);
    }
    if details.is_empty() {
        return Err(CaseStatsError::NoValidRows);
    }

    info!("Parsed {} detail rows", details.len());
    Ok(details)
}

fn header_matches(header: &[Data]) -> bool {
    REQUIRED_HEADERS
        .iter()
        .enumerate()
        .all(|(idx, expected)| cell_string(header.get(idx)) == *expected)
}

/// Convert a cell to the text stored for it.
///
/// Date-formatted numbers become `YYYY-MM-DDTHH:MM[:SS]`, other numbers drop
/// trailing zeros, booleans become `true`/`false`. Error cells read as empty.
pub fn cell_string(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) => format_number(*f),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        Some(Data::DateTime(dt)) => {
            if dt.is_datetime() {
                dt.as_datetime()
                    .map(format_datetime)
                    .unwrap_or_else(|| format_number(dt.as_f64()))
            } else {
                format_number(dt.as_f64())
            }
        }
        Some(Data::DateTimeIso(s)) => s.trim().to_string(),
        Some(Data::DurationIso(s)) => s.trim().to_string(),
        Some(Data::Empty) | None => String::new(),
        _ => String::new(),
    }
}

fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    // f64 Display is the shortest round-trip form and never uses an exponent
    let text = value.to_string();
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

fn format_datetime(value: NaiveDateTime) -> String {
    if value.second() == 0 && value.nanosecond() == 0 {
        value.format("%Y-%m-%dT%H:%M").to_string()
    } else if value.nanosecond() == 0 {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
    }
}
