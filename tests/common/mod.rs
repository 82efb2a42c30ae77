#![allow(dead_code)]

use std::io::{Cursor, Read};
use std::path::Path;

use chrono::Local;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

use casestats::config::CaseStatsConfig;
use casestats::database::connect_and_migrate;
use casestats::services::CaseStatsService;
use casestats::stats::analytics::month_keys;

pub const HEADERS: [&str; 8] = [
    "序号",
    "时间",
    "区",
    "街镇",
    "登记来源",
    "类型",
    "登记时间",
    "当前办理状态",
];

/// Spreadsheet with the required header and one string cell per value.
pub fn workbook(rows: &[[&str; 8]]) -> Vec<u8> {
    workbook_with_headers(&HEADERS, rows)
}

pub fn workbook_with_headers(headers: &[&str], rows: &[[&str; 8]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (idx, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(idx as u32 + 1, col as u16, *value).unwrap();
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// Single-row spreadsheet whose registration time is a real date cell.
pub fn workbook_with_date_cell(year: u16, month: u8, day: u8) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_number(1, 0, 1.0).unwrap();
    sheet.write_string(1, 2, "浦东").unwrap();
    sheet.write_string(1, 3, "花木街道").unwrap();
    let date = ExcelDateTime::from_ymd(year, month, day)
        .unwrap()
        .and_hms(9, 30, 0)
        .unwrap();
    let format = Format::new().set_num_format("yyyy-mm-dd hh:mm");
    sheet.write_datetime_with_format(1, 6, &date, &format).unwrap();
    sheet.write_string(1, 7, "办理中").unwrap();
    workbook.save_to_buffer().unwrap()
}

/// `YYYY-MM-DD` inside the current month.
pub fn this_month_date() -> String {
    Local::now().format("%Y-%m-01").to_string()
}

pub fn current_month_key() -> String {
    month_keys(Local::now().date_naive())
        .pop()
        .unwrap()
}

pub async fn service(report_root: &Path) -> CaseStatsService {
    let db = connect_and_migrate("sqlite::memory:").await.unwrap();
    let config = CaseStatsConfig::default().with_report_dir(report_root);
    CaseStatsService::new(db, &config, "sans-serif")
}

/// Read one part of a zip container (the generated deck) as text.
pub fn read_zip_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut text = String::new();
    part.read_to_string(&mut text).unwrap();
    text
}
