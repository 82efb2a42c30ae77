//! Aggregation of parsed case details into the four reporting views.
//!
//! Everything here is a pure function of the details and a reference date,
//! so the same import always produces the same views.

use chrono::{Datelike, Months, NaiveDate};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::CaseDetail;

/// Label substituted for a blank district, street or case type.
pub const UNKNOWN: &str = "未知";
pub const STATUS_DONE: &str = "已办结";
pub const STATUS_IN_PROGRESS: &str = "办理中";

pub const TREND_MONTHS: u32 = 6;
pub const TOP_N: usize = 10;
pub const TREND_STREETS: usize = 3;

/// Ordered label -> count mapping.
pub type CountMap = IndexMap<String, u64>;
/// Ordered label -> (label -> count) mapping.
pub type NestedCountMap = IndexMap<String, CountMap>;

static MONTH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})[-/](\d{1,2})").expect("Invalid regex pattern for month extraction")
});

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub time_trend: CountMap,
    /// Monthly series for the busiest streets, drawn on the trend chart only.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub street_trend: NestedCountMap,
    pub street_top10: CountMap,
    pub type_top10: CountMap,
    pub district_status: NestedCountMap,
}

pub fn build_analysis(details: &[CaseDetail], today: NaiveDate) -> Analysis {
    let months = month_keys(today);
    let detail_months: Vec<Option<String>> = details
        .iter()
        .map(|d| extract_month(&d.register_time, &d.event_time))
        .collect();

    let time_trend = count_months(&months, detail_months.iter().map(Option::as_deref));

    let street_counts = count_by(details.iter().map(|d| d.street_town.as_str()));
    let street_trend = top_n(&street_counts, TREND_STREETS)
        .into_keys()
        .map(|street| {
            let series = count_months(
                &months,
                details
                    .iter()
                    .zip(&detail_months)
                    .filter(|(d, _)| d.street_town.trim() == street)
                    .map(|(_, month)| month.as_deref()),
            );
            (street, series)
        })
        .collect();

    let type_counts = count_by(details.iter().map(|d| d.case_type.as_str()));

    let mut district_status = NestedCountMap::new();
    for detail in details {
        let Some(status) = normalize_status(&detail.current_status) else {
            continue;
        };
        *district_status
            .entry(or_unknown(&detail.district))
            .or_default()
            .entry(status.to_string())
            .or_insert(0) += 1;
    }

    Analysis {
        time_trend,
        street_trend,
        street_top10: top_n(&street_counts, TOP_N),
        type_top10: top_n(&type_counts, TOP_N),
        district_status,
    }
}

/// The six `YYYY-MM` keys ending at `today`'s month, oldest first.
pub fn month_keys(today: NaiveDate) -> Vec<String> {
    let first = today.with_day(1).unwrap_or(today);
    (0..TREND_MONTHS)
        .rev()
        .map(|back| {
            let month = first.checked_sub_months(Months::new(back)).unwrap_or(first);
            format!("{:04}-{:02}", month.year(), month.month())
        })
        .collect()
}

/// Year-month of a detail, from its registration time or else its event time.
pub fn extract_month(register_time: &str, event_time: &str) -> Option<String> {
    let source = if register_time.trim().is_empty() {
        event_time
    } else {
        register_time
    };

    if let Some(caps) = MONTH_PATTERN.captures(source) {
        let year: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        return Some(format!("{:04}-{:02}", year, month));
    }

    NaiveDate::parse_from_str(source.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| format!("{:04}-{:02}", date.year(), date.month()))
}

/// Collapse free-text statuses into done / in progress; anything else is `None`.
pub fn normalize_status(status: &str) -> Option<&'static str> {
    let value = status.trim();
    if value.is_empty() {
        return None;
    }
    if value.contains("办结") || value.contains("已完成") || value.contains("完成") {
        Some(STATUS_DONE)
    } else if value.contains("办理中") || value.contains("处理中") || value.contains("在办") {
        Some(STATUS_IN_PROGRESS)
    } else {
        None
    }
}

fn or_unknown(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN.to_string()
    } else {
        trimmed.to_string()
    }
}

fn count_months<'a>(months: &[String], values: impl Iterator<Item = Option<&'a str>>) -> CountMap {
    let mut counts: CountMap = months.iter().map(|m| (m.clone(), 0)).collect();
    for month in values.flatten() {
        if let Some(count) = counts.get_mut(month) {
            *count += 1;
        }
    }
    counts
}

/// Counts keyed by trimmed value in first-encounter order; blanks are dropped.
fn count_by<'a>(values: impl Iterator<Item = &'a str>) -> CountMap {
    let mut counts = CountMap::new();
    for value in values.map(str::trim).filter(|v| !v.is_empty()) {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Highest `n` entries by count; equal counts keep their existing order.
pub fn top_n(counts: &CountMap, n: usize) -> CountMap {
    let mut entries: Vec<(&String, &u64)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries
        .into_iter()
        .take(n)
        .map(|(k, v)| (k.clone(), *v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(register: &str, street: &str, case_type: &str, district: &str, status: &str) -> CaseDetail {
        CaseDetail {
            serial_no: "1".to_string(),
            register_time: register.to_string(),
            street_town: street.to_string(),
            case_type: case_type.to_string(),
            district: district.to_string(),
            current_status: status.to_string(),
            ..Default::default()
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_keys_cross_year_boundary() {
        assert_eq!(
            month_keys(day(2024, 2, 29)),
            vec!["2023-09", "2023-10", "2023-11", "2023-12", "2024-01", "2024-02"]
        );
    }

    #[test]
    fn test_extract_month_variants() {
        assert_eq!(extract_month("2024/3/7 10:00", ""), Some("2024-03".to_string()));
        assert_eq!(extract_month("登记于2023-11-02", ""), Some("2023-11".to_string()));
        assert_eq!(extract_month("", "2024-01-15T08:30"), Some("2024-01".to_string()));
        assert_eq!(extract_month("  ", "昨天"), None);
        assert_eq!(extract_month("", ""), None);
    }

    #[test]
    fn test_register_time_wins_over_event_time() {
        assert_eq!(extract_month("2024-05-01", "2023-01-01"), Some("2024-05".to_string()));
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status("已办结"), Some(STATUS_DONE));
        assert_eq!(normalize_status("调解完成"), Some(STATUS_DONE));
        assert_eq!(normalize_status("正在处理中"), Some(STATUS_IN_PROGRESS));
        assert_eq!(normalize_status("在办"), Some(STATUS_IN_PROGRESS));
        assert_eq!(normalize_status("待受理"), None);
        assert_eq!(normalize_status(""), None);
    }

    #[test]
    fn test_time_trend_counts_only_window() {
        let details = vec![
            detail("2024-06-01", "", "", "", ""),
            detail("2024-06-30", "", "", "", ""),
            detail("2024-01-15", "", "", "", ""),
            detail("2023-12-31", "", "", "", ""),
            detail("not a date", "", "", "", ""),
        ];
        let analysis = build_analysis(&details, day(2024, 6, 10));

        assert_eq!(analysis.time_trend.len(), 6);
        assert_eq!(analysis.time_trend.keys().next().map(String::as_str), Some("2024-01"));
        assert_eq!(analysis.time_trend["2024-06"], 2);
        assert_eq!(analysis.time_trend["2024-01"], 1);
        assert_eq!(analysis.time_trend.values().sum::<u64>(), 3);
    }

    #[test]
    fn test_top_n_truncates_and_breaks_ties_by_first_seen() {
        let mut details = Vec::new();
        for i in 0..12 {
            details.push(detail("", &format!("街道{}", i), "", "", ""));
        }
        details.push(detail("", "街道5", "", "", ""));
        let analysis = build_analysis(&details, day(2024, 6, 1));

        let keys: Vec<&str> = analysis.street_top10.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 10);
        assert_eq!(keys[0], "街道5");
        assert_eq!(&keys[1..4], &["街道0", "街道1", "街道2"]);
        assert!(!keys.contains(&"街道11"));
    }

    #[test]
    fn test_blank_keys_excluded_from_top_n() {
        let details = vec![
            detail("", "", "邻里纠纷", "", ""),
            detail("", " ", "", "", ""),
            detail("", "花木", "", "", ""),
        ];
        let analysis = build_analysis(&details, day(2024, 6, 1));
        assert_eq!(analysis.street_top10.len(), 1);
        assert_eq!(analysis.type_top10.len(), 1);
        assert!(!analysis.street_top10.contains_key(UNKNOWN));
    }

    #[test]
    fn test_district_status_groups_and_filters() {
        let details = vec![
            detail("", "", "", "浦东", "已办结"),
            detail("", "", "", "浦东", "办理中"),
            detail("", "", "", "浦东", "已完成"),
            detail("", "", "", "", "在办"),
            detail("", "", "", "闵行", "退回"),
        ];
        let analysis = build_analysis(&details, day(2024, 6, 1));

        assert_eq!(analysis.district_status.len(), 2);
        assert_eq!(analysis.district_status["浦东"][STATUS_DONE], 2);
        assert_eq!(analysis.district_status["浦东"][STATUS_IN_PROGRESS], 1);
        assert_eq!(analysis.district_status[UNKNOWN][STATUS_IN_PROGRESS], 1);
        assert!(!analysis.district_status.contains_key("闵行"));
    }

    #[test]
    fn test_street_trend_follows_top_three() {
        let details = vec![
            detail("2024-05-01", "A", "", "", ""),
            detail("2024-06-01", "A", "", "", ""),
            detail("2024-06-01", "B", "", "", ""),
            detail("2024-06-01", "C", "", "", ""),
            detail("2024-04-01", "C", "", "", ""),
            detail("2024-06-01", "D", "", "", ""),
        ];
        let analysis = build_analysis(&details, day(2024, 6, 1));

        let streets: Vec<&str> = analysis.street_trend.keys().map(String::as_str).collect();
        assert_eq!(streets, vec!["A", "C", "B"]);
        assert_eq!(analysis.street_trend["A"]["2024-05"], 1);
        assert_eq!(analysis.street_trend["C"]["2024-04"], 1);
        assert_eq!(analysis.street_trend["B"].len(), 6);
    }

    #[test]
    fn test_deterministic_and_json_order_preserved() {
        let details = vec![
            detail("2024-06-01", "花木", "物业", "浦东", "已办结"),
            detail("2024-05-01", "张江", "邻里", "浦东", "办理中"),
        ];
        let first = build_analysis(&details, day(2024, 6, 1));
        let second = build_analysis(&details, day(2024, 6, 1));
        assert_eq!(first, second);

        let json = serde_json::to_string(&first.time_trend).unwrap();
        let back: CountMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, first.time_trend);
        assert!(json.starts_with("{\"2024-01\":0"));
    }
}
