//! Spreadsheet parsing and aggregation for case statistics imports.

pub mod analytics;
pub mod detail_parser;

pub use analytics::{build_analysis, Analysis, CountMap, NestedCountMap};
pub use detail_parser::{parse_details, REQUIRED_HEADERS};

use serde::{Deserialize, Serialize};

use crate::database::entities::case_stats_detail;

/// One validated spreadsheet row, before or after persistence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDetail {
    pub serial_no: String,
    pub event_time: String,
    pub district: String,
    pub street_town: String,
    pub register_source: String,
    pub case_type: String,
    pub register_time: String,
    pub current_status: String,
}

impl CaseDetail {
    pub fn is_blank(&self) -> bool {
        [
            &self.serial_no,
            &self.event_time,
            &self.district,
            &self.street_town,
            &self.register_source,
            &self.case_type,
            &self.register_time,
            &self.current_status,
        ]
        .iter()
        .all(|value| value.is_empty())
    }
}

impl From<case_stats_detail::Model> for CaseDetail {
    fn from(model: case_stats_detail::Model) -> Self {
        Self {
            serial_no: model.serial_no,
            event_time: model.event_time,
            district: model.district,
            street_town: model.street_town,
            register_source: model.register_source,
            case_type: model.case_type,
            register_time: model.register_time,
            current_status: model.current_status,
        }
    }
}
