//! Per-day status count report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const STATUS_REPORT_DATA_TYPE: &str = "sms_status_counts";
pub const STATUS_REPORT_DESCRIPTION: &str = "This is a count of the sms statuses";

/// Counts keyed by ISO calendar day, then by status.
///
/// Days and statuses with no messages are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub data_type: String,
    pub description: String,
    pub measurement_timestamp: String,
    pub data: BTreeMap<String, BTreeMap<String, i64>>,
}
