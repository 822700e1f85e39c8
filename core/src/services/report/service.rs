//! Report service implementation

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;

use sms_shared::utils::datetime::{format_measurement_timestamp, parse_report_datetime};

use crate::domain::value_objects::{
    StatusReport, STATUS_REPORT_DATA_TYPE, STATUS_REPORT_DESCRIPTION,
};
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::message::{MessageRepository, QueryOptions, StatusCountQuery};

/// Status key used for messages the provider never gave a status
const NULL_STATUS_KEY: &str = "null";

/// Read-only aggregation of message statuses per day
pub struct ReportService<R: MessageRepository> {
    repository: Arc<R>,
}

impl<R: MessageRepository> ReportService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Count non-deleted messages per creation day and status.
    ///
    /// `start_date` and `end_date` are inclusive ISO-8601 bounds; a bare date
    /// means midnight UTC.
    pub async fn status_counts(
        &self,
        start_date: &str,
        end_date: &str,
        trustomer_code: Option<&str>,
        product_name: Option<&str>,
    ) -> DomainResult<StatusReport> {
        let start = parse_report_datetime(start_date).ok_or_else(|| {
            ValidationError::InvalidFormat {
                field: "start_date".to_string(),
            }
        })?;
        let end = parse_report_datetime(end_date).ok_or_else(|| ValidationError::InvalidFormat {
            field: "end_date".to_string(),
        })?;

        if start > end {
            return Err(ValidationError::InvalidRange {
                start: start_date.to_string(),
                end: end_date.to_string(),
            }
            .into());
        }

        let query = StatusCountQuery {
            start,
            end,
            trustomer_code: trustomer_code.map(str::to_lowercase),
            product_name: product_name.map(str::to_lowercase),
        };
        let counts = self
            .repository
            .count_by_day_and_status(&query, QueryOptions::default())
            .await?;

        let mut data: BTreeMap<String, BTreeMap<String, i64>> = BTreeMap::new();
        for row in counts.into_iter().filter(|row| row.count > 0) {
            let status = row.status.unwrap_or_else(|| NULL_STATUS_KEY.to_string());
            *data
                .entry(row.day.format("%Y-%m-%d").to_string())
                .or_default()
                .entry(status)
                .or_insert(0) += row.count;
        }

        tracing::debug!(
            start = %start,
            end = %end,
            days = data.len(),
            event = "status_counts_generated",
            "Status count report generated"
        );

        Ok(StatusReport {
            data_type: STATUS_REPORT_DATA_TYPE.to_string(),
            description: STATUS_REPORT_DESCRIPTION.to_string(),
            measurement_timestamp: format_measurement_timestamp(Utc::now()),
            data,
        })
    }
}
