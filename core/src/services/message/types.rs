//! Types returned by the message service

use serde::{Deserialize, Serialize};

/// What one reconciliation sweep did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    /// Pending messages the provider was asked about
    pub polled: usize,
    /// Polled messages whose stored state changed
    pub updated: usize,
    /// Polled messages with no update or an identical one
    pub unchanged: usize,
    pub redaction_attempts: usize,
    pub redacted: usize,
    pub redaction_failures: usize,
}
