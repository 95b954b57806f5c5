/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Where the check-in count behind a payout came from
/// Used by estimates, closeout reports and payout lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckinSource {
    Live,
    Actual,
    ManualOverride,  // Staff replaced the automatic count during closeout
}

/// Settlement state of a payout line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Pending,
    Paid,
}
