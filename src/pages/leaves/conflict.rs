use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{LeaveRequestResponse, LeaveStatus};

/// Outcome of a date-conflict probe.
///
/// `check_failed` marks a probe whose history fetch failed. The conflict
/// flag stays down in that case so an unreachable backend never blocks a
/// legitimate submission; the server re-validates at submission time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictCheckResult {
    pub has_conflict: bool,
    pub conflicting: Vec<LeaveRequestResponse>,
    pub check_failed: bool,
}

impl ConflictCheckResult {
    pub fn unavailable() -> Self {
        Self {
            has_conflict: false,
            conflicting: Vec::new(),
            check_failed: true,
        }
    }
}

/// Decides whether `[start, end]` intersects any approved request in
/// `history`, skipping `exclude_id` (the request being edited).
///
/// Intervals are closed on both ends, matching the inclusive day-count
/// convention, so touching endpoints count as overlap. Matches keep the
/// input order.
pub fn detect_conflict(
    start: NaiveDate,
    end: NaiveDate,
    history: &[LeaveRequestResponse],
    exclude_id: Option<&str>,
) -> ConflictCheckResult {
    let conflicting: Vec<LeaveRequestResponse> = history
        .iter()
        .filter(|request| request.status == LeaveStatus::Approved)
        .filter(|request| exclude_id != Some(request.id.as_str()))
        .filter(|request| start <= request.end_date && end >= request.start_date)
        .cloned()
        .collect();
    ConflictCheckResult {
        has_conflict: !conflicting.is_empty(),
        conflicting,
        check_failed: false,
    }
}
