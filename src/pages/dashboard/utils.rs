use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{LeaveBalanceResponse, LeaveRequestResponse, LeaveStatus};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashboardAlertLevel {
    Info,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardAlert {
    pub level: DashboardAlertLevel,
    pub message: String,
}

pub fn pending_count(items: &[LeaveRequestResponse]) -> usize {
    items
        .iter()
        .filter(|request| request.status == LeaveStatus::Pending)
        .count()
}

/// The next approved leave starting today or later.
pub fn next_upcoming(
    items: &[LeaveRequestResponse],
    today: NaiveDate,
) -> Option<LeaveRequestResponse> {
    items
        .iter()
        .filter(|request| request.status == LeaveStatus::Approved)
        .filter(|request| request.start_date >= today)
        .min_by_key(|request| request.start_date)
        .cloned()
}

pub fn build_alerts(balance: Option<&LeaveBalanceResponse>, pending: usize) -> Vec<DashboardAlert> {
    let mut alerts = Vec::new();

    if let Some(balance) = balance {
        if balance.total_remaining() <= 0.0 {
            alerts.push(DashboardAlert {
                level: DashboardAlertLevel::Warning,
                message: "No leave days remaining this year.".to_string(),
            });
        }
    }

    if pending > 0 {
        alerts.push(DashboardAlert {
            level: DashboardAlertLevel::Info,
            message: format!("{} leave request(s) awaiting a decision.", pending),
        });
    }

    if alerts.is_empty() {
        alerts.push(DashboardAlert {
            level: DashboardAlertLevel::Info,
            message: "No new alerts.".to_string(),
        });
    }

    alerts
}
