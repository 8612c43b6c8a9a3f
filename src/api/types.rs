use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Envelope every backend endpoint wraps its payload in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: String,
}

/// Uniform failure surfaced to callers. No facade operation panics or
/// propagates a raw transport error past this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub code: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: "VALIDATION_ERROR".to_string(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: "FORBIDDEN".to_string(),
        }
    }

    /// Backend-reported business failure; the message is passed through to
    /// the user verbatim.
    pub fn business(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: "BUSINESS_RULE".to_string(),
        }
    }

    pub fn request_failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: "REQUEST_FAILED".to_string(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: "UNKNOWN".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveCategory {
    Vacation,
    Sick,
    Unpaid,
    Maternity,
}

impl LeaveCategory {
    pub const ALL: [LeaveCategory; 4] = [
        LeaveCategory::Vacation,
        LeaveCategory::Sick,
        LeaveCategory::Unpaid,
        LeaveCategory::Maternity,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            LeaveCategory::Vacation => "vacation",
            LeaveCategory::Sick => "sick",
            LeaveCategory::Unpaid => "unpaid",
            LeaveCategory::Maternity => "maternity",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "vacation" => Some(LeaveCategory::Vacation),
            "sick" => Some(LeaveCategory::Sick),
            "unpaid" => Some(LeaveCategory::Unpaid),
            "maternity" => Some(LeaveCategory::Maternity),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeaveCategory::Vacation => "Vacation",
            LeaveCategory::Sick => "Sick leave",
            LeaveCategory::Unpaid => "Unpaid leave",
            LeaveCategory::Maternity => "Maternity leave",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            LeaveCategory::Vacation => "bg-blue-100 text-blue-800",
            LeaveCategory::Sick => "bg-orange-100 text-orange-800",
            LeaveCategory::Unpaid => "bg-gray-100 text-gray-800",
            LeaveCategory::Maternity => "bg-purple-100 text-purple-800",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub fn as_param(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(LeaveStatus::Pending),
            "approved" => Some(LeaveStatus::Approved),
            "rejected" => Some(LeaveStatus::Rejected),
            "cancelled" => Some(LeaveStatus::Cancelled),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending approval",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
            LeaveStatus::Cancelled => "Cancelled",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "bg-yellow-100 text-yellow-800",
            LeaveStatus::Approved => "bg-green-100 text-green-800",
            LeaveStatus::Rejected => "bg-red-100 text-red-800",
            LeaveStatus::Cancelled => "bg-gray-100 text-gray-600",
        }
    }

    /// Approved, rejected and cancelled requests are immutable.
    pub fn is_terminal(self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequestResponse {
    pub id: String,
    pub employee_id: String,
    pub category: LeaveCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub day_count: i64,
    pub status: LeaveStatus,
    pub reason: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub decision_comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLeaveRequest {
    pub category: LeaveCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

/// Partial update; unset fields are left out of the payload entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateLeaveRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<LeaveCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageResponse<T> {
    pub page: u32,
    pub size: u32,
    pub total: i64,
    #[serde(default)]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalanceEntry {
    pub category: LeaveCategory,
    pub entitled_days: f64,
    pub used_days: f64,
    pub remaining_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalanceResponse {
    pub employee_id: String,
    pub year: i32,
    pub entries: Vec<LeaveBalanceEntry>,
}

impl LeaveBalanceResponse {
    pub fn remaining_for(&self, category: LeaveCategory) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.remaining_days)
    }

    pub fn total_remaining(&self) -> f64 {
        self.entries.iter().map(|entry| entry.remaining_days).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub job_title: Option<String>,
    #[serde(default)]
    pub active: bool,
}
