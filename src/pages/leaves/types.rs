use crate::api::LeaveRequestResponse;
use crate::utils::time::format_date;

/// Row projection of a leave request for the list views.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveSummary {
    pub id: String,
    pub employee_id: String,
    pub category_label: &'static str,
    pub category_badge: &'static str,
    pub status_label: &'static str,
    pub status_badge: &'static str,
    pub date_range: String,
    pub day_count: i64,
    pub reason: Option<String>,
    pub submitted_at: String,
}

impl LeaveSummary {
    pub fn from_response(request: &LeaveRequestResponse) -> Self {
        let date_range = if request.start_date == request.end_date {
            format_date(request.start_date)
        } else {
            format!(
                "{} to {}",
                format_date(request.start_date),
                format_date(request.end_date)
            )
        };
        Self {
            id: request.id.clone(),
            employee_id: request.employee_id.clone(),
            category_label: request.category.label(),
            category_badge: request.category.badge_class(),
            status_label: request.status.label(),
            status_badge: request.status.badge_class(),
            date_range,
            day_count: request.day_count,
            reason: request.reason.clone(),
            submitted_at: request.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

pub fn summarize_page(items: &[LeaveRequestResponse]) -> Vec<LeaveSummary> {
    items.iter().map(LeaveSummary::from_response).collect()
}
