use chrono::NaiveDate;
use leptos::*;

use crate::api::{
    ApiError, CreateLeaveRequest, LeaveCategory, LeaveQueryFilter, LeaveRequestResponse,
    LeaveStatus, ListQuery, SortDirection, UpdateLeaveRequest,
};
use crate::state::session::UserContext;

/// Inclusive day span of a leave interval; both endpoints count.
pub fn inclusive_day_span(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

fn parse_date(input: &str, err: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::validation(err.to_string()))
}

fn optional_string(value: String) -> Option<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[derive(Clone, Copy)]
pub struct LeaveFormState {
    category: RwSignal<String>,
    start_date: RwSignal<String>,
    end_date: RwSignal<String>,
    reason: RwSignal<String>,
}

impl Default for LeaveFormState {
    fn default() -> Self {
        Self {
            category: create_rw_signal("vacation".to_string()),
            start_date: create_rw_signal(String::new()),
            end_date: create_rw_signal(String::new()),
            reason: create_rw_signal(String::new()),
        }
    }
}

impl LeaveFormState {
    pub fn category_signal(&self) -> RwSignal<String> {
        self.category
    }

    pub fn start_signal(&self) -> RwSignal<String> {
        self.start_date
    }

    pub fn end_signal(&self) -> RwSignal<String> {
        self.end_date
    }

    pub fn reason_signal(&self) -> RwSignal<String> {
        self.reason
    }

    pub fn reset(&self) {
        self.category.set("vacation".to_string());
        self.start_date.set(String::new());
        self.end_date.set(String::new());
        self.reason.set(String::new());
    }

    pub fn load_from_response(&self, request: &LeaveRequestResponse) {
        self.category.set(request.category.as_param().to_string());
        self.start_date
            .set(request.start_date.format("%Y-%m-%d").to_string());
        self.end_date
            .set(request.end_date.format("%Y-%m-%d").to_string());
        self.reason
            .set(request.reason.clone().unwrap_or_default());
    }

    /// Both dates, when both parse and the range is ordered. The advisory
    /// conflict probe only fires for ranges this returns.
    pub fn parsed_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::parse_from_str(self.start_date.get_untracked().trim(), "%Y-%m-%d").ok()?;
        let end = NaiveDate::parse_from_str(self.end_date.get_untracked().trim(), "%Y-%m-%d").ok()?;
        (end >= start).then_some((start, end))
    }

    /// Day count shown next to the form while the user picks dates.
    pub fn day_count_preview(&self) -> Option<i64> {
        self.parsed_range()
            .map(|(start, end)| inclusive_day_span(start, end))
    }

    fn validated_fields(&self) -> Result<(LeaveCategory, NaiveDate, NaiveDate), ApiError> {
        let category = LeaveCategory::parse(self.category.get().trim())
            .ok_or_else(|| ApiError::validation("Select a leave category."))?;
        let start = parse_date(
            &self.start_date.get(),
            "Enter the start date as YYYY-MM-DD.",
        )?;
        let end = parse_date(&self.end_date.get(), "Enter the end date as YYYY-MM-DD.")?;
        if end < start {
            return Err(ApiError::validation(
                "The end date must not be before the start date.",
            ));
        }
        Ok((category, start, end))
    }

    pub fn to_create_payload(&self) -> Result<CreateLeaveRequest, ApiError> {
        let (category, start, end) = self.validated_fields()?;
        Ok(CreateLeaveRequest {
            category,
            start_date: start,
            end_date: end,
            reason: optional_string(self.reason.get()),
        })
    }

    pub fn to_update_payload(&self) -> Result<UpdateLeaveRequest, ApiError> {
        let (category, start, end) = self.validated_fields()?;
        Ok(UpdateLeaveRequest {
            category: Some(category),
            start_date: Some(start),
            end_date: Some(end),
            reason: optional_string(self.reason.get()),
        })
    }
}

#[derive(Clone, Copy)]
pub struct LeaveFilterState {
    search: RwSignal<String>,
    category: RwSignal<String>,
    status: RwSignal<String>,
    start_from: RwSignal<String>,
    start_to: RwSignal<String>,
    page: RwSignal<u32>,
    sort_by: RwSignal<String>,
    sort_direction: RwSignal<SortDirection>,
}

impl Default for LeaveFilterState {
    fn default() -> Self {
        Self {
            search: create_rw_signal(String::new()),
            category: create_rw_signal(String::new()),
            status: create_rw_signal(String::new()),
            start_from: create_rw_signal(String::new()),
            start_to: create_rw_signal(String::new()),
            page: create_rw_signal(0),
            sort_by: create_rw_signal("createdAt".to_string()),
            sort_direction: create_rw_signal(SortDirection::Descending),
        }
    }
}

impl LeaveFilterState {
    pub fn search_signal(&self) -> RwSignal<String> {
        self.search
    }

    pub fn category_signal(&self) -> RwSignal<String> {
        self.category
    }

    pub fn status_signal(&self) -> RwSignal<String> {
        self.status
    }

    pub fn start_from_signal(&self) -> RwSignal<String> {
        self.start_from
    }

    pub fn start_to_signal(&self) -> RwSignal<String> {
        self.start_to
    }

    pub fn page_signal(&self) -> RwSignal<u32> {
        self.page
    }

    pub fn sort_by_signal(&self) -> RwSignal<String> {
        self.sort_by
    }

    pub fn sort_direction_signal(&self) -> RwSignal<SortDirection> {
        self.sort_direction
    }

    pub fn reset(&self) {
        self.search.set(String::new());
        self.category.set(String::new());
        self.status.set(String::new());
        self.start_from.set(String::new());
        self.start_to.set(String::new());
        self.page.set(0);
    }

    /// Snapshot of the filter signals as a backend query. Unparseable
    /// select/date values fall back to unset rather than erroring; filters
    /// narrow, they do not block.
    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            page: self.page.get(),
            size: 20,
            sort_by: self.sort_by.get(),
            sort_direction: self.sort_direction.get(),
            filter: LeaveQueryFilter {
                search_term: optional_string(self.search.get()),
                category: LeaveCategory::parse(self.category.get().trim()),
                status: LeaveStatus::parse(self.status.get().trim()),
                start_date_from: NaiveDate::parse_from_str(
                    self.start_from.get().trim(),
                    "%Y-%m-%d",
                )
                .ok(),
                start_date_to: NaiveDate::parse_from_str(self.start_to.get().trim(), "%Y-%m-%d")
                    .ok(),
            },
        }
    }
}

fn ensure_owner(request: &LeaveRequestResponse, user: &UserContext) -> Result<(), ApiError> {
    if request.employee_id == user.employee_id {
        Ok(())
    } else {
        Err(ApiError::forbidden(
            "Only the requesting employee can change this leave request.",
        ))
    }
}

/// Owner-only, pending-only. Checked before any network call; the backend
/// enforces the same rule authoritatively.
pub fn ensure_can_edit(request: &LeaveRequestResponse, user: &UserContext) -> Result<(), ApiError> {
    ensure_owner(request, user)?;
    match request.status {
        LeaveStatus::Pending => Ok(()),
        LeaveStatus::Approved => Err(ApiError::validation(
            "Approved leave requests can no longer be edited.",
        )),
        LeaveStatus::Rejected => Err(ApiError::validation(
            "Rejected leave requests can no longer be edited.",
        )),
        LeaveStatus::Cancelled => Err(ApiError::validation(
            "Cancelled leave requests can no longer be edited.",
        )),
    }
}

pub fn ensure_can_cancel(
    request: &LeaveRequestResponse,
    user: &UserContext,
) -> Result<(), ApiError> {
    ensure_owner(request, user)?;
    match request.status {
        LeaveStatus::Pending => Ok(()),
        LeaveStatus::Approved | LeaveStatus::Rejected | LeaveStatus::Cancelled => Err(
            ApiError::validation("Only pending leave requests can be cancelled."),
        ),
    }
}

pub fn ensure_can_review(
    request: &LeaveRequestResponse,
    user: &UserContext,
) -> Result<(), ApiError> {
    if !user.role.is_reviewer() {
        return Err(ApiError::forbidden(
            "Only managers or HR can decide leave requests.",
        ));
    }
    if request.employee_id == user.employee_id {
        return Err(ApiError::forbidden(
            "Reviewers cannot decide their own leave requests.",
        ));
    }
    match request.status {
        LeaveStatus::Pending => Ok(()),
        LeaveStatus::Approved | LeaveStatus::Rejected | LeaveStatus::Cancelled => Err(
            ApiError::validation("Only pending leave requests can be decided."),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session::Role;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(employee_id: &str, status: LeaveStatus) -> LeaveRequestResponse {
        LeaveRequestResponse {
            id: "req-1".to_string(),
            employee_id: employee_id.to_string(),
            category: LeaveCategory::Vacation,
            start_date: date(2025, 3, 10),
            end_date: date(2025, 3, 12),
            day_count: 3,
            status,
            reason: None,
            approved_by: None,
            approved_at: None,
            decision_comment: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn user(employee_id: &str, role: Role) -> UserContext {
        UserContext {
            employee_id: employee_id.to_string(),
            display_name: "Test User".to_string(),
            role,
        }
    }

    #[test]
    fn day_span_is_inclusive() {
        assert_eq!(inclusive_day_span(date(2025, 1, 1), date(2025, 1, 1)), 1);
        assert_eq!(inclusive_day_span(date(2025, 1, 1), date(2025, 1, 5)), 5);
    }

    #[test]
    fn editing_an_approved_request_is_rejected_without_a_network_call() {
        let err = ensure_can_edit(
            &request("emp-1", LeaveStatus::Approved),
            &user("emp-1", Role::Employee),
        )
        .unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
    }

    #[test]
    fn editing_someone_elses_request_is_forbidden() {
        let err = ensure_can_edit(
            &request("emp-2", LeaveStatus::Pending),
            &user("emp-1", Role::Employee),
        )
        .unwrap_err();
        assert_eq!(err.code, "FORBIDDEN");
    }

    #[test]
    fn owner_may_edit_and_cancel_while_pending() {
        let pending = request("emp-1", LeaveStatus::Pending);
        let owner = user("emp-1", Role::Employee);
        assert!(ensure_can_edit(&pending, &owner).is_ok());
        assert!(ensure_can_cancel(&pending, &owner).is_ok());
        assert!(ensure_can_cancel(&request("emp-1", LeaveStatus::Cancelled), &owner).is_err());
    }

    #[test]
    fn review_requires_a_reviewer_role_on_someone_elses_pending_request() {
        let pending = request("emp-2", LeaveStatus::Pending);
        assert!(ensure_can_review(&pending, &user("emp-1", Role::Manager)).is_ok());
        assert_eq!(
            ensure_can_review(&pending, &user("emp-1", Role::Employee))
                .unwrap_err()
                .code,
            "FORBIDDEN"
        );
        assert_eq!(
            ensure_can_review(&pending, &user("emp-2", Role::Hr))
                .unwrap_err()
                .code,
            "FORBIDDEN"
        );
        assert!(
            ensure_can_review(&request("emp-2", LeaveStatus::Approved), &user("emp-1", Role::Hr))
                .is_err()
        );
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn form_rejects_inverted_date_ranges() {
        with_runtime(|| {
            let form = LeaveFormState::default();
            form.start_signal().set("2025-01-10".to_string());
            form.end_signal().set("2025-01-05".to_string());
            assert!(form.to_create_payload().is_err());
            assert!(form.parsed_range().is_none());
        });
    }

    #[test]
    fn form_builds_a_create_payload() {
        with_runtime(|| {
            let form = LeaveFormState::default();
            form.category_signal().set("sick".to_string());
            form.start_signal().set("2025-02-03".to_string());
            form.end_signal().set("2025-02-04".to_string());
            form.reason_signal().set("  flu  ".to_string());

            let payload = form.to_create_payload().unwrap();
            assert_eq!(payload.category, LeaveCategory::Sick);
            assert_eq!(payload.reason.as_deref(), Some("flu"));
            assert_eq!(form.day_count_preview(), Some(2));
        });
    }

    #[test]
    fn form_rejects_unknown_categories() {
        with_runtime(|| {
            let form = LeaveFormState::default();
            form.category_signal().set("sabbatical".to_string());
            form.start_signal().set("2025-02-03".to_string());
            form.end_signal().set("2025-02-04".to_string());
            assert!(form.to_create_payload().is_err());
        });
    }

    #[test]
    fn filter_snapshot_ignores_unparseable_values() {
        with_runtime(|| {
            let filter = LeaveFilterState::default();
            filter.search_signal().set("  smith ".to_string());
            filter.category_signal().set("nonsense".to_string());
            filter.status_signal().set("approved".to_string());
            filter.start_from_signal().set("2025-13-99".to_string());

            let query = filter.to_query();
            assert_eq!(query.filter.search_term.as_deref(), Some("smith"));
            assert!(query.filter.category.is_none());
            assert_eq!(query.filter.status, Some(LeaveStatus::Approved));
            assert!(query.filter.start_date_from.is_none());
        });
    }
}
