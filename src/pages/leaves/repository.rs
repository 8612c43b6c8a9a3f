use std::rc::Rc;

use chrono::NaiveDate;

use crate::api::{
    ApiClient, ApiError, CreateLeaveRequest, LeaveBalanceResponse, LeaveRequestResponse,
    ListQuery, PageResponse, SortDirection, UpdateLeaveRequest,
};

use super::conflict::{detect_conflict, ConflictCheckResult};

/// How much of the caller's history one conflict probe scans.
pub const CONFLICT_SCAN_WINDOW: u32 = 100;

#[derive(Clone)]
pub struct LeavesRepository {
    client: Rc<ApiClient>,
}

impl LeavesRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        query: &ListQuery,
    ) -> Result<PageResponse<LeaveRequestResponse>, ApiError> {
        self.client.list_leaves(query).await
    }

    pub async fn list_mine(
        &self,
        query: &ListQuery,
    ) -> Result<PageResponse<LeaveRequestResponse>, ApiError> {
        self.client.list_my_leaves(query).await
    }

    pub async fn get(&self, id: &str) -> Result<LeaveRequestResponse, ApiError> {
        self.client.get_leave(id).await
    }

    pub async fn create(
        &self,
        payload: &CreateLeaveRequest,
    ) -> Result<LeaveRequestResponse, ApiError> {
        self.client.create_leave(payload).await
    }

    pub async fn update(
        &self,
        id: &str,
        payload: &UpdateLeaveRequest,
    ) -> Result<LeaveRequestResponse, ApiError> {
        self.client.update_leave(id, payload).await
    }

    pub async fn cancel(&self, id: &str) -> Result<LeaveRequestResponse, ApiError> {
        self.client.cancel_leave(id).await
    }

    pub async fn approve(
        &self,
        id: &str,
        comment: Option<&str>,
    ) -> Result<LeaveRequestResponse, ApiError> {
        self.client.approve_leave(id, comment).await
    }

    pub async fn reject(
        &self,
        id: &str,
        comment: Option<&str>,
    ) -> Result<LeaveRequestResponse, ApiError> {
        self.client.reject_leave(id, comment).await
    }

    pub async fn my_balance(&self) -> Result<LeaveBalanceResponse, ApiError> {
        self.client.my_leave_balance().await
    }

    pub async fn balance_of(&self, employee_id: &str) -> Result<LeaveBalanceResponse, ApiError> {
        self.client.leave_balance_of(employee_id).await
    }

    /// Probes the caller's approved history for an overlap with
    /// `[start, end]`, skipping `exclude_id` when a request is being edited
    /// against itself.
    ///
    /// Fails open: a failed history fetch reports `check_failed` with the
    /// conflict flag down instead of an error, so an unreachable backend
    /// never blocks the caller. The server re-validates on submission.
    pub async fn check_date_conflict(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<&str>,
    ) -> ConflictCheckResult {
        let query = ListQuery {
            size: CONFLICT_SCAN_WINDOW,
            sort_by: "startDate".to_string(),
            sort_direction: SortDirection::Ascending,
            ..ListQuery::default()
        };
        match self.list_mine(&query).await {
            Ok(page) => detect_conflict(start, end, &page.items, exclude_id),
            Err(err) => {
                log::warn!("date-conflict check unavailable: {}", err);
                ConflictCheckResult::unavailable()
            }
        }
    }
}
