use serde_json::json;

use super::client::ApiClient;
use super::query::ListQuery;
use super::types::{
    ApiError, CreateLeaveRequest, LeaveBalanceResponse, LeaveRequestResponse, PageResponse,
    UpdateLeaveRequest,
};

impl ApiClient {
    /// `GET /leaves` - every employee's requests (reviewer scope).
    pub async fn list_leaves(
        &self,
        query: &ListQuery,
    ) -> Result<PageResponse<LeaveRequestResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let params = query.to_params();
        let response = self
            .send(|client| client.get(format!("{}/leaves", base_url)).query(&params))
            .await?;
        self.unwrap_envelope(response).await
    }

    /// `GET /leaves/my-requests` - the caller's requests; same query contract.
    pub async fn list_my_leaves(
        &self,
        query: &ListQuery,
    ) -> Result<PageResponse<LeaveRequestResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let params = query.to_params();
        let response = self
            .send(|client| {
                client
                    .get(format!("{}/leaves/my-requests", base_url))
                    .query(&params)
            })
            .await?;
        self.unwrap_envelope(response).await
    }

    pub async fn get_leave(&self, id: &str) -> Result<LeaveRequestResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|client| client.get(format!("{}/leaves/{}", base_url, id)))
            .await?;
        self.unwrap_envelope(response).await
    }

    pub async fn create_leave(
        &self,
        payload: &CreateLeaveRequest,
    ) -> Result<LeaveRequestResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|client| client.post(format!("{}/leaves", base_url)).json(payload))
            .await?;
        self.unwrap_envelope(response).await
    }

    /// `PATCH /leaves/{id}` - partial update of a pending request.
    pub async fn update_leave(
        &self,
        id: &str,
        payload: &UpdateLeaveRequest,
    ) -> Result<LeaveRequestResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|client| {
                client
                    .patch(format!("{}/leaves/{}", base_url, id))
                    .json(payload)
            })
            .await?;
        self.unwrap_envelope(response).await
    }

    /// `DELETE /leaves/{id}` - owner cancellation, terminal.
    pub async fn cancel_leave(&self, id: &str) -> Result<LeaveRequestResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|client| client.delete(format!("{}/leaves/{}", base_url, id)))
            .await?;
        self.unwrap_envelope(response).await
    }

    pub async fn approve_leave(
        &self,
        id: &str,
        comment: Option<&str>,
    ) -> Result<LeaveRequestResponse, ApiError> {
        self.decide_leave(id, "approve", comment).await
    }

    pub async fn reject_leave(
        &self,
        id: &str,
        comment: Option<&str>,
    ) -> Result<LeaveRequestResponse, ApiError> {
        self.decide_leave(id, "reject", comment).await
    }

    async fn decide_leave(
        &self,
        id: &str,
        action: &str,
        comment: Option<&str>,
    ) -> Result<LeaveRequestResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|client| {
                client
                    .patch(format!("{}/leaves/{}/{}", base_url, id, action))
                    .json(&json!({ "comment": comment }))
            })
            .await?;
        self.unwrap_envelope(response).await
    }

    pub async fn my_leave_balance(&self) -> Result<LeaveBalanceResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|client| client.get(format!("{}/leaves/my-balance", base_url)))
            .await?;
        self.unwrap_envelope(response).await
    }

    /// `GET /leaves/{employeeId}/balance` - reviewer scope.
    pub async fn leave_balance_of(
        &self,
        employee_id: &str,
    ) -> Result<LeaveBalanceResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|client| client.get(format!("{}/leaves/{}/balance", base_url, employee_id)))
            .await?;
        self.unwrap_envelope(response).await
    }
}
