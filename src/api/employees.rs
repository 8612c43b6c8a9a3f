use super::client::ApiClient;
use super::query::ListQuery;
use super::types::{ApiError, EmployeeResponse, PageResponse};

impl ApiClient {
    /// `GET /employees` - the directory, with the shared query contract.
    pub async fn list_employees(
        &self,
        query: &ListQuery,
    ) -> Result<PageResponse<EmployeeResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let params = query.to_params();
        let response = self
            .send(|client| client.get(format!("{}/employees", base_url)).query(&params))
            .await?;
        self.unwrap_envelope(response).await
    }

    pub async fn get_employee(&self, id: &str) -> Result<EmployeeResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(|client| client.get(format!("{}/employees/{}", base_url, id)))
            .await?;
        self.unwrap_envelope(response).await
    }
}
