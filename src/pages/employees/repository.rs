use std::rc::Rc;

use crate::api::{ApiClient, ApiError, EmployeeResponse, ListQuery, PageResponse};

#[derive(Clone)]
pub struct EmployeesRepository {
    client: Rc<ApiClient>,
}

impl EmployeesRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn list(
        &self,
        query: &ListQuery,
    ) -> Result<PageResponse<EmployeeResponse>, ApiError> {
        self.client.list_employees(query).await
    }

    pub async fn get(&self, id: &str) -> Result<EmployeeResponse, ApiError> {
        self.client.get_employee(id).await
    }
}
