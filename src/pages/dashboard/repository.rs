use std::rc::Rc;

use crate::api::{
    ApiClient, ApiError, LeaveBalanceResponse, LeaveRequestResponse, ListQuery, SortDirection,
};
use crate::pages::leaves::repository::LeavesRepository;

/// Dashboard data is composed client-side from the leave facade; there is
/// no separate summary endpoint.
#[derive(Clone)]
pub struct DashboardRepository {
    leaves: LeavesRepository,
}

impl DashboardRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            leaves: LeavesRepository::new_with_client(Rc::new(api)),
        }
    }

    fn overview_query() -> ListQuery {
        ListQuery {
            size: 100,
            sort_by: "startDate".to_string(),
            sort_direction: SortDirection::Ascending,
            ..ListQuery::default()
        }
    }

    pub async fn fetch_overview(&self) -> Result<Vec<LeaveRequestResponse>, ApiError> {
        let page = self.leaves.list_mine(&Self::overview_query()).await?;
        Ok(page.items)
    }

    pub async fn fetch_balance(&self) -> Result<LeaveBalanceResponse, ApiError> {
        self.leaves.my_balance().await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    #[tokio::test]
    async fn overview_fetches_the_first_hundred_by_start_date() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/leaves/my-requests");
            then.status(200).json_body(json!({
                "success": true,
                "message": "OK",
                "data": { "page": 0, "size": 100, "total": 0, "items": [] },
                "timestamp": "2025-03-01T00:00:00Z"
            }));
        });

        let repo = DashboardRepository::new(ApiClient::new_with_base_url(server.url("/api")));
        let items = repo.fetch_overview().await.unwrap();
        assert!(items.is_empty());

        let url = &server.received()[0].1;
        assert!(url.contains("size=100"));
        assert!(url.contains("sortBy=startDate"));
    }
}
