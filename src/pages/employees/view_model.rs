use leptos::*;

use crate::api::{
    ApiClient, ApiError, EmployeeResponse, LeaveBalanceResponse, ListQuery, PageResponse,
};
use crate::pages::leaves::repository::LeavesRepository;
use crate::pages::shared::MessageState;
use crate::state::session::SessionState;

use super::repository::EmployeesRepository;
use super::utils::DirectoryFilterState;

#[derive(Clone)]
pub struct EmployeesViewModel {
    pub filter: DirectoryFilterState,
    pub list_message: RwSignal<MessageState>,
    pub selected: RwSignal<Option<EmployeeResponse>>,
    pub session: ReadSignal<SessionState>,
    pub list_resource: Resource<(u32, ListQuery), Result<PageResponse<EmployeeResponse>, ApiError>>,
    /// Loads the selected employee's leave balance; reviewer scope.
    pub balance_action: Action<String, Result<LeaveBalanceResponse, ApiError>>,
    reload: RwSignal<u32>,
}

impl EmployeesViewModel {
    pub fn new(session: ReadSignal<SessionState>) -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(EmployeesRepository::new(api.clone()));
        let leaves = store_value(LeavesRepository::new(api));

        let filter = DirectoryFilterState::default();
        let list_message = create_rw_signal(MessageState::default());
        let selected = create_rw_signal(None::<EmployeeResponse>);
        let reload = create_rw_signal(0u32);

        let list_resource = create_resource(
            move || (reload.get(), filter.to_query()),
            move |(_, query)| {
                let repo = repository.get_value();
                async move { repo.list(&query).await }
            },
        );

        let balance_action = create_action(move |employee_id: &String| {
            let leaves = leaves.get_value();
            let employee_id = employee_id.clone();
            async move {
                let user = session
                    .get_untracked()
                    .user
                    .ok_or_else(|| ApiError::forbidden("No active session."))?;
                if employee_id == user.employee_id {
                    return leaves.my_balance().await;
                }
                if !user.role.is_reviewer() {
                    return Err(ApiError::forbidden(
                        "Only managers or HR can view another employee's leave balance.",
                    ));
                }
                leaves.balance_of(&employee_id).await
            }
        });

        Self {
            filter,
            list_message,
            selected,
            session,
            list_resource,
            balance_action,
            reload,
        }
    }

    pub fn refresh(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    /// Selects a directory entry and loads its leave balance.
    pub fn select(&self, employee: &EmployeeResponse) {
        self.list_message.update(|msg| msg.clear());
        self.selected.set(Some(employee.clone()));
        self.balance_action.dispatch(employee.id.clone());
    }

    pub fn clear_selection(&self) {
        self.selected.set(None);
    }

    pub fn employees(&self) -> Signal<Vec<EmployeeResponse>> {
        let resource = self.list_resource;
        Signal::derive(move || {
            resource
                .get()
                .and_then(|result| result.ok())
                .map(|page| page.items)
                .unwrap_or_default()
        })
    }
}

pub fn use_employees_view_model() -> EmployeesViewModel {
    match use_context::<EmployeesViewModel>() {
        Some(vm) => vm,
        None => {
            let (session, _) = crate::state::session::use_session();
            let vm = EmployeesViewModel::new(session);
            provide_context(vm.clone());
            vm
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::state::session::{Role, UserContext};
    use crate::test_support::ssr::with_local_runtime_async;
    use serde_json::json;

    fn balance_json(employee_id: &str) -> serde_json::Value {
        json!({
            "success": true,
            "message": "OK",
            "data": {
                "employee_id": employee_id,
                "year": 2025,
                "entries": [
                    { "category": "vacation", "entitled_days": 20.0, "used_days": 5.0, "remaining_days": 15.0 }
                ]
            },
            "timestamp": "2025-03-01T00:00:00Z"
        })
    }

    fn employee(id: &str) -> EmployeeResponse {
        EmployeeResponse {
            id: id.to_string(),
            full_name: "Mara Ito".to_string(),
            email: "mara.ito@example.com".to_string(),
            department: Some("Finance".to_string()),
            job_title: Some("Analyst".to_string()),
            active: true,
        }
    }

    fn session_with(role: Role, employee_id: &str) -> SessionState {
        SessionState {
            user: Some(UserContext {
                employee_id: employee_id.to_string(),
                display_name: "Test User".to_string(),
                role,
            }),
            loading: false,
        }
    }

    async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
        for _ in 0..100 {
            if condition() {
                return true;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        false
    }

    fn empty_directory(server: &MockServer) {
        server.mock(|when, then| {
            when.method(GET).path("/api/employees");
            then.status(200).json_body(json!({
                "success": true,
                "message": "OK",
                "data": { "page": 0, "size": 20, "total": 0, "items": [] },
                "timestamp": "2025-03-01T00:00:00Z"
            }));
        });
    }

    #[test]
    fn reviewers_can_load_another_employees_balance() {
        with_local_runtime_async(|| async {
            let runtime = leptos::create_runtime();
            let server = MockServer::start();
            empty_directory(&server);
            server.mock(|when, then| {
                when.method(GET).path("/api/leaves/emp-7/balance");
                then.status(200).json_body(balance_json("emp-7"));
            });
            provide_context(ApiClient::new_with_base_url(server.url("/api")));
            let (session, _) = create_signal(session_with(Role::Hr, "hr-1"));

            let vm = EmployeesViewModel::new(session);
            vm.select(&employee("emp-7"));

            assert!(
                wait_until(|| vm.balance_action.value().get().is_some()).await,
                "balance should load"
            );
            let balance = vm.balance_action.value().get().unwrap().unwrap();
            assert_eq!(balance.employee_id, "emp-7");
            assert_eq!(balance.total_remaining(), 15.0);
            runtime.dispose();
        });
    }

    #[test]
    fn non_reviewers_are_blocked_before_the_balance_call() {
        with_local_runtime_async(|| async {
            let runtime = leptos::create_runtime();
            let server = MockServer::start();
            empty_directory(&server);
            provide_context(ApiClient::new_with_base_url(server.url("/api")));
            let (session, _) = create_signal(session_with(Role::Employee, "emp-1"));

            let vm = EmployeesViewModel::new(session);
            vm.select(&employee("emp-7"));

            assert!(
                wait_until(|| vm.balance_action.value().get().is_some()).await,
                "balance attempt should resolve"
            );
            let err = vm.balance_action.value().get().unwrap().unwrap_err();
            assert_eq!(err.code, "FORBIDDEN");
            assert!(!server
                .received()
                .iter()
                .any(|(_, url)| url.contains("/balance")));
            runtime.dispose();
        });
    }

    #[test]
    fn owners_read_their_own_balance_through_the_owner_endpoint() {
        with_local_runtime_async(|| async {
            let runtime = leptos::create_runtime();
            let server = MockServer::start();
            empty_directory(&server);
            server.mock(|when, then| {
                when.method(GET).path("/api/leaves/my-balance");
                then.status(200).json_body(balance_json("emp-1"));
            });
            provide_context(ApiClient::new_with_base_url(server.url("/api")));
            let (session, _) = create_signal(session_with(Role::Employee, "emp-1"));

            let vm = EmployeesViewModel::new(session);
            vm.select(&employee("emp-1"));

            assert!(
                wait_until(|| vm.balance_action.value().get().is_some()).await,
                "balance should load"
            );
            let balance = vm.balance_action.value().get().unwrap().unwrap();
            assert_eq!(balance.employee_id, "emp-1");
            runtime.dispose();
        });
    }
}
