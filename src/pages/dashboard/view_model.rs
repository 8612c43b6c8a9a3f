use leptos::*;

use crate::api::{ApiClient, ApiError, LeaveBalanceResponse, LeaveRequestResponse};
use crate::pages::leaves::types::LeaveSummary;
use crate::utils::time::today_in_app_tz;

use super::repository::DashboardRepository;
use super::utils::{build_alerts, next_upcoming, pending_count, DashboardAlert};

#[derive(Clone)]
pub struct DashboardViewModel {
    pub balance_resource: Resource<u32, Result<LeaveBalanceResponse, ApiError>>,
    pub overview_resource: Resource<u32, Result<Vec<LeaveRequestResponse>, ApiError>>,
    reload: RwSignal<u32>,
}

impl DashboardViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(DashboardRepository::new(api));

        let reload = create_rw_signal(0u32);

        let balance_resource = create_resource(
            move || reload.get(),
            move |_| {
                let repo = repository.get_value();
                async move { repo.fetch_balance().await }
            },
        );

        let overview_resource = create_resource(
            move || reload.get(),
            move |_| {
                let repo = repository.get_value();
                async move { repo.fetch_overview().await }
            },
        );

        Self {
            balance_resource,
            overview_resource,
            reload,
        }
    }

    pub fn refresh(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    pub fn pending_count(&self) -> Signal<usize> {
        let overview = self.overview_resource;
        Signal::derive(move || {
            overview
                .get()
                .and_then(|result| result.ok())
                .map(|items| pending_count(&items))
                .unwrap_or_default()
        })
    }

    pub fn upcoming_leave(&self) -> Signal<Option<LeaveSummary>> {
        let overview = self.overview_resource;
        Signal::derive(move || {
            overview
                .get()
                .and_then(|result| result.ok())
                .and_then(|items| next_upcoming(&items, today_in_app_tz()))
                .map(|request| LeaveSummary::from_response(&request))
        })
    }

    pub fn alerts(&self) -> Signal<Vec<DashboardAlert>> {
        let overview = self.overview_resource;
        let balance = self.balance_resource;
        Signal::derive(move || {
            let pending = overview
                .get()
                .and_then(|result| result.ok())
                .map(|items| pending_count(&items))
                .unwrap_or_default();
            let balance = balance.get().and_then(|result| result.ok());
            build_alerts(balance.as_ref(), pending)
        })
    }
}

impl Default for DashboardViewModel {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    match use_context::<DashboardViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = DashboardViewModel::new();
            provide_context(vm.clone());
            vm
        }
    }
}
