use leptos::*;

use crate::api::{LeaveQueryFilter, ListQuery, SortDirection};

/// Search and paging state for the directory listing.
#[derive(Clone, Copy)]
pub struct DirectoryFilterState {
    search: RwSignal<String>,
    page: RwSignal<u32>,
}

impl Default for DirectoryFilterState {
    fn default() -> Self {
        Self {
            search: create_rw_signal(String::new()),
            page: create_rw_signal(0),
        }
    }
}

impl DirectoryFilterState {
    pub fn search_signal(&self) -> RwSignal<String> {
        self.search
    }

    pub fn page_signal(&self) -> RwSignal<u32> {
        self.page
    }

    pub fn reset(&self) {
        self.search.set(String::new());
        self.page.set(0);
    }

    pub fn to_query(&self) -> ListQuery {
        let search = self.search.get();
        let trimmed = search.trim();
        ListQuery {
            page: self.page.get(),
            size: 20,
            sort_by: "fullName".to_string(),
            sort_direction: SortDirection::Ascending,
            filter: LeaveQueryFilter {
                search_term: (!trimmed.is_empty()).then(|| trimmed.to_string()),
                ..LeaveQueryFilter::default()
            },
        }
    }
}
