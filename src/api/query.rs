use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::{LeaveCategory, LeaveStatus};

pub const DATE_PARAM_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_param(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveQueryFilter {
    pub search_term: Option<String>,
    pub category: Option<LeaveCategory>,
    pub status: Option<LeaveStatus>,
    pub start_date_from: Option<NaiveDate>,
    pub start_date_to: Option<NaiveDate>,
}

/// Pagination, sorting and filtering for the list endpoints. "All requests"
/// and "my requests" retrieval share this shape; they differ only in
/// authorization scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Zero-based page index.
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub sort_direction: SortDirection,
    pub filter: LeaveQueryFilter,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort_by: "createdAt".to_string(),
            sort_direction: SortDirection::Descending,
            filter: LeaveQueryFilter::default(),
        }
    }
}

impl ListQuery {
    /// Serializes the query into the wire parameters the backend expects.
    ///
    /// Every set filter field becomes a `filter.<fieldName>` pair.
    /// `filter.searchTerm` is transmitted even when blank; the backend
    /// rejects list calls without the key.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
            ("sortBy".to_string(), self.sort_by.clone()),
            (
                "sortDirection".to_string(),
                self.sort_direction.as_param().to_string(),
            ),
        ];
        let search = self.filter.search_term.as_deref().unwrap_or("").trim();
        params.push(("filter.searchTerm".to_string(), search.to_string()));
        if let Some(category) = self.filter.category {
            params.push((
                "filter.category".to_string(),
                category.as_param().to_string(),
            ));
        }
        if let Some(status) = self.filter.status {
            params.push(("filter.status".to_string(), status.as_param().to_string()));
        }
        if let Some(from) = self.filter.start_date_from {
            params.push((
                "filter.startDateFrom".to_string(),
                from.format(DATE_PARAM_FORMAT).to_string(),
            ));
        }
        if let Some(to) = self.filter.start_date_to {
            params.push((
                "filter.startDateTo".to_string(),
                to.format(DATE_PARAM_FORMAT).to_string(),
            ));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut params: Vec<(String, String)>) -> Vec<(String, String)> {
        params.sort();
        params
    }

    #[test]
    fn empty_filter_still_transmits_blank_search_term() {
        let params = ListQuery::default().to_params();
        assert_eq!(params.len(), 5);
        assert!(params.contains(&("page".to_string(), "0".to_string())));
        assert!(params.contains(&("size".to_string(), "20".to_string())));
        assert!(params.contains(&("sortBy".to_string(), "createdAt".to_string())));
        assert!(params.contains(&("sortDirection".to_string(), "desc".to_string())));
        assert!(params.contains(&("filter.searchTerm".to_string(), String::new())));
    }

    #[test]
    fn single_filter_field_adds_exactly_one_pair() {
        let query = ListQuery {
            filter: LeaveQueryFilter {
                category: Some(LeaveCategory::Sick),
                ..LeaveQueryFilter::default()
            },
            ..ListQuery::default()
        };
        let params = query.to_params();
        assert_eq!(params.len(), 6);
        assert!(params.contains(&("filter.category".to_string(), "sick".to_string())));
        assert!(params.contains(&("filter.searchTerm".to_string(), String::new())));
    }

    #[test]
    fn full_filter_encodes_every_field() {
        let query = ListQuery {
            page: 2,
            size: 50,
            sort_by: "startDate".to_string(),
            sort_direction: SortDirection::Ascending,
            filter: LeaveQueryFilter {
                search_term: Some("smith".to_string()),
                category: Some(LeaveCategory::Vacation),
                status: Some(LeaveStatus::Pending),
                start_date_from: NaiveDate::from_ymd_opt(2025, 1, 1),
                start_date_to: NaiveDate::from_ymd_opt(2025, 12, 31),
            },
        };
        let params = query.to_params();
        assert_eq!(params.len(), 9);
        assert!(params.contains(&("filter.searchTerm".to_string(), "smith".to_string())));
        assert!(params.contains(&("filter.status".to_string(), "pending".to_string())));
        assert!(params.contains(&(
            "filter.startDateFrom".to_string(),
            "2025-01-01".to_string()
        )));
        assert!(params.contains(&(
            "filter.startDateTo".to_string(),
            "2025-12-31".to_string()
        )));
    }

    #[test]
    fn building_twice_yields_identical_parameters() {
        let query = ListQuery {
            filter: LeaveQueryFilter {
                search_term: Some("ito".to_string()),
                status: Some(LeaveStatus::Approved),
                ..LeaveQueryFilter::default()
            },
            ..ListQuery::default()
        };
        assert_eq!(sorted(query.to_params()), sorted(query.to_params()));
    }

    #[test]
    fn whitespace_search_term_is_transmitted_blank() {
        let query = ListQuery {
            filter: LeaveQueryFilter {
                search_term: Some("   ".to_string()),
                ..LeaveQueryFilter::default()
            },
            ..ListQuery::default()
        };
        assert!(query
            .to_params()
            .contains(&("filter.searchTerm".to_string(), String::new())));
    }
}
