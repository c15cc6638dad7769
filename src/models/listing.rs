use serde::Deserialize;
use crate::models::purchase_request::PurchaseRequest;

/// Dashboard filters. Empty strings mean "no filter".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrFilters {
    pub department: String,
    pub requester: String,
    pub location: String,
    pub search: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Department,
    Requester,
    Location,
    Search,
}

impl FilterField {
    pub fn name(&self) -> &'static str {
        match self {
            FilterField::Department => "department",
            FilterField::Requester => "requester",
            FilterField::Location => "location",
            FilterField::Search => "search",
        }
    }
}

impl PrFilters {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Department => &self.department,
            FilterField::Requester => &self.requester,
            FilterField::Location => &self.location,
            FilterField::Search => &self.search,
        }
    }

    /// Set a field. Returns false when the value did not change.
    pub fn set(&mut self, field: FilterField, value: &str) -> bool {
        let slot = match field {
            FilterField::Department => &mut self.department,
            FilterField::Requester => &mut self.requester,
            FilterField::Location => &mut self.location,
            FilterField::Search => &mut self.search,
        };
        if slot == value {
            return false;
        }
        *slot = value.to_string();
        true
    }

    /// Non-empty filters as query pairs
    pub fn active(&self) -> Vec<(&'static str, &str)> {
        [FilterField::Department, FilterField::Requester, FilterField::Location, FilterField::Search]
            .into_iter()
            .map(|field| (field.name(), self.get(field).trim()))
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }

    /// Client-side match, used when the backend ignores filters.
    /// Field filters are case-insensitive substring matches; `search`
    /// looks at code, UPRN and requester.
    pub fn matches(&self, pr: &PurchaseRequest) -> bool {
        fn contains(haystack: &str, needle: &str) -> bool {
            let needle = needle.trim();
            needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        contains(&pr.department, &self.department)
            && contains(&pr.requester, &self.requester)
            && contains(&pr.location, &self.location)
            && (contains(&pr.code, &self.search)
                || contains(&pr.uprn, &self.search)
                || contains(&pr.requester, &self.search))
    }
}

/// Parameters of one list request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub filters: PrFilters,
}

impl ListQuery {
    /// URL query string, values percent-encoded
    pub fn to_query_string(&self) -> String {
        let page = self.page.to_string();
        let limit = self.limit.to_string();
        let mut pairs = vec![("page", page.as_str()), ("limit", limit.as_str())];
        pairs.extend(self.filters.active());
        pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Raw `GET /api/pr` body: either a bare array or a paged envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Paged {
        items: Vec<PurchaseRequest>,
        #[serde(rename = "totalPages", default = "one")]
        total_pages: u32,
    },
    Plain(Vec<PurchaseRequest>),
}

fn one() -> u32 {
    1
}

/// One page of PRs ready for display
#[derive(Clone, Debug, PartialEq)]
pub struct PrPage {
    pub items: Vec<PurchaseRequest>,
    pub total_pages: u32,
}

impl ListResponse {
    /// Normalise into a page. A bare array is filtered and paged locally.
    pub fn into_page(self, query: &ListQuery) -> PrPage {
        match self {
            ListResponse::Paged { items, total_pages } => PrPage {
                items,
                total_pages: total_pages.max(1),
            },
            ListResponse::Plain(all) => {
                let matching: Vec<PurchaseRequest> = all
                    .into_iter()
                    .filter(|pr| query.filters.matches(pr))
                    .collect();
                let limit = query.limit.max(1) as usize;
                let total_pages = matching.len().div_ceil(limit).max(1) as u32;
                let page = query.page.clamp(1, total_pages) as usize;
                let items = matching
                    .into_iter()
                    .skip((page - 1) * limit)
                    .take(limit)
                    .collect();
                PrPage { items, total_pages }
            }
        }
    }
}

/// 1-indexed page cursor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, total_pages: 1 }
    }
}

impl Pagination {
    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Target of "Prev", None when disabled
    pub fn prev(&self) -> Option<u32> {
        self.can_prev().then(|| self.page - 1)
    }

    /// Target of "Next", None when disabled
    pub fn next(&self) -> Option<u32> {
        self.can_next().then(|| self.page + 1)
    }

    /// Record a new page count, keeping the cursor in range
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        self.page = self.page.clamp(1, self.total_pages);
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pr(code: &str, department: &str, location: &str, requester: &str) -> PurchaseRequest {
        PurchaseRequest {
            id: Some(code.to_string()),
            code: code.to_string(),
            uprn: format!("U-{}", code),
            location: location.to_string(),
            department: department.to_string(),
            estimated_amount: 10.0,
            requester: requester.to_string(),
            date: None,
            created_at: None,
        }
    }

    #[test]
    fn pagination_edges_are_no_ops() {
        let first = Pagination { page: 1, total_pages: 3 };
        assert_eq!(first.prev(), None);
        assert_eq!(first.next(), Some(2));

        let last = Pagination { page: 3, total_pages: 3 };
        assert_eq!(last.next(), None);
        assert_eq!(last.prev(), Some(2));

        let single = Pagination::default();
        assert!(!single.can_prev());
        assert!(!single.can_next());
    }

    #[test]
    fn shrinking_page_count_clamps_cursor() {
        let mut p = Pagination { page: 5, total_pages: 5 };
        p.set_total_pages(2);
        assert_eq!(p, Pagination { page: 2, total_pages: 2 });
        p.set_total_pages(0);
        assert_eq!(p, Pagination { page: 1, total_pages: 1 });
    }

    #[test]
    fn query_string_skips_empty_filters_and_encodes() {
        let query = ListQuery {
            page: 2,
            limit: 10,
            filters: PrFilters {
                department: "WASH".to_string(),
                search: "SY-RQ & co".to_string(),
                ..PrFilters::default()
            },
        };
        assert_eq!(
            query.to_query_string(),
            "page=2&limit=10&department=WASH&search=SY-RQ%20%26%20co"
        );
    }

    #[test]
    fn set_reports_changes_only() {
        let mut f = PrFilters::default();
        assert!(f.set(FilterField::Location, "Raqqa"));
        assert!(!f.set(FilterField::Location, "Raqqa"));
        assert_eq!(f.get(FilterField::Location), "Raqqa");
    }

    #[test]
    fn filters_match_case_insensitively() {
        let item = pr("SY-RQ-HC-1234", "Health", "Raqqa", "Ana Haddad");
        let mut f = PrFilters::default();
        assert!(f.matches(&item));
        f.requester = "ana".to_string();
        assert!(f.matches(&item));
        f.search = "rq-hc".to_string();
        assert!(f.matches(&item));
        f.department = "WASH".to_string();
        assert!(!f.matches(&item));
    }

    #[test]
    fn paged_envelope_is_taken_as_is() {
        let body = r#"{"items":[{"code":"SY-RQ-HC-1000"}],"totalPages":4}"#;
        let resp: ListResponse = serde_json::from_str(body).unwrap();
        let query = ListQuery { page: 1, limit: 10, filters: PrFilters::default() };
        let page = resp.into_page(&query);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn plain_array_is_filtered_and_paged_locally() {
        let all: Vec<PurchaseRequest> = (0..25)
            .map(|i| {
                let dep = if i % 2 == 0 { "Health" } else { "WASH" };
                pr(&format!("C{}", i), dep, "Raqqa", "Ana")
            })
            .collect();
        let body = serde_json::to_string(&all).unwrap();

        let resp: ListResponse = serde_json::from_str(&body).unwrap();
        let query = ListQuery { page: 3, limit: 10, filters: PrFilters::default() };
        let page = resp.into_page(&query);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].code, "C20");

        let resp: ListResponse = serde_json::from_str(&body).unwrap();
        let query = ListQuery {
            page: 1,
            limit: 10,
            filters: PrFilters { department: "wash".to_string(), ..PrFilters::default() },
        };
        let page = resp.into_page(&query);
        assert_eq!(page.total_pages, 2);
        assert!(page.items.iter().all(|p| p.department == "WASH"));
    }

    #[test]
    fn empty_plain_array_has_one_page() {
        let resp: ListResponse = serde_json::from_str("[]").unwrap();
        let query = ListQuery { page: 1, limit: 10, filters: PrFilters::default() };
        assert_eq!(resp.into_page(&query), PrPage { items: vec![], total_pages: 1 });
    }
}
