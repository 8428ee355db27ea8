//! Product list query state.
//!
//! One value type owns everything the list URL encodes: search text, category
//! filter, sort column and direction, and the current page. Handlers parse it
//! from the query string, derive catalog request parameters from it, and print
//! it back into hrefs so every link on the page carries the full state.

use marigold_core::ProductId;

use crate::catalog::ListParams;

/// Products shown per page.
pub const PAGE_SIZE: u32 = 10;

// ===== Sort Keys =====

/// Sortable product columns, one per catalog sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    Price,
    CountInStock,
    Status,
    #[default]
    DateCreated,
}

impl SortField {
    /// Wire value for the catalog `sort` parameter.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::CountInStock => "countInStock",
            Self::Status => "status",
            Self::DateCreated => "dateCreated",
        }
    }

    /// Parse a wire value, `None` for unknown keys.
    #[must_use]
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            "countInStock" => Some(Self::CountInStock),
            "status" => Some(Self::Status),
            "dateCreated" => Some(Self::DateCreated),
            _ => None,
        }
    }

    /// Direction a column sorts by when none is given in the URL.
    ///
    /// The date column reads newest first; everything else reads A to Z.
    #[must_use]
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::DateCreated => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Wire value for the `dir` parameter.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse a wire value, `None` for unknown directions.
    #[must_use]
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

// ===== List Query State =====

/// Complete state of the product list page.
///
/// Defaults to newest first on page 1 with no search or filter. Navigation
/// helpers return a new value; a parsed query is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Name search text, empty when absent.
    pub search: String,
    /// Category ID filter, empty when absent.
    pub category: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    /// One-based page number.
    pub page: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            sort_field: SortField::DateCreated,
            sort_direction: SortDirection::Desc,
            page: 1,
        }
    }
}

impl ListQuery {
    /// Build list state from raw query string values.
    ///
    /// Unknown sort keys and directions fall back to defaults rather than
    /// erroring, so a hand-edited URL still renders a sensible page.
    #[must_use]
    pub fn from_params(
        search: Option<String>,
        category: Option<String>,
        sort: Option<String>,
        dir: Option<String>,
        page: Option<u32>,
    ) -> Self {
        let sort_field = sort
            .as_deref()
            .and_then(SortField::from_param)
            .unwrap_or_default();
        let sort_direction = dir
            .as_deref()
            .and_then(SortDirection::from_param)
            .unwrap_or_else(|| sort_field.default_direction());
        Self {
            search: search.unwrap_or_default(),
            category: category.unwrap_or_default(),
            sort_field,
            sort_direction,
            page: page.unwrap_or(1).max(1),
        }
    }

    /// Catalog request parameters for the current state.
    ///
    /// The sort key gets a `-` prefix for descending order; blank search and
    /// category collapse to absent parameters.
    #[must_use]
    pub fn derive_request_params(&self) -> ListParams {
        let sort = match self.sort_direction {
            SortDirection::Asc => self.sort_field.as_param().to_string(),
            SortDirection::Desc => format!("-{}", self.sort_field.as_param()),
        };
        let search = self.search.trim();
        let category = self.category.trim();
        ListParams {
            page: self.page,
            limit: PAGE_SIZE,
            sort,
            search: (!search.is_empty()).then(|| search.to_string()),
            category: (!category.is_empty()).then(|| category.to_string()),
        }
    }

    /// State after clicking a sort header.
    ///
    /// Clicking the active column flips its direction; clicking a new column
    /// sorts ascending. Search, filter, and page carry over unchanged.
    #[must_use]
    pub fn toggle_sort(&self, field: SortField) -> Self {
        let sort_direction = if field == self.sort_field {
            self.sort_direction.toggled()
        } else {
            SortDirection::Asc
        };
        Self {
            sort_field: field,
            sort_direction,
            ..self.clone()
        }
    }

    /// State after requesting `page`.
    ///
    /// Requests outside `1..=total_pages` keep the current page.
    #[must_use]
    pub fn with_page(&self, page: u32, total_pages: u32) -> Self {
        if page == 0 || page > total_pages {
            return self.clone();
        }
        Self {
            page,
            ..self.clone()
        }
    }

    /// Query string for the current state, without a leading `?`.
    ///
    /// Transient parameters (`confirm_delete`, flash messages) are never part
    /// of list state, so any link built from here drops them.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if !self.search.is_empty() {
            pairs.push(format!("search={}", urlencoding::encode(&self.search)));
        }
        if !self.category.is_empty() {
            pairs.push(format!("category={}", urlencoding::encode(&self.category)));
        }
        pairs.push(format!("sort={}", self.sort_field.as_param()));
        pairs.push(format!("dir={}", self.sort_direction.as_param()));
        pairs.push(format!("page={}", self.page));
        pairs.join("&")
    }

    /// Href for the list page in the current state.
    #[must_use]
    pub fn href(&self) -> String {
        format!("/products?{}", self.to_query_string())
    }

    /// Href for the sort header link of `field`.
    #[must_use]
    pub fn sort_href(&self, field: SortField) -> String {
        self.toggle_sort(field).href()
    }

    /// Href for a pagination link.
    #[must_use]
    pub fn page_href(&self, page: u32, total_pages: u32) -> String {
        self.with_page(page, total_pages).href()
    }

    /// Href that opens the delete confirmation for `id` without losing state.
    #[must_use]
    pub fn confirm_delete_href(&self, id: &ProductId) -> String {
        format!(
            "{}&confirm_delete={}",
            self.href(),
            urlencoding::encode(id.as_str())
        )
    }
}

// ===== Pagination Window =====

/// Page numbers to render in the pagination control.
///
/// At most five pages are shown. The window hugs the ends of the range
/// (the first five pages, or the last five) and otherwise centers on the
/// current page.
#[must_use]
pub fn page_window(page: u32, total_pages: u32) -> Vec<u32> {
    if total_pages <= 5 {
        return (1..=total_pages).collect();
    }
    if page <= 3 {
        (1..=5).collect()
    } else if page >= total_pages - 2 {
        (total_pages - 4..=total_pages).collect()
    } else {
        (page - 2..=page + 2).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(sort: &str, dir: &str) -> ListQuery {
        ListQuery::from_params(
            None,
            None,
            Some(sort.to_string()),
            Some(dir.to_string()),
            None,
        )
    }

    // ===== Defaults and Parsing =====

    #[test]
    fn test_default_is_newest_first() {
        let query = ListQuery::default();
        assert_eq!(query.sort_field, SortField::DateCreated);
        assert_eq!(query.sort_direction, SortDirection::Desc);
        assert_eq!(query.page, 1);
        assert!(query.search.is_empty());
        assert!(query.category.is_empty());
    }

    #[test]
    fn test_from_params_reads_all_values() {
        let query = ListQuery::from_params(
            Some("mug".to_string()),
            Some("cat-9".to_string()),
            Some("price".to_string()),
            Some("desc".to_string()),
            Some(3),
        );
        assert_eq!(query.search, "mug");
        assert_eq!(query.category, "cat-9");
        assert_eq!(query.sort_field, SortField::Price);
        assert_eq!(query.sort_direction, SortDirection::Desc);
        assert_eq!(query.page, 3);
    }

    #[test]
    fn test_from_params_unknown_values_fall_back() {
        let query = parsed("popularity", "sideways");
        assert_eq!(query.sort_field, SortField::DateCreated);
        assert_eq!(query.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_from_params_sort_without_dir_reads_ascending() {
        let query = ListQuery::from_params(None, None, Some("name".to_string()), None, None);
        assert_eq!(query.sort_field, SortField::Name);
        assert_eq!(query.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_from_params_zero_page_becomes_one() {
        let query = ListQuery::from_params(None, None, None, None, Some(0));
        assert_eq!(query.page, 1);
    }

    // ===== Request Parameters =====

    #[test]
    fn test_derive_request_params_defaults() {
        let params = ListQuery::default().derive_request_params();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, PAGE_SIZE);
        assert_eq!(params.sort, "-dateCreated");
        assert_eq!(params.search, None);
        assert_eq!(params.category, None);
    }

    #[test]
    fn test_derive_request_params_ascending_sort_has_no_prefix() {
        let params = parsed("countInStock", "asc").derive_request_params();
        assert_eq!(params.sort, "countInStock");
    }

    #[test]
    fn test_derive_request_params_includes_search_and_category() {
        let query = ListQuery {
            search: "espresso".to_string(),
            category: "cat-1".to_string(),
            ..ListQuery::default()
        };
        let params = query.derive_request_params();
        assert_eq!(params.search.as_deref(), Some("espresso"));
        assert_eq!(params.category.as_deref(), Some("cat-1"));
    }

    #[test]
    fn test_derive_request_params_skips_blank_search() {
        let query = ListQuery {
            search: "   ".to_string(),
            ..ListQuery::default()
        };
        assert_eq!(query.derive_request_params().search, None);
    }

    // ===== Sort Toggle =====

    #[test]
    fn test_toggle_sort_flips_active_column() {
        let query = parsed("price", "asc");
        let flipped = query.toggle_sort(SortField::Price);
        assert_eq!(flipped.sort_direction, SortDirection::Desc);
        let back = flipped.toggle_sort(SortField::Price);
        assert_eq!(back.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_toggle_sort_new_column_starts_ascending() {
        let query = ListQuery::default();
        let toggled = query.toggle_sort(SortField::Name);
        assert_eq!(toggled.sort_field, SortField::Name);
        assert_eq!(toggled.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_toggle_sort_keeps_search_filter_and_page() {
        let query = ListQuery {
            search: "mug".to_string(),
            category: "cat-2".to_string(),
            page: 4,
            ..ListQuery::default()
        };
        let toggled = query.toggle_sort(SortField::Status);
        assert_eq!(toggled.search, "mug");
        assert_eq!(toggled.category, "cat-2");
        assert_eq!(toggled.page, 4);
    }

    // ===== Page Changes =====

    #[test]
    fn test_with_page_moves_within_range() {
        let query = ListQuery::default();
        assert_eq!(query.with_page(3, 5).page, 3);
        assert_eq!(query.with_page(5, 5).page, 5);
        assert_eq!(query.with_page(1, 5).page, 1);
    }

    #[test]
    fn test_with_page_ignores_out_of_range_requests() {
        let query = ListQuery {
            page: 2,
            ..ListQuery::default()
        };
        assert_eq!(query.with_page(0, 5).page, 2);
        assert_eq!(query.with_page(6, 5).page, 2);
    }

    #[test]
    fn test_with_page_ignores_requests_when_no_pages() {
        let query = ListQuery::default();
        assert_eq!(query.with_page(1, 0).page, 1);
    }

    // ===== Hrefs =====

    #[test]
    fn test_href_prints_full_state() {
        let query = ListQuery {
            search: "coffee mug".to_string(),
            category: "cat-1".to_string(),
            sort_field: SortField::Price,
            sort_direction: SortDirection::Asc,
            page: 2,
        };
        assert_eq!(
            query.href(),
            "/products?search=coffee%20mug&category=cat-1&sort=price&dir=asc&page=2"
        );
    }

    #[test]
    fn test_sort_href_encodes_toggled_state() {
        let query = ListQuery::default();
        assert_eq!(
            query.sort_href(SortField::Name),
            "/products?sort=name&dir=asc&page=1"
        );
    }

    #[test]
    fn test_confirm_delete_href_appends_id() {
        let query = ListQuery::default();
        let href = query.confirm_delete_href(&ProductId::new("prod-7"));
        assert_eq!(
            href,
            "/products?sort=dateCreated&dir=desc&page=1&confirm_delete=prod-7"
        );
    }

    // ===== Pagination Window =====

    #[test]
    fn test_page_window_shows_every_page_when_few() {
        assert_eq!(page_window(1, 4), vec![1, 2, 3, 4]);
        assert_eq!(page_window(3, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_window_hugs_start_of_range() {
        assert_eq!(page_window(1, 9), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(3, 9), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(1, 12), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_window_centers_on_current_page() {
        assert_eq!(page_window(5, 9), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(4, 10), vec![2, 3, 4, 5, 6]);
        assert_eq!(page_window(7, 12), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_page_window_hugs_end_of_range() {
        assert_eq!(page_window(7, 9), vec![5, 6, 7, 8, 9]);
        assert_eq!(page_window(9, 9), vec![5, 6, 7, 8, 9]);
        assert_eq!(page_window(12, 12), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_page_window_empty_when_no_pages() {
        assert!(page_window(1, 0).is_empty());
    }
}
