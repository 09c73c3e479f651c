//! Data table component types.
//!
//! These types describe the tables on list pages: columns, the filter bar,
//! the pager, and the query string that carries filter state between links.

use serde::{Deserialize, Serialize};

use crate::filters::humanize_label;

use rentdesk_core::{
    BookingStatus, ListingStatus, Pagination, TransactionKind, TransactionStatus, UserRole,
    UserStatus,
};

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Right-align (amounts, counts).
    pub numeric: bool,
}

impl TableColumn {
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            numeric: false,
        }
    }

    #[must_use]
    pub fn numeric(key: &str, label: &str) -> Self {
        Self {
            numeric: true,
            ..Self::new(key, label)
        }
    }
}

/// Filter type for data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Text input filter.
    Text,
    /// Single-select dropdown.
    Select,
    /// Date input.
    Date,
}

/// Filter definition for a data table, with its current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFilter {
    /// Query parameter key.
    pub key: String,
    /// Display label.
    pub label: String,
    pub filter_type: FilterType,
    /// Placeholder text (for text inputs).
    pub placeholder: Option<String>,
    /// Available options (for selects).
    pub options: Vec<FilterOption>,
    /// Value currently in the URL.
    pub value: String,
}

/// Option for select filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    /// Whether this option matches the current URL.
    pub selected: bool,
}

impl FilterOption {
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: false,
        }
    }
}

impl TableFilter {
    /// Create a text filter.
    #[must_use]
    pub fn text(key: &str, label: &str, placeholder: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Text,
            placeholder: Some(placeholder.to_string()),
            options: vec![],
            value: String::new(),
        }
    }

    /// Create a select filter. An "All" option is rendered by the template.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Select,
            placeholder: None,
            options,
            value: String::new(),
        }
    }

    /// Create a date filter.
    #[must_use]
    pub fn date(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Date,
            placeholder: None,
            options: vec![],
            value: String::new(),
        }
    }

    /// Select filter over every variant of a wire enum.
    #[must_use]
    pub fn from_enum<T: Copy + std::fmt::Display>(
        key: &str,
        label: &str,
        variants: &[T],
        label_of: impl Fn(T) -> String,
    ) -> Self {
        let options = variants
            .iter()
            .map(|v| FilterOption::new(&v.to_string(), &label_of(*v)))
            .collect();
        Self::select(key, label, options)
    }

    /// Set the current value and mark the matching option.
    #[must_use]
    pub fn with_value(mut self, value: Option<&str>) -> Self {
        let value = value.unwrap_or_default().trim();
        for option in &mut self.options {
            option.selected = option.value == value;
        }
        self.value = value.to_string();
        self
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.filter_type == FilterType::Text
    }

    #[must_use]
    pub fn is_select(&self) -> bool {
        self.filter_type == FilterType::Select
    }

    #[must_use]
    pub fn is_date(&self) -> bool {
        self.filter_type == FilterType::Date
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    pub columns: Vec<TableColumn>,
    pub filters: Vec<TableFilter>,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            filters: vec![],
            empty_title: "No items found".to_string(),
            empty_description: None,
        }
    }

    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Fill every filter's current value from the request.
    #[must_use]
    pub fn with_values(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.filters = self
            .filters
            .into_iter()
            .map(|f| {
                let value = lookup(&f.key);
                f.with_value(value.as_deref())
            })
            .collect();
        self
    }

    /// Whether any filter is set, for "clear filters" links.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.filters.iter().any(|f| !f.value.is_empty())
    }
}

fn titled(value: impl std::fmt::Display) -> String {
    humanize_label(&value.to_string())
}

/// Build the bookings table configuration.
#[must_use]
pub fn bookings_table_config() -> DataTableConfig {
    DataTableConfig::new("bookings")
        .column(TableColumn::new("reference", "Booking"))
        .column(TableColumn::new("listing", "Listing"))
        .column(TableColumn::new("guest", "Guest"))
        .column(TableColumn::new("dates", "Dates"))
        .column(TableColumn::numeric("guests", "Guests"))
        .column(TableColumn::numeric("total", "Total"))
        .column(TableColumn::new("status", "Status"))
        .filter(TableFilter::text("q", "Search", "Code, guest or listing"))
        .filter(TableFilter::from_enum(
            "status",
            "Status",
            BookingStatus::ALL,
            |s| s.label().to_string(),
        ))
        .filter(TableFilter::date("from", "Check-in from"))
        .filter(TableFilter::date("to", "Check-in to"))
        .empty_state(
            "No bookings found",
            Some("Try adjusting your search or filters"),
        )
}

/// Build the listings table configuration.
#[must_use]
pub fn listings_table_config(categories: Vec<FilterOption>) -> DataTableConfig {
    DataTableConfig::new("listings")
        .column(TableColumn::new("title", "Listing"))
        .column(TableColumn::new("city", "City"))
        .column(TableColumn::new("host", "Host"))
        .column(TableColumn::numeric("price", "Per night"))
        .column(TableColumn::numeric("guests", "Guests"))
        .column(TableColumn::new("status", "Status"))
        .filter(TableFilter::text("q", "Search", "Title or city"))
        .filter(TableFilter::from_enum(
            "status",
            "Status",
            ListingStatus::ALL,
            titled,
        ))
        .filter(TableFilter::select("category_id", "Category", categories))
        .empty_state(
            "No listings found",
            Some("Try adjusting your search or filters"),
        )
}

/// Build the users table configuration.
#[must_use]
pub fn users_table_config() -> DataTableConfig {
    DataTableConfig::new("users")
        .column(TableColumn::new("name", "Name"))
        .column(TableColumn::new("email", "Email"))
        .column(TableColumn::new("role", "Role"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("joined", "Joined"))
        .filter(TableFilter::text("q", "Search", "Name or email"))
        .filter(TableFilter::from_enum("role", "Role", UserRole::ALL, titled))
        .filter(TableFilter::from_enum(
            "status",
            "Status",
            UserStatus::ALL,
            titled,
        ))
        .empty_state("No users found", Some("Try adjusting your search or filters"))
}

/// Build the transactions table configuration.
#[must_use]
pub fn transactions_table_config() -> DataTableConfig {
    DataTableConfig::new("transactions")
        .column(TableColumn::new("reference", "Reference"))
        .column(TableColumn::new("booking", "Booking"))
        .column(TableColumn::new("user", "User"))
        .column(TableColumn::new("kind", "Type"))
        .column(TableColumn::numeric("amount", "Amount"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("created", "Date"))
        .filter(TableFilter::text("q", "Search", "Reference"))
        .filter(TableFilter::from_enum(
            "kind",
            "Type",
            TransactionKind::ALL,
            titled,
        ))
        .filter(TableFilter::from_enum(
            "status",
            "Status",
            TransactionStatus::ALL,
            titled,
        ))
        .empty_state("No transactions found", None)
}

// =============================================================================
// Query strings and local filtering
// =============================================================================

/// Build a query string from the non-empty parameters, without the leading `?`.
///
/// Used for pager and "back to list" links so filter state survives
/// navigation.
#[must_use]
pub fn preserve_params(params: &[(&str, Option<String>)]) -> String {
    params
        .iter()
        .filter_map(|(key, value)| {
            let value = value.as_deref()?.trim();
            (!value.is_empty()).then(|| format!("{key}={}", urlencoding::encode(value)))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Case-insensitive substring match of `query` against any haystack.
///
/// A blank query matches everything.
#[must_use]
pub fn matches_search(query: &str, haystacks: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystacks
        .iter()
        .any(|h| h.to_lowercase().contains(&needle))
}

// =============================================================================
// Pager
// =============================================================================

/// One numbered pager link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerLink {
    pub number: u32,
    pub href: String,
    pub current: bool,
}

/// Pager rendered under a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub previous: Option<String>,
    pub next: Option<String>,
    pub pages: Vec<PagerLink>,
    /// "Showing 16-30 of 42".
    pub summary: String,
    pub page_count: u32,
}

/// Pages shown either side of the current one.
const PAGER_RADIUS: u32 = 2;

impl PagerView {
    /// Build pager links for `base_path`, keeping `preserved` filter params.
    #[must_use]
    pub fn new(pagination: &Pagination, base_path: &str, preserved: &str) -> Self {
        let href = |page: u32| {
            let mut query = format!("page={page}&per_page={}", pagination.per_page);
            if !preserved.is_empty() {
                query.push('&');
                query.push_str(preserved);
            }
            format!("{base_path}?{query}")
        };

        let summary = if pagination.total == 0 {
            "No results".to_string()
        } else if pagination.is_past_end() {
            format!("No results on this page ({} in total)", pagination.total)
        } else {
            format!(
                "Showing {}-{} of {}",
                pagination.first_row(),
                pagination.last_row(),
                pagination.total
            )
        };

        Self {
            previous: pagination.previous_page().map(href),
            next: pagination.next_page().map(href),
            pages: pagination
                .window(PAGER_RADIUS)
                .into_iter()
                .map(|number| PagerLink {
                    number,
                    href: href(number),
                    current: number == pagination.page,
                })
                .collect(),
            summary,
            page_count: pagination.page_count(),
        }
    }

    /// Whether there is more than one page to navigate.
    #[must_use]
    pub const fn is_multi_page(&self) -> bool {
        self.page_count > 1
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_preserve_params_skips_empty_and_encodes() {
        let qs = preserve_params(&[
            ("q", Some("canal loft".to_string())),
            ("status", Some(String::new())),
            ("from", None),
            ("to", Some("2026-11-30".to_string())),
        ]);
        assert_eq!(qs, "q=canal%20loft&to=2026-11-30");
    }

    #[test]
    fn test_matches_search() {
        assert!(matches_search("", &["anything"]));
        assert!(matches_search("WIFI", &["Fast wifi", "icon"]));
        assert!(matches_search(" pool ", &["", "Heated pool"]));
        assert!(!matches_search("sauna", &["Wifi", "Pool"]));
    }

    #[test]
    fn test_matches_search_narrows_rows() {
        let rows = ["Wifi", "Pool", "Parking", "Pet friendly"];
        let narrowed: Vec<_> = rows
            .iter()
            .filter(|r| matches_search("p", &[r]))
            .collect();
        assert_eq!(narrowed.len(), 3);
    }

    #[test]
    fn test_filter_with_value_marks_option() {
        let config = bookings_table_config().with_values(|key| match key {
            "status" => Some("confirmed".to_string()),
            _ => None,
        });
        let status = config.filters.iter().find(|f| f.key == "status").unwrap();
        assert_eq!(status.value, "confirmed");
        let selected: Vec<_> = status.options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, "confirmed");
        assert!(config.is_filtered());
        assert!(!bookings_table_config().is_filtered());
    }

    #[test]
    fn test_pager_links() {
        let pagination = Pagination::new(2, 15, 42);
        let pager = PagerView::new(&pagination, "/bookings", "status=pending");
        assert_eq!(
            pager.previous.as_deref(),
            Some("/bookings?page=1&per_page=15&status=pending")
        );
        assert_eq!(
            pager.next.as_deref(),
            Some("/bookings?page=3&per_page=15&status=pending")
        );
        assert_eq!(pager.page_count, 3);
        assert_eq!(
            pager.pages.iter().map(|p| p.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(pager.pages[1].current);
        assert_eq!(pager.summary, "Showing 16-30 of 42");
        assert!(pager.is_multi_page());
    }

    #[test]
    fn test_pager_empty() {
        let pager = PagerView::new(&Pagination::new(1, 15, 0), "/users", "");
        assert!(pager.previous.is_none());
        assert!(pager.next.is_none());
        assert!(pager.pages.is_empty());
        assert_eq!(pager.summary, "No results");
        assert!(!pager.is_multi_page());
    }

    #[test]
    fn test_pager_past_last_page() {
        let pager = PagerView::new(&Pagination::new(99, 15, 42), "/bookings", "");
        assert_eq!(pager.summary, "No results on this page (42 in total)");
        assert!(pager.next.is_none());
    }

    #[test]
    fn test_titled() {
        assert_eq!(titled("house_types"), "House types");
        assert_eq!(titled(ListingStatus::Inactive), "Inactive");
    }
}
