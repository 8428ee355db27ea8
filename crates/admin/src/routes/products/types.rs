//! Type definitions and conversions for product views.

use rust_decimal::Decimal;
use serde::Deserialize;

use marigold_core::{ProductStatus, sale_price};

use crate::catalog::Product;
use crate::components::data_table::{TableColumn, TableFilter};
use crate::models::{ListQuery, SortDirection, SortField};

/// Stock level at or below which the list flags a product.
const LOW_STOCK_THRESHOLD: i64 = 5;

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters for the products list with searching, filtering, sorting,
/// and pagination, plus the transient page state carried across redirects.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Name search text.
    pub search: Option<String>,
    /// Category ID filter.
    pub category: Option<String>,
    /// Sort column key.
    pub sort: Option<String>,
    /// Sort direction (asc/desc).
    pub dir: Option<String>,
    /// One-based page number.
    pub page: Option<String>,
    /// Product awaiting delete confirmation.
    pub confirm_delete: Option<String>,
    /// Success flash code set by a preceding redirect.
    pub success: Option<String>,
    /// Error flash code set by a preceding redirect.
    pub error: Option<String>,
}

impl ProductsQuery {
    /// List state encoded by this URL.
    ///
    /// Garbage values (an unparseable page, an unknown sort key) fall back to
    /// defaults instead of rejecting the request.
    #[must_use]
    pub fn list_query(&self) -> ListQuery {
        ListQuery::from_params(
            self.search.clone(),
            self.category.clone(),
            self.sort.clone(),
            self.dir.clone(),
            self.page.as_deref().and_then(|p| p.parse().ok()),
        )
    }
}

// =============================================================================
// Table View Types
// =============================================================================

/// One product row in the list table, everything preformatted for display.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub id: String,
    pub name: String,
    pub sku: String,
    /// Category display name, empty when unassigned.
    pub category: String,
    /// Thumbnail URL, if the product has any image.
    pub image_url: Option<String>,
    pub price: Decimal,
    /// Discounted price, present only for products on sale.
    pub sale_price: Option<Decimal>,
    pub stock: i64,
    pub low_stock: bool,
    pub featured: bool,
    pub status_label: String,
    pub status_class: String,
    /// Creation date, empty when the catalog omits it.
    pub created: String,
    pub edit_href: String,
}

impl From<&Product> for ProductRowView {
    fn from(product: &Product) -> Self {
        let (status_label, status_class) = format_status(product.status);
        let discounted = (product.on_sale && product.discount_percentage > Decimal::ZERO)
            .then(|| sale_price(product.price, product.discount_percentage));

        Self {
            id: product.id.as_str().to_string(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            category: product
                .category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            image_url: product.display_image().map(|image| image.url.clone()),
            price: product.price,
            sale_price: discounted,
            stock: product.stock_quantity,
            low_stock: product.stock_quantity <= LOW_STOCK_THRESHOLD,
            featured: product.is_featured,
            status_label,
            status_class,
            created: product
                .date_created
                .map(|d| d.format("%b %-d, %Y").to_string())
                .unwrap_or_default(),
            edit_href: format!("/products/{}/edit", product.id),
        }
    }
}

/// The product named in an open delete confirmation dialog.
#[derive(Debug, Clone)]
pub struct DeleteTargetView {
    pub id: String,
    pub name: String,
    /// Form action for the confirming POST.
    pub action: String,
}

/// A rendered column header. Sortable columns carry their toggle link and,
/// when active, a direction indicator.
#[derive(Debug, Clone)]
pub struct SortHeaderView {
    pub label: String,
    pub href: Option<String>,
    pub indicator: &'static str,
}

/// A numbered pagination link.
#[derive(Debug, Clone)]
pub struct PageLinkView {
    pub number: u32,
    pub href: String,
    pub is_current: bool,
}

/// A dropdown filter with its current selection resolved.
#[derive(Debug, Clone)]
pub struct FilterView {
    pub key: String,
    pub label: String,
    pub options: Vec<FilterOptionView>,
}

/// One option in a dropdown filter.
#[derive(Debug, Clone)]
pub struct FilterOptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Map product status to display label and badge class.
#[must_use]
pub fn format_status(status: ProductStatus) -> (String, String) {
    let class = match status {
        ProductStatus::Active => "badge badge-success",
        ProductStatus::Draft => "badge badge-warning",
        ProductStatus::Inactive => "badge badge-neutral",
    };
    (status.label().to_string(), class.to_string())
}

/// Resolve table filters against the current list state.
#[must_use]
pub fn filter_views(filters: &[TableFilter], list: &ListQuery) -> Vec<FilterView> {
    filters
        .iter()
        .map(|filter| {
            let current = match filter.key.as_str() {
                "category" => list.category.as_str(),
                _ => "",
            };
            FilterView {
                key: filter.key.clone(),
                label: filter.label.clone(),
                options: filter
                    .options
                    .iter()
                    .map(|option| FilterOptionView {
                        value: option.value.clone(),
                        label: option.label.clone(),
                        selected: option.value == current,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Render-ready header cells for the product table.
#[must_use]
pub fn sort_headers(columns: &[TableColumn], list: &ListQuery) -> Vec<SortHeaderView> {
    columns
        .iter()
        .map(|column| {
            let field = column
                .sortable
                .then(|| SortField::from_param(&column.key))
                .flatten();
            match field {
                Some(field) => {
                    let indicator = if field != list.sort_field {
                        ""
                    } else if list.sort_direction == SortDirection::Desc {
                        "\u{25bc}"
                    } else {
                        "\u{25b2}"
                    };
                    SortHeaderView {
                        label: column.label.clone(),
                        href: Some(list.sort_href(field)),
                        indicator,
                    }
                }
                None => SortHeaderView {
                    label: column.label.clone(),
                    href: None,
                    indicator: "",
                },
            }
        })
        .collect()
}

// =============================================================================
// Flash Messages
// =============================================================================

/// Copy for a `success` flash code carried across a redirect.
#[must_use]
pub fn success_flash(code: &str) -> Option<&'static str> {
    match code {
        "created" => Some("Product created."),
        "updated" => Some("Product updated."),
        "deleted" => Some("Product deleted."),
        _ => None,
    }
}

/// Copy for an `error` flash code carried across a redirect.
///
/// Details never travel through the URL; handlers log them and pass a code.
#[must_use]
pub fn error_flash(code: &str) -> Option<&'static str> {
    match code {
        "delete_failed" => Some("Failed to delete the product. Check the logs for details."),
        "not_found" => Some("That product no longer exists."),
        _ => None,
    }
}
