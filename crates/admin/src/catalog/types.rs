//! Domain types for the catalog API.
//!
//! These mirror the JSON the backend speaks. Field names follow the wire
//! contract exactly (camelCase via serde), and the loose spots in that
//! contract (string-or-array list fields, `_id` vs `id`) are absorbed here
//! so the rest of the crate sees one shape.

use chrono::{DateTime, Utc};
use marigold_core::{CategoryId, ProductId, ProductStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Read Types
// =============================================================================

/// A product as returned by the catalog API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    /// URL slug (server-generated, read-only here).
    #[serde(default)]
    pub slug: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Long-form description (may contain HTML).
    #[serde(default)]
    pub rich_description: String,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Stock keeping unit.
    #[serde(default)]
    pub sku: String,
    /// Current price.
    #[serde(default)]
    pub price: Decimal,
    /// Pre-discount price, when the backend tracks one.
    #[serde(default)]
    pub original_price: Option<Decimal>,
    /// Discount percentage applied when the product is on sale.
    #[serde(default)]
    pub discount_percentage: Decimal,
    /// Whether the product is currently on sale.
    #[serde(default)]
    pub on_sale: bool,
    /// Units in stock.
    #[serde(default)]
    pub stock_quantity: i64,
    /// Category the product belongs to (populated by the backend).
    #[serde(default)]
    pub category: Option<Category>,
    /// Available colors. The backend stores these loosely, sometimes as a
    /// comma-joined string, sometimes as an array.
    #[serde(default, deserialize_with = "marigold_core::deserialize_comma_list")]
    pub colors: Vec<String>,
    /// Available sizes. Same loose storage as `colors`.
    #[serde(default, deserialize_with = "marigold_core::deserialize_comma_list")]
    pub sizes: Vec<String>,
    /// Search tags. Same loose storage as `colors`.
    #[serde(default, deserialize_with = "marigold_core::deserialize_comma_list")]
    pub tags: Vec<String>,
    /// Shipping weight in kilograms.
    #[serde(default)]
    pub weight: Option<Decimal>,
    /// Shipping dimensions in centimeters.
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ProductStatus,
    /// Whether the product is featured on the storefront home page.
    #[serde(default)]
    pub is_featured: bool,
    /// Ordered product images.
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Explicit featured image, when set.
    #[serde(default)]
    pub featured_image: Option<ProductImage>,
    /// When the product was created.
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
}

impl Product {
    /// The image shown in listings: the explicit featured image if set,
    /// otherwise the first image.
    #[must_use]
    pub fn display_image(&self) -> Option<&ProductImage> {
        self.featured_image.as_ref().or_else(|| self.images.first())
    }
}

/// A hosted product image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductImage {
    /// Public URL of the image.
    pub url: String,
    /// Identifier within the image host (used by the backend for deletion).
    #[serde(default)]
    pub public_id: String,
}

/// Shipping dimensions in centimeters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Dimensions {
    /// Length in centimeters.
    #[serde(default)]
    pub length: Option<Decimal>,
    /// Width in centimeters.
    #[serde(default)]
    pub width: Option<Decimal>,
    /// Height in centimeters.
    #[serde(default)]
    pub height: Option<Decimal>,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Category ID.
    #[serde(rename = "_id", alias = "id")]
    pub id: CategoryId,
    /// Display name.
    pub name: String,
}

/// One page of the product list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Products on this page.
    #[serde(default)]
    pub products: Vec<Product>,
    /// Total products matching the query, across all pages.
    #[serde(default)]
    pub total_products: i64,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
}

// =============================================================================
// Request Types
// =============================================================================

/// Query parameters for the paginated product list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListParams {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Sort key, prefixed with `-` for descending (e.g., `-dateCreated`).
    pub sort: String,
    /// Free-text search, omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Category ID filter, omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A validated product write, ready to be encoded as a multipart form.
///
/// Produced by `ProductForm::build_submission` after validation passes;
/// no field here is raw form text.
#[derive(Debug, Clone)]
pub struct ProductSubmission {
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Long-form description.
    pub rich_description: String,
    /// Brand name.
    pub brand: String,
    /// Stock keeping unit.
    pub sku: String,
    /// Current price.
    pub price: Decimal,
    /// Pre-discount price, omitted from the form when `None`.
    pub original_price: Option<Decimal>,
    /// Category ID.
    pub category: CategoryId,
    /// Units in stock.
    pub stock_quantity: i64,
    /// Available colors.
    pub colors: Vec<String>,
    /// Available sizes.
    pub sizes: Vec<String>,
    /// Search tags.
    pub tags: Vec<String>,
    /// Lifecycle status.
    pub status: ProductStatus,
    /// Whether the product is featured.
    pub is_featured: bool,
    /// Whether the product is on sale.
    pub on_sale: bool,
    /// Discount percentage. Defaults to zero when the form field is blank.
    pub discount_percentage: Decimal,
    /// Shipping weight, omitted from the form when `None`.
    pub weight: Option<Decimal>,
    /// Shipping dimensions. Blank components are omitted individually.
    pub dimensions: Dimensions,
    /// URLs of previously uploaded images to keep. The backend deletes any
    /// stored image whose URL is absent from this list.
    pub existing_image_urls: Vec<String>,
    /// Newly selected image files to upload.
    pub new_images: Vec<UploadedImage>,
}

/// An image file read out of a multipart upload.
#[derive(Clone)]
pub struct UploadedImage {
    /// Original file name from the browser.
    pub file_name: String,
    /// MIME type reported by the browser.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}
