//! Product form state and its reconciliation rules.
//!
//! One `ProductForm` value carries everything the create/edit page needs:
//! field state, the retained-image list, validation errors, and where the
//! interaction is in its lifecycle. Numeric fields stay raw text until a
//! submission is built, so admins can type freely without the form eating
//! keystrokes; list fields keep a text projection and a structured
//! projection in step with each other.

use std::collections::BTreeMap;

use marigold_core::{CategoryId, ProductStatus, join_comma_list, normalize_comma_list};
use rust_decimal::Decimal;

use crate::catalog::{Dimensions, Product, ProductImage, ProductSubmission, UploadedImage};

/// Lifecycle of one form interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Waiting on the product fetch (edit flow only).
    Loading,
    /// Fields hold values and accept edits.
    Populated,
    /// A submission is in flight; further submits are ignored.
    Submitting,
    /// Submission succeeded and the caller is redirecting away.
    Navigated,
}

/// A list-valued field edited as comma-separated text.
///
/// Two projections of one value: `text` is the input box content exactly as
/// last typed, `items` is the normalized list derived from it. Whichever
/// side an update comes in through, the other is recomputed, so the two can
/// never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListField {
    text: String,
    items: Vec<String>,
}

impl ListField {
    /// Build from structured items (the populate path).
    #[must_use]
    pub fn from_items(items: &[String]) -> Self {
        let text = join_comma_list(items);
        let items = normalize_comma_list(&text);
        Self { text, items }
    }

    /// Replace from raw typed text (the edit path).
    pub fn set_text(&mut self, text: &str) {
        self.items = normalize_comma_list(text);
        self.text = text.to_string();
    }

    /// The text projection.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The normalized list projection.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }
}

/// Validation messages keyed by payload field name.
///
/// Empty means the form may submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message for one field, if it failed validation.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages in a stable order, for the error summary box.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }
}

/// Raw field values read out of a product form post.
///
/// Checkbox fields are absent from the post when unchecked, so collectors
/// leave them defaulted to false. Repeated fields (`existingImageUrls`,
/// `removeImages`, file parts) accumulate in order.
#[derive(Debug, Default)]
pub struct PostedProductForm {
    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub brand: String,
    pub sku: String,
    pub price: String,
    pub original_price: String,
    pub discount_percentage: String,
    pub stock_quantity: String,
    pub weight: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub category: String,
    pub colors: String,
    pub sizes: String,
    pub tags: String,
    pub status: String,
    pub is_featured: bool,
    pub on_sale: bool,
    /// Hidden inputs: URLs of stored images the page still shows.
    pub existing_image_urls: Vec<String>,
    /// Checked removal boxes: stored image URLs to drop.
    pub remove_images: Vec<String>,
    /// Newly selected image files.
    pub new_images: Vec<UploadedImage>,
}

/// The product create/edit form.
#[derive(Debug, Clone)]
pub struct ProductForm {
    phase: FormPhase,
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
    /// Price as typed.
    pub price: String,
    /// Pre-discount price as typed, empty when unset.
    pub original_price: String,
    /// Discount percentage as typed, empty when unset.
    pub discount_percentage: String,
    /// Stock quantity as typed.
    pub stock_quantity: String,
    /// Weight as typed, empty when unset.
    pub weight: String,
    /// Dimension length as typed, empty when unset.
    pub length: String,
    /// Dimension width as typed, empty when unset.
    pub width: String,
    /// Dimension height as typed, empty when unset.
    pub height: String,
    /// Selected category ID, empty string for no selection.
    pub category: String,
    /// Available colors.
    pub colors: ListField,
    /// Available sizes.
    pub sizes: ListField,
    /// Search tags.
    pub tags: ListField,
    /// Lifecycle status.
    pub status: ProductStatus,
    /// Whether the product is featured.
    pub is_featured: bool,
    /// Whether the product is on sale.
    pub on_sale: bool,
    /// Stored images the product keeps. Only ever shrinks; the backend
    /// deletes whatever is missing from this list on save.
    retained_images: Vec<ProductImage>,
    /// Newly selected image files to upload on save.
    new_images: Vec<UploadedImage>,
    errors: FormErrors,
    /// Submission failure surfaced at the top of the page.
    pub error_message: Option<String>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductForm {
    /// Empty form in `Loading`, waiting for `populate` (the edit flow).
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: FormPhase::Loading,
            name: String::new(),
            description: String::new(),
            rich_description: String::new(),
            brand: String::new(),
            sku: String::new(),
            price: String::new(),
            original_price: String::new(),
            discount_percentage: String::new(),
            stock_quantity: String::new(),
            weight: String::new(),
            length: String::new(),
            width: String::new(),
            height: String::new(),
            category: String::new(),
            colors: ListField::default(),
            sizes: ListField::default(),
            tags: ListField::default(),
            status: ProductStatus::default(),
            is_featured: false,
            on_sale: false,
            retained_images: Vec::new(),
            new_images: Vec::new(),
            errors: FormErrors::default(),
            error_message: None,
        }
    }

    /// Empty form ready for input (the create flow; there is nothing to load).
    #[must_use]
    pub fn blank() -> Self {
        let mut form = Self::new();
        form.phase = FormPhase::Populated;
        form
    }

    /// Rebuild form state from a browser post.
    ///
    /// A posted form is populated by definition. The retained-image list is
    /// rebuilt from the hidden inputs, minus any images marked for removal.
    #[must_use]
    pub fn from_posted(posted: PostedProductForm) -> Self {
        let mut form = Self::blank();

        form.name = posted.name;
        form.description = posted.description;
        form.rich_description = posted.rich_description;
        form.brand = posted.brand;
        form.sku = posted.sku;
        form.price = posted.price;
        form.original_price = posted.original_price;
        form.discount_percentage = posted.discount_percentage;
        form.stock_quantity = posted.stock_quantity;
        form.weight = posted.weight;
        form.length = posted.length;
        form.width = posted.width;
        form.height = posted.height;
        form.category = posted.category;
        form.colors.set_text(&posted.colors);
        form.sizes.set_text(&posted.sizes);
        form.tags.set_text(&posted.tags);
        form.status = posted.status.parse().unwrap_or_default();
        form.is_featured = posted.is_featured;
        form.on_sale = posted.on_sale;
        form.retained_images = posted
            .existing_image_urls
            .into_iter()
            .map(|url| ProductImage {
                url,
                public_id: String::new(),
            })
            .collect();
        for url in &posted.remove_images {
            form.remove_existing_image(url);
        }
        form.new_images = posted.new_images;

        form
    }

    /// Copy a fetched product into the fields.
    ///
    /// First call wins: once the form has left `Loading`, later calls are
    /// ignored, so a refetch can never wipe unsaved edits.
    pub fn populate(&mut self, product: &Product) {
        if self.phase != FormPhase::Loading {
            return;
        }

        self.name = product.name.clone();
        self.description = product.description.clone();
        self.rich_description = product.rich_description.clone();
        self.brand = product.brand.clone();
        self.sku = product.sku.clone();
        self.price = product.price.to_string();
        self.original_price = product
            .original_price
            .map_or_else(String::new, |price| price.to_string());
        self.discount_percentage = product.discount_percentage.to_string();
        self.stock_quantity = product.stock_quantity.to_string();
        self.weight = product
            .weight
            .map_or_else(String::new, |weight| weight.to_string());
        let dimensions = product.dimensions.unwrap_or_default();
        self.length = dimensions
            .length
            .map_or_else(String::new, |value| value.to_string());
        self.width = dimensions
            .width
            .map_or_else(String::new, |value| value.to_string());
        self.height = dimensions
            .height
            .map_or_else(String::new, |value| value.to_string());
        self.category = product
            .category
            .as_ref()
            .map_or_else(String::new, |category| category.id.to_string());
        self.colors = ListField::from_items(&product.colors);
        self.sizes = ListField::from_items(&product.sizes);
        self.tags = ListField::from_items(&product.tags);
        self.status = product.status;
        self.is_featured = product.is_featured;
        self.on_sale = product.on_sale;
        self.retained_images = product.images.clone();
        self.new_images.clear();
        self.errors = FormErrors::default();
        self.error_message = None;

        self.phase = FormPhase::Populated;
    }

    /// Drop one retained image by URL.
    ///
    /// The retained list only ever shrinks; there is no way to re-add an
    /// image once removed short of reloading the page. Unknown URLs are
    /// ignored.
    pub fn remove_existing_image(&mut self, url: &str) {
        self.retained_images.retain(|image| image.url != url);
    }

    /// Check required fields, storing messages keyed by payload field name.
    ///
    /// Returns true when the form may submit.
    pub fn validate(&mut self) -> bool {
        let mut errors = FormErrors::default();

        if self.name.trim().is_empty() {
            errors.insert("name", "Name is required");
        }
        if self.description.trim().is_empty() {
            errors.insert("description", "Description is required");
        }

        let price = self.price.trim();
        if price.is_empty() {
            errors.insert("price", "Price is required");
        } else if !price.parse::<Decimal>().is_ok_and(|value| value > Decimal::ZERO) {
            errors.insert("price", "Price must be a number greater than zero");
        }

        let stock = self.stock_quantity.trim();
        if stock.is_empty() {
            errors.insert("stockQuantity", "Stock quantity is required");
        } else if !stock.parse::<i64>().is_ok_and(|value| value >= 0) {
            errors.insert(
                "stockQuantity",
                "Stock quantity must be zero or a positive whole number",
            );
        }

        if self.category.trim().is_empty() {
            errors.insert("category", "Category is required");
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Assemble the outbound payload from validated fields.
    ///
    /// Call after `validate` passes. Optional numerics are dropped when
    /// blank or unparseable so the backend keeps its own defaults, with one
    /// exception: a blank `discountPercentage` becomes zero, because the
    /// backend would otherwise keep a stale discount on a product taken off
    /// sale. Required numerics fall back to zero rather than panicking if a
    /// caller skips validation.
    #[must_use]
    pub fn build_submission(&self) -> ProductSubmission {
        ProductSubmission {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            rich_description: self.rich_description.trim().to_string(),
            brand: self.brand.trim().to_string(),
            sku: self.sku.trim().to_string(),
            price: parse_optional_decimal(&self.price).unwrap_or_default(),
            original_price: parse_optional_decimal(&self.original_price),
            category: CategoryId::new(self.category.trim()),
            stock_quantity: parse_optional_int(&self.stock_quantity).unwrap_or_default(),
            colors: self.colors.items().to_vec(),
            sizes: self.sizes.items().to_vec(),
            tags: self.tags.items().to_vec(),
            status: self.status,
            is_featured: self.is_featured,
            on_sale: self.on_sale,
            discount_percentage: parse_optional_decimal(&self.discount_percentage)
                .unwrap_or(Decimal::ZERO),
            weight: parse_optional_decimal(&self.weight),
            dimensions: Dimensions {
                length: parse_optional_decimal(&self.length),
                width: parse_optional_decimal(&self.width),
                height: parse_optional_decimal(&self.height),
            },
            existing_image_urls: self
                .retained_images
                .iter()
                .map(|image| image.url.clone())
                .collect(),
            new_images: self.new_images.clone(),
        }
    }

    /// Mark a submission in flight.
    ///
    /// Only a populated form can submit; calls in any other phase (a second
    /// submit racing the first included) are ignored and return false.
    pub fn start_submit(&mut self) -> bool {
        if self.phase != FormPhase::Populated {
            return false;
        }
        self.phase = FormPhase::Submitting;
        self.error_message = None;
        true
    }

    /// Record a failed submission: back to editing, message on top, every
    /// field and retained image exactly as the admin left them.
    pub fn fail_submit(&mut self, message: impl Into<String>) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Populated;
            self.error_message = Some(message.into());
        }
    }

    /// Record a successful submission; the caller navigates away.
    pub fn complete_submit(&mut self) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Navigated;
        }
    }

    /// Where this interaction is in its lifecycle.
    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Stored images the product still keeps.
    #[must_use]
    pub fn retained_images(&self) -> &[ProductImage] {
        &self.retained_images
    }

    /// All validation errors from the last `validate` call.
    #[must_use]
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Validation message for one field, by payload field name.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Whether the last `validate` call failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

fn parse_optional_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

fn parse_optional_int(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}
