//! Domain models for admin.

pub mod list_query;
pub mod product_form;

pub use list_query::{ListQuery, PAGE_SIZE, SortDirection, SortField, page_window};
pub use product_form::{FormErrors, FormPhase, ListField, PostedProductForm, ProductForm};
