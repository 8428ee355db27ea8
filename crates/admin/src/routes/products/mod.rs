//! Product management route handlers.
//!
//! Product data lives in the external catalog; these handlers render it and
//! forward writes. Covers the paginated list with its delete confirmation
//! flow, plus the create and edit forms.

mod delete;
mod form;
mod list;
pub mod types;

// Re-export types needed by templates and router
pub use types::{
    DeleteTargetView, FilterOptionView, FilterView, PageLinkView, ProductRowView, ProductsQuery,
    SortHeaderView,
};

// Re-export list handlers
pub use list::{ProductsIndexTemplate, index};

// Re-export form handlers
pub use form::{
    CategoryOptionView, ProductFormTemplate, ProductNotFoundTemplate, StatusOptionView, create,
    edit_form, new_form, update,
};

// Re-export delete handlers
pub use delete::{DeleteFormInput, destroy};
