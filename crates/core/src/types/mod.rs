//! Core types for Marigold.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod comma_list;
pub mod id;
pub mod price;
pub mod status;

pub use comma_list::{TextOrList, deserialize_comma_list, join_comma_list, normalize_comma_list};
pub use id::*;
pub use price::{format_usd, sale_price};
pub use status::ProductStatus;
