//! Reusable view components shared across admin pages.

pub mod data_table;
