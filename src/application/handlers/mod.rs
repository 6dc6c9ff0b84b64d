//! Command handlers grouped by feature.

pub mod recipes;
