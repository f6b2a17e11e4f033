//! API endpoint handlers.

pub mod catalog;
pub mod health;
pub mod predict;
