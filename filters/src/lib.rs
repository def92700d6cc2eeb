//! Data grid filter translation for the admin dashboard query API.

pub mod api;
pub mod app;
pub mod core;
pub mod domain;
pub mod utils;
