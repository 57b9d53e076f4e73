pub mod api;
pub mod auth;
pub mod generation;
pub mod study;
