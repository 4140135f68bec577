pub mod api;
pub mod auth;
pub mod fallback;
pub mod pages;
