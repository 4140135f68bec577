pub mod core;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod stores;
pub mod utils;
