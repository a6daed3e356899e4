//! HTTP request handlers.

pub mod demo;
pub mod health;
pub mod me;

pub use demo::{list_orders, list_users};
pub use health::health_check;
pub use me::get_me;
