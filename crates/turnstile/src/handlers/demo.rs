//! Demo resource handlers.
//!
//! These stand in for the real resource API behind the gate. The data is
//! synthetic and regenerated per request; nothing here is security-relevant
//! beyond sitting behind the auth middleware.

use crate::models::{Order, User};
use axum::Json;
use chrono::{Duration, Utc};
use tracing::instrument;
use uuid::Uuid;

const DEMO_USERNAMES: [&str; 5] = ["ada", "grace", "edsger", "barbara", "donald"];

const DEMO_ITEMS: [(&str, u64); 4] = [
    ("keyboard", 4_500),
    ("monitor", 23_900),
    ("desk lamp", 3_200),
    ("notebook", 800),
];

/// Handler for GET /api/v1/users
///
/// Returns a batch of synthetic users. Protected by the auth middleware.
#[instrument(skip_all, name = "turnstile.handlers.users")]
pub async fn list_users() -> Json<Vec<User>> {
    let now = Utc::now();
    let users = DEMO_USERNAMES
        .iter()
        .enumerate()
        .map(|(i, username)| User {
            id: Uuid::new_v4(),
            username: (*username).to_string(),
            email: format!("{}@example.com", username),
            created_at: now - Duration::days(i as i64 + 1),
        })
        .collect();

    Json(users)
}

/// Handler for GET /api/v1/orders
///
/// Returns a batch of synthetic orders. Protected by the auth middleware.
#[instrument(skip_all, name = "turnstile.handlers.orders")]
pub async fn list_orders() -> Json<Vec<Order>> {
    let now = Utc::now();
    let orders = DEMO_ITEMS
        .iter()
        .enumerate()
        .map(|(i, (item, unit_cents))| {
            let quantity = i as u32 + 1;
            Order {
                id: Uuid::new_v4(),
                item: (*item).to_string(),
                quantity,
                total_cents: unit_cents * u64::from(quantity),
                placed_at: now - Duration::hours(i as i64),
            }
        })
        .collect();

    Json(orders)
}
