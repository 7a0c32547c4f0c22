//! The order record and its payloads.
//!
//! [`Order`] implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`order_actor`](crate::order_actor), which defines how it is created, updated and how
//! status writes ([`OrderAction`](crate::order_actor::OrderAction)) are applied.

use crate::model::StatusId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Reference to the customer who placed an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

/// Reference to a plate in the (external) catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlateId(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Six-digit code shown to the customer.
    pub code: String,
    pub details: String,
    pub plates: Vec<PlateId>,
    pub total_value: f64,
    pub user_id: UserId,
    pub status: StatusId,
    pub created_at: DateTime<Utc>,
}

/// What a caller supplies to place an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub details: String,
    pub plates: Vec<PlateId>,
    pub total_value: f64,
}

/// Payload for creating a new order in the store.
///
/// Unlike [`NewOrder`] it carries the initial status, which the order client takes from
/// the head of the status sequence.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub details: String,
    pub plates: Vec<PlateId>,
    pub total_value: f64,
    pub status: StatusId,
}

/// Payload for updating an existing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<StatusId>,
    pub details: Option<String>,
}

/// Which orders a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderQuery {
    /// Every order (back-office view).
    All,
    /// Orders placed by one customer.
    ForUser(UserId),
}

impl OrderQuery {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderQuery::All => true,
            OrderQuery::ForUser(user_id) => order.user_id == *user_id,
        }
    }
}

impl Order {
    /// Creates a new Order stamped with the current time and a fresh code.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            code: generate_code(),
            details: params.details,
            plates: params.plates,
            total_value: params.total_value,
            user_id: params.user_id,
            status: params.status,
            created_at: Utc::now(),
        }
    }
}

/// Random code in `100000..=999999`.
///
/// Codes are for display and are not guaranteed unique; the order id is the key.
pub fn generate_code() -> String {
    let entropy = uuid::Uuid::new_v4().as_u128();
    (100_000 + (entropy % 900_000) as u32).to_string()
}
