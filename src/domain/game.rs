use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A game definition. Owned by the admin CRUD layer; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub secure_id: Uuid,
    /// Unique natural key used by bet submissions (e.g., "Lotofácil")
    pub game_type: String,
    pub description: String,
    /// Highest selectable number
    pub range: i32,
    /// Unit price of one bet on this game
    pub price: Decimal,
    /// Exact count of numbers a bet must contain
    pub min_and_max_number: i32,
    pub color: String,
}

/// Result of resolving a game name: what the placement workflow needs
/// and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedGame {
    pub game_id: i64,
    pub price: Decimal,
}

/// The singleton cart configuration row (id = 1)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: i64,
    pub min_cart_value: Decimal,
}
