use serde::{Deserialize, Serialize};

/// One entry of a submitted bet batch: the game's natural key and the
/// player's picks as already-normalized comma-joined text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetSlip {
    pub game: String,
    pub numbers: String,
}

impl BetSlip {
    pub fn new(game: impl Into<String>, numbers: impl Into<String>) -> Self {
        Self {
            game: game.into(),
            numbers: numbers.into(),
        }
    }
}

/// A bet row staged for insertion. Number count and range are validated
/// upstream against the game configuration; the ledger stores `numbers`
/// verbatim. `id` and `created_at` are assigned by the database at
/// commit, and committed rows are never read back whole by this core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBet {
    pub user_id: i64,
    pub game_id: i64,
    pub numbers: String,
}
