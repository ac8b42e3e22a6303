//! Collaborator boundaries for the placement workflow and the scanner
//!
//! Games, the cart and users are owned by the CRUD layer outside this
//! crate; the core reads them through these seams so every one of them can
//! be substituted in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::domain::{BetSlip, NewBet, NotificationEvent, PricedGame, User};
use crate::error::Result;

/// Resolves game names ("game type" is a stable natural key) to unit
/// price and identifier.
#[async_trait]
pub trait GameCatalog: Send + Sync {
    /// Price and id for one game name; `GameNotFound` if unknown.
    async fn price_of(&self, game_type: &str) -> Result<PricedGame>;

    /// Sum of unit prices over a batch. Aborts on the first unresolved
    /// game; there is no partial total.
    async fn total_price(&self, slips: &[BetSlip]) -> Result<Decimal> {
        let mut total = Decimal::ZERO;
        for slip in slips {
            total += self.price_of(&slip.game).await?.price;
        }
        Ok(total)
    }
}

/// The current global minimum a batch must reach to be accepted
#[async_trait]
pub trait CartPolicy: Send + Sync {
    async fn minimum_required(&self) -> Result<Decimal>;
}

/// Read-only user lookups
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// `UserNotFound` if the id resolves to no user.
    async fn user_by_id(&self, user_id: i64) -> Result<User>;

    async fn all_user_ids(&self) -> Result<Vec<i64>>;
}

/// Read side of the bet table used by the inactivity scanner
#[async_trait]
pub trait BetActivity: Send + Sync {
    /// Distinct ids of users with at least one bet created after `cutoff`
    async fn active_user_ids_since(&self, cutoff: DateTime<Utc>) -> Result<HashSet<i64>>;
}

/// One in-flight placement transaction. Dropping an uncommitted
/// transaction rolls it back; no staged row is visible to other readers
/// before `commit`.
#[async_trait]
pub trait LedgerTx: Send {
    async fn write(&mut self, bet: &NewBet) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;

    /// Idempotent, safe to call with nothing written
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// The transactional persistence boundary for bet rows
#[async_trait]
pub trait BetLedger: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn LedgerTx>>;
}

/// Outbound notification boundary. The production adapter publishes to a
/// Kafka topic; accept/reject at publish time is all the core sees.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, event: &NotificationEvent) -> Result<()>;
}
