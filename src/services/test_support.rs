//! In-memory implementations of the boundary traits for unit tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::{NewBet, NotificationEvent, PricedGame, User};
use crate::error::{LotoError, Result};
use crate::services::traits::{
    BetActivity, BetLedger, CartPolicy, GameCatalog, LedgerTx, Notifier, UserDirectory,
};

pub fn sample_user(id: i64) -> User {
    User {
        id,
        secure_id: Uuid::new_v4(),
        name: format!("Player {id}"),
        cpf: format!("000.000.000-{id:02}"),
        email: format!("player{id}@example.com"),
        password_hash: "hash".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ==================== Catalog / cart / users ====================

#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    games: HashMap<String, PricedGame>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game(mut self, game_type: &str, game_id: i64, price: Decimal) -> Self {
        self.games
            .insert(game_type.to_string(), PricedGame { game_id, price });
        self
    }
}

#[async_trait]
impl GameCatalog for InMemoryCatalog {
    async fn price_of(&self, game_type: &str) -> Result<PricedGame> {
        self.games
            .get(game_type)
            .copied()
            .ok_or_else(|| LotoError::GameNotFound(game_type.to_string()))
    }
}

#[derive(Clone, Copy)]
pub struct FixedCart(pub Decimal);

#[async_trait]
impl CartPolicy for FixedCart {
    async fn minimum_required(&self) -> Result<Decimal> {
        Ok(self.0)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryUsers {
    users: HashMap<i64, User>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id, user);
        self
    }
}

#[async_trait]
impl UserDirectory for InMemoryUsers {
    async fn user_by_id(&self, user_id: i64) -> Result<User> {
        self.users
            .get(&user_id)
            .cloned()
            .ok_or(LotoError::UserNotFound(user_id))
    }

    async fn all_user_ids(&self) -> Result<Vec<i64>> {
        let mut ids: Vec<i64> = self.users.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

// ==================== Bet activity ====================

#[derive(Default, Clone)]
pub struct InMemoryActivity {
    bets: Vec<(i64, DateTime<Utc>)>,
}

impl InMemoryActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bet(mut self, user_id: i64, created_at: DateTime<Utc>) -> Self {
        self.bets.push((user_id, created_at));
        self
    }
}

#[async_trait]
impl BetActivity for InMemoryActivity {
    async fn active_user_ids_since(&self, cutoff: DateTime<Utc>) -> Result<HashSet<i64>> {
        Ok(self
            .bets
            .iter()
            .filter(|(_, created_at)| *created_at > cutoff)
            .map(|(user_id, _)| *user_id)
            .collect())
    }
}

// ==================== Ledger ====================

/// Transactional ledger over a plain Vec: rows stay staged until commit,
/// mirroring the visibility rule of the real store.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    committed: Arc<Mutex<Vec<NewBet>>>,
    begun: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryLedger {
    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Rows visible to other readers (committed only)
    pub fn committed(&self) -> Vec<NewBet> {
        self.committed.lock().unwrap().clone()
    }

    /// How many transactions were ever opened
    pub fn begun(&self) -> usize {
        self.begun.load(Ordering::SeqCst)
    }
}

struct InMemoryTx {
    staged: Vec<NewBet>,
    committed: Arc<Mutex<Vec<NewBet>>>,
    fail_writes: bool,
}

#[async_trait]
impl LedgerTx for InMemoryTx {
    async fn write(&mut self, bet: &NewBet) -> Result<()> {
        if self.fail_writes {
            return Err(LotoError::Internal("simulated write failure".to_string()));
        }
        self.staged.push(bet.clone());
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<()> {
        let staged = std::mem::take(&mut self.staged);
        self.committed.lock().unwrap().extend(staged);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl BetLedger for InMemoryLedger {
    async fn begin(&self) -> Result<Box<dyn LedgerTx>> {
        self.begun.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryTx {
            staged: Vec::new(),
            committed: Arc::clone(&self.committed),
            fail_writes: self.fail_writes.load(Ordering::SeqCst),
        }))
    }
}

// ==================== Notifier ====================

#[derive(Default, Clone)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<NotificationEvent>>>,
    fail_all: Arc<AtomicBool>,
    fail_for_user: Arc<Mutex<Option<i64>>>,
}

impl RecordingNotifier {
    pub fn failing(self) -> Self {
        self.fail_all.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_for_user(self, user_id: i64) -> Self {
        *self.fail_for_user.lock().unwrap() = Some(user_id);
        self
    }

    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, event: &NotificationEvent) -> Result<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(LotoError::NotificationFailed(
                "simulated dispatch rejection".to_string(),
            ));
        }
        if *self.fail_for_user.lock().unwrap() == Some(event.user.id) {
            return Err(LotoError::NotificationFailed(
                "simulated per-user rejection".to_string(),
            ));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
