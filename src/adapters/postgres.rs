//! PostgreSQL storage adapter
//!
//! One pool-owning store implementing every read boundary plus the bet
//! ledger. Games, carts and users are written by the CRUD layer outside
//! this crate; here they are lookups only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Row, Transaction};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

use crate::domain::{Cart, Game, NewBet, PricedGame, User};
use crate::error::{LotoError, Result};
use crate::services::traits::{
    BetActivity, BetLedger, CartPolicy, GameCatalog, LedgerTx, UserDirectory,
};

/// PostgreSQL storage adapter
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Create a PostgreSQL store from an existing connection pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl PostgresStore {
    /// Full game row by its natural key
    pub async fn game_by_type(&self, game_type: &str) -> Result<Game> {
        let row = sqlx::query(
            r#"
            SELECT id, secure_id, game_type, description, range, price, min_and_max_number, color
            FROM games WHERE game_type = $1
            "#,
        )
        .bind(game_type)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| LotoError::GameNotFound(game_type.to_string()))?;

        Ok(Game {
            id: row.get("id"),
            secure_id: row.get("secure_id"),
            game_type: row.get("game_type"),
            description: row.get("description"),
            range: row.get("range"),
            price: row.get("price"),
            min_and_max_number: row.get("min_and_max_number"),
            color: row.get("color"),
        })
    }

    /// The singleton cart row (id = 1 system-wide)
    pub async fn cart(&self) -> Result<Cart> {
        let row = sqlx::query(
            r#"
            SELECT id, min_cart_value FROM carts WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or(LotoError::CartNotFound)?;

        Ok(Cart {
            id: row.get("id"),
            min_cart_value: row.get("min_cart_value"),
        })
    }
}

#[async_trait]
impl GameCatalog for PostgresStore {
    #[instrument(skip(self))]
    async fn price_of(&self, game_type: &str) -> Result<PricedGame> {
        let game = self.game_by_type(game_type).await?;
        Ok(PricedGame {
            game_id: game.id,
            price: game.price,
        })
    }
}

#[async_trait]
impl CartPolicy for PostgresStore {
    async fn minimum_required(&self) -> Result<Decimal> {
        Ok(self.cart().await?.min_cart_value)
    }
}

#[async_trait]
impl UserDirectory for PostgresStore {
    async fn user_by_id(&self, user_id: i64) -> Result<User> {
        let row = sqlx::query(
            r#"
            SELECT id, secure_id, name, cpf, email, password_hash, created_at, updated_at
            FROM users WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or(LotoError::UserNotFound(user_id))?;

        Ok(User {
            id: row.get("id"),
            secure_id: row.get("secure_id"),
            name: row.get("name"),
            cpf: row.get("cpf"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    async fn all_user_ids(&self) -> Result<Vec<i64>> {
        let rows = sqlx::query(r#"SELECT id FROM users ORDER BY id"#)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|row| row.get("id")).collect())
    }
}

#[async_trait]
impl BetActivity for PostgresStore {
    #[instrument(skip(self))]
    async fn active_user_ids_since(&self, cutoff: DateTime<Utc>) -> Result<HashSet<i64>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT user_id FROM bets WHERE created_at > $1
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|row| row.get("user_id")).collect())
    }
}

#[async_trait]
impl BetLedger for PostgresStore {
    async fn begin(&self) -> Result<Box<dyn LedgerTx>> {
        let tx = self.pool.begin().await?;
        debug!("Started bet placement transaction");
        Ok(Box::new(PgLedgerTx { tx: Some(tx) }))
    }
}

/// One bet placement transaction. Staged rows become visible only at
/// commit; dropping the handle uncommitted rolls back through sqlx.
pub struct PgLedgerTx {
    tx: Option<Transaction<'static, Postgres>>,
}

#[async_trait]
impl LedgerTx for PgLedgerTx {
    async fn write(&mut self, bet: &NewBet) -> Result<()> {
        let tx = self
            .tx
            .as_mut()
            .ok_or_else(|| LotoError::Internal("transaction already closed".to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO bets (user_id, game_id, numbers)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(bet.user_id)
        .bind(bet.game_id)
        .bind(&bet.numbers)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| LotoError::Internal("transaction already closed".to_string()))?;

        tx.commit().await?;
        debug!("Bet placement transaction committed");
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        // Idempotent: rolling back a closed transaction is a no-op.
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
            debug!("Bet placement transaction rolled back");
        }
        Ok(())
    }
}
