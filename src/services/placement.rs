//! Bet placement workflow
//!
//! One call, one transaction: the batch is gated on the minimum cart
//! value, every row is staged inside a single ledger transaction, and the
//! commit is coupled to the confirmation event being accepted by the
//! dispatch boundary. A batch is never left committed if its confirmation
//! could not be sent.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::{BetSlip, NewBet, NotificationEvent};
use crate::error::{LotoError, Result};
use crate::services::traits::{BetLedger, CartPolicy, GameCatalog, LedgerTx, Notifier, UserDirectory};

/// Orchestrates a single placement request. No internal retries; the
/// caller decides whether to resubmit a rolled-back batch.
pub struct BetPlacement {
    catalog: Arc<dyn GameCatalog>,
    cart: Arc<dyn CartPolicy>,
    users: Arc<dyn UserDirectory>,
    ledger: Arc<dyn BetLedger>,
    notifier: Arc<dyn Notifier>,
}

impl BetPlacement {
    pub fn new(
        catalog: Arc<dyn GameCatalog>,
        cart: Arc<dyn CartPolicy>,
        users: Arc<dyn UserDirectory>,
        ledger: Arc<dyn BetLedger>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            cart,
            users,
            ledger,
            notifier,
        }
    }

    /// Place a batch of bets for one user. Returns the number of bet rows
    /// committed. Every failure path rolls back before surfacing; nothing
    /// is ever partially applied.
    #[instrument(skip(self, slips), fields(batch_len = slips.len()))]
    pub async fn place_bets(&self, user_id: i64, slips: &[BetSlip]) -> Result<usize> {
        if slips.is_empty() {
            return Err(LotoError::EmptyBatch);
        }

        // Gate on the minimum cart value before touching the ledger.
        let total = self.catalog.total_price(slips).await?;
        let minimum = self.cart.minimum_required().await?;
        if total < minimum {
            debug!(%total, %minimum, "bet batch rejected below minimum cart value");
            return Err(LotoError::BelowMinimum { minimum });
        }

        let mut tx = self.ledger.begin().await?;

        for slip in slips {
            let priced = match self.catalog.price_of(&slip.game).await {
                Ok(priced) => priced,
                Err(e) => return Err(abort(tx, e).await),
            };
            let bet = NewBet {
                user_id,
                game_id: priced.game_id,
                numbers: slip.numbers.clone(),
            };
            if let Err(e) = tx.write(&bet).await {
                return Err(abort(tx, e).await);
            }
        }

        let user = match self.users.user_by_id(user_id).await {
            Ok(user) => user,
            Err(e) => return Err(abort(tx, e).await),
        };

        // One confirmation event per placement, carrying the whole batch.
        let event = NotificationEvent::new_bet(user, slips.to_vec());
        if let Err(e) = self.notifier.publish(&event).await {
            let e = match e {
                LotoError::NotificationFailed(_) => e,
                other => LotoError::NotificationFailed(other.to_string()),
            };
            return Err(abort(tx, e).await);
        }

        tx.commit().await?;
        info!(user_id, bets = slips.len(), %total, "bet batch committed");
        Ok(slips.len())
    }
}

/// Roll back and surface the original failure. A rollback error is logged
/// rather than masking what actually went wrong.
async fn abort(tx: Box<dyn LedgerTx>, err: LotoError) -> LotoError {
    if let Err(rollback_err) = tx.rollback().await {
        warn!(%rollback_err, "rollback failed after aborted placement");
    }
    err
}
