pub mod inactivity;
pub mod placement;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use inactivity::{InactivityScanner, ScanReport};
pub use placement::BetPlacement;
pub use traits::{
    BetActivity, BetLedger, CartPolicy, GameCatalog, LedgerTx, Notifier, UserDirectory,
};
