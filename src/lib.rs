pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;

pub use adapters::{KafkaNotifier, PostgresStore};
pub use config::AppConfig;
pub use domain::{BetSlip, Cart, Game, NewBet, NotificationEvent, Subject, User};
pub use error::{LotoError, Result};
pub use services::{
    BetActivity, BetLedger, BetPlacement, CartPolicy, GameCatalog, InactivityScanner, LedgerTx,
    Notifier, ScanReport, UserDirectory,
};
