pub mod kafka;
pub mod postgres;

pub use kafka::KafkaNotifier;
pub use postgres::{PgLedgerTx, PostgresStore};
