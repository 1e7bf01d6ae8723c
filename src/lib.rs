pub mod aggregate;
pub mod args;
pub mod commands;
mod currency;
mod error;
mod export;
mod home;
mod ledger;
pub mod model;
mod settings;
mod storage;
mod utils;

pub use currency::{format_amount, DEFAULT_CURRENCY};
pub use error::Error;
pub use error::LedgerError;
pub use error::Result;
pub use export::{export_transactions, FileShare, ShareSink, EXPORT_FILE_NAME};
pub use home::Home;
pub use ledger::Ledger;
pub use settings::Settings;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
