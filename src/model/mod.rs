//! The domain data types: transactions and the amounts they carry.

mod amount;
mod transaction;

pub use amount::Amount;
pub use transaction::{NewTransaction, Transaction, TransactionKind};
