//! The transaction store: the authoritative in-memory ledger and its persistence.
//!
//! The `Ledger` owns the canonical collection. Every mutation rewrites the full collection to
//! the datastore under the `transactions` key and broadcasts the new snapshot to subscribers.
//! The persisted copy is a mirror with no independent authority; on conflict the in-memory
//! state wins and is re-flushed on the next mutation.
//!
//! Mutations take `&mut self`, so a single writer at a time is enforced by ownership rather
//! than by a lock.

use crate::model::{NewTransaction, Transaction};
use crate::storage::KeyValueStore;
use crate::LedgerError;
use tokio::sync::watch;
use tracing::warn;
use uuid::Uuid;

/// The datastore key holding the serialized transaction collection.
pub(crate) const TRANSACTIONS_KEY: &str = "transactions";

/// The authoritative ordered collection of transaction records.
#[derive(Debug)]
pub struct Ledger<S: KeyValueStore> {
    store: S,
    transactions: Vec<Transaction>,
    snapshots: watch::Sender<Vec<Transaction>>,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Reads the persisted collection and constructs the ledger. An absent or malformed
    /// collection yields an empty ledger with a logged warning; this never fails, so a storage
    /// hiccup cannot take the session down.
    pub async fn load(store: S) -> Self {
        let transactions: Vec<Transaction> = match store.get(TRANSACTIONS_KEY).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(list) => list,
                Err(e) => {
                    warn!("Ignoring malformed transaction data, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load transactions, starting empty: {e}");
                Vec::new()
            }
        };
        let (snapshots, _) = watch::channel(transactions.clone());
        Self {
            store,
            transactions,
            snapshots,
        }
    }

    /// The current collection, in insertion order. Display order is the caller's concern.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// An owned copy of the current collection.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Subscribe to snapshot broadcasts. The receiver observes the collection as it stood after
    /// the most recent mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Transaction>> {
        self.snapshots.subscribe()
    }

    /// Validates `input`, assigns a fresh unique id, appends the record, persists and broadcasts.
    /// Returns the created record, which is visible to reads before this call completes.
    pub async fn add(&mut self, input: NewTransaction) -> Result<Transaction, LedgerError> {
        input.validate()?;
        let transaction = Transaction::new(Uuid::new_v4().to_string(), input);
        self.transactions.push(transaction.clone());
        self.persist_or_log().await;
        self.broadcast();
        Ok(transaction)
    }

    /// Replaces the record matching `id` with a new record keeping the same id. Fails with
    /// `NotFound` if no record matches.
    pub async fn update(
        &mut self,
        id: &str,
        input: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        input.validate()?;
        let ix = self
            .transactions
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        let transaction = Transaction::new(id.to_string(), input);
        self.transactions[ix] = transaction.clone();
        self.persist_or_log().await;
        self.broadcast();
        Ok(transaction)
    }

    /// Filters out the record matching `id`. Removing an id that does not exist is a no-op.
    pub async fn remove(&mut self, id: &str) {
        self.transactions.retain(|t| t.id() != id);
        self.persist_or_log().await;
        self.broadcast();
    }

    /// Empties the collection and clears the persisted copy. Unlike the other mutations, a
    /// storage failure here is surfaced to the caller; the in-memory state is already cleared
    /// at that point and may diverge from disk until the next successful write.
    pub async fn clear(&mut self) -> Result<(), LedgerError> {
        self.transactions.clear();
        self.broadcast();
        self.store.remove(TRANSACTIONS_KEY).await
    }

    async fn persist_or_log(&self) {
        if let Err(e) = self.persist().await {
            warn!("Ledger write failed, continuing with in-memory state: {e}");
        }
    }

    async fn persist(&self) -> Result<(), LedgerError> {
        let json = serde_json::to_string(&self.transactions)
            .map_err(|e| LedgerError::storage_write(TRANSACTIONS_KEY, e))?;
        self.store.set(TRANSACTIONS_KEY, &json).await
    }

    fn broadcast(&self) {
        // Send fails only when every receiver is gone, which is fine.
        let _ = self.snapshots.send(self.transactions.clone());
    }
}
