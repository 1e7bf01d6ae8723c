use crate::model::Amount;
use crate::LedgerError;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Represents a single record in the ledger.
///
/// The serialized field names match the persisted layout: `id`, `amount`, `category`, `date`,
/// `type` and `description`, with `description` omitted when absent. The `date` is an RFC 3339
/// timestamp carrying the offset it was recorded with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    id: String,
    amount: Amount,
    category: String,
    date: DateTime<FixedOffset>,
    #[serde(rename = "type")]
    kind: TransactionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Transaction {
    pub(crate) fn new(id: String, input: NewTransaction) -> Self {
        Self {
            id,
            amount: input.amount,
            category: input.category,
            date: input.date,
            kind: input.kind,
            description: input.description,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The calendar date of the transaction in the offset it was recorded with. Aggregation
    /// buckets by these components, never by elapsed time.
    pub fn local_date(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// The input payload for creating or replacing a transaction. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Amount,
    pub category: String,
    pub date: DateTime<FixedOffset>,
    pub kind: TransactionKind,
    pub description: Option<String>,
}

impl NewTransaction {
    /// Checks the submission before it reaches the store. The category must be non-empty and the
    /// amount must be a magnitude.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.category.trim().is_empty() {
            return Err(LedgerError::Validation("the category is required".into()));
        }
        if self.amount.is_negative() {
            return Err(LedgerError::Validation(
                "the amount must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Whether a transaction adds to or subtracts from the balance.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);
