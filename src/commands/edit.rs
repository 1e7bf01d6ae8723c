//! The mutating commands: add, update, remove and clear.

use crate::args::{AddArgs, ClearArgs, RemoveArgs, UpdateArgs};
use crate::commands::Out;
use crate::model::{Amount, NewTransaction, Transaction};
use crate::{FileStore, Home, Ledger, Result};
use anyhow::{bail, Context};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime};
use std::str::FromStr;

/// Record a new transaction and persist the updated ledger.
pub async fn add(home: &Home, args: AddArgs) -> Result<Out<Transaction>> {
    let mut ledger = Ledger::load(FileStore::new(home)).await;
    let input = new_transaction(&args)?;
    let created = ledger.add(input).await?;
    Ok(Out::new(
        format!(
            "Added {} of {} in '{}' with id {}",
            created.kind(),
            created.amount(),
            created.category(),
            created.id()
        ),
        created,
    ))
}

/// Replace the fields of an existing transaction, keeping its id.
pub async fn update(home: &Home, args: UpdateArgs) -> Result<Out<Transaction>> {
    let mut ledger = Ledger::load(FileStore::new(home)).await;
    let input = new_transaction(args.fields())?;
    let updated = ledger.update(args.id(), input).await?;
    Ok(Out::new(
        format!("Updated transaction {}", updated.id()),
        updated,
    ))
}

/// Delete a transaction by id. Deleting an unknown id is a no-op.
pub async fn remove(home: &Home, args: RemoveArgs) -> Result<Out<()>> {
    let mut ledger = Ledger::load(FileStore::new(home)).await;
    ledger.remove(args.id()).await;
    Ok(Out::new_message(format!(
        "Removed transaction {} if it existed",
        args.id()
    )))
}

/// Delete every transaction from memory and disk. Requires the --yes confirmation.
pub async fn clear(home: &Home, args: ClearArgs) -> Result<Out<()>> {
    if !args.yes() {
        bail!("Refusing to clear the ledger without --yes; this deletes every transaction and cannot be undone");
    }
    let mut ledger = Ledger::load(FileStore::new(home)).await;
    let count = ledger.transactions().len();
    ledger
        .clear()
        .await
        .context("Could not clear the persisted ledger")?;
    Ok(Out::new_message(format!(
        "Cleared the ledger ({count} transactions deleted)"
    )))
}

/// Builds the store input from the CLI fields, parsing the amount and the date.
fn new_transaction(args: &AddArgs) -> Result<NewTransaction> {
    let date = match args.date() {
        Some(s) => parse_date(s)?,
        None => Local::now().fixed_offset(),
    };
    Ok(NewTransaction {
        amount: Amount::from_str(args.amount())?,
        category: args.category().to_string(),
        date,
        kind: args.kind(),
        description: args.description().map(|s| s.to_string()),
    })
}

/// Accepts either a full RFC 3339 timestamp or a plain YYYY-MM-DD, which becomes midnight.
fn parse_date(s: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
        return Ok(timestamp);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("'{s}' is not an RFC 3339 timestamp or a YYYY-MM-DD date"))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}
