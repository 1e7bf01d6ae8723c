//! The read-only commands: list, summary, report and trend.
//!
//! These load a ledger snapshot and derive everything else on the fly; nothing here mutates
//! state or caches aggregates.

use crate::aggregate;
use crate::args::{ListArgs, ReportArgs, TrendArgs};
use crate::commands::Out;
use crate::model::{Transaction, TransactionKind};
use crate::{format_amount, FileStore, Home, Ledger, Result, Settings};
use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// The overall balance and totals across the whole ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub balance: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
}

/// A single month's aggregates: totals plus the category breakdown, largest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub categories: Vec<CategoryTotal>,
}

/// One category's share of a month's expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    /// Whole-number percentage of the month's expenses, rounded.
    pub percentage: u32,
}

/// One month in the expense trend series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub month: u32,
    pub expenses: Decimal,
}

/// List transactions sorted by date descending.
pub async fn list(home: &Home, args: ListArgs) -> Result<Out<Vec<Transaction>>> {
    let store = FileStore::new(home);
    let ledger = Ledger::load(store.clone()).await;
    let currency = Settings::new(store).currency().await;

    let mut transactions: Vec<Transaction> = ledger
        .transactions()
        .iter()
        .filter(|t| {
            let date = t.local_date();
            args.year().is_none_or(|y| date.year() == y)
                && args.month().is_none_or(|m| date.month() == m)
        })
        .cloned()
        .collect();
    transactions.sort_by(|a, b| b.date().cmp(&a.date()));
    if let Some(limit) = args.limit() {
        transactions.truncate(limit);
    }

    if transactions.is_empty() {
        return Ok(Out::new("No transactions to show", transactions));
    }

    let mut message = format!("{} transaction(s):", transactions.len());
    for t in &transactions {
        let sign = match t.kind() {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        };
        let _ = write!(
            message,
            "\n  {}  {}  {sign}{}  {}  {}",
            t.id(),
            t.local_date(),
            format_amount(t.amount().value(), &currency),
            t.category(),
            t.description().unwrap_or(""),
        );
    }
    Ok(Out::new(message, transactions))
}

/// Show the balance and the income and expense totals for the whole ledger.
pub async fn summary(home: &Home) -> Result<Out<Summary>> {
    let store = FileStore::new(home);
    let ledger = Ledger::load(store.clone()).await;
    let currency = Settings::new(store).currency().await;

    let transactions = ledger.transactions();
    let summary = Summary {
        balance: aggregate::balance(transactions),
        income: aggregate::total_by_kind(transactions, TransactionKind::Income),
        expenses: aggregate::total_by_kind(transactions, TransactionKind::Expense),
    };
    let message = format!(
        "Balance: {}\nIncome: {}\nExpenses: {}",
        format_amount(summary.balance, &currency),
        format_amount(summary.income, &currency),
        format_amount(summary.expenses, &currency),
    );
    Ok(Out::new(message, summary))
}

/// Build the per-month report: totals, category breakdown and percentages.
pub async fn report(home: &Home, args: ReportArgs) -> Result<Out<MonthlyReport>> {
    let store = FileStore::new(home);
    let ledger = Ledger::load(store.clone()).await;
    let currency = Settings::new(store).currency().await;

    let today = Local::now().date_naive();
    let year = args.year().unwrap_or_else(|| today.year());
    let month = args.month().unwrap_or_else(|| today.month());

    let in_month: Vec<Transaction> = ledger
        .transactions()
        .iter()
        .filter(|t| {
            let date = t.local_date();
            date.year() == year && date.month() == month
        })
        .cloned()
        .collect();

    let income = aggregate::total_by_kind(&in_month, TransactionKind::Income);
    let expenses = aggregate::total_by_kind(&in_month, TransactionKind::Expense);
    let by_category = aggregate::expenses_by_category(ledger.transactions(), month, year);
    let categories: Vec<CategoryTotal> = aggregate::sorted_by_value_desc(&by_category)
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            percentage: aggregate::percentage_of_total(total, expenses),
            total,
        })
        .collect();

    let report = MonthlyReport {
        year,
        month,
        income,
        expenses,
        balance: income - expenses,
        categories,
    };

    let mut message = format!(
        "Report for {year}-{month:02}\nIncome: {}\nExpenses: {}\nBalance: {}",
        format_amount(report.income, &currency),
        format_amount(report.expenses, &currency),
        format_amount(report.balance, &currency),
    );
    if report.categories.is_empty() {
        message.push_str("\nNo expenses recorded for this month");
    } else {
        message.push_str("\nExpenses by category:");
        for c in &report.categories {
            let _ = write!(
                message,
                "\n  {}  {}  {}%",
                c.category,
                format_amount(c.total, &currency),
                c.percentage
            );
        }
    }
    Ok(Out::new(message, report))
}

/// Show expense totals for each of the last N calendar months, oldest first.
pub async fn trend(home: &Home, args: TrendArgs) -> Result<Out<Vec<TrendPoint>>> {
    let store = FileStore::new(home);
    let ledger = Ledger::load(store.clone()).await;
    let currency = Settings::new(store).currency().await;

    let today = Local::now().date_naive();
    let totals = aggregate::monthly_expense_trend(ledger.transactions(), today, args.months());

    // The series is oldest first; walk the month labels the same way.
    let months = args.months();
    let points: Vec<TrendPoint> = totals
        .into_iter()
        .enumerate()
        .map(|(ix, expenses)| {
            let back = months - 1 - ix as u32;
            let (year, month) = aggregate::months_before(today.year(), today.month(), back);
            TrendPoint {
                year,
                month,
                expenses,
            }
        })
        .collect();

    let mut message = format!("Expenses for the last {months} month(s):");
    for p in &points {
        let _ = write!(
            message,
            "\n  {}-{:02}  {}",
            p.year,
            p.month,
            format_amount(p.expenses, &currency)
        );
    }
    Ok(Out::new(message, points))
}
