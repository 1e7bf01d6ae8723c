//! Derived aggregates computed from a ledger snapshot.
//!
//! Every function here is pure: it takes a transaction slice and returns a value, holding no
//! state and caching nothing. At this data scale recomputing on every read is cheap; a
//! content-fingerprint cache could be layered on later if collections grow large.

use crate::model::{Transaction, TransactionKind};
use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The sum of income amounts minus the sum of expense amounts. May be negative.
pub fn balance(transactions: &[Transaction]) -> Decimal {
    total_by_kind(transactions, TransactionKind::Income)
        - total_by_kind(transactions, TransactionKind::Expense)
}

/// The sum of amounts for transactions of the given kind.
pub fn total_by_kind(transactions: &[Transaction], kind: TransactionKind) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind() == kind)
        .map(|t| t.amount().value())
        .sum()
}

/// Expense totals for each of the `months_back` calendar months ending at `reference`'s month,
/// oldest first. Months with no expenses yield zero. Bucketing compares the transaction's
/// stamped calendar month and year, so the 1st and the 28th of a month land in the same bucket.
pub fn monthly_expense_trend(
    transactions: &[Transaction],
    reference: NaiveDate,
    months_back: u32,
) -> Vec<Decimal> {
    (0..months_back)
        .rev()
        .map(|back| {
            let (year, month) = months_before(reference.year(), reference.month(), back);
            transactions
                .iter()
                .filter(|t| t.kind() == TransactionKind::Expense && in_month(t, month, year))
                .map(|t| t.amount().value())
                .sum()
        })
        .collect()
}

/// Expense amounts in the given calendar month, summed by category. Key order is unspecified;
/// consumers sort as needed.
pub fn expenses_by_category(
    transactions: &[Transaction],
    month: u32,
    year: i32,
) -> HashMap<String, Decimal> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for t in transactions
        .iter()
        .filter(|t| t.kind() == TransactionKind::Expense && in_month(t, month, year))
    {
        *totals.entry(t.category().to_string()).or_default() += t.amount().value();
    }
    totals
}

/// A category map sorted descending by value, for "top expenses" style views.
pub fn sorted_by_value_desc(totals: &HashMap<String, Decimal>) -> Vec<(String, Decimal)> {
    let mut entries: Vec<(String, Decimal)> = totals
        .iter()
        .map(|(k, v)| (k.clone(), *v))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

/// `amount` as a whole-number percentage of `total`, rounded. A zero `total` yields zero rather
/// than a division error.
pub fn percentage_of_total(amount: Decimal, total: Decimal) -> u32 {
    if total.is_zero() {
        return 0;
    }
    (amount / total * Decimal::from(100))
        .round()
        .to_u32()
        .unwrap_or(0)
}

fn in_month(transaction: &Transaction, month: u32, year: i32) -> bool {
    let date = transaction.local_date();
    date.month() == month && date.year() == year
}

/// The calendar (year, month) that is `back` whole months before the given one.
pub(crate) fn months_before(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - back as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, NewTransaction};
    use chrono::DateTime;
    use std::str::FromStr;

    fn txn(amount: &str, category: &str, kind: TransactionKind, date: &str) -> Transaction {
        Transaction::new(
            format!("{category}-{date}"),
            NewTransaction {
                amount: Amount::from_str(amount).unwrap(),
                category: category.to_string(),
                date: DateTime::parse_from_rfc3339(date).unwrap(),
                kind,
                description: None,
            },
        )
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// The January 2024 scenario: 100 income, 40 Food, 20 Transport.
    fn january_2024() -> Vec<Transaction> {
        vec![
            txn("100", "Salary", TransactionKind::Income, "2024-01-05T00:00:00Z"),
            txn("40", "Food", TransactionKind::Expense, "2024-01-10T00:00:00Z"),
            txn("20", "Transport", TransactionKind::Expense, "2024-01-15T00:00:00Z"),
        ]
    }

    #[test]
    fn test_balance_scenario() {
        assert_eq!(balance(&january_2024()), dec("40"));
    }

    #[test]
    fn test_totals_scenario() {
        let transactions = january_2024();
        assert_eq!(
            total_by_kind(&transactions, TransactionKind::Expense),
            dec("60")
        );
        assert_eq!(
            total_by_kind(&transactions, TransactionKind::Income),
            dec("100")
        );
    }

    #[test]
    fn test_balance_equals_income_minus_expense() {
        let transactions = january_2024();
        assert_eq!(
            balance(&transactions),
            total_by_kind(&transactions, TransactionKind::Income)
                - total_by_kind(&transactions, TransactionKind::Expense)
        );
        assert_eq!(balance(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_balance_may_be_negative() {
        let transactions = vec![txn(
            "75",
            "Food",
            TransactionKind::Expense,
            "2024-01-10T00:00:00Z",
        )];
        assert_eq!(balance(&transactions), dec("-75"));
    }

    #[test]
    fn test_expenses_by_category_scenario() {
        let totals = expenses_by_category(&january_2024(), 1, 2024);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["Food"], dec("40"));
        assert_eq!(totals["Transport"], dec("20"));
    }

    #[test]
    fn test_expenses_by_category_excludes_income_and_other_months() {
        let mut transactions = january_2024();
        transactions.push(txn(
            "99",
            "Food",
            TransactionKind::Expense,
            "2024-02-10T00:00:00Z",
        ));

        let totals = expenses_by_category(&transactions, 1, 2024);
        assert_eq!(totals["Food"], dec("40"));
        assert!(!totals.contains_key("Salary"));
    }

    #[test]
    fn test_sorted_by_value_desc() {
        let totals = expenses_by_category(&january_2024(), 1, 2024);
        let sorted = sorted_by_value_desc(&totals);
        assert_eq!(sorted[0], ("Food".to_string(), dec("40")));
        assert_eq!(sorted[1], ("Transport".to_string(), dec("20")));
    }

    #[test]
    fn test_percentage_scenario() {
        assert_eq!(percentage_of_total(dec("40"), dec("60")), 67);
    }

    #[test]
    fn test_percentage_of_zero_total_is_zero() {
        assert_eq!(percentage_of_total(dec("40"), Decimal::ZERO), 0);
        assert_eq!(percentage_of_total(Decimal::ZERO, Decimal::ZERO), 0);
    }

    #[test]
    fn test_trend_spans_year_boundary() {
        let transactions = vec![
            txn("10", "Food", TransactionKind::Expense, "2023-10-03T00:00:00Z"),
            txn("30", "Food", TransactionKind::Expense, "2024-02-29T00:00:00Z"),
            txn("5", "Transport", TransactionKind::Expense, "2024-03-01T00:00:00Z"),
            // Income never appears in the expense trend.
            txn("500", "Salary", TransactionKind::Income, "2024-01-15T00:00:00Z"),
        ];
        let reference = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();

        // Oct 2023 through Mar 2024, oldest first.
        let trend = monthly_expense_trend(&transactions, reference, 6);
        assert_eq!(
            trend,
            vec![
                dec("10"),
                Decimal::ZERO,
                Decimal::ZERO,
                Decimal::ZERO,
                dec("30"),
                dec("5"),
            ]
        );
    }

    #[test]
    fn test_trend_groups_by_calendar_month() {
        // The 1st and the 28th of the same month land in the same bucket.
        let transactions = vec![
            txn("1", "Food", TransactionKind::Expense, "2024-02-01T00:00:00Z"),
            txn("2", "Food", TransactionKind::Expense, "2024-02-28T23:59:00Z"),
        ];
        let reference = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        assert_eq!(
            monthly_expense_trend(&transactions, reference, 1),
            vec![dec("3")]
        );
    }

    #[test]
    fn test_months_before() {
        assert_eq!(months_before(2024, 3, 0), (2024, 3));
        assert_eq!(months_before(2024, 3, 5), (2023, 10));
        assert_eq!(months_before(2024, 1, 1), (2023, 12));
        assert_eq!(months_before(2024, 12, 24), (2022, 12));
    }
}
