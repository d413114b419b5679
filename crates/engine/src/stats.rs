//! Dashboard aggregates computed from a user's records.
//!
//! Everything here is pure: the caller fetches the records once and passes
//! them in together with the reference date, so the same inputs always
//! produce the same dashboard.

use chrono::Datelike;
use sea_orm::entity::prelude::Date;

use crate::{EntryKind, MoneyCents, expenses};

/// Month-over-month spending comparison.
#[derive(Clone, Debug, PartialEq)]
pub enum SpendingTrend {
    /// The previous month has no expense records to compare against.
    NoPreviousData,
    MoreSpending { percent: f64 },
    LessSpending { percent: f64 },
}

/// Consumption of the monthly budget, when one is set.
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetStatus {
    /// Percent of the limit spent this month, capped at 100.
    pub consumed_percent: f64,
    /// True once spending has reached or passed the limit.
    pub alert: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: MoneyCents,
}

/// Twelve calendar-month buckets, January first. Records from different
/// years land in the same bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlySeries {
    pub income: [MoneyCents; 12],
    pub expense: [MoneyCents; 12],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    /// All-time income minus all-time expense.
    pub net_balance: MoneyCents,
    pub monthly_income: MoneyCents,
    pub monthly_expense: MoneyCents,
    pub monthly_savings: MoneyCents,
    pub trend: SpendingTrend,
    /// `None` when no positive budget limit is configured.
    pub budget: Option<BudgetStatus>,
    /// Expense totals per category, largest first, name as tie-break.
    pub category_breakdown: Vec<CategoryTotal>,
    pub monthly_series: MonthlySeries,
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Computes the full dashboard for one user's records.
///
/// `today` anchors the "current month" and the trend comparison;
/// `monthly_budget` is the configured overall limit, zero meaning unset.
pub fn dashboard(
    records: &[expenses::Model],
    today: Date,
    monthly_budget: MoneyCents,
) -> Dashboard {
    let (year, month) = (today.year(), today.month());
    let (prev_year, prev_month) = previous_month(year, month);

    let mut net_balance = MoneyCents::ZERO;
    let mut monthly_income = MoneyCents::ZERO;
    let mut monthly_expense = MoneyCents::ZERO;
    let mut previous_expense = MoneyCents::ZERO;
    let mut breakdown: Vec<CategoryTotal> = Vec::new();
    let mut series = MonthlySeries {
        income: [MoneyCents::ZERO; 12],
        expense: [MoneyCents::ZERO; 12],
    };

    for record in records {
        let amount = record.amount();
        let bucket = (record.date.month() - 1) as usize;
        match record.entry_kind() {
            EntryKind::Income => {
                net_balance += amount;
                series.income[bucket] += amount;
                if record.date.year() == year && record.date.month() == month {
                    monthly_income += amount;
                }
            }
            EntryKind::Expense => {
                net_balance -= amount;
                series.expense[bucket] += amount;
                if record.date.year() == year && record.date.month() == month {
                    monthly_expense += amount;
                }
                if record.date.year() == prev_year && record.date.month() == prev_month {
                    previous_expense += amount;
                }
                match breakdown
                    .iter_mut()
                    .find(|entry| entry.category == record.category)
                {
                    Some(entry) => entry.total += amount,
                    None => breakdown.push(CategoryTotal {
                        category: record.category.clone(),
                        total: amount,
                    }),
                }
            }
        }
    }

    breakdown.sort_by(|a, b| {
        b.total
            .cents()
            .cmp(&a.total.cents())
            .then_with(|| a.category.cmp(&b.category))
    });

    let trend = if previous_expense.is_zero() {
        SpendingTrend::NoPreviousData
    } else {
        let change = (monthly_expense.cents() - previous_expense.cents()) as f64
            / previous_expense.cents() as f64
            * 100.0;
        let rounded = round_one_decimal(change);
        if rounded > 0.0 {
            SpendingTrend::MoreSpending { percent: rounded }
        } else {
            SpendingTrend::LessSpending { percent: -rounded }
        }
    };

    let budget = monthly_budget.is_positive().then(|| {
        let raw = monthly_expense.cents() as f64 / monthly_budget.cents() as f64 * 100.0;
        BudgetStatus {
            consumed_percent: raw.min(100.0),
            alert: raw >= 100.0,
        }
    });

    Dashboard {
        net_balance,
        monthly_income,
        monthly_expense,
        monthly_savings: monthly_income - monthly_expense,
        trend,
        budget,
        category_breakdown: breakdown,
        monthly_series: series,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn record(id: i32, title: &str, cents: i64, category: &str, kind: EntryKind, date: Date) -> expenses::Model {
        let now = Utc::now();
        expenses::Model {
            id,
            user_id: Some(1),
            title: title.to_string(),
            amount_minor: cents,
            category: category.to_string(),
            kind: kind.as_str().to_string(),
            date,
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn day(year: i32, month: u32, day: u32) -> Date {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn monthly_totals_and_trend() {
        let records = vec![
            record(1, "Groceries", 10_000, "Food", EntryKind::Expense, day(2024, 1, 5)),
            record(2, "Salary", 50_000, "Salary", EntryKind::Income, day(2024, 1, 10)),
            record(3, "Bus pass", 5_000, "Transport", EntryKind::Expense, day(2024, 2, 1)),
        ];
        let result = dashboard(&records, day(2024, 2, 15), MoneyCents::ZERO);

        assert_eq!(result.net_balance, MoneyCents::new(35_000));
        assert_eq!(result.monthly_income, MoneyCents::ZERO);
        assert_eq!(result.monthly_expense, MoneyCents::new(5_000));
        assert_eq!(result.monthly_savings, MoneyCents::new(-5_000));
        assert_eq!(result.trend, SpendingTrend::LessSpending { percent: 50.0 });
        assert_eq!(result.budget, None);
    }

    #[test]
    fn trend_without_previous_month_records() {
        let records = vec![record(
            1,
            "Groceries",
            2_000,
            "Food",
            EntryKind::Expense,
            day(2024, 2, 3),
        )];
        let result = dashboard(&records, day(2024, 2, 15), MoneyCents::ZERO);
        assert_eq!(result.trend, SpendingTrend::NoPreviousData);
    }

    #[test]
    fn trend_with_identical_months_reads_as_less() {
        let records = vec![
            record(1, "a", 3_000, "Food", EntryKind::Expense, day(2024, 1, 5)),
            record(2, "b", 3_000, "Food", EntryKind::Expense, day(2024, 2, 5)),
        ];
        let result = dashboard(&records, day(2024, 2, 15), MoneyCents::ZERO);
        assert_eq!(result.trend, SpendingTrend::LessSpending { percent: 0.0 });
    }

    #[test]
    fn trend_compares_across_year_boundary() {
        let records = vec![
            record(1, "a", 10_000, "Food", EntryKind::Expense, day(2023, 12, 20)),
            record(2, "b", 15_000, "Food", EntryKind::Expense, day(2024, 1, 5)),
        ];
        let result = dashboard(&records, day(2024, 1, 15), MoneyCents::ZERO);
        assert_eq!(result.trend, SpendingTrend::MoreSpending { percent: 50.0 });
    }

    #[test]
    fn budget_percent_caps_at_hundred_and_alerts() {
        let over = vec![record(1, "a", 120_000, "Food", EntryKind::Expense, day(2024, 2, 2))];
        let result = dashboard(&over, day(2024, 2, 15), MoneyCents::new(100_000));
        let status = result.budget.unwrap();
        assert_eq!(status.consumed_percent, 100.0);
        assert!(status.alert);

        let under = vec![record(1, "a", 80_000, "Food", EntryKind::Expense, day(2024, 2, 2))];
        let result = dashboard(&under, day(2024, 2, 15), MoneyCents::new(100_000));
        let status = result.budget.unwrap();
        assert_eq!(status.consumed_percent, 80.0);
        assert!(!status.alert);
    }

    #[test]
    fn breakdown_skips_income_and_sorts_by_total() {
        let records = vec![
            record(1, "Salary", 500_000, "Salary", EntryKind::Income, day(2024, 2, 1)),
            record(2, "a", 2_000, "Transport", EntryKind::Expense, day(2024, 2, 2)),
            record(3, "b", 6_000, "Food", EntryKind::Expense, day(2024, 2, 3)),
            record(4, "c", 2_000, "Health", EntryKind::Expense, day(2024, 2, 4)),
        ];
        let result = dashboard(&records, day(2024, 2, 15), MoneyCents::ZERO);
        let names: Vec<&str> = result
            .category_breakdown
            .iter()
            .map(|entry| entry.category.as_str())
            .collect();
        assert_eq!(names, vec!["Food", "Health", "Transport"]);
    }

    #[test]
    fn series_buckets_collapse_years() {
        let records = vec![
            record(1, "a", 1_000, "Food", EntryKind::Expense, day(2023, 3, 5)),
            record(2, "b", 2_000, "Food", EntryKind::Expense, day(2024, 3, 9)),
            record(3, "c", 7_000, "Salary", EntryKind::Income, day(2024, 6, 1)),
        ];
        let result = dashboard(&records, day(2024, 6, 15), MoneyCents::ZERO);
        assert_eq!(result.monthly_series.expense[2], MoneyCents::new(3_000));
        assert_eq!(result.monthly_series.income[5], MoneyCents::new(7_000));
        assert_eq!(result.monthly_series.income[0], MoneyCents::ZERO);
    }
}
