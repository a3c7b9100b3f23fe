use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

use super::error::{EngineError, EngineResult, ensure_non_negative};
use super::types::{
    CategoryTotal, DailyTotal, Expense, ExpenseInsight, ExpenseSummary, MonthlyTotal,
    WeekdayAverage,
};

/// A category's latest month must exceed its earlier average by this factor to be flagged.
const CATEGORY_SPIKE_FACTOR: f64 = 1.2;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn summarize(expenses: &[Expense]) -> EngineResult<ExpenseSummary> {
    for expense in expenses {
        ensure_non_negative("amount", expense.amount)?;
        if expense.category.trim().is_empty() {
            return Err(EngineError::invalid("category", "must not be empty"));
        }
    }

    let total = expenses.iter().map(|e| e.amount).sum::<f64>();

    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut monthly: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    let mut category_counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut weekday_sums = [(0.0_f64, 0_usize); 7];

    for expense in expenses {
        *daily.entry(expense.date).or_default() += expense.amount;
        *monthly.entry(month_key(expense.date)).or_default() += expense.amount;
        *by_category.entry(expense.category.as_str()).or_default() += expense.amount;
        *category_counts.entry(expense.category.as_str()).or_default() += 1;

        let slot = &mut weekday_sums[expense.date.weekday().num_days_from_monday() as usize];
        slot.0 += expense.amount;
        slot.1 += 1;
    }

    let average_daily = if daily.is_empty() {
        0.0
    } else {
        daily.values().sum::<f64>() / daily.len() as f64
    };

    // BTreeMap iteration is ordered, so the first maximum wins ties alphabetically.
    let mut most_common: Option<(&str, usize)> = None;
    for (&category, &count) in &category_counts {
        if most_common.is_none_or(|(_, best)| count > best) {
            most_common = Some((category, count));
        }
    }

    let weekday_averages = WEEK
        .iter()
        .zip(weekday_sums.iter())
        .filter(|(_, (_, count))| *count > 0)
        .map(|(weekday, (sum, count))| WeekdayAverage {
            weekday: *weekday,
            average: sum / *count as f64,
        })
        .collect();

    Ok(ExpenseSummary {
        total,
        average_daily,
        most_common_category: most_common.map(|(category, _)| category.to_string()),
        by_category: by_category
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category: category.to_string(),
                total,
            })
            .collect(),
        daily_totals: daily
            .into_iter()
            .map(|(date, total)| DailyTotal { date, total })
            .collect(),
        insights: insights(expenses, &monthly),
        monthly_totals: monthly
            .into_iter()
            .map(|(month, total)| MonthlyTotal { month, total })
            .collect(),
        weekday_averages,
    })
}

fn insights(expenses: &[Expense], monthly: &BTreeMap<String, f64>) -> Vec<ExpenseInsight> {
    let mut insights = Vec::new();

    let totals = monthly.values().copied().collect::<Vec<_>>();
    if let (Some(latest), Some(std_dev)) = (totals.last(), sample_std_dev(&totals)) {
        let avg = mean(&totals);
        if *latest > avg + std_dev {
            insights.push(ExpenseInsight::SpendingAboveUsual);
        } else if *latest < avg - std_dev {
            insights.push(ExpenseInsight::SpendingBelowUsual);
        }
    }

    let mut per_category: BTreeMap<&str, BTreeMap<String, f64>> = BTreeMap::new();
    for expense in expenses {
        *per_category
            .entry(expense.category.as_str())
            .or_default()
            .entry(month_key(expense.date))
            .or_default() += expense.amount;
    }
    for (category, months) in per_category {
        let totals = months.into_values().collect::<Vec<_>>();
        let Some((latest, earlier)) = totals.split_last() else {
            continue;
        };
        if earlier.is_empty() {
            continue;
        }
        if *latest > mean(earlier) * CATEGORY_SPIKE_FACTOR {
            insights.push(ExpenseInsight::CategoryIncrease {
                category: category.to_string(),
            });
        }
    }

    insights
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected standard deviation; undefined for fewer than two values.
fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values);
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
