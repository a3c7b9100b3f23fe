use chrono::NaiveDate;

use super::engine::annuity_due_factor;
use super::error::{EngineError, EngineResult, ensure_non_negative};
use super::types::{Goal, GoalProgress};

/// Months are approximated as 30 days.
const DAYS_PER_MONTH: f64 = 30.0;

pub fn track_goal(
    goal: &Goal,
    today: NaiveDate,
    expected_annual_return_percent: Option<f64>,
) -> EngineResult<GoalProgress> {
    if !goal.target_amount.is_finite() || goal.target_amount <= 0.0 {
        return Err(EngineError::invalid(
            "target_amount",
            format!("must be > 0, got {}", goal.target_amount),
        ));
    }
    ensure_non_negative("current_amount", goal.current_amount)?;
    if let Some(rate) = expected_annual_return_percent {
        ensure_non_negative("expected_annual_return_percent", rate)?;
    }

    let remaining_amount = (goal.target_amount - goal.current_amount).max(0.0);
    let months_remaining = (goal.target_date - today).num_days() as f64 / DAYS_PER_MONTH;

    let monthly_savings_needed =
        (months_remaining > 0.0).then(|| remaining_amount / months_remaining);

    let whole_months = months_remaining.floor();
    let required_monthly_sip = match expected_annual_return_percent {
        Some(rate) if whole_months >= 1.0 => {
            let factor = annuity_due_factor(rate / 1200.0, whole_months as u32);
            Some(remaining_amount / factor)
        }
        _ => None,
    };

    Ok(GoalProgress {
        name: goal.name.clone(),
        priority: goal.priority,
        target_date: goal.target_date,
        progress_percent: goal.current_amount / goal.target_amount * 100.0,
        remaining_amount,
        months_remaining,
        monthly_savings_needed,
        required_monthly_sip,
    })
}

pub fn track_goals(
    goals: &[Goal],
    today: NaiveDate,
    expected_annual_return_percent: Option<f64>,
) -> EngineResult<Vec<GoalProgress>> {
    goals
        .iter()
        .map(|goal| track_goal(goal, today, expected_annual_return_percent))
        .collect()
}
