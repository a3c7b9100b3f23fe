use super::error::{EngineError, EngineResult, ensure_non_negative};
use super::types::{
    ContributionMode, ContributionPlan, DeflationMethod, GrowthPoint, GrowthSeries, HoldingPeriod,
    PortfolioReturn, ProjectionResult, TaxPolicy,
};

/// Rates closer to zero than this use the limiting form of the annuity factor.
const ZERO_RATE_EPS: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub result: ProjectionResult,
    pub series: GrowthSeries,
}

/// Nominal projection of a contribution plan.
///
/// The returned result has no inflation or tax applied yet: the inflation-adjusted
/// value equals the future value and the after-tax return equals the gross return.
pub fn project(plan: &ContributionPlan) -> EngineResult<Projection> {
    validate_plan(plan)?;
    let rate = match plan.mode {
        ContributionMode::Sip => plan.annual_rate_percent / 1200.0,
        ContributionMode::LumpSum => plan.annual_rate_percent / 100.0,
    };
    build_projection(plan, rate)
}

/// Projection at the inflation-adjusted real rate, expressed in today's money.
///
/// SIP deflates the monthly rate by monthly inflation; lump sum deflates the annual
/// rate by annual inflation. The real rate may be negative when inflation exceeds
/// the nominal return.
pub fn project_real(
    plan: &ContributionPlan,
    inflation_rate_percent: f64,
) -> EngineResult<Projection> {
    validate_plan(plan)?;
    ensure_non_negative("inflation_rate_percent", inflation_rate_percent)?;

    let rate = match plan.mode {
        ContributionMode::Sip => {
            let nominal = plan.annual_rate_percent / 1200.0;
            (1.0 + nominal) / (1.0 + inflation_rate_percent / 1200.0) - 1.0
        }
        ContributionMode::LumpSum => {
            (1.0 + plan.annual_rate_percent / 100.0) / (1.0 + inflation_rate_percent / 100.0) - 1.0
        }
    };
    build_projection(plan, rate)
}

/// Fills the inflation-adjusted value and the tax fields of a nominal projection.
pub fn adjust(
    projection: &ProjectionResult,
    inflation_rate_percent: f64,
    years: f64,
    holding_period: HoldingPeriod,
    policy: &TaxPolicy,
) -> EngineResult<ProjectionResult> {
    ensure_non_negative("inflation_rate_percent", inflation_rate_percent)?;
    ensure_non_negative("years", years)?;
    validate_policy(policy)?;

    let deflator = (1.0 + inflation_rate_percent / 100.0).powf(years);
    let taxed = apply_tax(projection, holding_period, policy);
    Ok(ProjectionResult {
        inflation_adjusted_value: projection.future_value / deflator,
        ..taxed
    })
}

/// Projects a plan and brings it into today's money with exactly one deflation step.
pub fn evaluate(
    plan: &ContributionPlan,
    inflation_rate_percent: f64,
    holding_period: HoldingPeriod,
    method: DeflationMethod,
    policy: &TaxPolicy,
) -> EngineResult<Projection> {
    match method {
        DeflationMethod::Discount => {
            let nominal = project(plan)?;
            let result = adjust(
                &nominal.result,
                inflation_rate_percent,
                plan.years(),
                holding_period,
                policy,
            )?;
            Ok(Projection {
                result,
                series: nominal.series,
            })
        }
        DeflationMethod::RealRate => {
            validate_policy(policy)?;
            let real = project_real(plan, inflation_rate_percent)?;
            Ok(Projection {
                result: apply_tax(&real.result, holding_period, policy),
                series: real.series,
            })
        }
    }
}

/// Return on a portfolio relative to the amount paid into it.
pub fn portfolio_return(total_value: f64, invested: f64) -> EngineResult<PortfolioReturn> {
    ensure_non_negative("total_value", total_value)?;
    ensure_non_negative("invested", invested)?;

    let total_return_percent = if invested > 0.0 {
        (total_value - invested) / invested * 100.0
    } else {
        0.0
    };
    Ok(PortfolioReturn {
        total_value,
        invested,
        total_return_percent,
        average_monthly_return_percent: total_return_percent / 12.0,
    })
}

/// SIP future value after `periods` monthly contributions paid at the start of each month.
pub(crate) fn sip_future_value(amount: f64, monthly_rate: f64, periods: u32) -> f64 {
    amount * annuity_due_factor(monthly_rate, periods)
}

/// `((1+r)^n - 1) / r * (1+r)`, or `n` in the zero-rate limit.
pub(crate) fn annuity_due_factor(rate: f64, periods: u32) -> f64 {
    if rate.abs() < ZERO_RATE_EPS {
        return periods as f64;
    }
    let growth = (1.0 + rate).powf(periods as f64);
    (growth - 1.0) / rate * (1.0 + rate)
}

fn lump_sum_future_value(amount: f64, annual_rate: f64, months: u32) -> f64 {
    if annual_rate.abs() < ZERO_RATE_EPS {
        return amount;
    }
    amount * (1.0 + annual_rate).powf(months as f64 / 12.0)
}

fn build_projection(plan: &ContributionPlan, rate: f64) -> EngineResult<Projection> {
    let value_at = |period: u32| match plan.mode {
        ContributionMode::Sip => sip_future_value(plan.amount, rate, period),
        ContributionMode::LumpSum => lump_sum_future_value(plan.amount, rate, period),
    };
    let contributed_at = |period: u32| match plan.mode {
        ContributionMode::Sip => plan.amount * period as f64,
        ContributionMode::LumpSum => plan.amount,
    };

    let future_value = value_at(plan.periods_total);
    let total_contributed = contributed_at(plan.periods_total);
    let gross_return = future_value - total_contributed;
    if !(future_value.is_finite() && gross_return.is_finite()) {
        return Err(EngineError::invalid("periods_total", "projection overflows f64"));
    }

    let points = (0..=plan.periods_total)
        .map(|period| GrowthPoint {
            period_index: period,
            cumulative_value: value_at(period),
            contributed: contributed_at(period),
        })
        .collect::<Vec<_>>();

    Ok(Projection {
        result: ProjectionResult {
            total_contributed,
            gross_return,
            future_value,
            inflation_adjusted_value: future_value,
            tax_amount: 0.0,
            after_tax_return: gross_return,
        },
        series: GrowthSeries { points },
    })
}

fn apply_tax(
    projection: &ProjectionResult,
    holding_period: HoldingPeriod,
    policy: &TaxPolicy,
) -> ProjectionResult {
    // Losses carry no capital-gains tax.
    let taxable_gain = projection.gross_return.max(0.0);
    let tax_amount = taxable_gain * policy.rate_for(holding_period);
    ProjectionResult {
        tax_amount,
        after_tax_return: projection.gross_return - tax_amount,
        ..*projection
    }
}

fn validate_plan(plan: &ContributionPlan) -> EngineResult<()> {
    if plan.periods_total < 1 {
        return Err(EngineError::invalid("periods_total", "must be >= 1"));
    }
    ensure_non_negative("amount", plan.amount)?;
    ensure_non_negative("annual_rate_percent", plan.annual_rate_percent)?;
    Ok(())
}

fn validate_policy(policy: &TaxPolicy) -> EngineResult<()> {
    for (field, rate) in [
        ("short_term_rate", policy.short_term_rate),
        ("long_term_rate", policy.long_term_rate),
    ] {
        if !(0.0..=1.0).contains(&rate) {
            return Err(EngineError::invalid(field, format!("must be between 0 and 1, got {rate}")));
        }
    }
    Ok(())
}
