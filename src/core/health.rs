use super::error::{EngineResult, ensure_non_negative};
use super::types::{
    HealthFlags, HealthInputs, HealthMetric, HealthResult, Recommendation, ScoreBand,
};

const TERM_MAX: f64 = 25.0;

const STRONG_SAVINGS_RATE: f64 = 20.0;
const ADEQUATE_EMERGENCY_MONTHS: f64 = 6.0;
const HEALTHY_DEBT_TO_INCOME: f64 = 30.0;
const GOOD_INVESTMENT_RATIO: f64 = 50.0;

const FAIR_SCORE: f64 = 33.0;
const HEALTHY_SCORE: f64 = 66.0;

/// Composite 0-100 financial health score.
///
/// Four ratios contribute up to 25 points each. Every term is clamped to
/// [0, 25] on its own, so an expense-heavy budget or a debt load above annual
/// income contributes nothing rather than a negative amount.
pub fn score(inputs: &HealthInputs) -> EngineResult<HealthResult> {
    let income = ensure_non_negative("monthly_income", inputs.monthly_income)?;
    let expenses = ensure_non_negative("monthly_expenses", inputs.monthly_expenses)?;
    let emergency_fund = ensure_non_negative("emergency_fund", inputs.emergency_fund)?;
    let investments = ensure_non_negative("total_investments", inputs.total_investments)?;
    let debt = ensure_non_negative("total_debt", inputs.total_debt)?;

    let annual_income = income * 12.0;
    let savings_rate_percent = if income > 0.0 {
        (income - expenses) / income * 100.0
    } else {
        0.0
    };
    let emergency_fund_months = if expenses > 0.0 {
        emergency_fund / expenses
    } else {
        0.0
    };
    let debt_to_income_percent = if income > 0.0 {
        debt / annual_income * 100.0
    } else {
        0.0
    };
    let investment_ratio_percent = if income > 0.0 {
        investments / annual_income * 100.0
    } else {
        0.0
    };

    let score = term(savings_rate_percent / 2.0)
        + term(emergency_fund_months * 12.5)
        + term(TERM_MAX * (1.0 - debt_to_income_percent / 100.0))
        + term(investment_ratio_percent / 4.0);

    let flags = HealthFlags {
        strong_savings: savings_rate_percent >= STRONG_SAVINGS_RATE,
        adequate_emergency_fund: emergency_fund_months >= ADEQUATE_EMERGENCY_MONTHS,
        healthy_debt: debt_to_income_percent < HEALTHY_DEBT_TO_INCOME,
        good_investment_ratio: investment_ratio_percent >= GOOD_INVESTMENT_RATIO,
    };

    let checks = [
        (HealthMetric::SavingsRate, flags.strong_savings),
        (HealthMetric::EmergencyFund, flags.adequate_emergency_fund),
        (HealthMetric::DebtToIncome, flags.healthy_debt),
        (HealthMetric::InvestmentRatio, flags.good_investment_ratio),
    ];
    let strengths = checks
        .iter()
        .filter(|(_, ok)| *ok)
        .map(|(metric, _)| *metric)
        .collect::<Vec<_>>();
    let improvements = checks
        .iter()
        .filter(|(_, ok)| !*ok)
        .map(|(metric, _)| *metric)
        .collect::<Vec<_>>();
    let recommendations = improvements
        .iter()
        .map(|metric| match metric {
            HealthMetric::SavingsRate => Recommendation::IncreaseSavings,
            HealthMetric::EmergencyFund => Recommendation::BuildEmergencyFund {
                shortfall: (ADEQUATE_EMERGENCY_MONTHS * expenses - emergency_fund).max(0.0),
            },
            HealthMetric::DebtToIncome => Recommendation::ReduceDebt,
            HealthMetric::InvestmentRatio => Recommendation::IncreaseInvestments,
        })
        .collect();

    Ok(HealthResult {
        savings_rate_percent,
        emergency_fund_months,
        debt_to_income_percent,
        investment_ratio_percent,
        score,
        band: band_for(score),
        flags,
        strengths,
        improvements,
        recommendations,
    })
}

pub fn band_for(score: f64) -> ScoreBand {
    if score >= HEALTHY_SCORE {
        ScoreBand::Healthy
    } else if score >= FAIR_SCORE {
        ScoreBand::Fair
    } else {
        ScoreBand::NeedsAttention
    }
}

fn term(points: f64) -> f64 {
    points.clamp(0.0, TERM_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_inputs() -> HealthInputs {
        HealthInputs {
            monthly_income: 50_000.0,
            monthly_expenses: 30_000.0,
            emergency_fund: 100_000.0,
            total_investments: 200_000.0,
            total_debt: 0.0,
        }
    }

    #[test]
    fn oracle_dashboard_defaults_score() {
        // savings 40% -> 20, fund 3.33 months -> 25 (capped), no debt -> 25,
        // investments 33.3% of annual income -> 8.33
        let result = score(&sample_inputs()).expect("valid inputs");
        assert_approx(result.savings_rate_percent, 40.0);
        assert_approx(result.emergency_fund_months, 100_000.0 / 30_000.0);
        assert_approx(result.debt_to_income_percent, 0.0);
        assert_approx(result.investment_ratio_percent, 100.0 / 3.0);
        assert_approx(result.score, 20.0 + 25.0 + 25.0 + 100.0 / 12.0);
        assert_eq!(result.band, ScoreBand::Healthy);
    }

    #[test]
    fn dashboard_defaults_flags_and_recommendations() {
        let result = score(&sample_inputs()).expect("valid inputs");
        assert_eq!(
            result.flags,
            HealthFlags {
                strong_savings: true,
                adequate_emergency_fund: false,
                healthy_debt: true,
                good_investment_ratio: false,
            }
        );
        assert_eq!(
            result.strengths,
            vec![HealthMetric::SavingsRate, HealthMetric::DebtToIncome]
        );
        assert_eq!(
            result.improvements,
            vec![HealthMetric::EmergencyFund, HealthMetric::InvestmentRatio]
        );
        assert_eq!(
            result.recommendations,
            vec![
                Recommendation::BuildEmergencyFund {
                    shortfall: 80_000.0
                },
                Recommendation::IncreaseInvestments,
            ]
        );
    }

    #[test]
    fn zero_income_yields_zero_ratios_without_fault() {
        let mut inputs = sample_inputs();
        inputs.monthly_income = 0.0;
        inputs.total_debt = 1_000_000.0;
        let result = score(&inputs).expect("valid inputs");
        assert_eq!(result.savings_rate_percent, 0.0);
        assert_eq!(result.debt_to_income_percent, 0.0);
        assert_eq!(result.investment_ratio_percent, 0.0);
        assert!(result.score.is_finite());
    }

    #[test]
    fn zero_expenses_yields_zero_emergency_months() {
        let mut inputs = sample_inputs();
        inputs.monthly_expenses = 0.0;
        let result = score(&inputs).expect("valid inputs");
        assert_eq!(result.emergency_fund_months, 0.0);
        assert_approx(result.savings_rate_percent, 100.0);
    }

    #[test]
    fn debt_above_annual_income_contributes_nothing() {
        let mut inputs = sample_inputs();
        inputs.total_debt = 1_200_000.0; // 200% of annual income
        let result = score(&inputs).expect("valid inputs");
        assert_approx(result.debt_to_income_percent, 200.0);
        assert_approx(result.score, 20.0 + 25.0 + 0.0 + 100.0 / 12.0);
        assert!(result.improvements.contains(&HealthMetric::DebtToIncome));
        assert!(result.recommendations.contains(&Recommendation::ReduceDebt));
    }

    #[test]
    fn overspending_does_not_go_negative() {
        let inputs = HealthInputs {
            monthly_income: 10_000.0,
            monthly_expenses: 40_000.0,
            emergency_fund: 0.0,
            total_investments: 0.0,
            total_debt: 0.0,
        };
        let result = score(&inputs).expect("valid inputs");
        assert_approx(result.savings_rate_percent, -300.0);
        assert_approx(result.score, 25.0);
        assert_eq!(result.band, ScoreBand::NeedsAttention);
        assert_eq!(result.recommendations[0], Recommendation::IncreaseSavings);
    }

    #[test]
    fn all_strengths_produce_full_score_and_no_recommendations() {
        let inputs = HealthInputs {
            monthly_income: 100_000.0,
            monthly_expenses: 40_000.0,
            emergency_fund: 600_000.0,
            total_investments: 1_200_000.0,
            total_debt: 0.0,
        };
        let result = score(&inputs).expect("valid inputs");
        assert_approx(result.score, 100.0);
        assert!(result.improvements.is_empty());
        assert!(result.recommendations.is_empty());
        assert_eq!(result.strengths.len(), 4);
    }

    #[test]
    fn rejects_negative_inputs() {
        let mut inputs = sample_inputs();
        inputs.total_debt = -1.0;
        assert!(score(&inputs).is_err());
    }

    #[test]
    fn band_boundaries_follow_gauge_steps() {
        assert_eq!(band_for(0.0), ScoreBand::NeedsAttention);
        assert_eq!(band_for(32.99), ScoreBand::NeedsAttention);
        assert_eq!(band_for(33.0), ScoreBand::Fair);
        assert_eq!(band_for(66.0), ScoreBand::Healthy);
        assert_eq!(band_for(100.0), ScoreBand::Healthy);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(128))]

        #[test]
        fn prop_score_is_bounded(
            income in 0u32..1_000_000,
            expenses in 0u32..1_000_000,
            fund in 0u32..10_000_000,
            investments in 0u32..50_000_000,
            debt in 0u32..50_000_000
        ) {
            let inputs = HealthInputs {
                monthly_income: income as f64,
                monthly_expenses: expenses as f64,
                emergency_fund: fund as f64,
                total_investments: investments as f64,
                total_debt: debt as f64,
            };
            let result = score(&inputs).expect("valid inputs");
            prop_assert!((0.0..=100.0).contains(&result.score));
            prop_assert!(result.strengths.len() + result.improvements.len() == 4);
            prop_assert!(result.recommendations.len() == result.improvements.len());
        }
    }
}
