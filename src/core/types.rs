use chrono::{NaiveDate, Weekday};
use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionMode {
    Sip,
    LumpSum,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoldingPeriod {
    ShortTerm,
    LongTerm,
}

impl HoldingPeriod {
    /// Gains held for less than a year are short term.
    pub fn from_months(months: u32) -> Self {
        if months < 12 {
            HoldingPeriod::ShortTerm
        } else {
            HoldingPeriod::LongTerm
        }
    }
}

/// How the nominal projection is brought into today's money.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeflationMethod {
    /// Project at the nominal rate, then divide the future value by cumulative inflation.
    #[default]
    Discount,
    /// Project at the inflation-adjusted real rate; no further deflation.
    RealRate,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxPolicy {
    pub short_term_rate: f64,
    pub long_term_rate: f64,
}

impl Default for TaxPolicy {
    // STCG 20%, LTCG 12.5% on listed equity.
    fn default() -> Self {
        Self {
            short_term_rate: 0.20,
            long_term_rate: 0.125,
        }
    }
}

impl TaxPolicy {
    pub fn rate_for(&self, holding_period: HoldingPeriod) -> f64 {
        match holding_period {
            HoldingPeriod::ShortTerm => self.short_term_rate,
            HoldingPeriod::LongTerm => self.long_term_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionPlan {
    pub mode: ContributionMode,
    pub amount: f64,
    pub periods_total: u32,
    pub annual_rate_percent: f64,
}

impl ContributionPlan {
    pub fn years(&self) -> f64 {
        self.periods_total as f64 / 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub total_contributed: f64,
    pub gross_return: f64,
    pub future_value: f64,
    pub inflation_adjusted_value: f64,
    pub tax_amount: f64,
    pub after_tax_return: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub period_index: u32,
    pub cumulative_value: f64,
    pub contributed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GrowthSeries {
    pub points: Vec<GrowthPoint>,
}

impl GrowthSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&GrowthPoint> {
        self.points.last()
    }

    /// One point per whole year plus the final month when the term is not a whole number of years.
    pub fn yearly(&self) -> GrowthSeries {
        let last_index = self.points.last().map(|p| p.period_index);
        let points = self
            .points
            .iter()
            .filter(|p| p.period_index % 12 == 0 || Some(p.period_index) == last_index)
            .copied()
            .collect();
        GrowthSeries { points }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationProfile {
    pub age: u32,
    pub risk_profile: RiskProfile,
    pub equity_percent: f64,
    pub debt_percent: f64,
    pub large_cap_percent: f64,
    pub mid_cap_percent: f64,
    pub small_cap_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthInputs {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub emergency_fund: f64,
    pub total_investments: f64,
    pub total_debt: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthMetric {
    SavingsRate,
    EmergencyFund,
    DebtToIncome,
    InvestmentRatio,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreBand {
    NeedsAttention,
    Fair,
    Healthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthFlags {
    pub strong_savings: bool,
    pub adequate_emergency_fund: bool,
    pub healthy_debt: bool,
    pub good_investment_ratio: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Recommendation {
    IncreaseSavings,
    #[serde(rename_all = "camelCase")]
    BuildEmergencyFund {
        shortfall: f64,
    },
    ReduceDebt,
    IncreaseInvestments,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResult {
    pub savings_rate_percent: f64,
    pub emergency_fund_months: f64,
    pub debt_to_income_percent: f64,
    pub investment_ratio_percent: f64,
    pub score: f64,
    pub band: ScoreBand,
    pub flags: HealthFlags,
    pub strengths: Vec<HealthMetric>,
    pub improvements: Vec<HealthMetric>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: NaiveDate,
    pub priority: GoalPriority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub name: String,
    pub priority: GoalPriority,
    pub target_date: NaiveDate,
    pub progress_percent: f64,
    pub remaining_amount: f64,
    pub months_remaining: f64,
    pub monthly_savings_needed: Option<f64>,
    pub required_monthly_sip: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExpenseInsight {
    SpendingAboveUsual,
    SpendingBelowUsual,
    CategoryIncrease { category: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    pub month: String,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayAverage {
    pub weekday: Weekday,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub total: f64,
    pub average_daily: f64,
    pub most_common_category: Option<String>,
    pub by_category: Vec<CategoryTotal>,
    pub daily_totals: Vec<DailyTotal>,
    pub monthly_totals: Vec<MonthlyTotal>,
    pub weekday_averages: Vec<WeekdayAverage>,
    pub insights: Vec<ExpenseInsight>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReturn {
    pub total_value: f64,
    pub invested: f64,
    pub total_return_percent: f64,
    pub average_monthly_return_percent: f64,
}
