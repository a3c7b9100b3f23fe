mod allocation;
mod engine;
mod error;
mod expenses;
mod goals;
mod health;
mod types;

pub use allocation::{MAX_AGE, MIN_AGE, allocate};
pub use engine::{Projection, adjust, evaluate, portfolio_return, project, project_real};
pub use error::{EngineError, EngineResult};
pub use expenses::summarize;
pub use goals::{track_goal, track_goals};
pub use health::{band_for, score};
pub use types::{
    AllocationProfile, CategoryTotal, ContributionMode, ContributionPlan, DailyTotal,
    DeflationMethod, Expense, ExpenseInsight, ExpenseSummary, Goal, GoalPriority, GoalProgress,
    GrowthPoint, GrowthSeries, HealthFlags, HealthInputs, HealthMetric, HealthResult,
    HoldingPeriod, MonthlyTotal, PortfolioReturn, ProjectionResult, Recommendation, RiskProfile,
    ScoreBand, TaxPolicy, WeekdayAverage,
};
