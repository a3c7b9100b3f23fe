use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::core::{
    AllocationProfile, ContributionMode, ContributionPlan, DeflationMethod, Expense,
    ExpenseSummary, Goal, GoalPriority, GoalProgress, GrowthSeries, HealthInputs, HealthResult,
    HoldingPeriod, PortfolioReturn, ProjectionResult, RiskProfile, TaxPolicy, allocate, evaluate,
    portfolio_return, score, summarize, track_goals,
};

const DEFAULT_SIP_AMOUNT: f64 = 5_000.0;
const DEFAULT_LUMP_SUM_AMOUNT: f64 = 50_000.0;
const DEFAULT_YEARS: u32 = 10;
const MAX_YEARS: u32 = 40;
const DEFAULT_ANNUAL_RETURN: f64 = 12.0;
const DEFAULT_INFLATION_RATE: f64 = 4.5;
const DEFAULT_AGE: u32 = 30;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliContributionMode {
    Sip,
    LumpSum,
}

impl From<CliContributionMode> for ContributionMode {
    fn from(value: CliContributionMode) -> Self {
        match value {
            CliContributionMode::Sip => ContributionMode::Sip,
            CliContributionMode::LumpSum => ContributionMode::LumpSum,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliHoldingPeriod {
    ShortTerm,
    LongTerm,
}

impl From<CliHoldingPeriod> for HoldingPeriod {
    fn from(value: CliHoldingPeriod) -> Self {
        match value {
            CliHoldingPeriod::ShortTerm => HoldingPeriod::ShortTerm,
            CliHoldingPeriod::LongTerm => HoldingPeriod::LongTerm,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliDeflationMethod {
    Discount,
    RealRate,
}

impl From<CliDeflationMethod> for DeflationMethod {
    fn from(value: CliDeflationMethod) -> Self {
        match value {
            CliDeflationMethod::Discount => DeflationMethod::Discount,
            CliDeflationMethod::RealRate => DeflationMethod::RealRate,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliRiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<CliRiskProfile> for RiskProfile {
    fn from(value: CliRiskProfile) -> Self {
        match value {
            CliRiskProfile::Conservative => RiskProfile::Conservative,
            CliRiskProfile::Moderate => RiskProfile::Moderate,
            CliRiskProfile::Aggressive => RiskProfile::Aggressive,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiContributionMode {
    #[serde(alias = "SIP")]
    Sip,
    #[serde(alias = "lumpSum", alias = "lump_sum", alias = "lumpsum")]
    LumpSum,
}

impl From<ApiContributionMode> for CliContributionMode {
    fn from(value: ApiContributionMode) -> Self {
        match value {
            ApiContributionMode::Sip => CliContributionMode::Sip,
            ApiContributionMode::LumpSum => CliContributionMode::LumpSum,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiHoldingPeriod {
    #[serde(alias = "shortTerm", alias = "short_term", alias = "stcg")]
    ShortTerm,
    #[serde(alias = "longTerm", alias = "long_term", alias = "ltcg")]
    LongTerm,
}

impl From<ApiHoldingPeriod> for CliHoldingPeriod {
    fn from(value: ApiHoldingPeriod) -> Self {
        match value {
            ApiHoldingPeriod::ShortTerm => CliHoldingPeriod::ShortTerm,
            ApiHoldingPeriod::LongTerm => CliHoldingPeriod::LongTerm,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiDeflationMethod {
    Discount,
    #[serde(alias = "realRate", alias = "real_rate", alias = "real")]
    RealRate,
}

impl From<ApiDeflationMethod> for CliDeflationMethod {
    fn from(value: ApiDeflationMethod) -> Self {
        match value {
            ApiDeflationMethod::Discount => CliDeflationMethod::Discount,
            ApiDeflationMethod::RealRate => CliDeflationMethod::RealRate,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiRiskProfile {
    #[serde(alias = "Conservative")]
    Conservative,
    #[serde(alias = "Moderate")]
    Moderate,
    #[serde(alias = "Aggressive")]
    Aggressive,
}

impl From<ApiRiskProfile> for CliRiskProfile {
    fn from(value: ApiRiskProfile) -> Self {
        match value {
            ApiRiskProfile::Conservative => CliRiskProfile::Conservative,
            ApiRiskProfile::Moderate => CliRiskProfile::Moderate,
            ApiRiskProfile::Aggressive => CliRiskProfile::Aggressive,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiGoalPriority {
    #[serde(alias = "High")]
    High,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Low")]
    Low,
}

impl From<ApiGoalPriority> for GoalPriority {
    fn from(value: ApiGoalPriority) -> Self {
        match value {
            ApiGoalPriority::High => GoalPriority::High,
            ApiGoalPriority::Medium => GoalPriority::Medium,
            ApiGoalPriority::Low => GoalPriority::Low,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
enum PeriodUnit {
    Years,
    Months,
}

#[derive(Parser, Debug)]
#[command(
    name = "finproj",
    about = "Investment projection, allocation and financial health calculator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API over HTTP
    Serve(ServeArgs),
    /// Project a SIP or lump-sum investment
    Project(ProjectCommand),
    /// Recommend an equity/debt allocation
    Allocate(AllocateArgs),
    /// Score financial health
    Health(HealthArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(flatten)]
    pub project: ProjectArgs,
    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PolicyArgs {
    #[arg(
        long,
        default_value_t = 20.0,
        help = "Short-term capital gains tax rate in percent (held < 12 months)"
    )]
    pub stcg_rate: f64,
    #[arg(
        long,
        default_value_t = 12.5,
        help = "Long-term capital gains tax rate in percent (held >= 12 months)"
    )]
    pub ltcg_rate: f64,
    #[arg(
        long,
        value_enum,
        default_value_t = CliDeflationMethod::Discount,
        help = "Inflation treatment: discount the nominal value, or project at the real rate"
    )]
    pub deflation: CliDeflationMethod,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct ProjectArgs {
    #[arg(long, value_enum, default_value_t = CliContributionMode::Sip)]
    pub mode: CliContributionMode,
    #[arg(
        long,
        help = "SIP monthly amount or lump-sum principal (default 5000 SIP, 50000 lump sum)"
    )]
    pub amount: Option<f64>,
    #[arg(
        long,
        conflicts_with = "months",
        help = "Investment period in years (1-40)"
    )]
    pub years: Option<u32>,
    #[arg(long, help = "Investment period in months (1-480)")]
    pub months: Option<u32>,
    #[arg(
        long,
        default_value_t = DEFAULT_ANNUAL_RETURN,
        help = "Expected annual return in percent"
    )]
    pub annual_return: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_INFLATION_RATE,
        help = "Assumed annual inflation in percent"
    )]
    pub inflation_rate: f64,
    #[arg(
        long,
        value_enum,
        help = "Capital gains treatment; defaults from the investment period"
    )]
    pub holding_period: Option<CliHoldingPeriod>,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct AllocateArgs {
    #[arg(long, default_value_t = DEFAULT_AGE)]
    pub age: u32,
    #[arg(long, value_enum, default_value_t = CliRiskProfile::Moderate)]
    pub risk_profile: CliRiskProfile,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct HealthArgs {
    #[arg(long, default_value_t = 50_000.0)]
    pub monthly_income: f64,
    #[arg(long, default_value_t = 30_000.0)]
    pub monthly_expenses: f64,
    #[arg(long, default_value_t = 100_000.0)]
    pub emergency_fund: f64,
    #[arg(long, default_value_t = 200_000.0)]
    pub total_investments: f64,
    #[arg(long, default_value_t = 0.0)]
    pub total_debt: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    mode: Option<ApiContributionMode>,
    amount: Option<f64>,
    years: Option<u32>,
    months: Option<u32>,
    annual_return: Option<f64>,
    inflation_rate: Option<f64>,
    holding_period: Option<ApiHoldingPeriod>,
    deflation: Option<ApiDeflationMethod>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AllocatePayload {
    age: Option<u32>,
    risk_profile: Option<ApiRiskProfile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct HealthPayload {
    monthly_income: Option<f64>,
    monthly_expenses: Option<f64>,
    emergency_fund: Option<f64>,
    total_investments: Option<f64>,
    total_debt: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalPayload {
    name: String,
    target_amount: f64,
    #[serde(default)]
    current_amount: f64,
    target_date: NaiveDate,
    priority: Option<ApiGoalPriority>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GoalsPayload {
    goals: Vec<GoalPayload>,
    today: Option<NaiveDate>,
    expected_return: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpensePayload {
    date: NaiveDate,
    amount: f64,
    category: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ExpensesPayload {
    expenses: Vec<ExpensePayload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ReturnsPayload {
    total_value: Option<f64>,
    invested: Option<f64>,
}

/// Server-wide settings shared by every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    pub tax_policy: TaxPolicy,
    pub deflation: DeflationMethod,
}

#[derive(Debug, Clone, Copy)]
struct ProjectRequest {
    plan: ContributionPlan,
    inflation_rate_percent: f64,
    holding_period: HoldingPeriod,
    period_unit: PeriodUnit,
    deflation: Option<DeflationMethod>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    mode: ContributionMode,
    period_unit: PeriodUnit,
    periods_total: u32,
    years: f64,
    inflation_rate: f64,
    holding_period: HoldingPeriod,
    tax_rate: f64,
    deflation: DeflationMethod,
    projection: ProjectionResult,
    series: GrowthSeries,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalsResponse {
    today: NaiveDate,
    goals: Vec<GoalProgress>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Serve(args) => {
            let config = build_config(&args.policy)?;
            run_http_server(args.port, config)
                .await
                .map_err(|e| format!("Server error: {e}"))
        }
        Command::Project(args) => {
            let config = build_config(&args.policy)?;
            let request = build_project_request(args.project)?;
            print_json(&run_projection(&request, &config)?)
        }
        Command::Allocate(args) => print_json(&run_allocation(args)?),
        Command::Health(args) => print_json(&run_health(args)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize result: {e}"))?;
    println!("{body}");
    Ok(())
}

fn build_config(args: &PolicyArgs) -> Result<AppConfig, String> {
    for (name, rate) in [("--stcg-rate", args.stcg_rate), ("--ltcg-rate", args.ltcg_rate)] {
        if !(0.0..=100.0).contains(&rate) {
            return Err(format!("{name} must be between 0 and 100"));
        }
    }

    Ok(AppConfig {
        tax_policy: TaxPolicy {
            short_term_rate: args.stcg_rate / 100.0,
            long_term_rate: args.ltcg_rate / 100.0,
        },
        deflation: args.deflation.into(),
    })
}

fn build_project_request(args: ProjectArgs) -> Result<ProjectRequest, String> {
    let mode = ContributionMode::from(args.mode);
    let amount = args.amount.unwrap_or(match mode {
        ContributionMode::Sip => DEFAULT_SIP_AMOUNT,
        ContributionMode::LumpSum => DEFAULT_LUMP_SUM_AMOUNT,
    });
    if !amount.is_finite() || amount < 0.0 {
        return Err("--amount must be >= 0".to_string());
    }

    let (periods_total, period_unit) = match (args.years, args.months) {
        (Some(_), Some(_)) => {
            return Err("--years and --months cannot be combined".to_string());
        }
        (Some(years), None) => {
            if !(1..=MAX_YEARS).contains(&years) {
                return Err(format!("--years must be between 1 and {MAX_YEARS}"));
            }
            (years * 12, PeriodUnit::Years)
        }
        (None, Some(months)) => {
            let max_months = MAX_YEARS * 12;
            if !(1..=max_months).contains(&months) {
                return Err(format!("--months must be between 1 and {max_months}"));
            }
            (months, PeriodUnit::Months)
        }
        (None, None) => (DEFAULT_YEARS * 12, PeriodUnit::Years),
    };

    if !args.annual_return.is_finite() || args.annual_return < 0.0 {
        return Err("--annual-return must be >= 0".to_string());
    }

    if !args.inflation_rate.is_finite() || args.inflation_rate < 0.0 {
        return Err("--inflation-rate must be >= 0".to_string());
    }

    let holding_period = args
        .holding_period
        .map(HoldingPeriod::from)
        .unwrap_or_else(|| HoldingPeriod::from_months(periods_total));

    Ok(ProjectRequest {
        plan: ContributionPlan {
            mode,
            amount,
            periods_total,
            annual_rate_percent: args.annual_return,
        },
        inflation_rate_percent: args.inflation_rate,
        holding_period,
        period_unit,
        deflation: None,
    })
}

fn run_projection(request: &ProjectRequest, config: &AppConfig) -> Result<ProjectResponse, String> {
    let deflation = request.deflation.unwrap_or(config.deflation);
    let projection = evaluate(
        &request.plan,
        request.inflation_rate_percent,
        request.holding_period,
        deflation,
        &config.tax_policy,
    )
    .map_err(|e| e.to_string())?;

    let series = match request.period_unit {
        PeriodUnit::Years => projection.series.yearly(),
        PeriodUnit::Months => projection.series,
    };

    Ok(ProjectResponse {
        mode: request.plan.mode,
        period_unit: request.period_unit,
        periods_total: request.plan.periods_total,
        years: request.plan.years(),
        inflation_rate: request.inflation_rate_percent,
        holding_period: request.holding_period,
        tax_rate: config.tax_policy.rate_for(request.holding_period),
        deflation,
        projection: projection.result,
        series,
    })
}

fn run_allocation(args: AllocateArgs) -> Result<AllocationProfile, String> {
    allocate(args.age, args.risk_profile.into()).map_err(|e| e.to_string())
}

fn run_health(args: HealthArgs) -> Result<HealthResult, String> {
    score(&HealthInputs {
        monthly_income: args.monthly_income,
        monthly_expenses: args.monthly_expenses,
        emergency_fund: args.emergency_fund,
        total_investments: args.total_investments,
        total_debt: args.total_debt,
    })
    .map_err(|e| e.to_string())
}

pub fn router(config: AppConfig) -> Router {
    Router::new()
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route(
            "/api/allocate",
            get(allocate_get_handler).post(allocate_post_handler),
        )
        .route(
            "/api/health",
            get(health_get_handler).post(health_post_handler),
        )
        .route("/api/goals", post(goals_handler))
        .route("/api/expenses", post(expenses_handler))
        .route(
            "/api/returns",
            get(returns_get_handler).post(returns_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(Arc::new(config))
}

pub async fn run_http_server(port: u16, config: AppConfig) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(config);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, ?config, "finproj HTTP API listening");

    axum::serve(listener, app).await
}

type SharedConfig = State<Arc<AppConfig>>;

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(
    State(config): SharedConfig,
    Query(payload): Query<ProjectPayload>,
) -> Response {
    project_handler_impl(&config, payload)
}

async fn project_post_handler(
    State(config): SharedConfig,
    Json(payload): Json<ProjectPayload>,
) -> Response {
    project_handler_impl(&config, payload)
}

fn project_handler_impl(config: &AppConfig, payload: ProjectPayload) -> Response {
    tracing::debug!(?payload, "projection request");
    let result = project_request_from_payload(payload)
        .and_then(|request| run_projection(&request, config));
    respond("/api/project", result)
}

async fn allocate_get_handler(Query(payload): Query<AllocatePayload>) -> Response {
    allocate_handler_impl(payload)
}

async fn allocate_post_handler(Json(payload): Json<AllocatePayload>) -> Response {
    allocate_handler_impl(payload)
}

fn allocate_handler_impl(payload: AllocatePayload) -> Response {
    tracing::debug!(?payload, "allocation request");
    respond("/api/allocate", run_allocation(allocate_args_from_payload(payload)))
}

async fn health_get_handler(Query(payload): Query<HealthPayload>) -> Response {
    health_handler_impl(payload)
}

async fn health_post_handler(Json(payload): Json<HealthPayload>) -> Response {
    health_handler_impl(payload)
}

fn health_handler_impl(payload: HealthPayload) -> Response {
    tracing::debug!(?payload, "health score request");
    respond("/api/health", run_health(health_args_from_payload(payload)))
}

async fn goals_handler(Json(payload): Json<GoalsPayload>) -> Response {
    tracing::debug!(goals = payload.goals.len(), "goal tracking request");
    let today = Local::now().date_naive();
    respond("/api/goals", run_goals(payload, today))
}

async fn expenses_handler(Json(payload): Json<ExpensesPayload>) -> Response {
    tracing::debug!(expenses = payload.expenses.len(), "expense summary request");
    respond("/api/expenses", run_expenses(payload))
}

async fn returns_get_handler(Query(payload): Query<ReturnsPayload>) -> Response {
    respond("/api/returns", run_returns(payload))
}

async fn returns_post_handler(Json(payload): Json<ReturnsPayload>) -> Response {
    respond("/api/returns", run_returns(payload))
}

fn respond<T: Serialize>(route: &'static str, result: Result<T, String>) -> Response {
    match result {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(msg) => {
            tracing::warn!(route, error = %msg, "rejected request");
            error_response(StatusCode::BAD_REQUEST, &msg)
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn default_project_args() -> ProjectArgs {
    ProjectArgs {
        mode: CliContributionMode::Sip,
        amount: None,
        years: None,
        months: None,
        annual_return: DEFAULT_ANNUAL_RETURN,
        inflation_rate: DEFAULT_INFLATION_RATE,
        holding_period: None,
    }
}

fn project_request_from_payload(payload: ProjectPayload) -> Result<ProjectRequest, String> {
    let mut args = default_project_args();

    if let Some(v) = payload.mode {
        args.mode = v.into();
    }
    if let Some(v) = payload.amount {
        args.amount = Some(v);
    }
    if let Some(v) = payload.years {
        args.years = Some(v);
    }
    if let Some(v) = payload.months {
        args.months = Some(v);
    }
    if let Some(v) = payload.annual_return {
        args.annual_return = v;
    }
    if let Some(v) = payload.inflation_rate {
        args.inflation_rate = v;
    }
    if let Some(v) = payload.holding_period {
        args.holding_period = Some(v.into());
    }

    let mut request = build_project_request(args)?;
    request.deflation = payload
        .deflation
        .map(|v| CliDeflationMethod::from(v).into());
    Ok(request)
}

fn allocate_args_from_payload(payload: AllocatePayload) -> AllocateArgs {
    AllocateArgs {
        age: payload.age.unwrap_or(DEFAULT_AGE),
        risk_profile: payload
            .risk_profile
            .map(CliRiskProfile::from)
            .unwrap_or(CliRiskProfile::Moderate),
    }
}

fn health_args_from_payload(payload: HealthPayload) -> HealthArgs {
    let mut args = HealthArgs {
        monthly_income: 50_000.0,
        monthly_expenses: 30_000.0,
        emergency_fund: 100_000.0,
        total_investments: 200_000.0,
        total_debt: 0.0,
    };

    if let Some(v) = payload.monthly_income {
        args.monthly_income = v;
    }
    if let Some(v) = payload.monthly_expenses {
        args.monthly_expenses = v;
    }
    if let Some(v) = payload.emergency_fund {
        args.emergency_fund = v;
    }
    if let Some(v) = payload.total_investments {
        args.total_investments = v;
    }
    if let Some(v) = payload.total_debt {
        args.total_debt = v;
    }
    args
}

fn run_goals(payload: GoalsPayload, today: NaiveDate) -> Result<GoalsResponse, String> {
    let today = payload.today.unwrap_or(today);
    let goals = payload
        .goals
        .into_iter()
        .map(|goal| Goal {
            name: goal.name,
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            target_date: goal.target_date,
            priority: goal
                .priority
                .map(GoalPriority::from)
                .unwrap_or(GoalPriority::Medium),
        })
        .collect::<Vec<_>>();

    let goals = track_goals(&goals, today, payload.expected_return).map_err(|e| e.to_string())?;
    Ok(GoalsResponse { today, goals })
}

fn run_expenses(payload: ExpensesPayload) -> Result<ExpenseSummary, String> {
    let expenses = payload
        .expenses
        .into_iter()
        .map(|e| Expense {
            date: e.date,
            amount: e.amount,
            category: e.category,
        })
        .collect::<Vec<_>>();
    summarize(&expenses).map_err(|e| e.to_string())
}

fn run_returns(payload: ReturnsPayload) -> Result<PortfolioReturn, String> {
    let Some(total_value) = payload.total_value else {
        return Err("totalValue is required".to_string());
    };
    let Some(invested) = payload.invested else {
        return Err("invested is required".to_string());
    };
    portfolio_return(total_value, invested).map_err(|e| e.to_string())
}
