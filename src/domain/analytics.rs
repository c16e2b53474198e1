//! Aggregated reporting payloads for the superuser and designer dashboards.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Jobs created / printed / paid per order taker.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UserPerformance {
    pub order_taken_by: String,
    pub jobs_created: i64,
    pub jobs_printed: i64,
    pub jobs_paid: i64,
}

/// Job count and documented-payment revenue per branch.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BranchPerformance {
    pub branch: String,
    pub job_count: i64,
    pub total_profit: Decimal,
}

/// Job count and documented-payment revenue per product type.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductPerformance {
    pub product_type: String,
    pub job_count: i64,
    pub total_revenue: Decimal,
}

#[derive(Clone, Debug, Serialize, PartialEq, Default)]
pub struct FinancialStats {
    pub total_receipted: i64,
    pub total_invoiced: i64,
    pub total_unpaid: i64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DailyProfit {
    pub created_date: NaiveDate,
    pub total_profit: Decimal,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MonthlyBranchProfit {
    pub month: u32,
    pub branch: String,
    pub total_profit: Decimal,
}

/// The full superuser analytics payload.
#[derive(Clone, Debug, Serialize, PartialEq, Default)]
pub struct JobAnalytics {
    pub user_performance: Vec<UserPerformance>,
    pub branch_performance: Vec<BranchPerformance>,
    pub product_performance: Vec<ProductPerformance>,
    pub financial_stats: FinancialStats,
    pub daily_profits: Vec<DailyProfit>,
    pub monthly_branch_profits: Vec<MonthlyBranchProfit>,
}

/// The designer dashboard counters.
#[derive(Clone, Debug, Serialize, PartialEq, Default)]
pub struct DesignerStats {
    pub jobs_today: i64,
    pub pending_jobs: i64,
    pub completed_today: i64,
}

/// The superuser admin-dashboard counters.
#[derive(Clone, Debug, Serialize, PartialEq, Default)]
pub struct AdminStats {
    pub pending_users: i64,
    pub pending_jobs: i64,
    pub total_jobs: i64,
    pub unpaid_jobs: i64,
}
