use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One projected result row joined with its simulation's grouping keys
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPoint {
    pub simulation_id: String,
    pub account_name: String,
    pub category: String,
    pub year: i32,
    pub amount: Decimal,
}

/// One observed balance joined with its simulation's account name
#[derive(Debug, Clone, PartialEq)]
pub struct RealPoint {
    pub simulation_id: String,
    pub account_name: String,
    pub year: i32,
    pub nominal_amount: Decimal,
    pub inflation_rate: Decimal,
    pub adjusted_amount: Decimal,
}

/// Grouping key for aggregated chart series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Category,
    AccountName,
}

/// One named series of a chart payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
}

/// Chart payload: a data contract for the presentation layer, not a
/// rendering concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    pub fn empty() -> Self {
        Self {
            labels: Vec::new(),
            datasets: Vec::new(),
        }
    }
}

/// Aggregated totals of one year across all of a user's accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyTotals {
    pub year: i32,
    pub simulated: Decimal,
    pub real: Decimal,
    pub real_adjusted: Decimal,
    /// Average of the captured rates, weighted by nominal amount
    pub inflation_rate: Decimal,
    pub difference: Decimal,
    pub difference_adjusted: Decimal,
    pub difference_percent: Decimal,
    pub difference_percent_adjusted: Decimal,
}

/// Projected-vs-observed measures of one account for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountYearComparison {
    pub year: i32,
    pub simulated: Decimal,
    pub has_real_data: bool,
    pub real: Decimal,
    pub real_adjusted: Decimal,
    pub inflation_rate: Decimal,
    pub difference: Decimal,
    pub difference_adjusted: Decimal,
    pub difference_percent: Decimal,
    pub difference_percent_adjusted: Decimal,
}

/// Year-by-year breakdown of one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub account_name: String,
    pub category: String,
    pub years: Vec<AccountYearComparison>,
}

/// The whole summary view: totals, per-account tables and the chart payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryComparison {
    pub years: Vec<i32>,
    pub yearly_totals: Vec<YearlyTotals>,
    pub accounts: Vec<AccountSummary>,
    pub chart: ChartData,
}
