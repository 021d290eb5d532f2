// Module declarations
pub(crate) mod comparison_constants;
pub(crate) mod comparison_model;
pub(crate) mod comparison_service;

#[cfg(test)]
pub(crate) mod tests;

// Re-export the public interface
pub use comparison_constants::*;
pub use comparison_model::{
    AccountSummary, AccountYearComparison, ChartData, ChartDataset, GroupBy, RealPoint,
    ResultPoint, SummaryComparison, YearlyTotals,
};
pub use comparison_service::{
    build_chart_data, build_comparison_chart, build_summary_comparison,
};
