use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::comparison::{
    build_comparison_chart, build_summary_comparison, RealPoint, ResultPoint,
};
use crate::real_data::RealAccountData;
use crate::simulations::ConsolidatedResult;

fn sim_point(sim: &str, account: &str, year: i32, amount: Decimal) -> ResultPoint {
    ResultPoint {
        simulation_id: sim.to_string(),
        account_name: account.to_string(),
        category: "Courant".to_string(),
        year,
        amount,
    }
}

fn real_point(sim: &str, account: &str, year: i32, nominal: Decimal, rate: Decimal) -> RealPoint {
    RealPoint {
        simulation_id: sim.to_string(),
        account_name: account.to_string(),
        year,
        nominal_amount: nominal,
        inflation_rate: rate,
        adjusted_amount: nominal / (Decimal::ONE + rate / Decimal::ONE_HUNDRED),
    }
}

#[test]
fn empty_inputs_yield_an_empty_summary() {
    let summary = build_summary_comparison(&[], &[], true);

    assert!(summary.years.is_empty());
    assert!(summary.yearly_totals.is_empty());
    assert!(summary.accounts.is_empty());
    assert!(summary.chart.datasets.is_empty());
}

#[test]
fn yearly_totals_aggregate_across_accounts() {
    let sims = vec![
        sim_point("a", "Livret", 2024, dec!(1000)),
        sim_point("b", "PEA", 2024, dec!(2000)),
    ];
    let reals = vec![
        real_point("a", "Livret", 2024, dec!(1100), dec!(0)),
        real_point("b", "PEA", 2024, dec!(2200), dec!(0)),
    ];

    let summary = build_summary_comparison(&sims, &reals, true);

    let totals = &summary.yearly_totals[0];
    assert_eq!(totals.simulated, dec!(3000));
    assert_eq!(totals.real, dec!(3300));
    assert_eq!(totals.difference, dec!(300));
    assert_eq!(totals.difference_percent, dec!(10));
}

#[test]
fn inflation_rate_is_weighted_by_nominal_amount() {
    // 2% on 3000 and 4% on 1000 -> (2*3000 + 4*1000) / 4000 = 2.5
    let reals = vec![
        real_point("a", "Livret", 2024, dec!(3000), dec!(2)),
        real_point("b", "PEA", 2024, dec!(1000), dec!(4)),
    ];

    let summary = build_summary_comparison(&[], &reals, true);

    assert_eq!(summary.yearly_totals[0].inflation_rate, dec!(2.5));
}

#[test]
fn percent_difference_is_zero_when_nothing_was_simulated() {
    let reals = vec![real_point("a", "Livret", 2024, dec!(500), dec!(0))];

    let summary = build_summary_comparison(&[], &reals, true);

    let totals = &summary.yearly_totals[0];
    assert_eq!(totals.simulated, Decimal::ZERO);
    assert_eq!(totals.difference, dec!(500));
    assert_eq!(totals.difference_percent, Decimal::ZERO);
}

#[test]
fn adjusted_totals_are_recomputed_from_captured_rates() {
    let reals = vec![real_point("a", "Livret", 2024, dec!(102), dec!(2))];

    let summary = build_summary_comparison(&[], &reals, false);

    assert_eq!(summary.yearly_totals[0].real_adjusted, dec!(100));
}

#[test]
fn account_years_without_real_data_are_flagged_and_zeroed() {
    let sims = vec![
        sim_point("a", "Livret", 2024, dec!(1000)),
        sim_point("a", "Livret", 2025, dec!(1050)),
    ];
    let reals = vec![real_point("a", "Livret", 2024, dec!(990), dec!(0))];

    let summary = build_summary_comparison(&sims, &reals, true);

    assert_eq!(summary.accounts.len(), 1);
    let account = &summary.accounts[0];
    assert_eq!(account.account_name, "Livret");
    assert_eq!(account.category, "Courant");

    let with_data = &account.years[0];
    assert!(with_data.has_real_data);
    assert_eq!(with_data.difference, dec!(-10));

    let without_data = &account.years[1];
    assert!(!without_data.has_real_data);
    assert_eq!(without_data.simulated, dec!(1050));
    assert_eq!(without_data.real, Decimal::ZERO);
    assert_eq!(without_data.difference, Decimal::ZERO);
}

#[test]
fn summary_chart_hides_the_adjusted_series_on_request() {
    let reals = vec![real_point("a", "Livret", 2024, dec!(100), dec!(2))];

    let with_inflation = build_summary_comparison(&[], &reals, true);
    assert_eq!(with_inflation.chart.datasets.len(), 3);
    assert!(with_inflation.chart.datasets[2].border_dash.is_some());

    let without_inflation = build_summary_comparison(&[], &reals, false);
    assert_eq!(without_inflation.chart.datasets.len(), 2);
}

#[test]
fn comparison_chart_emits_gaps_for_missing_years() {
    let now = chrono::Utc::now().naive_utc();
    let simulated = vec![
        ConsolidatedResult {
            id: "r1".to_string(),
            simulation_id: "a".to_string(),
            year: 2024,
            amount: dec!(1000),
            account_name: "Livret".to_string(),
        },
        ConsolidatedResult {
            id: "r2".to_string(),
            simulation_id: "a".to_string(),
            year: 2025,
            amount: dec!(1050),
            account_name: "Livret".to_string(),
        },
    ];
    let real = vec![RealAccountData {
        id: "d1".to_string(),
        simulation_id: "a".to_string(),
        year: 2025,
        nominal_amount: dec!(1020),
        inflation_rate: dec!(2),
        adjusted_amount: dec!(1000),
        updated_at: now,
    }];

    let chart = build_comparison_chart(&simulated, &real, true);

    assert_eq!(chart.labels, vec!["2024".to_string(), "2025".to_string()]);
    assert_eq!(chart.datasets[0].data, vec![Some(1000.0), Some(1050.0)]);
    assert_eq!(chart.datasets[1].data, vec![None, Some(1020.0)]);
    assert_eq!(chart.datasets[2].data, vec![None, Some(1000.0)]);
}
