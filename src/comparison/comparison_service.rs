use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::comparison_constants::{
    CHART_ADJUSTED_DASH, CHART_BORDER_WIDTH, CHART_COLORS, LABEL_ALL_ACCOUNTS_TOTAL,
    LABEL_ALL_CATEGORIES_TOTAL, LABEL_REAL_ADJUSTED, LABEL_REAL_NOMINAL, LABEL_SIMULATION,
    LABEL_TOTAL_REAL, LABEL_TOTAL_REAL_ADJUSTED, LABEL_TOTAL_SIMULATED,
};
use super::comparison_model::{
    AccountSummary, AccountYearComparison, ChartData, ChartDataset, GroupBy, RealPoint,
    ResultPoint, SummaryComparison, YearlyTotals,
};
use crate::real_data::{adjust_for_inflation, RealAccountData};
use crate::simulations::ConsolidatedResult;

fn dataset(label: &str, data: Vec<Option<f64>>, color_idx: usize) -> ChartDataset {
    let (border, background) = CHART_COLORS[color_idx % CHART_COLORS.len()];
    ChartDataset {
        label: label.to_string(),
        data,
        background_color: background.to_string(),
        border_color: border.to_string(),
        border_width: CHART_BORDER_WIDTH,
        fill: None,
        border_dash: None,
    }
}

/// Builds the chart payload for a set of result rows.
///
/// Non-cumulative: one series per distinct group value, each year summing
/// that group's rows. Cumulative: one aggregate series where every
/// simulation carries its last observed value into years it has no row
/// for; a missing year means "balance unchanged", not zero.
pub fn build_chart_data(
    results: &[ResultPoint],
    group_by: GroupBy,
    cumulative: bool,
) -> ChartData {
    if results.is_empty() {
        return ChartData::empty();
    }

    let years: Vec<i32> = results
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<i32>>()
        .into_iter()
        .collect();
    let labels: Vec<String> = years.iter().map(|y| y.to_string()).collect();

    let group_key = |point: &ResultPoint| -> String {
        match group_by {
            GroupBy::Category => point.category.clone(),
            GroupBy::AccountName => point.account_name.clone(),
        }
    };

    let datasets = if cumulative {
        let mut values_by_simulation: HashMap<String, HashMap<i32, Decimal>> = HashMap::new();
        for point in results {
            values_by_simulation
                .entry(point.simulation_id.clone())
                .or_default()
                .insert(point.year, point.amount);
        }

        let mut yearly_totals: BTreeMap<i32, Decimal> =
            years.iter().map(|y| (*y, Decimal::ZERO)).collect();

        for values in values_by_simulation.values() {
            let mut running = Decimal::ZERO;
            for year in &years {
                let current = values.get(year).copied().unwrap_or(Decimal::ZERO);
                if current > Decimal::ZERO {
                    running = current;
                }
                if let Some(total) = yearly_totals.get_mut(year) {
                    *total += running;
                }
            }
        }

        let label = match group_by {
            GroupBy::AccountName => LABEL_ALL_ACCOUNTS_TOTAL,
            GroupBy::Category => LABEL_ALL_CATEGORIES_TOTAL,
        };
        let data = years
            .iter()
            .map(|y| yearly_totals[y].to_f64())
            .collect::<Vec<_>>();

        let mut total = dataset(label, data, 0);
        total.fill = Some(true);
        vec![total]
    } else {
        let mut data_by_group: BTreeMap<String, HashMap<i32, Decimal>> = BTreeMap::new();
        for point in results {
            *data_by_group
                .entry(group_key(point))
                .or_default()
                .entry(point.year)
                .or_insert(Decimal::ZERO) += point.amount;
        }

        data_by_group
            .into_iter()
            .enumerate()
            .map(|(idx, (group, values))| {
                let data = years
                    .iter()
                    .map(|y| {
                        values
                            .get(y)
                            .copied()
                            .unwrap_or(Decimal::ZERO)
                            .to_f64()
                    })
                    .collect();
                dataset(&group, data, idx)
            })
            .collect()
    };

    ChartData { labels, datasets }
}

/// Chart payload comparing one simulation's projection with its observed
/// balances. Years missing from a series are emitted as gaps, not zeros.
pub fn build_comparison_chart(
    simulated: &[ConsolidatedResult],
    real: &[RealAccountData],
    show_inflation: bool,
) -> ChartData {
    let years: Vec<i32> = simulated
        .iter()
        .map(|r| r.year)
        .chain(real.iter().map(|r| r.year))
        .collect::<BTreeSet<i32>>()
        .into_iter()
        .collect();
    let labels: Vec<String> = years.iter().map(|y| y.to_string()).collect();

    let simulated_data: Vec<Option<f64>> = years
        .iter()
        .map(|year| {
            simulated
                .iter()
                .find(|r| r.year == *year)
                .and_then(|r| r.amount.to_f64())
        })
        .collect();

    let nominal_data: Vec<Option<f64>> = years
        .iter()
        .map(|year| {
            real.iter()
                .find(|r| r.year == *year)
                .and_then(|r| r.nominal_amount.to_f64())
        })
        .collect();

    let mut datasets = vec![
        dataset(LABEL_SIMULATION, simulated_data, 0),
        dataset(LABEL_REAL_NOMINAL, nominal_data, 1),
    ];

    if show_inflation {
        let adjusted_data: Vec<Option<f64>> = years
            .iter()
            .map(|year| {
                real.iter()
                    .find(|r| r.year == *year)
                    .and_then(|r| r.adjusted_amount.to_f64())
            })
            .collect();

        let mut adjusted = dataset(LABEL_REAL_ADJUSTED, adjusted_data, 3);
        adjusted.border_dash = Some(CHART_ADJUSTED_DASH.to_vec());
        datasets.push(adjusted);
    }

    ChartData { labels, datasets }
}

fn percent_of(difference: Decimal, base: Decimal) -> Decimal {
    if base.is_zero() {
        Decimal::ZERO
    } else {
        difference / base * Decimal::ONE_HUNDRED
    }
}

/// Builds the yearly-totals comparison across all of a user's accounts.
///
/// Adjusted totals are recomputed from each entry's nominal amount and
/// captured rate; the per-year inflation figure is the nominal-weighted
/// average of the captured rates.
pub fn build_summary_comparison(
    sim_results: &[ResultPoint],
    real_data: &[RealPoint],
    show_inflation: bool,
) -> SummaryComparison {
    let years: Vec<i32> = sim_results
        .iter()
        .map(|r| r.year)
        .chain(real_data.iter().map(|r| r.year))
        .collect::<BTreeSet<i32>>()
        .into_iter()
        .collect();

    if years.is_empty() {
        return SummaryComparison {
            years,
            yearly_totals: Vec::new(),
            accounts: Vec::new(),
            chart: ChartData::empty(),
        };
    }

    let yearly_totals: Vec<YearlyTotals> = years
        .iter()
        .map(|year| {
            let simulated: Decimal = sim_results
                .iter()
                .filter(|r| r.year == *year)
                .map(|r| r.amount)
                .sum();

            let year_real: Vec<&RealPoint> =
                real_data.iter().filter(|r| r.year == *year).collect();

            let real: Decimal = year_real.iter().map(|r| r.nominal_amount).sum();
            let real_adjusted: Decimal = year_real
                .iter()
                .map(|r| adjust_for_inflation(r.nominal_amount, r.inflation_rate))
                .sum();
            let inflation_rate = if real.is_zero() {
                Decimal::ZERO
            } else {
                year_real
                    .iter()
                    .map(|r| r.inflation_rate * r.nominal_amount)
                    .sum::<Decimal>()
                    / real
            };

            let difference = real - simulated;
            let difference_adjusted = real_adjusted - simulated;

            YearlyTotals {
                year: *year,
                simulated,
                real,
                real_adjusted,
                inflation_rate,
                difference,
                difference_adjusted,
                difference_percent: percent_of(difference, simulated),
                difference_percent_adjusted: percent_of(difference_adjusted, simulated),
            }
        })
        .collect();

    // One summary block per simulation, ordered by account name
    let mut simulations: BTreeMap<(String, String), String> = BTreeMap::new();
    for point in sim_results {
        simulations.insert(
            (point.account_name.clone(), point.simulation_id.clone()),
            point.category.clone(),
        );
    }
    for point in real_data {
        simulations
            .entry((point.account_name.clone(), point.simulation_id.clone()))
            .or_default();
    }

    let accounts: Vec<AccountSummary> = simulations
        .into_iter()
        .map(|((account_name, simulation_id), category)| {
            let year_rows: Vec<AccountYearComparison> = years
                .iter()
                .map(|year| {
                    let simulated = sim_results
                        .iter()
                        .find(|r| r.simulation_id == simulation_id && r.year == *year)
                        .map(|r| r.amount)
                        .unwrap_or(Decimal::ZERO);

                    let real_entry = real_data
                        .iter()
                        .find(|r| r.simulation_id == simulation_id && r.year == *year);

                    match real_entry {
                        Some(entry) => {
                            let real = entry.nominal_amount;
                            let real_adjusted =
                                adjust_for_inflation(real, entry.inflation_rate);
                            let difference = real - simulated;
                            let difference_adjusted = real_adjusted - simulated;

                            AccountYearComparison {
                                year: *year,
                                simulated,
                                has_real_data: true,
                                real,
                                real_adjusted,
                                inflation_rate: entry.inflation_rate,
                                difference,
                                difference_adjusted,
                                difference_percent: percent_of(difference, simulated),
                                difference_percent_adjusted: percent_of(
                                    difference_adjusted,
                                    simulated,
                                ),
                            }
                        }
                        None => AccountYearComparison {
                            year: *year,
                            simulated,
                            has_real_data: false,
                            real: Decimal::ZERO,
                            real_adjusted: Decimal::ZERO,
                            inflation_rate: Decimal::ZERO,
                            difference: Decimal::ZERO,
                            difference_adjusted: Decimal::ZERO,
                            difference_percent: Decimal::ZERO,
                            difference_percent_adjusted: Decimal::ZERO,
                        },
                    }
                })
                .collect();

            AccountSummary {
                account_name,
                category,
                years: year_rows,
            }
        })
        .collect();

    let labels: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    let mut datasets = vec![
        dataset(
            LABEL_TOTAL_SIMULATED,
            yearly_totals.iter().map(|t| t.simulated.to_f64()).collect(),
            0,
        ),
        dataset(
            LABEL_TOTAL_REAL,
            yearly_totals.iter().map(|t| t.real.to_f64()).collect(),
            1,
        ),
    ];
    if show_inflation {
        let mut adjusted = dataset(
            LABEL_TOTAL_REAL_ADJUSTED,
            yearly_totals
                .iter()
                .map(|t| t.real_adjusted.to_f64())
                .collect(),
            3,
        );
        adjusted.border_dash = Some(CHART_ADJUSTED_DASH.to_vec());
        datasets.push(adjusted);
    }

    SummaryComparison {
        years,
        yearly_totals,
        accounts,
        chart: ChartData { labels, datasets },
    }
}
