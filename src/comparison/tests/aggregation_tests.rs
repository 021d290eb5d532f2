use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::comparison::{build_chart_data, ChartData, GroupBy, ResultPoint};

fn point(sim: &str, account: &str, category: &str, year: i32, amount: Decimal) -> ResultPoint {
    ResultPoint {
        simulation_id: sim.to_string(),
        account_name: account.to_string(),
        category: category.to_string(),
        year,
        amount,
    }
}

#[test]
fn empty_input_yields_empty_chart() {
    assert_eq!(
        build_chart_data(&[], GroupBy::Category, false),
        ChartData::empty()
    );
}

#[test]
fn labels_are_the_sorted_deduplicated_years() {
    let rows = vec![
        point("a", "Livret", "Courant", 2026, dec!(1)),
        point("b", "PEA", "Courant", 2024, dec!(1)),
        point("a", "Livret", "Courant", 2024, dec!(1)),
    ];

    let chart = build_chart_data(&rows, GroupBy::Category, false);
    assert_eq!(chart.labels, vec!["2024".to_string(), "2026".to_string()]);
}

#[test]
fn non_cumulative_sums_rows_per_group_and_year() {
    let rows = vec![
        point("a", "Livret", "Courant", 2024, dec!(100)),
        point("b", "PEA", "Epargne Financière", 2024, dec!(50)),
        point("c", "Livret B", "Courant", 2024, dec!(25)),
    ];

    let chart = build_chart_data(&rows, GroupBy::Category, false);

    assert_eq!(chart.datasets.len(), 2);
    // Groups come out sorted by name
    assert_eq!(chart.datasets[0].label, "Courant");
    assert_eq!(chart.datasets[0].data, vec![Some(125.0)]);
    assert_eq!(chart.datasets[1].label, "Epargne Financière");
    assert_eq!(chart.datasets[1].data, vec![Some(50.0)]);
}

#[test]
fn grouping_by_account_name_keeps_accounts_separate() {
    let rows = vec![
        point("a", "Livret", "Courant", 2024, dec!(100)),
        point("b", "PEA", "Courant", 2024, dec!(50)),
    ];

    let chart = build_chart_data(&rows, GroupBy::AccountName, false);

    let labels: Vec<&str> = chart.datasets.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["Livret", "PEA"]);
}

#[test]
fn cumulative_carries_the_last_value_into_missing_years() {
    // Simulation "a" has no 2025 row; its 2024 balance must carry over.
    let rows = vec![
        point("a", "Livret", "Courant", 2024, dec!(100)),
        point("a", "Livret", "Courant", 2026, dec!(300)),
        point("b", "PEA", "Courant", 2024, dec!(10)),
        point("b", "PEA", "Courant", 2025, dec!(20)),
        point("b", "PEA", "Courant", 2026, dec!(30)),
    ];

    let chart = build_chart_data(&rows, GroupBy::AccountName, true);

    assert_eq!(chart.datasets.len(), 1);
    assert_eq!(chart.datasets[0].label, "Total tous comptes");
    assert_eq!(
        chart.datasets[0].data,
        vec![Some(110.0), Some(120.0), Some(330.0)]
    );
}

#[test]
fn cumulative_dataset_is_filled_and_uses_the_first_color() {
    let rows = vec![point("a", "Livret", "Courant", 2024, dec!(1))];

    let chart = build_chart_data(&rows, GroupBy::Category, true);

    assert_eq!(chart.datasets[0].fill, Some(true));
    assert_eq!(chart.datasets[0].border_color, "rgb(54, 162, 235)");
    assert_eq!(chart.datasets[0].label, "Total toutes catégories");
}

#[test]
fn colors_cycle_when_there_are_more_groups_than_palette_entries() {
    let rows: Vec<ResultPoint> = (0..7)
        .map(|i| {
            point(
                &format!("sim{}", i),
                &format!("Compte {}", i),
                "Courant",
                2024,
                dec!(1),
            )
        })
        .collect();

    let chart = build_chart_data(&rows, GroupBy::AccountName, false);

    assert_eq!(chart.datasets.len(), 7);
    assert_eq!(
        chart.datasets[6].border_color,
        chart.datasets[0].border_color
    );
}
