use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::simulations::projection::{project_series, ProjectionParameters};
use crate::simulations::SimulationError;

fn params(
    initial: Decimal,
    rate: Decimal,
    period: i32,
    start: i32,
    contribution: Decimal,
) -> ProjectionParameters {
    ProjectionParameters {
        initial_amount: initial,
        return_rate: rate,
        period_years: period,
        start_year: start,
        annual_contribution: contribution,
    }
}

#[test]
fn series_has_period_plus_one_points_and_starts_with_initial() {
    let series = project_series(&params(dec!(5000), dec!(3), 10, 2024, dec!(0)));

    assert_eq!(series.len(), 11);
    assert_eq!(series[0].year, 2024);
    assert_eq!(series[0].amount, dec!(5000));
    assert_eq!(series.last().unwrap().year, 2034);
}

#[test]
fn growth_is_applied_before_the_contribution() {
    // 1000 * 1.10 + 500 = 1600, not (1000 + 500) * 1.10
    let series = project_series(&params(dec!(1000), dec!(10), 1, 2024, dec!(500)));

    assert_eq!(series[1].amount, dec!(1600.0));
}

#[test]
fn each_point_satisfies_the_recurrence() {
    let p = params(dec!(2500), dec!(4.5), 8, 2023, dec!(300));
    let series = project_series(&p);
    let growth = Decimal::ONE + p.return_rate / Decimal::ONE_HUNDRED;

    for window in series.windows(2) {
        assert_eq!(window[1].amount, window[0].amount * growth + p.annual_contribution);
        assert_eq!(window[1].year, window[0].year + 1);
    }
}

#[test]
fn reference_series_matches_expected_values() {
    let series = project_series(&params(dec!(10000), dec!(5), 3, 2024, dec!(1000)));

    let expected = [
        (2024, dec!(10000)),
        (2025, dec!(11500.00)),
        (2026, dec!(13075.0000)),
        (2027, dec!(14728.750000)),
    ];
    for (point, (year, amount)) in series.iter().zip(expected) {
        assert_eq!(point.year, year);
        assert_eq!(point.amount, amount);
    }
}

#[test]
fn negative_rate_shrinks_the_balance() {
    let series = project_series(&params(dec!(1000), dec!(-50), 2, 2024, dec!(0)));

    assert_eq!(series[1].amount, dec!(500.0));
    assert_eq!(series[2].amount, dec!(250.00));
}

#[test]
fn projection_is_deterministic() {
    let p = params(dec!(12345.67), dec!(7.2), 30, 2022, dec!(250.5));

    assert_eq!(project_series(&p), project_series(&p));
}

#[test]
fn rate_outside_bounds_is_rejected() {
    let p = params(dec!(1000), dec!(101), 5, 2024, dec!(0));

    assert!(matches!(
        p.validate(2024),
        Err(SimulationError::InvalidParameters(_))
    ));
}

#[test]
fn period_outside_bounds_is_rejected() {
    for period in [0, 51] {
        let p = params(dec!(1000), dec!(5), period, 2024, dec!(0));
        assert!(matches!(
            p.validate(2024),
            Err(SimulationError::InvalidParameters(_))
        ));
    }
}

#[test]
fn start_year_window_is_anchored_to_the_current_year() {
    let ok = params(dec!(1000), dec!(5), 5, 2021, dec!(0));
    assert!(ok.validate(2026).is_ok());

    let too_old = params(dec!(1000), dec!(5), 5, 2020, dec!(0));
    assert!(too_old.validate(2026).is_err());

    let next_year = params(dec!(1000), dec!(5), 5, 2027, dec!(0));
    assert!(next_year.validate(2026).is_ok());

    let too_far = params(dec!(1000), dec!(5), 5, 2028, dec!(0));
    assert!(too_far.validate(2026).is_err());
}

#[test]
fn negative_amounts_are_rejected() {
    let p = params(dec!(-1), dec!(5), 5, 2024, dec!(0));
    assert!(p.validate(2024).is_err());

    let p = params(dec!(1000), dec!(5), 5, 2024, dec!(-10));
    assert!(p.validate(2024).is_err());
}
