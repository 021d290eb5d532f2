use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::portfolio::{Position, PositionDetail};
use crate::stocks::{Stock, ASSET_TYPE_ETF};

fn position(quantity: Decimal, average_price: Decimal) -> Position {
    Position {
        id: "p1".to_string(),
        portfolio_id: "pf1".to_string(),
        stock_id: "s1".to_string(),
        quantity,
        average_price,
        opened_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        notes: None,
    }
}

fn stock(current_price: Option<Decimal>) -> Stock {
    Stock {
        id: "s1".to_string(),
        symbol: "CW8".to_string(),
        name: "Amundi MSCI World".to_string(),
        asset_type: ASSET_TYPE_ETF.to_string(),
        description: None,
        sector: None,
        currency: "EUR".to_string(),
        current_price,
        price_change: None,
        price_change_percent: None,
        volume: None,
        last_update: None,
    }
}

#[test]
fn valuation_derives_from_quantity_and_quote() {
    let detail = PositionDetail {
        position: position(dec!(10), dec!(100)),
        stock: stock(Some(dec!(120))),
    };

    assert_eq!(detail.position.total_cost(), dec!(1000));
    assert_eq!(detail.current_value(), Some(dec!(1200)));
    assert_eq!(detail.gain_loss(), Some(dec!(200)));
    assert_eq!(detail.gain_loss_percent(), Some(dec!(20)));
}

#[test]
fn valuation_propagates_a_missing_quote() {
    let detail = PositionDetail {
        position: position(dec!(10), dec!(100)),
        stock: stock(None),
    };

    assert_eq!(detail.current_value(), None);
    assert_eq!(detail.gain_loss(), None);
    assert_eq!(detail.gain_loss_percent(), None);
}

#[test]
fn zero_cost_basis_yields_zero_percent_not_a_division_error() {
    let detail = PositionDetail {
        position: position(dec!(10), dec!(0)),
        stock: stock(Some(dec!(50))),
    };

    assert_eq!(detail.gain_loss(), Some(dec!(500)));
    assert_eq!(detail.gain_loss_percent(), Some(Decimal::ZERO));
}

#[test]
fn a_losing_position_reports_a_negative_gain() {
    let detail = PositionDetail {
        position: position(dec!(4), dec!(250)),
        stock: stock(Some(dec!(200))),
    };

    assert_eq!(detail.gain_loss(), Some(dec!(-200)));
    assert_eq!(detail.gain_loss_percent(), Some(dec!(-20)));
}
