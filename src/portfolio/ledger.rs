use rust_decimal::Decimal;

use super::portfolio_errors::{PortfolioError, Result};

/// Running state of one (portfolio, instrument) pair.
///
/// A pair either has no state at all or holds a strictly positive
/// quantity; a quantity that reaches zero removes the state instead of
/// keeping an empty row around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionState {
    pub quantity: Decimal,
    pub average_price: Decimal,
}

/// Applies a purchase to a position.
///
/// An absent position opens at the transaction price; a held one blends
/// it into the weighted-average cost.
pub fn apply_buy(
    position: Option<&PositionState>,
    quantity: Decimal,
    price: Decimal,
) -> PositionState {
    match position {
        None => PositionState {
            quantity,
            average_price: price,
        },
        Some(held) => {
            let total_cost = held.quantity * held.average_price + quantity * price;
            let new_quantity = held.quantity + quantity;
            PositionState {
                quantity: new_quantity,
                average_price: total_cost / new_quantity,
            }
        }
    }
}

/// Applies a sale to a position.
///
/// Short positions are not supported: selling more than is held fails
/// without touching the state. The average cost only ever moves on buys.
pub fn apply_sell(
    position: Option<&PositionState>,
    quantity: Decimal,
) -> Result<Option<PositionState>> {
    let held = match position {
        Some(held) => held,
        None => {
            return Err(PortfolioError::InsufficientQuantity(
                "Cannot sell an instrument that is not held".to_string(),
            ))
        }
    };

    if quantity > held.quantity {
        return Err(PortfolioError::InsufficientQuantity(format!(
            "Sell quantity {} exceeds held quantity {}",
            quantity, held.quantity
        )));
    }

    let remaining = held.quantity - quantity;
    if remaining.is_zero() {
        return Ok(None);
    }

    Ok(Some(PositionState {
        quantity: remaining,
        average_price: held.average_price,
    }))
}

/// Backs a purchase out of a position (transaction deletion).
///
/// The specific transaction's weighted contribution is subtracted from
/// the average cost. Removing more than is held is refused.
pub fn reverse_buy(
    position: &PositionState,
    quantity: Decimal,
    price: Decimal,
) -> Result<Option<PositionState>> {
    let remaining = position.quantity - quantity;
    if remaining < Decimal::ZERO {
        return Err(PortfolioError::NegativeQuantity(
            "Removing this transaction would make the position quantity negative".to_string(),
        ));
    }

    if remaining.is_zero() {
        return Ok(None);
    }

    let total_cost = position.quantity * position.average_price - quantity * price;
    Ok(Some(PositionState {
        quantity: remaining,
        average_price: total_cost / remaining,
    }))
}

/// Backs a sale out of a position (transaction deletion).
///
/// The quantity comes back; the average cost stays where it is. The
/// pre-sale average is not reconstructible because sales never recorded
/// one. A known approximation, kept rather than replaced with invented
/// lot accounting.
pub fn reverse_sell(position: &PositionState, quantity: Decimal) -> PositionState {
    PositionState {
        quantity: position.quantity + quantity,
        average_price: position.average_price,
    }
}
