use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::portfolio::ledger::{
    apply_buy, apply_sell, reverse_buy, reverse_sell, PositionState,
};
use crate::portfolio::PortfolioError;

fn held(quantity: Decimal, average_price: Decimal) -> PositionState {
    PositionState {
        quantity,
        average_price,
    }
}

mod buy_tests {
    use super::*;

    #[test]
    fn first_buy_opens_the_position_at_the_transaction_price() {
        let state = apply_buy(None, dec!(10), dec!(100));

        assert_eq!(state.quantity, dec!(10));
        assert_eq!(state.average_price, dec!(100));
    }

    #[test]
    fn second_buy_blends_into_the_weighted_average() {
        let state = apply_buy(None, dec!(10), dec!(100));
        let state = apply_buy(Some(&state), dec!(10), dec!(200));

        assert_eq!(state.quantity, dec!(20));
        assert_eq!(state.average_price, dec!(150));
    }

    #[test]
    fn uneven_buys_weight_by_quantity() {
        let state = apply_buy(None, dec!(30), dec!(10));
        let state = apply_buy(Some(&state), dec!(10), dec!(30));

        // (30*10 + 10*30) / 40 = 15
        assert_eq!(state.quantity, dec!(40));
        assert_eq!(state.average_price, dec!(15));
    }
}

mod sell_tests {
    use super::*;

    #[test]
    fn selling_part_of_a_position_keeps_the_average_price() {
        let state = held(dec!(20), dec!(150));

        let state = apply_sell(Some(&state), dec!(5)).unwrap().unwrap();

        assert_eq!(state.quantity, dec!(15));
        assert_eq!(state.average_price, dec!(150));
    }

    #[test]
    fn selling_everything_removes_the_position() {
        let state = held(dec!(20), dec!(150));

        assert_eq!(apply_sell(Some(&state), dec!(20)).unwrap(), None);
    }

    #[test]
    fn selling_more_than_held_is_rejected_without_mutation() {
        let state = held(dec!(10), dec!(100));

        let result = apply_sell(Some(&state), dec!(11));

        assert!(matches!(
            result,
            Err(PortfolioError::InsufficientQuantity(_))
        ));
        // The input state is untouched
        assert_eq!(state, held(dec!(10), dec!(100)));
    }

    #[test]
    fn selling_without_a_position_is_rejected() {
        assert!(matches!(
            apply_sell(None, dec!(1)),
            Err(PortfolioError::InsufficientQuantity(_))
        ));
    }
}

mod reversal_tests {
    use super::*;

    #[test]
    fn reversing_a_buy_subtracts_its_weighted_contribution() {
        // BUY(10, 100) then BUY(10, 200) -> 20 @ 150
        let state = apply_buy(None, dec!(10), dec!(100));
        let state = apply_buy(Some(&state), dec!(10), dec!(200));

        // Deleting the first buy leaves the second one alone: 10 @ 200
        let state = reverse_buy(&state, dec!(10), dec!(100)).unwrap().unwrap();

        assert_eq!(state.quantity, dec!(10));
        assert_eq!(state.average_price, dec!(200));
    }

    #[test]
    fn reversing_the_only_buy_removes_the_position() {
        let state = apply_buy(None, dec!(10), dec!(100));

        assert_eq!(reverse_buy(&state, dec!(10), dec!(100)).unwrap(), None);
    }

    #[test]
    fn reversing_a_buy_cannot_drive_the_quantity_negative() {
        // 20 bought, 15 sold: only 5 remain, deleting a 10-share buy
        // must fail.
        let state = apply_buy(None, dec!(10), dec!(100));
        let state = apply_buy(Some(&state), dec!(10), dec!(200));
        let state = apply_sell(Some(&state), dec!(15)).unwrap().unwrap();

        let result = reverse_buy(&state, dec!(10), dec!(100));

        assert!(matches!(result, Err(PortfolioError::NegativeQuantity(_))));
    }

    #[test]
    fn reversing_a_sell_restores_the_quantity_only() {
        let state = held(dec!(15), dec!(150));

        let state = reverse_sell(&state, dec!(5));

        assert_eq!(state.quantity, dec!(20));
        // The pre-sale average is not reconstructible; the current one
        // is kept.
        assert_eq!(state.average_price, dec!(150));
    }
}

mod replay_tests {
    use super::*;

    #[test]
    fn apply_then_reverse_is_an_identity() {
        let initial = apply_buy(None, dec!(12), dec!(80));

        let bought = apply_buy(Some(&initial), dec!(8), dec!(120));
        let reversed = reverse_buy(&bought, dec!(8), dec!(120)).unwrap().unwrap();
        assert_eq!(reversed, initial);

        let sold = apply_sell(Some(&initial), dec!(5)).unwrap().unwrap();
        let restored = reverse_sell(&sold, dec!(5));
        assert_eq!(restored, initial);
    }

    #[test]
    fn a_transaction_sequence_replays_to_the_expected_state() {
        let state = apply_buy(None, dec!(10), dec!(100));
        let state = apply_buy(Some(&state), dec!(10), dec!(200));
        let state = apply_sell(Some(&state), dec!(5)).unwrap().unwrap();

        assert_eq!(state.quantity, dec!(15));
        assert_eq!(state.average_price, dec!(150));
    }
}
