/// Transaction types
///
/// Purchase of an instrument. Increases quantity and perturbs the
/// weighted-average cost.
pub const TRANSACTION_TYPE_BUY: &str = "BUY";

/// Disposal of an instrument. Decreases quantity; the average cost is
/// untouched.
pub const TRANSACTION_TYPE_SELL: &str = "SELL";

pub const TRANSACTION_TYPES: [&str; 2] = [TRANSACTION_TYPE_BUY, TRANSACTION_TYPE_SELL];
