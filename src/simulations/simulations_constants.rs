/// The single currency the projection engine currently supports.
pub const CURRENCY_EUR: &str = "EUR";

pub const SUPPORTED_CURRENCIES: [&str; 1] = [CURRENCY_EUR];

/// Projection period bounds, in years.
pub const MIN_PERIOD_YEARS: i32 = 1;
pub const MAX_PERIOD_YEARS: i32 = 50;

/// Start-year window relative to the current year.
pub const START_YEAR_PAST_WINDOW: i32 = 5;
pub const START_YEAR_FUTURE_WINDOW: i32 = 1;

/// Annual return rate bounds, in percent.
pub const MIN_RETURN_RATE: i64 = -100;
pub const MAX_RETURN_RATE: i64 = 100;
