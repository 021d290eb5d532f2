/// A quote younger than this is served from the stored snapshot.
pub const QUOTE_MAX_AGE_MINUTES: i64 = 15;
