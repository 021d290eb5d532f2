use chrono::{Duration, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::stocks_constants::{ASSET_TYPES, ASSET_TYPE_ETF, ASSET_TYPE_STOCK};
use super::stocks_errors::{Result, StockError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetType {
    Stock,
    Etf,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => ASSET_TYPE_STOCK,
            AssetType::Etf => ASSET_TYPE_ETF,
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            ASSET_TYPE_STOCK => Ok(AssetType::Stock),
            ASSET_TYPE_ETF => Ok(AssetType::Etf),
            other => Err(StockError::InvalidData(format!(
                "Unknown asset type '{}'",
                other
            ))),
        }
    }
}

/// Domain model for a tradable instrument with its market snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub asset_type: String,
    pub description: Option<String>,
    pub sector: Option<String>,
    pub currency: String,
    pub current_price: Option<Decimal>,
    pub price_change: Option<Decimal>,
    pub price_change_percent: Option<Decimal>,
    pub volume: Option<i64>,
    pub last_update: Option<NaiveDateTime>,
}

impl Stock {
    /// Whether the market snapshot is stale enough to refresh
    pub fn needs_update(&self, now: NaiveDateTime, max_age: Duration) -> bool {
        match self.last_update {
            Some(last) => now - last > max_age,
            None => true,
        }
    }

    /// Current price with currency, or "N/A" when no quote has arrived yet
    pub fn market_value(&self) -> String {
        match self.current_price {
            Some(price) => format!("{} {}", price, self.currency),
            None => "N/A".to_string(),
        }
    }

    /// Signed price change with currency
    pub fn price_change_formatted(&self) -> String {
        match self.price_change {
            Some(change) => {
                let sign = if change >= Decimal::ZERO { "+" } else { "" };
                format!("{}{} {}", sign, change, self.currency)
            }
            None => "N/A".to_string(),
        }
    }

    /// Signed price change percentage
    pub fn price_change_percent_formatted(&self) -> String {
        match self.price_change_percent {
            Some(percent) => {
                let sign = if percent >= Decimal::ZERO { "+" } else { "" };
                format!("{}{}%", sign, percent)
            }
            None => "N/A".to_string(),
        }
    }
}

/// Input model for registering a new instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStock {
    pub symbol: String,
    pub name: String,
    pub asset_type: String,
    pub description: Option<String>,
    pub sector: Option<String>,
    pub currency: String,
}

impl NewStock {
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(StockError::InvalidData(
                "Symbol cannot be empty".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(StockError::InvalidData("Name cannot be empty".to_string()));
        }
        if !ASSET_TYPES.contains(&self.asset_type.as_str()) {
            return Err(StockError::InvalidData(format!(
                "Unknown asset type '{}'",
                self.asset_type
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(StockError::InvalidData(
                "Currency cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Database model for stocks
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::stocks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StockDB {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub asset_type: String,
    pub description: Option<String>,
    pub sector: Option<String>,
    pub currency: String,
    pub current_price: Option<f64>,
    pub price_change: Option<f64>,
    pub price_change_percent: Option<f64>,
    pub volume: Option<i64>,
    pub last_update: Option<NaiveDateTime>,
}

impl From<StockDB> for Stock {
    fn from(db: StockDB) -> Self {
        Self {
            id: db.id,
            symbol: db.symbol,
            name: db.name,
            asset_type: db.asset_type,
            description: db.description,
            sector: db.sector,
            currency: db.currency,
            current_price: db.current_price.and_then(Decimal::from_f64_retain),
            price_change: db.price_change.and_then(Decimal::from_f64_retain),
            price_change_percent: db.price_change_percent.and_then(Decimal::from_f64_retain),
            volume: db.volume,
            last_update: db.last_update,
        }
    }
}

impl From<NewStock> for StockDB {
    fn from(domain: NewStock) -> Self {
        Self {
            id: String::new(),
            symbol: domain.symbol.trim().to_uppercase(),
            name: domain.name,
            asset_type: domain.asset_type,
            description: domain.description,
            sector: domain.sector,
            currency: domain.currency,
            current_price: None,
            price_change: None,
            price_change_percent: None,
            volume: None,
            last_update: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stock_with_snapshot() -> Stock {
        Stock {
            id: "s1".to_string(),
            symbol: "CW8".to_string(),
            name: "Amundi MSCI World".to_string(),
            asset_type: ASSET_TYPE_ETF.to_string(),
            description: None,
            sector: None,
            currency: "EUR".to_string(),
            current_price: Some(dec!(450.10)),
            price_change: Some(dec!(-1.20)),
            price_change_percent: Some(dec!(-0.27)),
            volume: Some(12_000),
            last_update: None,
        }
    }

    #[test]
    fn a_never_updated_stock_needs_an_update() {
        let stock = stock_with_snapshot();
        assert!(stock.needs_update(chrono::Utc::now().naive_utc(), Duration::minutes(15)));
    }

    #[test]
    fn staleness_is_measured_against_the_max_age() {
        let now = chrono::Utc::now().naive_utc();
        let mut stock = stock_with_snapshot();

        stock.last_update = Some(now - Duration::minutes(10));
        assert!(!stock.needs_update(now, Duration::minutes(15)));

        stock.last_update = Some(now - Duration::minutes(16));
        assert!(stock.needs_update(now, Duration::minutes(15)));
    }

    #[test]
    fn formatted_values_carry_sign_and_currency() {
        let stock = stock_with_snapshot();
        assert_eq!(stock.market_value(), "450.10 EUR");
        assert_eq!(stock.price_change_formatted(), "-1.20 EUR");
        assert_eq!(stock.price_change_percent_formatted(), "-0.27%");
    }

    #[test]
    fn missing_snapshot_formats_as_not_available() {
        let mut stock = stock_with_snapshot();
        stock.current_price = None;
        stock.price_change = None;
        stock.price_change_percent = None;

        assert_eq!(stock.market_value(), "N/A");
        assert_eq!(stock.price_change_formatted(), "N/A");
        assert_eq!(stock.price_change_percent_formatted(), "N/A");
    }

    #[test]
    fn unknown_asset_type_is_rejected() {
        let input = NewStock {
            symbol: "CW8".to_string(),
            name: "Amundi MSCI World".to_string(),
            asset_type: "BOND".to_string(),
            description: None,
            sector: None,
            currency: "EUR".to_string(),
        };
        assert!(matches!(input.validate(), Err(StockError::InvalidData(_))));
    }
}
