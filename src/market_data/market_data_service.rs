use chrono::Duration;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;

use super::market_data_constants::QUOTE_MAX_AGE_MINUTES;
use super::market_data_errors::MarketDataError;
use super::market_data_provider::MarketDataProvider;
use crate::errors::Result;
use crate::stocks::{Stock, StockRepository};

/// Refreshes stored market snapshots from an external quote source.
///
/// Refreshing is best effort and runs outside every database transaction:
/// a stale price is acceptable, a torn position update is not. Failures
/// keep the previous snapshot.
pub struct MarketDataService {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    provider: Arc<dyn MarketDataProvider>,
}

impl MarketDataService {
    pub fn new(
        pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
        provider: Arc<dyn MarketDataProvider>,
    ) -> Self {
        Self { pool, provider }
    }

    fn repository(&self) -> StockRepository {
        StockRepository::new(self.pool.clone())
    }

    /// Refreshes one instrument's snapshot when it is stale.
    ///
    /// Returns `false` when the stored snapshot is still fresh.
    pub async fn refresh_stock(&self, stock: &Stock) -> Result<bool> {
        let now = chrono::Utc::now().naive_utc();
        if !stock.needs_update(now, Duration::minutes(QUOTE_MAX_AGE_MINUTES)) {
            debug!("Quote for {} is fresh, skipping refresh", stock.symbol);
            return Ok(false);
        }

        let quote = self
            .provider
            .get_quote(&stock.symbol)
            .await
            .map_err(crate::errors::Error::MarketData)?;

        self.repository()
            .save_quote(&stock.id, &quote, now)
            .map_err(|e| crate::errors::Error::MarketData(MarketDataError::DatabaseError(e.to_string())))?;

        debug!("Refreshed quote for {}: {}", stock.symbol, quote.price);
        Ok(true)
    }

    /// Refreshes every stale instrument, returning how many were updated.
    ///
    /// A failed symbol keeps its previous snapshot and does not stop the
    /// run; duplicate symbols are refreshed at most once per call.
    pub async fn refresh_all(&self) -> Result<usize> {
        let stocks = self
            .repository()
            .list()
            .map_err(|e| crate::errors::Error::MarketData(MarketDataError::DatabaseError(e.to_string())))?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut updated = 0;

        for stock in stocks {
            if !seen.insert(stock.symbol.clone()) {
                continue;
            }

            match self.refresh_stock(&stock).await {
                Ok(true) => {
                    updated += 1;
                    info!("Updated market data for {}", stock.symbol);
                }
                Ok(false) => {}
                Err(e) => {
                    warn!("Failed to update market data for {}: {}", stock.symbol, e);
                }
            }
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::market_data_model::StockQuote;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    struct CannedProvider;

    #[async_trait]
    impl MarketDataProvider for CannedProvider {
        async fn get_quote(&self, symbol: &str) -> std::result::Result<StockQuote, MarketDataError> {
            if symbol == "KNOWN" {
                Ok(StockQuote {
                    price: dec!(101.5),
                    change: dec!(1.5),
                    change_percent: dec!(1.5),
                    volume: 42,
                    latest_trading_day: NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
                })
            } else {
                Err(MarketDataError::NotFound(format!(
                    "No quote returned for {}",
                    symbol
                )))
            }
        }
    }

    #[tokio::test]
    async fn a_provider_answers_through_the_trait_object() {
        let provider: Arc<dyn MarketDataProvider> = Arc::new(CannedProvider);

        let quote = provider.get_quote("KNOWN").await.unwrap();
        assert_eq!(quote.price, dec!(101.5));
    }

    #[tokio::test]
    async fn an_unknown_symbol_is_a_not_found_error() {
        let provider: Arc<dyn MarketDataProvider> = Arc::new(CannedProvider);

        let err = provider.get_quote("UNKNOWN").await.unwrap_err();
        assert!(matches!(err, MarketDataError::NotFound(_)));
    }
}
