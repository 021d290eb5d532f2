use async_trait::async_trait;

use super::market_data_errors::MarketDataError;
use super::market_data_model::StockQuote;

/// External source of market quotes.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn get_quote(&self, symbol: &str) -> Result<StockQuote, MarketDataError>;
}
