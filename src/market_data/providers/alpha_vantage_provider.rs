use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use crate::market_data::market_data_errors::MarketDataError;
use crate::market_data::market_data_model::StockQuote;
use crate::market_data::market_data_provider::MarketDataProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";

pub struct AlphaVantageProvider {
    client: Client,
    token: String,
}

impl AlphaVantageProvider {
    pub fn new(token: String) -> Self {
        let client = Client::new();
        AlphaVantageProvider { client, token }
    }

    async fn fetch_data(
        &self,
        function: &str,
        params: Vec<(&str, &str)>,
    ) -> Result<String, MarketDataError> {
        let mut query_params = params;
        query_params.push(("function", function));
        query_params.push(("apikey", &self.token));

        let url = reqwest::Url::parse_with_params(BASE_URL, &query_params)
            .map_err(|e| MarketDataError::ProviderError(format!("Failed to build URL: {}", e)))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError(e.to_string()))?;

        if !response.status().is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MarketDataError::ProviderError(format!(
                "AlphaVantage API error: {}",
                error_body
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError(e.to_string()))?;
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct AlphaVantageGlobalQuote {
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "06. volume")]
    volume: String,
    #[serde(rename = "07. latest trading day")]
    latest_trading_day: String,
    #[serde(rename = "09. change")]
    change: String,
    #[serde(rename = "10. change percent")]
    change_percent: String,
}

#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    // Unknown symbols come back as 200 with an empty "Global Quote" object
    #[serde(rename = "Global Quote", default)]
    global_quote: Option<serde_json::Value>,
}

impl GlobalQuoteResponse {
    fn into_global_quote(self) -> Option<AlphaVantageGlobalQuote> {
        self.global_quote
            .filter(|v| v.as_object().is_some_and(|o| !o.is_empty()))
            .and_then(|v| serde_json::from_value(v).ok())
    }
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, MarketDataError> {
    Decimal::from_str(value.trim())
        .map_err(|e| MarketDataError::ParsingError(format!("Invalid {} '{}': {}", field, value, e)))
}

impl AlphaVantageGlobalQuote {
    fn into_quote(self) -> Result<StockQuote, MarketDataError> {
        let change_percent = self.change_percent.trim().trim_end_matches('%');

        Ok(StockQuote {
            price: parse_decimal("price", &self.price)?,
            change: parse_decimal("change", &self.change)?,
            change_percent: parse_decimal("change percent", change_percent)?,
            volume: self.volume.trim().parse::<i64>().map_err(|e| {
                MarketDataError::ParsingError(format!("Invalid volume '{}': {}", self.volume, e))
            })?,
            latest_trading_day: NaiveDate::parse_from_str(&self.latest_trading_day, "%Y-%m-%d")
                .map_err(|_| {
                    MarketDataError::ParsingError(format!(
                        "Invalid trading day '{}'",
                        self.latest_trading_day
                    ))
                })?,
        })
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    async fn get_quote(&self, symbol: &str) -> Result<StockQuote, MarketDataError> {
        let params = vec![("symbol", symbol)];
        let response_text = self.fetch_data("GLOBAL_QUOTE", params).await?;

        let response: GlobalQuoteResponse = serde_json::from_str(&response_text)
            .map_err(|e| MarketDataError::ParsingError(format!("Failed to parse quote: {}", e)))?;

        let quote = response.into_global_quote().ok_or_else(|| {
            MarketDataError::NotFound(format!("No quote returned for {}", symbol))
        })?;

        quote.into_quote()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn global_quote_payload_is_parsed() {
        let payload = r#"{
            "Global Quote": {
                "01. symbol": "CW8.PA",
                "02. open": "449.00",
                "03. high": "451.30",
                "04. low": "448.10",
                "05. price": "450.10",
                "06. volume": "12034",
                "07. latest trading day": "2025-03-07",
                "08. previous close": "451.30",
                "09. change": "-1.20",
                "10. change percent": "-0.2659%"
            }
        }"#;

        let response: GlobalQuoteResponse = serde_json::from_str(payload).unwrap();
        let quote = response.into_global_quote().unwrap().into_quote().unwrap();

        assert_eq!(quote.price, dec!(450.10));
        assert_eq!(quote.change, dec!(-1.20));
        assert_eq!(quote.change_percent, dec!(-0.2659));
        assert_eq!(quote.volume, 12034);
        assert_eq!(
            quote.latest_trading_day,
            NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
        );
    }

    #[test]
    fn empty_payload_maps_to_not_found() {
        let response: GlobalQuoteResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_global_quote().is_none());

        let response: GlobalQuoteResponse =
            serde_json::from_str(r#"{"Global Quote": {}}"#).unwrap();
        assert!(response.into_global_quote().is_none());
    }

    #[test]
    fn malformed_numbers_are_reported() {
        let quote = AlphaVantageGlobalQuote {
            price: "abc".to_string(),
            volume: "1".to_string(),
            latest_trading_day: "2025-03-07".to_string(),
            change: "0".to_string(),
            change_percent: "0%".to_string(),
        };
        assert!(matches!(
            quote.into_quote(),
            Err(MarketDataError::ParsingError(_))
        ));
    }
}
