use log::info;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::inflation_model::{AnnualInflationRate, NewInflationRate};
use super::inflation_traits::{InflationRateRepositoryTrait, InflationRateServiceTrait};
use crate::comparison::{ChartData, ChartDataset, CHART_BORDER_WIDTH, CHART_COLORS};
use crate::errors::Result;

/// Chart payload for the rate history, most recent year first.
pub fn rate_history_chart(rates: &[AnnualInflationRate]) -> ChartData {
    let (border, background) = CHART_COLORS[3];
    ChartData {
        labels: rates.iter().map(|r| r.year.to_string()).collect(),
        datasets: vec![ChartDataset {
            label: "Taux d'inflation (%)".to_string(),
            data: rates.iter().map(|r| r.rate.to_f64()).collect(),
            background_color: background.to_string(),
            border_color: border.to_string(),
            border_width: CHART_BORDER_WIDTH,
            fill: None,
            border_dash: None,
        }],
    }
}

/// Service managing the global year -> inflation rate table.
pub struct InflationRateService {
    repository: Arc<dyn InflationRateRepositoryTrait>,
}

impl InflationRateService {
    pub fn new(repository: Arc<dyn InflationRateRepositoryTrait>) -> Self {
        InflationRateService { repository }
    }
}

impl InflationRateServiceTrait for InflationRateService {
    fn get_rates(&self) -> Result<Vec<AnnualInflationRate>> {
        self.repository.get_rates()
    }

    fn get_rate(&self, year: i32) -> Result<Option<Decimal>> {
        Ok(self.repository.get_rate_for_year(year)?.map(|r| r.rate))
    }

    fn upsert_rate(&self, rate: NewInflationRate) -> Result<AnnualInflationRate> {
        let saved = self.repository.upsert_rate(rate)?;
        info!("Saved inflation rate {}% for {}", saved.rate, saved.year);
        Ok(saved)
    }

    fn delete_rate(&self, year: i32) -> Result<()> {
        self.repository.delete_rate(year)?;
        info!("Deleted inflation rate for {}", year);
        Ok(())
    }
}
