//! CoinGecko market listings and price history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::http::HttpClient;
use crate::SearchSource;

/// Number of coins listed per market page.
pub const MARKET_PAGE_SIZE: u32 = 100;

/// Days of price history fetched for a chart.
pub const CHART_DAYS: u32 = 30;

/// One row of the market listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Coin {
    /// CoinGecko id (used for the chart lookup).
    pub id: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Market-cap rank.
    pub market_cap_rank: Option<u32>,
    /// Current price in the quote currency.
    #[serde(default)]
    pub current_price: f64,
    /// Market capitalisation in the quote currency.
    #[serde(default)]
    pub market_cap: f64,
    /// 24h price change in percent.
    pub price_change_percentage_24h: Option<f64>,
}

/// A daily price sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    /// Sample date (UTC).
    pub date: NaiveDate,
    /// Price in USD.
    pub price: f64,
}

#[derive(Debug, Deserialize)]
struct MarketChart {
    prices: Vec<(f64, f64)>,
}

impl MarketChart {
    fn into_points(self) -> Vec<ChartPoint> {
        self.prices
            .into_iter()
            .filter_map(|(millis, price)| {
                DateTime::<Utc>::from_timestamp_millis(millis as i64).map(|ts| ChartPoint {
                    date: ts.date_naive(),
                    price,
                })
            })
            .collect()
    }
}

/// Top coins by market cap. The query is the quote currency (e.g. `usd`).
#[derive(Debug, Clone)]
pub struct CoinMarkets {
    http: HttpClient,
    base: String,
}

impl CoinMarkets {
    /// Create the source.
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base: config.endpoints.coingecko.clone(),
        }
    }
}

impl SearchSource for CoinMarkets {
    type Output = Vec<Coin>;

    fn name(&self) -> &'static str {
        "coins"
    }

    fn search(&self, query: &str) -> Result<Vec<Coin>, SourceError> {
        let currency = query.trim().to_lowercase();
        let url = format!("{}/coins/markets", self.base);
        let per_page = MARKET_PAGE_SIZE.to_string();
        self.http.get_json(
            &url,
            &[
                ("vs_currency", currency.as_str()),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
            ],
            "markets",
        )
    }
}

/// 30-day USD price history. The query is a coin id (e.g. `bitcoin`).
#[derive(Debug, Clone)]
pub struct CoinChart {
    http: HttpClient,
    base: String,
}

impl CoinChart {
    /// Create the source.
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base: config.endpoints.coingecko.clone(),
        }
    }
}

impl SearchSource for CoinChart {
    type Output = Vec<ChartPoint>;

    fn name(&self) -> &'static str {
        "coin-chart"
    }

    fn search(&self, query: &str) -> Result<Vec<ChartPoint>, SourceError> {
        let id = query.trim().to_lowercase();
        let url = format!(
            "{}/coins/{}/market_chart",
            self.base,
            urlencoding::encode(&id)
        );
        let days = CHART_DAYS.to_string();
        let chart: MarketChart = self.http.get_json(
            &url,
            &[("vs_currency", "usd"), ("days", days.as_str())],
            &format!("coin \"{id}\""),
        )?;
        Ok(chart.into_points())
    }
}

/// Abbreviate a market cap: `1.23B`, `45.60M`, `7.89K`.
pub fn format_market_cap(value: f64) -> String {
    if value > 1_000_000_000.0 {
        format!("{:.2}B", value / 1_000_000_000.0)
    } else if value > 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else {
        format!("{:.2}K", value / 1_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_market_cap() {
        assert_eq!(format_market_cap(1_234_000_000_000.0), "1234.00B");
        assert_eq!(format_market_cap(2_500_000_000.0), "2.50B");
        assert_eq!(format_market_cap(45_600_000.0), "45.60M");
        assert_eq!(format_market_cap(1_000_000.0), "1000.00K");
        assert_eq!(format_market_cap(7_890.0), "7.89K");
    }

    #[test]
    fn test_decode_coin() {
        let coins: Vec<Coin> = serde_json::from_str(
            r#"[{"id":"bitcoin","symbol":"btc","name":"Bitcoin","market_cap_rank":1,"current_price":64000.5,"market_cap":1260000000000,"price_change_percentage_24h":-1.25}]"#,
        )
        .unwrap();
        assert_eq!(coins[0].id, "bitcoin");
        assert_eq!(coins[0].market_cap_rank, Some(1));
        assert!((coins[0].current_price - 64000.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_chart_points_from_millis() {
        let chart: MarketChart = serde_json::from_str(
            r#"{"prices":[[1704067200000,42000.0],[1704153600000,43000.5]],"market_caps":[],"total_volumes":[]}"#,
        )
        .unwrap();
        let points = chart.into_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert!((points[1].price - 43000.5).abs() < f64::EPSILON);
    }
}
