//! OpenWeatherMap current conditions by city.

use serde::Deserialize;

use crate::config::{non_blank, SourceConfig};
use crate::error::SourceError;
use crate::http::HttpClient;
use crate::SearchSource;

/// Current weather for a city.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Weather {
    /// City name as resolved by the API.
    pub name: String,
    /// Country information.
    pub sys: Country,
    /// Coordinates.
    pub coord: Coord,
    /// Temperature and humidity.
    pub main: Readings,
    /// Condition summaries.
    #[serde(default)]
    pub weather: Vec<Condition>,
    /// Wind.
    #[serde(default)]
    pub wind: Wind,
}

/// Country code wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    /// ISO country code.
    #[serde(default)]
    pub country: String,
}

/// Latitude/longitude.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coord {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

/// Temperature readings in °C.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Readings {
    /// Temperature.
    pub temp: f64,
    /// Perceived temperature.
    #[serde(default)]
    pub feels_like: f64,
    /// Relative humidity in percent.
    #[serde(default)]
    pub humidity: u32,
}

/// A weather condition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Condition {
    /// Condition group (Rain, Clouds, ...).
    pub main: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
}

/// Wind reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Wind {
    /// Speed in m/s.
    #[serde(default)]
    pub speed: f64,
}

/// Weather by city name. Needs an OpenWeatherMap key.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    http: HttpClient,
    base: String,
    api_key: Option<String>,
}

impl WeatherLookup {
    /// Create the source.
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base: config.endpoints.openweather.clone(),
            api_key: non_blank(config.keys.openweather.as_ref()),
        }
    }
}

impl SearchSource for WeatherLookup {
    type Output = Weather;

    fn name(&self) -> &'static str {
        "weather"
    }

    fn search(&self, query: &str) -> Result<Weather, SourceError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(SourceError::MissingApiKey("openweather"))?;
        let city = query.trim();
        let url = format!("{}/weather", self.base);
        self.http.get_json(
            &url,
            &[("q", city), ("units", "metric"), ("appid", key)],
            &format!("city \"{city}\""),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_weather() {
        let weather: Weather = serde_json::from_str(
            r#"{"coord":{"lon":-0.1257,"lat":51.5085},"weather":[{"id":500,"main":"Rain","description":"light rain"}],"main":{"temp":12.3,"feels_like":11.1,"humidity":81},"wind":{"speed":4.1},"sys":{"country":"GB"},"name":"London"}"#,
        )
        .unwrap();
        assert_eq!(weather.name, "London");
        assert_eq!(weather.sys.country, "GB");
        assert_eq!(weather.main.humidity, 81);
        assert_eq!(weather.weather[0].main, "Rain");
    }

    #[test]
    fn test_missing_key_fails_before_request() {
        let config = SourceConfig::default();
        let source = WeatherLookup::new(HttpClient::new(&config), &config);
        let err = source.search("London").unwrap_err();
        assert!(matches!(err, SourceError::MissingApiKey("openweather")));
    }
}
