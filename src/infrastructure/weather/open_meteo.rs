use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::{
    Coordinates, CurrentWeather, DailyForecast, DomainError, ForecastResult,
    WeatherCodeTranslator, WeatherCondition, WeatherProvider, WmoCodeTranslator,
};
use crate::infrastructure::http::HttpClientTrait;

pub const DEFAULT_OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode";

/// Open-Meteo forecast client
#[derive(Debug)]
pub struct OpenMeteoClient<C: HttpClientTrait> {
    client: C,
    base_url: String,
    translator: Arc<dyn WeatherCodeTranslator>,
}

impl<C: HttpClientTrait> OpenMeteoClient<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_OPEN_METEO_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            translator: Arc::new(WmoCodeTranslator),
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn WeatherCodeTranslator>) -> Self {
        self.translator = translator;
        self
    }

    fn build_params(&self, coordinates: Coordinates) -> Vec<(String, String)> {
        vec![
            ("latitude".to_string(), coordinates.lat().to_string()),
            ("longitude".to_string(), coordinates.lon().to_string()),
            ("current_weather".to_string(), "true".to_string()),
            ("daily".to_string(), DAILY_FIELDS.to_string()),
            ("timezone".to_string(), "auto".to_string()),
        ]
    }

    /// Maps the raw payload into a [`ForecastResult`]
    ///
    /// The four daily arrays are read as parallel columns; any length
    /// mismatch rejects the whole payload. Null entries pass through as
    /// missing temperatures, and a null code becomes `Unknown`.
    fn parse_response(&self, json: Value) -> Result<ForecastResult, DomainError> {
        let response: OpenMeteoResponse = serde_json::from_value(json)
            .map_err(|e| DomainError::response_parsing(e.to_string()))?;

        let current = response.current_weather;
        let daily = response.daily;
        let days = daily.time.len();

        if daily.temperature_2m_max.len() != days
            || daily.temperature_2m_min.len() != days
            || daily.weathercode.len() != days
        {
            return Err(DomainError::response_parsing(format!(
                "daily arrays differ in length (time={}, max={}, min={}, weathercode={})",
                days,
                daily.temperature_2m_max.len(),
                daily.temperature_2m_min.len(),
                daily.weathercode.len()
            )));
        }

        let daily_forecast = daily
            .time
            .into_iter()
            .zip(daily.temperature_2m_max)
            .zip(daily.temperature_2m_min)
            .zip(daily.weathercode)
            .map(|(((date, max), min), code)| DailyForecast {
                date,
                max_temperature: max,
                min_temperature: min,
                condition: code
                    .map(|code| self.translator.translate(code))
                    .unwrap_or(WeatherCondition::Unknown),
            })
            .collect();

        Ok(ForecastResult {
            current_weather: CurrentWeather {
                temperature: current.temperature,
                wind_speed: current.windspeed,
                condition: self.translator.translate(current.weathercode),
            },
            daily_forecast,
        })
    }
}

#[async_trait]
impl<C: HttpClientTrait> WeatherProvider for OpenMeteoClient<C> {
    async fn forecast(&self, coordinates: Coordinates) -> Result<ForecastResult, DomainError> {
        let params = self.build_params(coordinates);
        let response = self.client.get_json(&self.base_url, &params).await?;

        let forecast = self.parse_response(response)?;
        debug!(
            lat = coordinates.lat(),
            lon = coordinates.lon(),
            days = forecast.daily_forecast.len(),
            "Open-Meteo forecast fetched"
        );

        Ok(forecast)
    }
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current_weather: OpenMeteoCurrent,
    daily: OpenMeteoDaily,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature: f64,
    windspeed: f64,
    weathercode: i64,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    weathercode: Vec<Option<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::MockHttpClient;

    fn sample_response() -> Value {
        serde_json::json!({
            "latitude": 37.7749,
            "longitude": -122.4194,
            "timezone": "America/Los_Angeles",
            "current_weather": {
                "temperature": 15.2,
                "windspeed": 5.4,
                "winddirection": 270,
                "weathercode": 1,
                "time": "2025-01-10T12:00"
            },
            "daily": {
                "time": ["2025-01-10", "2025-01-11"],
                "temperature_2m_max": [16.0, 18.0],
                "temperature_2m_min": [10.0, 11.0],
                "weathercode": [0, 61]
            }
        })
    }

    fn coords() -> Coordinates {
        Coordinates::new(37.7749, -122.4194).unwrap()
    }

    #[tokio::test]
    async fn test_forecast_normalizes_response() {
        let client =
            MockHttpClient::new().with_response(DEFAULT_OPEN_METEO_BASE_URL, sample_response());
        let provider = OpenMeteoClient::new(client);

        let forecast = provider.forecast(coords()).await.unwrap();

        assert_eq!(forecast.current_weather.temperature, 15.2);
        assert_eq!(forecast.current_weather.wind_speed, 5.4);
        assert_eq!(forecast.current_weather.condition, WeatherCondition::PartlyCloudy);

        assert_eq!(forecast.daily_forecast.len(), 2);
        assert_eq!(forecast.daily_forecast[0].date, "2025-01-10");
        assert_eq!(forecast.daily_forecast[0].condition, WeatherCondition::Clear);
        assert_eq!(forecast.daily_forecast[1].max_temperature, Some(18.0));
        assert_eq!(forecast.daily_forecast[1].min_temperature, Some(11.0));
        assert_eq!(forecast.daily_forecast[1].condition, WeatherCondition::Rain);
    }

    #[tokio::test]
    async fn test_forecast_sends_expected_params() {
        let client =
            MockHttpClient::new().with_response(DEFAULT_OPEN_METEO_BASE_URL, sample_response());
        let provider = OpenMeteoClient::new(client);

        provider.forecast(coords()).await.unwrap();

        let calls = provider.client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].1,
            vec![
                ("latitude".to_string(), "37.7749".to_string()),
                ("longitude".to_string(), "-122.4194".to_string()),
                ("current_weather".to_string(), "true".to_string()),
                ("daily".to_string(), DAILY_FIELDS.to_string()),
                ("timezone".to_string(), "auto".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_code_maps_to_unknown() {
        let mut response = sample_response();
        response["current_weather"]["weathercode"] = serde_json::json!(42);

        let client = MockHttpClient::new().with_response(DEFAULT_OPEN_METEO_BASE_URL, response);
        let forecast = OpenMeteoClient::new(client).forecast(coords()).await.unwrap();

        assert_eq!(forecast.current_weather.condition, WeatherCondition::Unknown);
    }

    #[tokio::test]
    async fn test_null_daily_values_pass_through() {
        let mut response = sample_response();
        response["daily"]["temperature_2m_max"] = serde_json::json!([16.0, null]);
        response["daily"]["weathercode"] = serde_json::json!([null, 61]);

        let client = MockHttpClient::new().with_response(DEFAULT_OPEN_METEO_BASE_URL, response);
        let forecast = OpenMeteoClient::new(client).forecast(coords()).await.unwrap();

        assert_eq!(forecast.daily_forecast.len(), 2);
        assert_eq!(forecast.daily_forecast[0].max_temperature, Some(16.0));
        assert_eq!(forecast.daily_forecast[0].condition, WeatherCondition::Unknown);
        assert_eq!(forecast.daily_forecast[1].max_temperature, None);
        assert_eq!(forecast.daily_forecast[1].min_temperature, Some(11.0));
        assert_eq!(forecast.daily_forecast[1].condition, WeatherCondition::Rain);
    }

    #[tokio::test]
    async fn test_mismatched_daily_arrays_rejected() {
        let mut response = sample_response();
        response["daily"]["temperature_2m_min"] = serde_json::json!([10.0]);

        let client = MockHttpClient::new().with_response(DEFAULT_OPEN_METEO_BASE_URL, response);
        let err = OpenMeteoClient::new(client)
            .forecast(coords())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::ResponseParsing { .. }));
        assert!(err.to_string().starts_with("Response Parsing Error: daily arrays differ"));
    }

    #[tokio::test]
    async fn test_missing_current_weather_rejected() {
        let mut response = sample_response();
        response
            .as_object_mut()
            .unwrap()
            .remove("current_weather");

        let client = MockHttpClient::new().with_response(DEFAULT_OPEN_METEO_BASE_URL, response);
        let err = OpenMeteoClient::new(client)
            .forecast(coords())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::ResponseParsing { .. }));
    }

    #[derive(Debug)]
    struct FixedTranslator;

    impl WeatherCodeTranslator for FixedTranslator {
        fn translate(&self, _code: i64) -> WeatherCondition {
            WeatherCondition::Snow
        }
    }

    #[tokio::test]
    async fn test_custom_translator_is_used() {
        let client =
            MockHttpClient::new().with_response(DEFAULT_OPEN_METEO_BASE_URL, sample_response());
        let provider = OpenMeteoClient::new(client).with_translator(Arc::new(FixedTranslator));

        let forecast = provider.forecast(coords()).await.unwrap();
        assert!(forecast
            .daily_forecast
            .iter()
            .all(|day| day.condition == WeatherCondition::Snow));
    }
}
