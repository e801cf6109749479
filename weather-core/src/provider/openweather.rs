use async_trait::async_trait;
use reqwest::{Client, Request, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{FetchError, Unit, Weather};

use super::WeatherProvider;

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// OpenWeatherMap "current weather" endpoint.
///
/// Holds one `Client` so every city of a batch reuses the same connection pool.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> reqwest::Result<Self> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .build()?;

        Ok(Self { api_key, endpoint: CURRENT_WEATHER_URL.to_string(), http })
    }

    /// Point the provider at a different current-weather URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn build_request(&self, city: &str, unit: Unit) -> reqwest::Result<Request> {
        self.http
            .get(&self.endpoint)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", unit.as_str())])
            .build()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str, unit: Unit) -> Result<Weather, FetchError> {
        let request = self.build_request(city, unit).map_err(FetchError::transport)?;
        debug!(city, %unit, url = %redacted(request.url()), "requesting current weather");

        let res = self.http.execute(request).await.map_err(FetchError::transport)?;
        let status = res.status();
        debug!(city, status = status.as_u16(), "OpenWeather responded");

        check_status(status)?;

        let body = res.text().await.map_err(FetchError::transport)?;
        parse_current(&body, city, unit)
    }
}

/// The request URL without the `appid` pair, safe to log.
fn redacted(url: &Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| *k != "appid")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut safe = url.clone();
    safe.query_pairs_mut().clear().extend_pairs(kept);
    safe
}

fn check_status(status: StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::NOT_FOUND {
        Err(FetchError::CityNotFound)
    } else {
        Err(FetchError::Api { status: status.as_u16() })
    }
}

/// Pull `main.temp` and `weather[0].description` out of a response body.
/// Every other field is ignored.
fn parse_current(body: &str, city: &str, unit: Unit) -> Result<Weather, FetchError> {
    let root: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(format!("invalid JSON: {e}")))?;

    let temperature = root
        .pointer("/main/temp")
        .and_then(Value::as_f64)
        .filter(|t| t.is_finite())
        .ok_or_else(|| FetchError::Parse("missing numeric field main.temp".into()))?;

    let description = root
        .pointer("/weather/0/description")
        .and_then(Value::as_str)
        .ok_or_else(|| FetchError::Parse("missing field weather[0].description".into()))?;

    Ok(Weather::new(city, temperature, description, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = r#"{
        "coord": {"lon": -0.13, "lat": 51.51},
        "weather": [
            {"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"},
            {"id": 701, "main": "Mist", "description": "mist", "icon": "50d"}
        ],
        "main": {"temp": 12.3, "feels_like": 11.6, "humidity": 81},
        "name": "London",
        "cod": 200
    }"#;

    #[test]
    fn parses_temperature_and_first_description() {
        let w = parse_current(LONDON, "London", Unit::Metric).unwrap();

        assert_eq!(w.city(), "London");
        assert_eq!(w.temperature(), 12.3);
        assert_eq!(w.description(), "light rain");
        assert_eq!(w.unit(), Unit::Metric);
    }

    #[test]
    fn keeps_user_supplied_city_name() {
        let w = parse_current(LONDON, "london", Unit::Imperial).unwrap();
        assert_eq!(w.city(), "london");
        assert_eq!(w.unit(), Unit::Imperial);
    }

    #[test]
    fn integer_temperature_is_accepted() {
        let body = r#"{"main": {"temp": 287}, "weather": [{"description": "clear sky"}]}"#;
        let w = parse_current(body, "Berlin", Unit::Standard).unwrap();
        assert_eq!(w.temperature(), 287.0);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = parse_current("<html>oops</html>", "X", Unit::Metric).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn missing_fields_are_parse_errors() {
        let no_temp = r#"{"main": {}, "weather": [{"description": "fog"}]}"#;
        let text_temp = r#"{"main": {"temp": "warm"}, "weather": [{"description": "fog"}]}"#;
        let no_weather = r#"{"main": {"temp": 1.0}, "weather": []}"#;

        for body in [no_temp, text_temp, no_weather] {
            let err = parse_current(body, "X", Unit::Metric).unwrap_err();
            assert!(matches!(err, FetchError::Parse(_)), "body: {body}");
        }
    }

    #[test]
    fn status_classification() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(matches!(check_status(StatusCode::NOT_FOUND), Err(FetchError::CityNotFound)));

        let err = check_status(StatusCode::UNAUTHORIZED).unwrap_err();
        assert!(matches!(err, FetchError::Api { status: 401 }));
        assert_eq!(err.to_string(), "API call failed with code: 401");
    }

    #[test]
    fn redacted_url_drops_only_the_key() {
        let provider = OpenWeatherProvider::new("SECRET".into()).unwrap();
        let request = provider.build_request("Paris", Unit::Metric).unwrap();

        let safe = redacted(request.url()).to_string();
        assert!(!safe.contains("SECRET"));
        assert!(!safe.contains("appid"));
        assert!(safe.ends_with("/data/2.5/weather?q=Paris&units=metric"));
    }

    #[tokio::test]
    async fn transport_error_does_not_leak_the_key() {
        let provider = OpenWeatherProvider::new("TOPSECRET".into())
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/data/2.5/weather");

        let err = provider.current_weather("London", Unit::Metric).await.unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
        let message = err.to_string();
        assert!(message.starts_with("request failed"));
        assert!(!message.contains("TOPSECRET"), "leaked key: {message}");
        assert!(!format!("{err:?}").contains("TOPSECRET"));
    }

    #[test]
    fn request_carries_city_key_and_unit() {
        let provider = OpenWeatherProvider::new("SECRET".into()).unwrap();
        let request = provider.build_request("New York", Unit::Imperial).unwrap();
        let url = request.url();

        assert_eq!(url.host_str(), Some("api.openweathermap.org"));
        assert_eq!(url.path(), "/data/2.5/weather");

        let pairs: Vec<(String, String)> =
            url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "New York".to_string()),
                ("appid".to_string(), "SECRET".to_string()),
                ("units".to_string(), "imperial".to_string()),
            ]
        );
    }
}
