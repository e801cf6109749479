use async_trait::async_trait;
use std::fmt::Debug;

use crate::{FetchError, Unit, Weather};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current observations for a single city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str, unit: Unit) -> Result<Weather, FetchError>;
}
