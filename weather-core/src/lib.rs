//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Units, weather records and their text rendering
//! - API key resolution (`.env`, environment, config file)
//! - The provider abstraction and the OpenWeatherMap client
//! - The batch fetcher, the highest/lowest analysis and the report writer
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod analysis;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod input;
pub mod model;
pub mod provider;
pub mod report;

pub use analysis::{Summary, find_highest, find_lowest};
pub use config::{Config, ProviderConfig, load_api_key};
pub use error::{FetchError, InputError};
pub use fetcher::{Batch, CityFailure, fetch_batch};
pub use input::parse_cities;
pub use model::{Unit, Weather, format_temperature};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use report::{DEFAULT_REPORT_FILE, Report};
