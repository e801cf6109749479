use tracing::debug;

use crate::{FetchError, Unit, Weather, WeatherProvider};

/// A city that could not be fetched, and why.
#[derive(Debug)]
pub struct CityFailure {
    pub city: String,
    pub error: FetchError,
}

/// Outcome of one run over the user's city list.
#[derive(Debug, Default)]
pub struct Batch {
    /// Successful records, in input order.
    pub records: Vec<Weather>,
    /// Per-city failures, in input order.
    pub failures: Vec<CityFailure>,
}

impl Batch {
    /// Lines for the error stream: a header followed by one line per failure.
    /// Empty when every city succeeded.
    pub fn diagnostics(&self) -> Vec<String> {
        if self.failures.is_empty() {
            return Vec::new();
        }

        std::iter::once("Encountered the following errors:".to_string())
            .chain(
                self.failures
                    .iter()
                    .map(|f| format!("Error fetching weather for {}: {}", f.city, f.error)),
            )
            .collect()
    }
}

/// Fetch every city one after another.
///
/// A failing city never stops the batch; it lands in `failures` and the loop
/// moves on.
pub async fn fetch_batch<P, S>(provider: &P, cities: &[S], unit: Unit) -> Batch
where
    P: WeatherProvider + ?Sized,
    S: AsRef<str>,
{
    let mut batch = Batch::default();

    for city in cities {
        let city = city.as_ref().trim();
        if city.is_empty() {
            debug!("skipping blank city name");
            continue;
        }

        match provider.current_weather(city, unit).await {
            Ok(weather) => batch.records.push(weather),
            Err(error) => {
                debug!(city, %error, "fetch failed");
                batch.failures.push(CityFailure { city: city.to_string(), error });
            }
        }
    }

    debug!(
        fetched = batch.records.len(),
        failed = batch.failures.len(),
        "batch finished"
    );
    batch
}
