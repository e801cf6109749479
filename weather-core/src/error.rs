use thiserror::Error;

/// Why a single city could not be fetched.
///
/// These never abort a batch; the fetcher collects them next to the city
/// they belong to.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("City not found")]
    CityNotFound,

    #[error("API call failed with code: {status}")]
    Api { status: u16 },

    /// Never carries the request URL; see `FetchError::transport`.
    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl FetchError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        FetchError::Transport(err.without_url())
    }
}

/// Rejected user input. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("No valid city names entered.")]
    NoCities,

    #[error("Invalid unit. Please use 'metric', 'imperial', or 'standard'.")]
    InvalidUnit(String),
}
