use reqwest::StatusCode;

/// Failure talking to the TMDB API.
///
/// Never reaches an HTTP client of this service: the genre cache and the
/// movie fetch turn every variant into an empty result.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("TMDB API error {status} on {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },
    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}
