use thiserror::Error;

/// Main error type for a harvest run. Anything that reaches this type ends
/// the run; per-species and per-chain faults never do.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// A resource the whole run depends on could not be fetched
    #[error("Upstream unavailable: {0}")]
    Upstream(String),
    /// Writing an output artifact failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serializing an output artifact failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// A single failed request. Never escapes the fetch client.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("undecodable body: {0}")]
    Decode(String),
}

/// Why a single species was left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// A resource the record needs could not be fetched or decoded
    #[error("resource unavailable: {0}")]
    Unavailable(String),
    /// The species lists no varieties at all
    #[error("species {0} has no varieties")]
    NoVarieties(String),
}

/// Errors related to loading the harvester configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Type alias for Results using HarvestError
pub type HarvestResult<T> = Result<T, HarvestError>;

/// Type alias for Results using FetchError
pub type FetchResult<T> = Result<T, FetchError>;

/// Type alias for Results using AssembleError
pub type AssembleResult<T> = Result<T, AssembleError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
