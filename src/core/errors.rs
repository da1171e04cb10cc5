use thiserror::Error;

/// Error taxonomy for the client core.
///
/// Transport failures, venue-reported failures and caller mistakes are kept
/// as distinct variants so callers can match on them exhaustively. Business
/// failures reported inside a 2xx body (legacy withdraw endpoints) are never
/// folded into `Api`.
#[derive(Error, Debug)]
pub enum BinanceError {
    /// The liveness probe during session construction failed.
    #[error("connectivity probe failed: {0}")]
    Connectivity(String),

    /// Non-2xx transport response; carries the raw status and body.
    #[error("API error: status {status} - {body}")]
    Api { status: u16, body: String },

    /// 2xx response whose body did not decode as the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// 2xx response with an embedded `success: false` flag (legacy endpoints).
    #[error("business error: {0}")]
    Business(String),

    /// Caller supplied a contractually forbidden input combination.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A signed request was attempted without usable credentials.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Request could not be carried out at the transport level.
    #[error("network error: {0}")]
    Network(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
