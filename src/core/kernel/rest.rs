use crate::core::errors::BinanceError;
use crate::core::kernel::params::Params;
use crate::core::kernel::router::{ApiFamily, ApiVersion, Endpoints};
use crate::core::kernel::signer::{get_timestamp, Signer};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{instrument, trace};

/// One request to dispatch: method, family routing, parameters and flags.
///
/// Parameters are unordered here; ordering happens at signing/serialization
/// time. `force_query` makes non-GET methods carry parameters in the query
/// string instead of a form body (legacy withdraw endpoints require this).
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub family: ApiFamily,
    pub path: String,
    pub version: Option<ApiVersion>,
    pub params: Params,
    pub signed: bool,
    pub force_query: bool,
}

impl Request {
    pub fn new(method: Method, family: ApiFamily, path: impl Into<String>) -> Self {
        Self {
            method,
            family,
            path: path.into(),
            version: None,
            params: Params::new(),
            signed: false,
            force_query: false,
        }
    }

    pub fn get(family: ApiFamily, path: impl Into<String>) -> Self {
        Self::new(Method::GET, family, path)
    }

    pub fn post(family: ApiFamily, path: impl Into<String>) -> Self {
        Self::new(Method::POST, family, path)
    }

    pub fn put(family: ApiFamily, path: impl Into<String>) -> Self {
        Self::new(Method::PUT, family, path)
    }

    pub fn delete(family: ApiFamily, path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, family, path)
    }

    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    #[must_use]
    pub const fn version(mut self, version: ApiVersion) -> Self {
        self.version = Some(version);
        self
    }

    #[must_use]
    pub const fn force_query(mut self) -> Self {
        self.force_query = true;
        self
    }
}

/// Transport interface: exactly one HTTP call per dispatch, no retries.
///
/// Retry policy belongs to the caller; blind retries against signed endpoints
/// risk timestamp replay ambiguity.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Execute one request and return the decoded JSON body.
    async fn dispatch(&self, request: Request) -> Result<Value, BinanceError>;

    /// Execute one request and deserialize the body into `T`.
    async fn dispatch_json<T: DeserializeOwned>(&self, request: Request) -> Result<T, BinanceError>
    where
        Self: Sized,
    {
        let value = self.dispatch(request).await?;
        serde_json::from_value(value)
            .map_err(|e| BinanceError::MalformedResponse(format!("Failed to deserialize: {}", e)))
    }
}

/// Transport options merged into every call.
#[derive(Clone, Debug)]
pub struct RestConfig {
    /// Per-call timeout in seconds. Overriding it is an explicit choice,
    /// never a side effect of other options.
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: "binax/0.1".to_string(),
        }
    }
}

impl RestConfig {
    #[must_use]
    pub const fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Map a transport outcome to a decoded payload or a typed error.
///
/// Non-2xx responses surface as `Api` with the raw status and body for
/// diagnostics; a 2xx body that is not valid JSON surfaces as
/// `MalformedResponse`.
pub fn classify(status: StatusCode, body: &str) -> Result<Value, BinanceError> {
    if status.is_success() {
        serde_json::from_str(body)
            .map_err(|_| BinanceError::MalformedResponse(format!("Invalid Response: {}", body)))
    } else {
        Err(BinanceError::Api {
            status: status.as_u16(),
            body: body.to_string(),
        })
    }
}

/// `RestClient` implementation backed by reqwest.
///
/// Carries the fixed session headers (content negotiation, client identity,
/// API-key header) on every request, signed or not.
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    endpoints: Endpoints,
    config: RestConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn new(
        endpoints: Endpoints,
        config: RestConfig,
        api_key: &str,
        signer: Option<Arc<dyn Signer>>,
    ) -> Result<Self, BinanceError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if !api_key.is_empty() {
            let value = HeaderValue::from_str(api_key)
                .map_err(|e| BinanceError::Auth(format!("Invalid API key: {}", e)))?;
            headers.insert("X-MBX-APIKEY", value);
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| BinanceError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoints,
            config,
            signer,
        })
    }

    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(
        skip(self, request),
        fields(method = %request.method, family = ?request.family, path = %request.path, signed = request.signed)
    )]
    async fn dispatch(&self, request: Request) -> Result<Value, BinanceError> {
        let Request {
            method,
            family,
            path,
            version,
            mut params,
            signed,
            force_query,
        } = request;

        let url = self.endpoints.url(family, &path, signed, version);

        if signed {
            let signer = self.signer.as_ref().ok_or_else(|| {
                BinanceError::Auth("Request requires signing but no signer is configured".to_string())
            })?;
            signer.sign(&mut params, get_timestamp()?)?;
        } else {
            // unsigned requests still travel in canonical order
            params.canonicalize();
        }

        let mut builder = self.client.request(method.clone(), &url);
        if !params.is_empty() {
            // GET and force-query requests carry parameters in the query
            // string; everything else goes as a form-encoded body.
            if method == Method::GET || force_query {
                builder = builder.query(params.as_pairs());
            } else {
                builder = builder.form(params.as_pairs());
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|e| BinanceError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BinanceError::Network(format!("Failed to read response body: {}", e)))?;

        trace!(status = %status, "response body: {}", body);

        classify(status, &body)
    }
}
