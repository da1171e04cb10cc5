use std::fmt;

/// API families exposed by the venue. Each family owns a base address and a
/// version segment; the spot `Api` family serves both public and private
/// endpoints, distinguished by the signed flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiFamily {
    /// Public market data and authenticated spot trading.
    Api,
    /// Legacy withdraw/account endpoints (`.html` paths).
    Withdraw,
    /// Margin trading.
    Margin,
    /// USD-margined futures, on a distinct host.
    Futures,
    /// Unversioned website-scoped endpoints (product listing metadata).
    Website,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V3,
}

impl ApiVersion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V3 => "v3",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base addresses for every API family.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub api: String,
    pub withdraw: String,
    pub margin: String,
    pub futures: String,
    pub website: String,
}

impl Endpoints {
    pub fn mainnet() -> Self {
        Self {
            api: "https://api.binance.com/api".to_string(),
            withdraw: "https://api.binance.com/wapi".to_string(),
            margin: "https://api.binance.com/sapi".to_string(),
            futures: "https://fapi.binance.com/fapi".to_string(),
            website: "https://www.binance.com".to_string(),
        }
    }

    /// Spot testnet. Only the spot family has a test environment; the other
    /// families keep their production addresses.
    pub fn testnet() -> Self {
        Self {
            api: "https://testnet.binance.vision/api".to_string(),
            ..Self::mainnet()
        }
    }

    /// Override the spot API base address.
    #[must_use]
    pub fn with_api_base(mut self, base: String) -> Self {
        self.api = base;
        self
    }

    /// Build the absolute request target for an endpoint.
    ///
    /// Pure function of (family, path, signed, version); performs no I/O and
    /// cannot fail. Signed spot endpoints always use the highest private
    /// version regardless of the caller-specified one.
    pub fn url(
        &self,
        family: ApiFamily,
        path: &str,
        signed: bool,
        version: Option<ApiVersion>,
    ) -> String {
        match family {
            ApiFamily::Api => {
                let version = if signed {
                    ApiVersion::V3
                } else {
                    version.unwrap_or(ApiVersion::V1)
                };
                format!("{}/{}/{}", self.api, version, path)
            }
            ApiFamily::Withdraw => format!("{}/{}/{}", self.withdraw, ApiVersion::V3, path),
            ApiFamily::Margin => format!("{}/{}/{}", self.margin, ApiVersion::V1, path),
            ApiFamily::Futures => format!("{}/{}/{}", self.futures, ApiVersion::V1, path),
            ApiFamily::Website => format!("{}/{}", self.website, path),
        }
    }
}
