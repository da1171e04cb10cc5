/// Transport kernel: routing, parameter canonicalization, signing and
/// dispatch.
///
/// The kernel contains no endpoint knowledge beyond family routing. Typed
/// endpoint wrappers live in `crate::client`; pagination strategies in
/// `crate::history`. Components:
///
/// - [`router::Endpoints`]: pure (family, path, signed, version) -> URL
/// - [`params::Params`]: unordered parameter set with canonical ordering
/// - [`signer::Signer`] / [`signer::HmacSigner`]: HMAC-SHA256 over the
///   canonical query string
/// - [`rest::RestClient`] / [`rest::ReqwestRest`]: one HTTP call per
///   dispatch, fixed timeout, no retries
pub mod params;
pub mod rest;
pub mod router;
pub mod signer;

pub use params::Params;
pub use rest::{classify, ReqwestRest, Request, RestClient, RestConfig};
pub use router::{ApiFamily, ApiVersion, Endpoints};
pub use signer::{get_timestamp, HmacSigner, Signer};
