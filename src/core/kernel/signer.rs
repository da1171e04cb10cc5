use crate::core::errors::BinanceError;
use crate::core::kernel::params::{Params, SIGNATURE_KEY};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Request authentication interface.
///
/// Signing mutates the outgoing parameter set in place: a millisecond-epoch
/// `timestamp` is injected, the set is canonically ordered, and the resulting
/// authentication code is appended as the `signature` parameter. Two calls
/// over the same parameter content and secret produce the same signature
/// regardless of insertion order.
pub trait Signer: Send + Sync {
    fn sign(&self, params: &mut Params, timestamp: u64) -> Result<(), BinanceError>;
}

/// HMAC-SHA256 signer over the canonical query string, lowercase hex output.
pub struct HmacSigner {
    secret_key: String,
}

impl HmacSigner {
    pub fn new(secret_key: String) -> Self {
        Self { secret_key }
    }

    fn digest(&self, query_string: &str) -> Result<String, BinanceError> {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| BinanceError::Auth(format!("Failed to create HMAC: {}", e)))?;
        mac.update(query_string.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Signer for HmacSigner {
    fn sign(&self, params: &mut Params, timestamp: u64) -> Result<(), BinanceError> {
        params.insert("timestamp", timestamp);
        params.canonicalize();
        let signature = self.digest(&params.to_query_string())?;
        params.insert(SIGNATURE_KEY, signature);
        Ok(())
    }
}

/// Current time as a millisecond epoch.
#[allow(clippy::cast_possible_truncation)]
pub fn get_timestamp() -> Result<u64, BinanceError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .map_err(|e| BinanceError::Other(format!("System time error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_query(params: Params, timestamp: u64) -> String {
        let signer = HmacSigner::new("s3cr3t".to_string());
        let mut params = params;
        signer.sign(&mut params, timestamp).expect("signing failed");
        params.to_query_string()
    }

    #[test]
    fn signature_matches_manual_hmac_over_canonical_string() {
        let query = signed_query(
            Params::new().with("symbol", "BTCUSDT").with("side", "BUY"),
            1_499_827_319_559,
        );

        // independently compute the digest over the canonical form
        let mut mac = HmacSha256::new_from_slice(b"s3cr3t").unwrap();
        mac.update(b"side=BUY&symbol=BTCUSDT&timestamp=1499827319559");
        let expected = hex::encode(mac.finalize().into_bytes());

        assert_eq!(
            query,
            format!(
                "side=BUY&symbol=BTCUSDT&timestamp=1499827319559&signature={}",
                expected
            )
        );
    }

    #[test]
    fn signature_is_independent_of_insertion_order() {
        let a = signed_query(
            Params::new()
                .with("symbol", "BTCUSDT")
                .with("side", "BUY")
                .with("quantity", "1"),
            42,
        );
        let b = signed_query(
            Params::new()
                .with("quantity", "1")
                .with("side", "BUY")
                .with("symbol", "BTCUSDT"),
            42,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn signed_output_keeps_keys_ascending_with_signature_last() {
        let query = signed_query(
            Params::new()
                .with("z", "1")
                .with("a", "2")
                .with("m", "3"),
            7,
        );
        let keys: Vec<&str> = query
            .split('&')
            .map(|pair| pair.split('=').next().unwrap())
            .collect();
        assert_eq!(keys, vec!["a", "m", "timestamp", "z", "signature"]);
    }

    #[test]
    fn signature_is_lowercase_hex() {
        let query = signed_query(Params::new().with("symbol", "BTCUSDT"), 1);
        let signature = query.rsplit('=').next().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
