use std::fmt::Display;

/// Reserved parameter name that must always sort last in the canonical form.
pub const SIGNATURE_KEY: &str = "signature";

/// Unordered request parameter set.
///
/// Insertion order carries no meaning; ordering is an output property
/// produced by [`Params::canonicalize`], never an input invariant. The
/// canonical form is part of the signing contract: the venue reproduces it
/// bit-for-bit when verifying a signature.
#[derive(Debug, Clone, Default)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        self.0.push((key.into(), value.to_string()));
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Add the parameter only when a value is present.
    #[must_use]
    pub fn with_opt(mut self, key: impl Into<String>, value: Option<impl Display>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Sort parameters into canonical order: ascending lexicographic by name,
    /// with any `signature` entry moved to the end.
    pub fn canonicalize(&mut self) {
        self.0
            .sort_by(|(a, _), (b, _)| (a == SIGNATURE_KEY).cmp(&(b == SIGNATURE_KEY)).then(a.cmp(b)));
    }

    /// `&`-joined `key=value` pairs in the current order.
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}
