//! Nonce provider implementations

/// Source of the session nonce attached to outgoing requests
///
/// Returning `None` means no credential is currently available; the request
/// is sent without the nonce header.
pub trait NonceProvider: Send + Sync {
    /// The current nonce value, if any
    fn nonce(&self) -> Option<String>;
}

/// A fixed nonce value known at construction time
#[derive(Debug, Clone)]
pub struct StaticNonce {
    value: String,
}

impl StaticNonce {
    /// Create a provider that always yields the given nonce
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl NonceProvider for StaticNonce {
    fn nonce(&self) -> Option<String> {
        Some(self.value.clone())
    }
}

/// No credential; requests are sent without the nonce header
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNonce;

impl NonceProvider for NoNonce {
    fn nonce(&self) -> Option<String> {
        None
    }
}

impl<F> NonceProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn nonce(&self) -> Option<String> {
        self()
    }
}
