//! Nonce credential providers
//!
//! The WordPress REST API authenticates same-origin requests with a session
//! nonce sent in the `X-WP-Nonce` header. Rather than reading an ambient
//! settings object, the collection takes a [`NonceProvider`] at construction
//! and consults it on every request.

mod provider;

pub use provider::{NoNonce, NonceProvider, StaticNonce};

#[cfg(test)]
mod tests;
