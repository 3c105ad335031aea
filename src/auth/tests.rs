//! Tests for nonce providers

use super::*;

#[test]
fn test_static_nonce() {
    let provider = StaticNonce::new("abc123");
    assert_eq!(provider.nonce(), Some("abc123".to_string()));
}

#[test]
fn test_no_nonce() {
    assert_eq!(NoNonce.nonce(), None);
}

#[test]
fn test_closure_provider() {
    let provider = || Some("from-closure".to_string());
    assert_eq!(NonceProvider::nonce(&provider), Some("from-closure".to_string()));

    let empty = || None;
    assert_eq!(NonceProvider::nonce(&empty), None);
}
