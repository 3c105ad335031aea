//! Common types used throughout wp-collection
//!
//! Shared type aliases, the synchronize method tag, and the wire-level
//! parameter and header names of the WordPress REST API.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// Query parameter map with string keys and values
pub type QueryParams = HashMap<String, String>;

// ============================================================================
// Wire Names
// ============================================================================

/// Query parameter selecting the page of a paged listing
pub const PAGE_PARAM: &str = "page";

/// Query parameter naming the attribute a listing is ordered by
pub const ORDERBY_PARAM: &str = "orderby";

/// Query parameter selecting ascending/descending order
pub const ORDER_PARAM: &str = "order";

/// Request header carrying the session nonce credential
pub const NONCE_HEADER: &str = "X-WP-Nonce";

/// Response header carrying the total number of pages
pub const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// Response header carrying the total number of objects
pub const TOTAL_HEADER: &str = "x-wp-total";

// ============================================================================
// Synchronize Method
// ============================================================================

/// Method tag for a synchronize call
///
/// Only [`SyncMethod::Read`] triggers pagination bookkeeping; the other
/// methods get credential injection and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMethod {
    /// Create a record (POST)
    Create,
    /// Read a listing of records (GET)
    #[default]
    Read,
    /// Update a record (PUT)
    Update,
    /// Delete a record (DELETE)
    Delete,
}

impl From<SyncMethod> for reqwest::Method {
    fn from(method: SyncMethod) -> Self {
        match method {
            SyncMethod::Create => reqwest::Method::POST,
            SyncMethod::Read => reqwest::Method::GET,
            SyncMethod::Update => reqwest::Method::PUT,
            SyncMethod::Delete => reqwest::Method::DELETE,
        }
    }
}
