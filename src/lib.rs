//! # wp-collection
//!
//! Pagination-aware collection client for WordPress-style REST APIs.
//!
//! A [`Collection`] holds an in-memory list of JSON records and keeps it in
//! sync with a paged REST endpoint. Around the plain HTTP request it layers:
//!
//! - **Pagination bookkeeping**: the current page, total pages and total
//!   objects are tracked from the `x-wp-totalpages` / `x-wp-total` response
//!   headers, with [`Collection::fetch_more`] walking forward through the
//!   pages and [`Collection::has_more`] answering whether more exist.
//! - **Credential injection**: an `X-WP-Nonce` header sourced from an
//!   injected [`NonceProvider`].
//! - **Sort-on-change**: an `orderby`/`order` query keeps the in-memory
//!   records ordered across fetches and member mutations.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wp_collection::{Collection, FetchOptions, Result, StaticNonce};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut posts = Collection::builder("https://example.com/wp-json/wp/v2/posts")
//!         .nonce(StaticNonce::new("a1b2c3d4"))
//!         .query("orderby", "title")
//!         .build()?;
//!
//!     posts.fetch(FetchOptions::new()).await?;
//!     while let Some(received) = posts.fetch_more(None).await? {
//!         println!("fetched {received} more records");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and wire names
pub mod types;

/// Nonce credential providers
pub mod auth;

/// Pagination state and transitions
pub mod state;

/// Event observation
pub mod events;

/// Client-side ordering
pub mod ordering;

/// The paginated collection
pub mod collection;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::{NoNonce, NonceProvider, StaticNonce};
pub use collection::{
    BeforeSend, Collection, CollectionBuilder, CollectionEvent, FetchOptions, SyncOptions,
    SyncOutcome,
};
pub use error::{Error, Result};
pub use events::Subscription;
pub use ordering::{Order, SortSpec};
pub use state::{PageState, PageTotals};
pub use types::{QueryParams, SyncMethod};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
