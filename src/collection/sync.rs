//! Pagination-aware synchronization

use super::Collection;
use crate::error::{Error, Result};
use crate::state::PageTotals;
use crate::types::{QueryParams, SyncMethod, NONCE_HEADER, PAGE_PARAM};
use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::debug;

/// Hook run on the assembled request just before it is sent
///
/// Chained after the nonce header is attached, so the hook sees (and may
/// override) the fully prepared request.
pub type BeforeSend = Box<dyn Fn(RequestBuilder) -> RequestBuilder + Send + Sync>;

/// Options for a synchronize call
#[derive(Default)]
pub struct SyncOptions {
    /// Query parameters; for reads these become the recorded filter state
    pub data: Option<QueryParams>,
    /// JSON request body, for non-read methods
    pub body: Option<Value>,
    /// Pre-send hook
    pub before_send: Option<BeforeSend>,
}

impl SyncOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data
            .get_or_insert_with(QueryParams::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the JSON request body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set a pre-send hook
    #[must_use]
    pub fn before_send(
        mut self,
        hook: impl Fn(RequestBuilder) -> RequestBuilder + Send + Sync + 'static,
    ) -> Self {
        self.before_send = Some(Box::new(hook));
        self
    }
}

impl std::fmt::Debug for SyncOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncOptions")
            .field("data", &self.data)
            .field("body", &self.body)
            .field("has_before_send", &self.before_send.is_some())
            .finish()
    }
}

/// Result of a successful synchronize call
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// HTTP status of the response (always a success status)
    pub status: reqwest::StatusCode,
    /// Parsed JSON response body
    pub body: Value,
    /// Whether the pagination transition was applied; `false` for non-read
    /// methods and for read responses superseded by a newer read
    pub applied: bool,
}

impl Collection {
    /// Synchronize with the server
    ///
    /// Attaches the nonce credential (when the provider yields one) for every
    /// method, then chains the caller's pre-send hook. For [`SyncMethod::Read`]
    /// the pagination state transitions around the request: the filter
    /// parameters are recorded (page key stripped) before send, sort-on-change
    /// is re-armed, and on a success response the metadata headers are parsed
    /// into the totals. Error semantics are the transport's own; non-success
    /// statuses surface as [`Error::HttpStatus`].
    pub async fn sync(&mut self, method: SyncMethod, options: SyncOptions) -> Result<SyncOutcome> {
        let ticket = if method == SyncMethod::Read {
            let ticket = self.state.begin_read(options.data.as_ref());
            self.arm_sort()?;
            Some(ticket)
        } else {
            None
        };

        let http_method: reqwest::Method = method.into();
        let mut request = self.client.request(http_method.clone(), self.endpoint.clone());

        match method {
            SyncMethod::Read => {
                // Materialize the canonical filters plus the page key.
                request = request.query(self.state.query());
                if let Some(page) = ticket.and_then(|t| t.requested_page()) {
                    request = request.query(&[(PAGE_PARAM, page.to_string())]);
                }
            }
            _ => {
                if let Some(data) = &options.data {
                    request = request.query(data);
                }
                if let Some(body) = &options.body {
                    request = request.json(body);
                }
            }
        }

        if let Some(nonce) = self.nonce.nonce() {
            request = request.header(NONCE_HEADER, nonce);
        }
        if let Some(hook) = &options.before_send {
            request = hook(request);
        }

        debug!("Synchronizing: {} {}", http_method, self.endpoint);
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let totals = PageTotals::from_headers(response.headers());
        let body: Value = response.json().await.map_err(Error::Http)?;

        let applied = match ticket {
            Some(ticket) => self.state.complete_read(ticket, totals),
            None => false,
        };

        debug!(
            "Synchronized: {} {} ({})",
            http_method, self.endpoint, status
        );
        Ok(SyncOutcome {
            status,
            body,
            applied,
        })
    }
}
