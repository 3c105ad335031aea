//! Pagination state types and transitions

use crate::types::{QueryParams, PAGE_PARAM, TOTAL_HEADER, TOTAL_PAGES_HEADER};
use reqwest::header::HeaderMap;
use std::str::FromStr;
use tracing::warn;

/// Totals parsed from the response metadata headers
///
/// A missing or non-numeric header parses to `None` rather than an error;
/// the answer is simply unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageTotals {
    /// Value of `x-wp-totalpages`, if parseable
    pub pages: Option<u32>,
    /// Value of `x-wp-total`, if parseable
    pub objects: Option<u64>,
}

impl PageTotals {
    /// Parse the total-pages and total-objects headers from a response
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            pages: parse_header(headers, TOTAL_PAGES_HEADER),
            objects: parse_header(headers, TOTAL_HEADER),
        }
    }
}

/// Parse a base-10 numeric header, degrading to `None` on anything else
fn parse_header<T: FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    let raw = headers.get(name)?.to_str().ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring non-numeric {} header: {:?}", name, raw);
            None
        }
    }
}

/// Sequence ticket issued by [`PageState::begin_read`]
///
/// Identifies one in-flight read so its completion can be discarded if a
/// newer read has begun in the meantime.
#[derive(Debug, Clone, Copy)]
pub struct ReadTicket {
    seq: u64,
    requested_page: Option<u32>,
}

impl ReadTicket {
    /// The page number explicitly requested by this read, if any
    pub fn requested_page(&self) -> Option<u32> {
        self.requested_page
    }
}

/// Per-collection pagination bookkeeping
///
/// The three numeric fields are all `None` until a successful read completes
/// with page metadata, and return to `None` together whenever a fresh
/// (non-paged) read is issued. `query` holds the last-used filter parameters
/// and never contains the page key; the page key is reinstated only into the
/// materialized outgoing request.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    query: QueryParams,
    current_page: Option<u32>,
    total_pages: Option<u32>,
    total_objects: Option<u64>,
    seq: u64,
}

impl PageState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state seeded with initial query parameters
    ///
    /// A page key in the seed is stripped, same as on any read.
    pub fn with_query(mut query: QueryParams) -> Self {
        query.remove(PAGE_PARAM);
        Self {
            query,
            ..Self::default()
        }
    }

    /// The canonical filter parameters of the last read
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Last successfully fetched page, or `None` if unknown
    pub fn current_page(&self) -> Option<u32> {
        self.current_page
    }

    /// Total pages reported by the server, or `None` if unknown
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Total objects reported by the server, or `None` if unknown
    pub fn total_objects(&self) -> Option<u64> {
        self.total_objects
    }

    /// Record that a read is about to be issued
    ///
    /// Replaces the stored filters with a copy of `data` (page key stripped),
    /// or clears them when `data` is absent. A read without an explicit page
    /// is a fresh query and resets all three numeric fields; a paged read
    /// sets `current_page` to `requested - 1` as a placeholder that the
    /// completion overwrites. A non-numeric page value is reported and the
    /// read treated as fresh.
    pub fn begin_read(&mut self, data: Option<&QueryParams>) -> ReadTicket {
        let raw_page = data.and_then(|d| d.get(PAGE_PARAM));
        let requested_page = raw_page.and_then(|raw| raw.parse::<u32>().ok());
        if let (Some(raw), None) = (raw_page, requested_page) {
            warn!("Ignoring non-numeric page parameter: {:?}", raw);
        }

        match data {
            Some(data) => {
                self.query = data.clone();
                self.query.remove(PAGE_PARAM);
            }
            None => self.query.clear(),
        }

        match requested_page {
            Some(page) => self.current_page = Some(page.saturating_sub(1)),
            None => {
                self.current_page = None;
                self.total_pages = None;
                self.total_objects = None;
            }
        }

        self.seq += 1;
        ReadTicket {
            seq: self.seq,
            requested_page,
        }
    }

    /// Record that the read identified by `ticket` completed successfully
    ///
    /// Installs the parsed totals and advances `current_page` (to 1 when it
    /// was unknown, else by one). Returns `false` without touching anything
    /// when a newer read has begun since the ticket was issued.
    pub fn complete_read(&mut self, ticket: ReadTicket, totals: PageTotals) -> bool {
        if ticket.seq != self.seq {
            warn!(
                "Discarding stale read response (seq {} superseded by {})",
                ticket.seq, self.seq
            );
            return false;
        }

        self.total_pages = totals.pages;
        self.total_objects = totals.objects;
        self.current_page = Some(self.current_page.map_or(1, |page| page + 1));
        true
    }

    /// Whether another page is known to exist
    ///
    /// `None` until at least one successful paged read has completed with
    /// full metadata; the answer is literally unknown before that.
    pub fn has_more(&self) -> Option<bool> {
        let current = self.current_page?;
        let total = self.total_pages?;
        self.total_objects?;
        Some(current < total)
    }

    /// The page a sequential forward fetch should request
    ///
    /// Page 2 when no page has been fetched yet (unknown or <= 1), otherwise
    /// `current_page + 1`.
    pub fn next_page(&self) -> u32 {
        match self.current_page {
            Some(page) if page > 1 => page + 1,
            _ => 2,
        }
    }
}
