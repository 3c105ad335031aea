//! Paginated collection
//!
//! [`Collection`] is an in-memory list of JSON records kept in sync with a
//! paged REST endpoint. Every synchronize call goes through [`Collection::sync`],
//! which injects the nonce credential and maintains the pagination state;
//! [`Collection::fetch_more`] walks forward through the pages recorded there.

mod sync;

pub use sync::{BeforeSend, SyncOptions, SyncOutcome};


use crate::auth::{NoNonce, NonceProvider};
use crate::error::{Error, Result};
use crate::events::{Emitter, Subscription};
use crate::ordering::{sort_members, Comparator, SortSpec};
use crate::state::PageState;
use crate::types::{QueryParams, SyncMethod, PAGE_PARAM};
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Event emitted by a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionEvent {
    /// A fetch completed and the membership was updated
    Synced,
    /// A member was replaced in place
    MemberChanged,
}

/// Options for [`Collection::fetch`] and [`Collection::fetch_more`]
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    data: Option<QueryParams>,
    append: bool,
}

impl FetchOptions {
    /// Create empty fetch options
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

    /// Request an explicit page
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.param(PAGE_PARAM, page.to_string())
    }

    /// Replace the query parameters wholesale
    #[must_use]
    pub fn data(mut self, data: QueryParams) -> Self {
        self.data = Some(data);
        self
    }

    /// Append fetched records instead of replacing the membership
    #[must_use]
    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }
}

/// A collection of JSON records synchronized with a paged REST endpoint
pub struct Collection {
    client: reqwest::Client,
    endpoint: Url,
    nonce: Arc<dyn NonceProvider>,
    parent: Option<String>,
    members: Vec<Value>,
    state: PageState,
    events: Emitter<CollectionEvent>,
    comparator: Option<Comparator>,
    sort_armed: bool,
}

impl Collection {
    /// Start building a collection for the given endpoint URL
    pub fn builder(endpoint: impl Into<String>) -> CollectionBuilder {
        CollectionBuilder::new(endpoint)
    }

    /// The endpoint this collection synchronizes with
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The opaque parent association, if one was set
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// The pagination state
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// The current members, in collection order
    pub fn members(&self) -> &[Value] {
        &self.members
    }

    /// Number of members currently held
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the collection holds no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether another page is known to exist
    ///
    /// `None` until a successful paged read has reported full metadata.
    pub fn has_more(&self) -> Option<bool> {
        self.state.has_more()
    }

    /// Observe collection events; dropping the subscription unsubscribes
    pub fn on(
        &self,
        event: CollectionEvent,
        mut callback: impl FnMut() + Send + 'static,
    ) -> Subscription {
        self.events.subscribe(move |emitted| {
            if *emitted == event {
                callback();
            }
        })
    }

    /// Replace the member at `index`, re-sorting if sort-on-change is armed
    pub fn update_member(&mut self, index: usize, member: Value) -> Result<()> {
        if index >= self.members.len() {
            return Err(Error::MemberIndex { index });
        }
        self.members[index] = member;
        self.resort_if_armed()?;
        self.events.emit(&CollectionEvent::MemberChanged);
        Ok(())
    }

    /// Install a custom comparator used instead of the default ordering
    pub fn set_comparator(
        &mut self,
        comparator: impl Fn(&Value, &Value) -> Result<Ordering> + Send + Sync + 'static,
    ) {
        self.comparator = Some(Box::new(comparator));
    }

    /// Activate sort-on-change
    ///
    /// One-time and idempotent: returns `Ok(false)` without side effects when
    /// already armed, or when the recorded query has no `orderby` key. On
    /// first activation one immediate sort runs, and from then on every
    /// completed fetch or member change re-sorts the collection. The default
    /// ordering is resolved from the recorded query at each sort, so a later
    /// read that changes `orderby`/`order` sorts by the new parameters.
    pub fn arm_sort(&mut self) -> Result<bool> {
        if self.sort_armed {
            return Ok(false);
        }
        if SortSpec::from_query(self.state.query()).is_none() {
            return Ok(false);
        }
        self.sort_armed = true;
        self.sort()?;
        Ok(true)
    }

    /// Sort the members with the installed comparator, or the default
    /// ordering derived from the recorded query
    ///
    /// Errors when no comparator is installed and the query has no `orderby`
    /// key, or when any member fails the comparison; the member order is left
    /// untouched on error.
    pub fn sort(&mut self) -> Result<()> {
        if let Some(comparator) = &self.comparator {
            sort_members(&mut self.members, comparator.as_ref())
        } else {
            let spec = SortSpec::from_query(self.state.query())
                .ok_or_else(|| Error::sort("no 'orderby' query parameter is set"))?;
            sort_members(&mut self.members, &|a, b| spec.compare(a, b))
        }
    }

    fn resort_if_armed(&mut self) -> Result<()> {
        if !self.sort_armed {
            return Ok(());
        }
        // An armed default sort goes quiet when the active query no longer
        // orders the listing.
        if self.comparator.is_none() && SortSpec::from_query(self.state.query()).is_none() {
            return Ok(());
        }
        self.sort()
    }

    /// Fetch records from the endpoint
    ///
    /// Synchronizes with [`SyncMethod::Read`], decodes the body as a JSON
    /// array and installs it as the membership (appending when
    /// [`FetchOptions::append`] is set). Returns the number of records
    /// received. A response superseded by a newer read is decoded but leaves
    /// the membership untouched.
    pub async fn fetch(&mut self, options: FetchOptions) -> Result<usize> {
        let append = options.append;
        let sync_options = SyncOptions {
            data: options.data,
            ..SyncOptions::new()
        };
        let outcome = self.sync(SyncMethod::Read, sync_options).await?;

        let records = match outcome.body {
            Value::Array(records) => records,
            other => {
                return Err(Error::decode(format!(
                    "expected a JSON array of records, got {}",
                    json_kind(&other)
                )))
            }
        };
        let received = records.len();

        if outcome.applied {
            if append {
                self.members.extend(records);
            } else {
                self.members = records;
            }
            // re-sort first so observers see the settled order
            self.resort_if_armed()?;
            self.events.emit(&CollectionEvent::Synced);
        } else {
            debug!("Dropping {} records from a superseded fetch", received);
        }

        Ok(received)
    }

    /// Fetch the next page using the recorded query parameters
    ///
    /// Caller-supplied data is merged under the stored parameters (stored
    /// values win, except an explicit caller page). Without an explicit page,
    /// returns `Ok(None)` and issues no request when no further page exists;
    /// otherwise requests `current_page + 1`, defaulting to page 2 when no
    /// page has been fetched yet. Records are appended.
    pub async fn fetch_more(&mut self, options: Option<FetchOptions>) -> Result<Option<usize>> {
        let mut data = options.and_then(|o| o.data).unwrap_or_default();

        // Stored filters are applied after the caller's data and win; the
        // stored query never holds a page key, so an explicit caller page
        // survives.
        for (key, value) in self.state.query() {
            data.insert(key.clone(), value.clone());
        }

        if !data.contains_key(PAGE_PARAM) {
            if self.has_more() == Some(false) {
                return Ok(None);
            }
            data.insert(PAGE_PARAM.to_string(), self.state.next_page().to_string());
        }

        let received = self
            .fetch(FetchOptions::new().data(data).append(true))
            .await?;
        Ok(Some(received))
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("endpoint", &self.endpoint.as_str())
            .field("parent", &self.parent)
            .field("members", &self.members.len())
            .field("state", &self.state)
            .field("sort_armed", &self.sort_armed)
            .finish_non_exhaustive()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builder for [`Collection`]
pub struct CollectionBuilder {
    endpoint: String,
    client: Option<reqwest::Client>,
    nonce: Option<Arc<dyn NonceProvider>>,
    parent: Option<String>,
    query: QueryParams,
}

impl std::fmt::Debug for CollectionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionBuilder")
            .field("endpoint", &self.endpoint)
            .field("parent", &self.parent)
            .field("query", &self.query)
            .field("has_nonce", &self.nonce.is_some())
            .finish_non_exhaustive()
    }
}

impl CollectionBuilder {
    fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: None,
            nonce: None,
            parent: None,
            query: QueryParams::new(),
        }
    }

    /// Use a shared reqwest client instead of a fresh one
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Install a nonce provider; defaults to [`NoNonce`]
    #[must_use]
    pub fn nonce(mut self, provider: impl NonceProvider + 'static) -> Self {
        self.nonce = Some(Arc::new(provider));
        self
    }

    /// Record an opaque parent association identifier
    #[must_use]
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Seed an initial query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Seed several initial query parameters
    #[must_use]
    pub fn query_map(mut self, data: QueryParams) -> Self {
        self.query.extend(data);
        self
    }

    /// Build the collection
    pub fn build(self) -> Result<Collection> {
        let endpoint = Url::parse(&self.endpoint)?;
        Ok(Collection {
            client: self.client.unwrap_or_default(),
            endpoint,
            nonce: self.nonce.unwrap_or_else(|| Arc::new(NoNonce)),
            parent: self.parent,
            members: Vec::new(),
            state: PageState::with_query(self.query),
            events: Emitter::new(),
            comparator: None,
            sort_armed: false,
        })
    }
}
