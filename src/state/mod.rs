//! Pagination state
//!
//! Per-collection bookkeeping of the current page, total pages and total
//! objects, plus the last-used query filters. State changes happen through
//! two explicit transitions: [`PageState::begin_read`] before a read is
//! issued and [`PageState::complete_read`] when its response arrives. Each
//! read carries a sequence ticket so a response that lost the race to a
//! newer read cannot overwrite fresher bookkeeping.

mod types;

pub use types::{PageState, PageTotals, ReadTicket};

#[cfg(test)]
mod tests;
