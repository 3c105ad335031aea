//! Tests for pagination state transitions

use super::*;
use crate::types::QueryParams;
use pretty_assertions::assert_eq;
use reqwest::header::{HeaderMap, HeaderValue};

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn totals(pages: u32, objects: u64) -> PageTotals {
    PageTotals {
        pages: Some(pages),
        objects: Some(objects),
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_state_default_is_unknown() {
    let state = PageState::new();
    assert_eq!(state.current_page(), None);
    assert_eq!(state.total_pages(), None);
    assert_eq!(state.total_objects(), None);
    assert!(state.query().is_empty());
}

#[test]
fn test_seed_query_strips_page_key() {
    let state = PageState::with_query(params(&[("orderby", "title"), ("page", "4")]));
    assert_eq!(state.query().get("orderby"), Some(&"title".to_string()));
    assert!(!state.query().contains_key("page"));
}

// ============================================================================
// begin_read
// ============================================================================

#[test]
fn test_paged_read_sets_placeholder() {
    let mut state = PageState::new();
    let ticket = state.begin_read(Some(&params(&[("page", "3")])));

    assert_eq!(ticket.requested_page(), Some(3));
    assert_eq!(state.current_page(), Some(2));
    assert!(!state.query().contains_key("page"));
}

#[test]
fn test_unpaged_read_resets_all_fields() {
    let mut state = PageState::new();
    let ticket = state.begin_read(Some(&params(&[("page", "3")])));
    state.complete_read(ticket, totals(5, 97));

    let ticket = state.begin_read(Some(&params(&[("search", "rust")])));
    assert_eq!(ticket.requested_page(), None);
    assert_eq!(state.current_page(), None);
    assert_eq!(state.total_pages(), None);
    assert_eq!(state.total_objects(), None);
    assert_eq!(state.query().get("search"), Some(&"rust".to_string()));
}

#[test]
fn test_non_numeric_page_is_treated_as_fresh() {
    let mut state = PageState::new();
    let ticket = state.begin_read(Some(&params(&[("page", "3")])));
    state.complete_read(ticket, totals(5, 97));

    let ticket = state.begin_read(Some(&params(&[("page", "abc")])));
    assert_eq!(ticket.requested_page(), None);
    assert_eq!(state.current_page(), None);
    assert_eq!(state.total_pages(), None);
    assert_eq!(state.total_objects(), None);
    assert!(!state.query().contains_key("page"));
}

#[test]
fn test_read_without_data_clears_query() {
    let mut state = PageState::with_query(params(&[("orderby", "date")]));
    state.begin_read(None);
    assert!(state.query().is_empty());
}

#[test]
fn test_read_replaces_query_and_strips_page() {
    let mut state = PageState::new();
    state.begin_read(Some(&params(&[
        ("page", "2"),
        ("orderby", "title"),
        ("per_page", "10"),
    ])));

    assert!(!state.query().contains_key("page"));
    assert_eq!(state.query().len(), 2);
    assert_eq!(state.query().get("per_page"), Some(&"10".to_string()));
}

// ============================================================================
// complete_read
// ============================================================================

#[test]
fn test_fresh_read_completes_at_page_one() {
    let mut state = PageState::new();
    let ticket = state.begin_read(None);
    assert!(state.complete_read(ticket, totals(5, 97)));

    assert_eq!(state.current_page(), Some(1));
    assert_eq!(state.total_pages(), Some(5));
    assert_eq!(state.total_objects(), Some(97));
}

#[test]
fn test_paged_read_completes_at_requested_page() {
    let mut state = PageState::new();
    let ticket = state.begin_read(Some(&params(&[("page", "3")])));
    assert!(state.complete_read(ticket, totals(5, 97)));

    // placeholder 2 advances by one on completion
    assert_eq!(state.current_page(), Some(3));
    assert_eq!(state.total_pages(), Some(5));
    assert_eq!(state.total_objects(), Some(97));
}

#[test]
fn test_stale_response_is_discarded() {
    let mut state = PageState::new();
    let stale = state.begin_read(Some(&params(&[("page", "2")])));
    let fresh = state.begin_read(Some(&params(&[("page", "5")])));

    assert!(!state.complete_read(stale, totals(9, 99)));
    assert_eq!(state.total_pages(), None);

    assert!(state.complete_read(fresh, totals(5, 97)));
    assert_eq!(state.current_page(), Some(5));
}

#[test]
fn test_missing_totals_stay_unknown() {
    let mut state = PageState::new();
    let ticket = state.begin_read(None);
    assert!(state.complete_read(ticket, PageTotals::default()));

    assert_eq!(state.current_page(), Some(1));
    assert_eq!(state.total_pages(), None);
    assert_eq!(state.total_objects(), None);
}

// ============================================================================
// has_more / next_page
// ============================================================================

#[test]
fn test_has_more_indeterminate_until_metadata() {
    let mut state = PageState::new();
    assert_eq!(state.has_more(), None);

    let ticket = state.begin_read(None);
    state.complete_read(ticket, PageTotals::default());
    // current page known, totals still unknown
    assert_eq!(state.has_more(), None);
}

#[test]
fn test_has_more_compares_current_to_total() {
    let mut state = PageState::new();
    let ticket = state.begin_read(Some(&params(&[("page", "3")])));
    state.complete_read(ticket, totals(5, 97));
    assert_eq!(state.has_more(), Some(true));

    let ticket = state.begin_read(Some(&params(&[("page", "5")])));
    state.complete_read(ticket, totals(5, 97));
    assert_eq!(state.has_more(), Some(false));
}

#[test]
fn test_next_page_defaults_to_two() {
    let mut state = PageState::new();
    assert_eq!(state.next_page(), 2);

    let ticket = state.begin_read(None);
    state.complete_read(ticket, totals(5, 97));
    // current page 1 -> still page 2
    assert_eq!(state.next_page(), 2);
}

#[test]
fn test_next_page_advances_past_current() {
    let mut state = PageState::new();
    let ticket = state.begin_read(Some(&params(&[("page", "3")])));
    state.complete_read(ticket, totals(5, 97));
    assert_eq!(state.next_page(), 4);
}

// ============================================================================
// Header parsing
// ============================================================================

#[test]
fn test_totals_from_headers() {
    let mut headers = HeaderMap::new();
    headers.insert("x-wp-totalpages", HeaderValue::from_static("5"));
    headers.insert("x-wp-total", HeaderValue::from_static("97"));

    assert_eq!(PageTotals::from_headers(&headers), totals(5, 97));
}

#[test]
fn test_totals_missing_headers() {
    let headers = HeaderMap::new();
    assert_eq!(PageTotals::from_headers(&headers), PageTotals::default());
}

#[test]
fn test_totals_non_numeric_headers_degrade() {
    let mut headers = HeaderMap::new();
    headers.insert("x-wp-totalpages", HeaderValue::from_static("many"));
    headers.insert("x-wp-total", HeaderValue::from_static("97"));

    let totals = PageTotals::from_headers(&headers);
    assert_eq!(totals.pages, None);
    assert_eq!(totals.objects, Some(97));
}
