//! Client-side ordering
//!
//! The `orderby`/`order` query parameters name an attribute and a direction;
//! [`SortSpec`] turns them into a comparator over JSON members. Comparator
//! failures (no `orderby`, a member missing the attribute, values without a
//! natural ordering) are usage errors and abort the sort with the member
//! order untouched.

mod comparator;

pub use comparator::{sort_members, Comparator, Order, SortSpec};
