//! Collection event observation
//!
//! A small observer registry. Registration hands back a [`Subscription`]
//! guard; dropping the guard unsubscribes, so a listener's lifetime is
//! explicit and testable rather than tied to the collection forever.

mod emitter;

pub use emitter::{Emitter, Subscription};
