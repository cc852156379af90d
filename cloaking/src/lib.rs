//! A headless cloaking engine for long scrollable lists.
//!
//! For scheduling (scroll debouncing, paced queue draining) and listener subscriptions, see the
//! `cloaking-adapter` crate.
//!
//! Only items near the viewport are materialized. Items scrolled far away are "cloaked": their
//! live content is released but their height is kept as a placeholder, so the scroll position and
//! scrollbar stay stable. The crate covers the windowing core: viewport bounds with slack, a
//! binary search for the first item in the window, a forward scan for the rest, cloak/uncloak
//! decisions, and an amortized uncloak queue.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a [`ViewportProbe`] (scroll offset, viewport height, content height)
//! - a [`Renderer`] that measures items and creates/releases their live content
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod fenwick;
mod list;
mod materializer;
mod notifier;
mod options;
mod probe;
pub mod range;
mod render;
mod state;
mod store;
mod types;


#[cfg(feature = "tracing")]
#[doc(hidden)]
pub mod __private {
    pub use tracing;
}

pub use list::{CloakedList, CommitReport, Cycle};
pub use materializer::{DrainReport, MaterializationController, Plan, UncloakQueue};
pub use notifier::{VisibilityChange, VisibilityNotifier, endpoint_changed};
pub use options::{
    CloakingOptions, DEFAULT_HEIGHT, DEFAULT_LOADING_TEXT, DEFAULT_SLACK_RATIO,
    DEFAULT_UNCLOAK_BATCH_SIZE, ObjectsSeenCallback, OffsetProvider, VisibleChangedCallback,
};
pub use probe::{ViewportProbe, ViewportSnapshot};
pub use render::{Measure, Renderer};
pub use state::ListStats;
pub use store::{Item, ItemStore};
pub use types::{ItemGeometry, ItemState, Range, Span, Window};
