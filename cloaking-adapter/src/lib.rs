//! Adapter utilities for the `cloaking` crate.
//!
//! The `cloaking` crate is UI-agnostic and only decides what to cloak and uncloak. This crate
//! provides the framework-neutral plumbing an adapter needs around it:
//!
//! - Scroll debouncing and paced draining of the uncloak queue, driven by `now_ms` timestamps
//! - Explicit listener subscriptions that are torn down with the list
//! - A `Controller` that runs trigger → recompute → post-render commit → drain
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod scheduler;
mod subscription;

#[cfg(test)]
mod tests;

pub use controller::{Checkpoint, Controller};
pub use scheduler::{
    DEFAULT_SCROLL_DEBOUNCE_MS, DEFAULT_UNCLOAK_INTERVAL_MS, Due, SchedulerOptions,
    ScrollScheduler, Timer,
};
pub use subscription::{EventSource, ScrollTarget, Subscription, Trigger, TriggerSignal};
