use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};

/// The scroll container whose events drive a list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollTarget {
    /// The top-level viewport (window scrolling).
    #[default]
    Viewport,
    /// A nested scroll container, looked up by the host (e.g. a CSS selector).
    Selector(String),
}

impl ScrollTarget {
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector(selector.into())
    }
}

/// Raw events that can invalidate the materialized window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    Scroll,
    TouchMove,
    /// The scroll container changed size.
    Resize,
    /// Items were added, removed or replaced.
    ContentChanged,
    /// A fixed header/footer that shrinks the viewport changed size.
    OffsetElementResized,
}

const NO_TRIGGER: u64 = u64::MAX;

/// A cloneable handle through which listeners report raw triggers.
///
/// Listeners usually run inside host callbacks that cannot borrow the controller, so the time of
/// the latest trigger is published here and picked up by the next `Controller::tick`.
#[derive(Clone, Debug)]
pub struct TriggerSignal(Arc<AtomicU64>);

impl Default for TriggerSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerSignal {
    pub fn new() -> Self {
        Self(Arc::new(AtomicU64::new(NO_TRIGGER)))
    }

    /// Records a raw trigger observed at `now_ms`. Later triggers overwrite earlier ones.
    pub fn raise(&self, now_ms: u64) {
        self.0.store(now_ms.min(NO_TRIGGER - 1), Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire) != NO_TRIGGER
    }

    /// Returns the latest trigger time and clears the signal.
    pub fn take(&self) -> Option<u64> {
        let t = self.0.swap(NO_TRIGGER, Ordering::AcqRel);
        (t != NO_TRIGGER).then_some(t)
    }
}

/// Registers the listeners a cloaked list needs on the host's event system.
pub trait EventSource {
    /// Subscribes to scroll, touch-move and resize events of `target`, plus size changes of any
    /// fixed offset elements. Every event should call [`TriggerSignal::raise`].
    ///
    /// Dropping or unsubscribing the returned [`Subscription`] must remove all of them.
    fn subscribe(&mut self, target: &ScrollTarget, signal: TriggerSignal) -> Subscription;
}

type Unsubscribe = Box<dyn FnOnce() + Send>;

/// A live set of listeners, removed exactly once on [`Self::unsubscribe`] or drop.
pub struct Subscription {
    unsubscribe: Option<Unsubscribe>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with nothing to remove.
    pub fn noop() -> Self {
        Self { unsubscribe: None }
    }

    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }

    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
