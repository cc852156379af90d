/// Lifecycle state of a single list item.
///
/// The only legal transitions are `Cloaked → Materializing → Materialized → Cloaked`, plus
/// `Materializing → Cloaked` (an item that scrolls back out before the queue reaches it) and
/// `Cloaked → Materialized` (an item that becomes strictly visible).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemState {
    #[default]
    Cloaked,
    /// Queued for lazy materialization, not rendered yet.
    Materializing,
    Materialized,
}

impl ItemState {
    pub fn is_cloaked(self) -> bool {
        matches!(self, Self::Cloaked)
    }

    pub fn is_materialized(self) -> bool {
        matches!(self, Self::Materialized)
    }
}

/// Rendered geometry of an item in the scroll axis.
///
/// `top` is in the same coordinate space as the viewport's scroll offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemGeometry {
    pub top: i64,
    pub height: u32,
}

impl ItemGeometry {
    pub fn new(top: i64, height: u32) -> Self {
        Self { top, height }
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.top.saturating_add(self.height as i64)
    }
}

/// An inclusive span of item indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub first: usize,
    pub last: usize,
}

impl Span {
    pub fn new(first: usize, last: usize) -> Self {
        debug_assert!(first <= last, "Span: first > last ({first} > {last})");
        Self { first, last }
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.first && index <= self.last
    }

    /// Number of indexes in the span (never zero).
    pub fn count(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn indexes(&self) -> core::ops::RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// Pixel bounds used by one recompute cycle.
///
/// All bounds are inclusive: `viewport_bottom` is the last visible pixel row, not one past it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    /// First visible pixel after fixed top offsets.
    pub viewport_top: i64,
    /// Last visible pixel after fixed bottom offsets.
    pub viewport_bottom: i64,
    pub slack: i64,
    pub materialize_top: i64,
    pub materialize_bottom: i64,
}

impl Window {
    /// Whether a laid-out item intersects the un-slacked viewport.
    ///
    /// A zero-height item counts when its top lies strictly below `viewport_top`.
    pub fn is_visible(&self, geometry: ItemGeometry) -> bool {
        geometry.bottom() > self.viewport_top && geometry.top <= self.viewport_bottom
    }
}

/// Result of locating a window in the item list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Items to keep live (viewport plus slack).
    pub materialize: Span,
    /// Items strictly inside the viewport; `None` when nothing is on screen.
    pub visible: Option<Span>,
    /// The index that ended the forward scan: the first item below the window, or the last item.
    pub scan_end: usize,
}

impl Range {
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.is_some_and(|v| v.contains(index))
    }
}
