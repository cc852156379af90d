use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::store::ItemStore;
use crate::{ItemState, Range, Renderer};

/// Cloak/uncloak decisions for one cycle.
///
/// `apply` already moves each item to its target state; the renderer requests listed here are
/// issued later, at commit time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    /// Live items that left the materialize range, in index order.
    pub release: Vec<usize>,
    /// Strictly visible items to materialize right away.
    pub materialize: Vec<usize>,
    /// Items newly appended to the uncloak queue.
    pub queued: Vec<usize>,
    /// Queued items that left the materialize range before being drained.
    pub dropped: Vec<usize>,
}

impl Plan {
    /// Whether the plan asks the renderer for anything.
    pub fn is_empty(&self) -> bool {
        self.release.is_empty() && self.materialize.is_empty() && self.queued.is_empty()
    }
}

/// Outcome of one bounded drain of the uncloak queue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrainReport {
    pub materialized: Vec<usize>,
    /// Stale entries popped without consuming budget.
    pub skipped: usize,
    pub remaining: usize,
}

/// FIFO of item indexes awaiting lazy materialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UncloakQueue {
    entries: VecDeque<usize>,
}

impl UncloakQueue {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().copied()
    }

    fn push(&mut self, index: usize) {
        debug_assert!(!self.contains(index), "index {index} queued twice");
        self.entries.push_back(index);
    }

    fn pop(&mut self) -> Option<usize> {
        self.entries.pop_front()
    }

    fn retain(&mut self, f: impl FnMut(&usize) -> bool) {
        self.entries.retain(f);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    /// Adjusts indexes after an item was inserted at `index`.
    pub(crate) fn on_insert(&mut self, index: usize) {
        for i in self.entries.iter_mut() {
            if *i >= index {
                *i += 1;
            }
        }
    }

    /// Adjusts indexes after the item at `index` was removed.
    pub(crate) fn on_remove(&mut self, index: usize) {
        self.entries.retain(|&i| i != index);
        for i in self.entries.iter_mut() {
            if *i > index {
                *i -= 1;
            }
        }
    }
}

/// Decides which items to cloak and uncloak, and owns the amortized uncloak queue.
#[derive(Clone, Debug)]
pub struct MaterializationController {
    queue: UncloakQueue,
    batch_size: usize,
}

impl MaterializationController {
    pub fn new(batch_size: usize) -> Self {
        Self {
            queue: UncloakQueue::default(),
            batch_size: batch_size.max(1),
        }
    }

    pub fn queue(&self) -> &UncloakQueue {
        &self.queue
    }

    pub(crate) fn queue_mut(&mut self) -> &mut UncloakQueue {
        &mut self.queue
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn set_batch_size(&mut self, batch_size: usize) {
        self.batch_size = batch_size.max(1);
    }

    /// Applies a located range to the store.
    ///
    /// - Strictly visible items become `Materialized` immediately.
    /// - Other items in the materialize range are queued if they are still cloaked.
    /// - Items outside the range become `Cloaked`; live ones are scheduled for release and pending
    ///   queue entries are dropped.
    ///
    /// Applying the same range again (after the plan was committed) yields an empty plan.
    pub fn apply<C, H>(&mut self, range: &Range, store: &mut ItemStore<C, H>) -> Plan {
        let mut plan = Plan::default();

        for (i, item) in store.iter_mut().enumerate() {
            if !range.materialize.contains(i) {
                if item.state == ItemState::Materializing {
                    plan.dropped.push(i);
                }
                item.state = ItemState::Cloaked;
                if item.handle.is_some() {
                    plan.release.push(i);
                }
                continue;
            }

            if range.is_visible(i) {
                item.state = ItemState::Materialized;
                if item.handle.is_none() {
                    plan.materialize.push(i);
                }
                continue;
            }

            if item.state == ItemState::Cloaked {
                if item.handle.is_some() {
                    // Released this cycle but back in range before the commit: keep it live.
                    item.state = ItemState::Materialized;
                } else {
                    item.state = ItemState::Materializing;
                    self.queue.push(i);
                    plan.queued.push(i);
                }
            }
        }

        self.queue
            .retain(|&i| store.state(i) == Some(ItemState::Materializing));

        ctrace!(
            release = plan.release.len(),
            materialize = plan.materialize.len(),
            queued = plan.queued.len(),
            dropped = plan.dropped.len(),
            pending = self.queue.len(),
            "apply"
        );
        plan
    }

    /// Materializes up to `batch_size` queued items, in FIFO order.
    ///
    /// Entries whose item is no longer `Materializing` are skipped without consuming budget.
    pub fn drain<C, R: Renderer<C>>(
        &mut self,
        store: &mut ItemStore<C, R::Handle>,
        renderer: &mut R,
    ) -> DrainReport {
        let mut report = DrainReport::default();
        while report.materialized.len() < self.batch_size {
            let Some(index) = self.queue.pop() else {
                break;
            };
            if store.state(index) != Some(ItemState::Materializing) {
                report.skipped += 1;
                continue;
            }
            materialize_item(store, index, renderer);
            report.materialized.push(index);
        }
        report.remaining = self.queue.len();
        ctrace!(
            materialized = report.materialized.len(),
            skipped = report.skipped,
            remaining = report.remaining,
            "drain"
        );
        report
    }

    /// Empties the queue, returning queued items to `Cloaked`.
    pub fn clear<C, H>(&mut self, store: &mut ItemStore<C, H>) {
        for index in self.queue.iter() {
            if let Some(item) = store.get_mut(index) {
                if item.state == ItemState::Materializing {
                    item.state = ItemState::Cloaked;
                }
            }
        }
        self.queue.clear();
    }
}

/// Creates live content for an item. A no-op when the item already holds a handle.
pub(crate) fn materialize_item<C, R: Renderer<C>>(
    store: &mut ItemStore<C, R::Handle>,
    index: usize,
    renderer: &mut R,
) -> bool {
    let Some(item) = store.get_mut(index) else {
        return false;
    };
    item.state = ItemState::Materialized;
    if item.handle.is_some() {
        return false;
    }
    let handle = renderer.materialize(index, &item.content);
    item.handle = Some(handle);
    item.placeholder = None;
    item.loading = false;
    true
}

/// Releases a cloaked item's live content, reserving its last measured height first.
///
/// A no-op unless the item is `Cloaked` and still holds a handle.
pub(crate) fn release_item<C, R: Renderer<C>>(
    store: &mut ItemStore<C, R::Handle>,
    index: usize,
    renderer: &mut R,
) -> bool {
    let Some(item) = store.get(index) else {
        return false;
    };
    if item.state != ItemState::Cloaked || item.handle.is_none() {
        return false;
    }

    let measured = renderer
        .measure(index)
        .map(|g| g.height)
        .filter(|&h| h > 0);
    let height = measured
        .or(item.measured_height)
        .unwrap_or(store.default_height());
    store.record_height(index, height);

    let Some(item) = store.get_mut(index) else {
        return false;
    };
    let Some(handle) = item.handle.take() else {
        return false;
    };
    item.placeholder = Some(height);
    renderer.apply_placeholder_height(index, height);
    renderer.release(index, handle);
    true
}

/// Reserves the placeholder height for a cloaked item that has none applied yet.
pub(crate) fn reserve_placeholder<C, R: Renderer<C>>(
    store: &mut ItemStore<C, R::Handle>,
    index: usize,
    renderer: &mut R,
) -> bool {
    let Some(height) = store.reserved_height(index) else {
        return false;
    };
    let Some(item) = store.get_mut(index) else {
        return false;
    };
    if item.handle.is_some() || item.placeholder.is_some() {
        return false;
    }
    item.placeholder = Some(height);
    renderer.apply_placeholder_height(index, height);
    true
}
