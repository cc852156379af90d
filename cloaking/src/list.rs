use alloc::vec::Vec;

use crate::materializer::{materialize_item, release_item, reserve_placeholder};
use crate::store::{Item, ItemStore};
use crate::{
    CloakingOptions, DrainReport, ItemState, ListStats, MaterializationController, Measure, Plan,
    Range, Renderer, ViewportProbe, ViewportSnapshot, VisibilityChange, VisibilityNotifier,
    Window, range,
};

/// Everything one recompute decided, waiting to be committed.
#[derive(Clone, Debug, PartialEq)]
pub struct Cycle<C> {
    pub window: Window,
    pub range: Range,
    pub plan: Plan,
    pub visibility: VisibilityChange,
    /// Strictly visible contents in list order; handed to `on_objects_seen` at commit.
    pub seen: Vec<C>,
    /// Item that should show the loading label.
    pub loading: Option<usize>,
    /// Stamped by the list at recompute; `seen` is delivered once per generation.
    generation: u64,
}

impl<C> Cycle<C> {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Renderer requests actually issued by a commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommitReport {
    pub released: usize,
    pub materialized: usize,
    pub placeholders: usize,
    pub loading_label: bool,
}

/// A headless cloaked list.
///
/// The list owns the item descriptors and the uncloak queue, but no UI objects. An adapter
/// drives it in two phases:
/// - [`Self::recompute`] reads geometry, decides what to cloak/uncloak and fires the
///   top/bottom visibility hooks.
/// - [`Self::commit`] (at the post-render checkpoint) issues release requests first, then
///   immediate materializations, the loading label and finally `on_objects_seen`.
///
/// Queued items are materialized in bounded batches by [`Self::drain`]. The
/// `cloaking-adapter` crate provides the timers that sequence all of this.
#[derive(Clone, Debug)]
pub struct CloakedList<C, H> {
    options: CloakingOptions<C>,
    store: ItemStore<C, H>,
    controller: MaterializationController,
    notifier: VisibilityNotifier<C>,
    enabled: bool,
    /// Items were added since the last commit.
    fresh: bool,
    last_window: Option<Window>,
    last_range: Option<Range>,
    /// Generation of the last recompute.
    generation: u64,
    /// Newest generation whose `seen` list reached `on_objects_seen`.
    seen_generation: u64,
}

impl<C: Clone + PartialEq, H> CloakedList<C, H> {
    /// Creates an empty list. Recompute stays a no-op until [`Self::set_enabled`] is called.
    pub fn new(options: CloakingOptions<C>) -> Self {
        let options = options.sanitized();
        cdebug!(
            slack_ratio = options.slack_ratio,
            default_height = options.default_height,
            batch_size = options.uncloak_batch_size,
            "CloakedList::new"
        );
        Self {
            store: ItemStore::new(options.default_height),
            controller: MaterializationController::new(options.uncloak_batch_size),
            notifier: VisibilityNotifier::default(),
            options,
            enabled: false,
            fresh: false,
            last_window: None,
            last_range: None,
            generation: 0,
            seen_generation: 0,
        }
    }

    pub fn with_contents(options: CloakingOptions<C>, contents: impl IntoIterator<Item = C>) -> Self {
        let mut list = Self::new(options);
        for content in contents {
            list.push(content);
        }
        list
    }

    pub fn options(&self) -> &CloakingOptions<C> {
        &self.options
    }

    pub fn set_options(&mut self, options: CloakingOptions<C>) {
        self.options = options.sanitized();
        self.store.set_default_height(self.options.default_height);
        self.controller
            .set_batch_size(self.options.uncloak_batch_size);
        cdebug!(options = ?self.options, "CloakedList::set_options");
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut CloakingOptions<C>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn store(&self) -> &ItemStore<C, H> {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&Item<C, H>> {
        self.store.get(index)
    }

    pub fn state(&self, index: usize) -> Option<ItemState> {
        self.store.state(index)
    }

    pub fn controller(&self) -> &MaterializationController {
        &self.controller
    }

    pub fn pending_uncloaks(&self) -> usize {
        self.controller.queue().len()
    }

    pub fn top_visible(&self) -> Option<&C> {
        self.notifier.top()
    }

    pub fn bottom_visible(&self) -> Option<&C> {
        self.notifier.bottom()
    }

    pub fn last_window(&self) -> Option<Window> {
        self.last_window
    }

    pub fn last_range(&self) -> Option<Range> {
        self.last_range
    }

    pub fn stats(&self) -> ListStats {
        ListStats {
            len: self.store.len(),
            cloaked: self.store.count_in(ItemState::Cloaked),
            materializing: self.store.count_in(ItemState::Materializing),
            materialized: self.store.count_in(ItemState::Materialized),
            live: self.store.iter().filter(|it| it.is_live()).count(),
            queued: self.controller.queue().len(),
        }
    }

    fn initial_state(&self) -> ItemState {
        if self.options.uncloak_default {
            ItemState::Materialized
        } else {
            ItemState::Cloaked
        }
    }

    pub fn push(&mut self, content: C) -> usize {
        self.fresh = true;
        let state = self.initial_state();
        self.store.push(content, state)
    }

    pub fn insert(&mut self, index: usize, content: C) {
        let index = index.min(self.store.len());
        self.fresh = true;
        self.last_range = None;
        let state = self.initial_state();
        self.controller.queue_mut().on_insert(index);
        self.store.insert(index, content, state);
    }

    /// Removes an item and hands back its content and live handle (if any) for the caller to
    /// dispose of.
    pub fn remove(&mut self, index: usize) -> Option<(C, Option<H>)> {
        let item = self.store.remove(index)?;
        self.controller.queue_mut().on_remove(index);
        self.last_range = None;
        Some(item.into_parts())
    }

    /// Replaces every item, returning the previous contents and live handles.
    pub fn set_contents(&mut self, contents: impl IntoIterator<Item = C>) -> Vec<(C, Option<H>)> {
        self.controller.clear(&mut self.store);
        let old = self.store.take_all();
        self.last_range = None;
        for content in contents {
            self.push(content);
        }
        cdebug!(removed = old.len(), len = self.store.len(), "set_contents");
        old.into_iter().map(Item::into_parts).collect()
    }

    /// Records a rendered height (e.g. after the adapter laid out a materialized item).
    pub fn record_height(&mut self, index: usize, height: u32) {
        self.store.record_height(index, height);
    }

    /// Computes the window for the current probe reading and fixed offsets.
    pub fn window_for(&self, probe: &impl ViewportProbe) -> Window {
        let (top, bottom) = self.options.fixed_offsets();
        ViewportSnapshot::capture(probe).window(self.options.slack_ratio, top, bottom)
    }

    /// Locates the window and applies cloak/uncloak decisions.
    ///
    /// Returns `None` (and does nothing) while disabled or when the list is empty.
    pub fn recompute<M: Measure + ?Sized>(
        &mut self,
        probe: &impl ViewportProbe,
        geometry: &M,
    ) -> Option<Cycle<C>> {
        if !self.enabled || self.store.is_empty() {
            return None;
        }
        let window = self.window_for(probe);
        let range = range::locate(geometry, self.store.len(), &window)?;
        Some(self.finish(window, range))
    }

    /// Same as [`Self::recompute`], using the store's estimated layout as geometry.
    pub fn recompute_estimated(&mut self, scroll_top: i64, viewport_height: u32) -> Option<Cycle<C>> {
        if !self.enabled || self.store.is_empty() {
            return None;
        }
        let probe = ViewportSnapshot::new(scroll_top, viewport_height, self.store.total_height());
        let window = self.window_for(&probe);
        let range = range::locate(&self.store, self.store.len(), &window)?;
        Some(self.finish(window, range))
    }

    fn finish(&mut self, window: Window, range: Range) -> Cycle<C> {
        let plan = self.controller.apply(&range, &mut self.store);

        let (top, bottom, seen) = match range.visible {
            Some(v) => (
                self.store.content(v.first).cloned(),
                self.store.content(v.last).cloned(),
                v.indexes()
                    .filter_map(|i| self.store.content(i).cloned())
                    .collect(),
            ),
            None => (None, None, Vec::new()),
        };
        let visibility = self
            .notifier
            .observe(top.as_ref(), bottom.as_ref(), &self.options);

        let loading = self.loading_candidate(range.scan_end);

        ctrace!(
            viewport_top = window.viewport_top,
            viewport_bottom = window.viewport_bottom,
            first = range.materialize.first,
            last = range.materialize.last,
            visible = ?range.visible,
            "recompute"
        );
        self.last_window = Some(window);
        self.last_range = Some(range);
        self.generation += 1;

        Cycle {
            window,
            range,
            plan,
            visibility,
            seen,
            loading,
            generation: self.generation,
        }
    }

    /// First item at or after `start` that is not materialized, unless it already shows the
    /// label.
    fn loading_candidate(&self, start: usize) -> Option<usize> {
        let (index, item) = self
            .store
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, it)| !it.state.is_materialized())?;
        (!item.loading).then_some(index)
    }

    /// Issues the renderer requests for a cycle.
    ///
    /// Requests are re-validated against the current item state, so committing a stale cycle
    /// (or the same cycle twice) never double-materializes or double-releases.
    /// `on_objects_seen` fires at most once per cycle, and never for a cycle older than one
    /// already delivered.
    pub fn commit<R: Renderer<C, Handle = H>>(
        &mut self,
        cycle: &Cycle<C>,
        renderer: &mut R,
    ) -> CommitReport {
        let mut report = CommitReport::default();
        for &index in &cycle.plan.release {
            if release_item(&mut self.store, index, renderer) {
                report.released += 1;
            }
        }
        for &index in &cycle.plan.materialize {
            if self.store.state(index) == Some(ItemState::Materialized)
                && materialize_item(&mut self.store, index, renderer)
            {
                report.materialized += 1;
            }
        }

        let settled = self.settle(renderer);
        report.materialized += settled.materialized;
        report.placeholders = settled.placeholders;

        if let Some(index) = cycle.loading {
            if let Some(item) = self.store.get_mut(index) {
                if !item.state.is_materialized() && !item.loading && item.handle.is_none() {
                    item.loading = true;
                    renderer.set_loading_label(index, &self.options.loading_text);
                    report.loading_label = true;
                }
            }
        }

        if !cycle.seen.is_empty() && cycle.generation > self.seen_generation {
            self.seen_generation = cycle.generation;
            if let Some(cb) = &self.options.on_objects_seen {
                cb(cycle.seen.as_slice());
            }
        }

        ctrace!(
            released = report.released,
            materialized = report.materialized,
            placeholders = report.placeholders,
            "commit"
        );
        report
    }

    /// Brings freshly added items to their initial rendered state: cloaked items get their
    /// placeholder height, and with `uncloak_default` the rest are materialized.
    ///
    /// Cheap when nothing was added since the last call.
    pub fn settle<R: Renderer<C, Handle = H>>(&mut self, renderer: &mut R) -> CommitReport {
        let mut report = CommitReport::default();
        if !self.fresh {
            return report;
        }
        self.fresh = false;

        for index in 0..self.store.len() {
            match self.store.state(index) {
                Some(ItemState::Materialized) => {
                    if materialize_item(&mut self.store, index, renderer) {
                        report.materialized += 1;
                    }
                }
                Some(_) => {
                    if reserve_placeholder(&mut self.store, index, renderer) {
                        report.placeholders += 1;
                    }
                }
                None => {}
            }
        }
        report
    }

    /// Materializes the next batch of queued items.
    pub fn drain<R: Renderer<C, Handle = H>>(&mut self, renderer: &mut R) -> DrainReport {
        self.controller.drain(&mut self.store, renderer)
    }

    /// Disables the list and drops every pending uncloak.
    ///
    /// Live handles stay with their items; the owner disposes of them via `set_contents` or
    /// `remove`.
    pub fn teardown(&mut self) {
        cdebug!(queued = self.controller.queue().len(), "teardown");
        self.enabled = false;
        self.controller.clear(&mut self.store);
        self.notifier.reset();
        self.last_range = None;
        self.last_window = None;
    }
}
