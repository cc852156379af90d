use alloc::vec::Vec;

use cloaking::{
    CloakedList, CloakingOptions, CommitReport, DrainReport, Range, Renderer, ViewportProbe,
};

use crate::{
    Due, EventSource, SchedulerOptions, ScrollScheduler, Subscription, Trigger, TriggerSignal,
};

/// What one post-render checkpoint did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Checkpoint {
    /// The range of the recompute cycle that was committed, if one ran.
    pub range: Option<Range>,
    pub commit: Option<CommitReport>,
    pub drain: Option<DrainReport>,
}

/// A framework-neutral controller that wraps a `cloaking::CloakedList` and sequences it.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `start` once the list is mounted (subscribes listeners, requests the first recompute)
/// - `trigger` (or [`TriggerSignal::raise`] from inside listeners) when raw events occur
/// - `tick(now_ms)` from a timer/frame loop
/// - `after_render` once the host's current render pass has settled, whenever `tick` reported
///   due work
/// - `teardown` when the list is destroyed
#[derive(Debug)]
pub struct Controller<C, H> {
    list: CloakedList<C, H>,
    scheduler: ScrollScheduler,
    signal: TriggerSignal,
    subscription: Option<Subscription>,
    last_trigger: Option<Trigger>,
}

impl<C: Clone + PartialEq, H> Controller<C, H> {
    pub fn new(options: CloakingOptions<C>, scheduler: SchedulerOptions) -> Self {
        Self::from_list(CloakedList::new(options), scheduler)
    }

    pub fn from_list(list: CloakedList<C, H>, scheduler: SchedulerOptions) -> Self {
        Self {
            list,
            scheduler: ScrollScheduler::new(scheduler),
            signal: TriggerSignal::new(),
            subscription: None,
            last_trigger: None,
        }
    }

    pub fn list(&self) -> &CloakedList<C, H> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut CloakedList<C, H> {
        &mut self.list
    }

    pub fn into_list(self) -> CloakedList<C, H> {
        self.list
    }

    pub fn scheduler(&self) -> &ScrollScheduler {
        &self.scheduler
    }

    pub fn set_scheduler_options(&mut self, options: SchedulerOptions) {
        self.scheduler.set_options(options);
    }

    /// A handle for listeners registered outside of [`Self::start`].
    pub fn signal(&self) -> TriggerSignal {
        self.signal.clone()
    }

    /// The most recent trigger reported through [`Self::trigger`].
    pub fn last_trigger(&self) -> Option<Trigger> {
        self.last_trigger
    }

    pub fn is_started(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Subscribes the list's listeners, enables it and requests an immediate recompute.
    pub fn start(&mut self, source: &mut impl EventSource) {
        if self.is_started() {
            cwarn!("Controller::start called twice");
            return;
        }
        let target = self.scheduler.options().scroll_target.clone();
        self.subscription = Some(source.subscribe(&target, self.signal.clone()));
        self.list.set_enabled(true);
        self.scheduler.start();
        self.scheduler.request_recompute();
        cdebug!(scroll_target = ?target, len = self.list.len(), "Controller::start");
    }

    /// Reports a raw trigger observed by the adapter itself.
    pub fn trigger(&mut self, trigger: Trigger, now_ms: u64) {
        ctrace!(trigger = ?trigger, now_ms, "trigger");
        self.last_trigger = Some(trigger);
        self.scheduler.trigger(now_ms);
    }

    /// Advances timers, absorbing triggers raised through the signal.
    ///
    /// When the result has due work, call [`Self::after_render`] once the host has rendered.
    pub fn tick(&mut self, now_ms: u64) -> Due {
        if let Some(raised) = self.signal.take() {
            self.scheduler.trigger(raised);
        }
        self.scheduler.tick(now_ms)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    /// Runs the due work against fresh geometry.
    ///
    /// A due recompute is located, applied and committed in one go, then the drain cadence is
    /// restarted. A due drain materializes the next batch and schedules the following one, or
    /// suspends the cadence once the queue is empty.
    pub fn after_render<R: Renderer<C, Handle = H>>(
        &mut self,
        now_ms: u64,
        probe: &impl ViewportProbe,
        renderer: &mut R,
    ) -> Checkpoint {
        let mut checkpoint = Checkpoint::default();
        if !self.scheduler.is_active() {
            return checkpoint;
        }

        if self.scheduler.take_recompute() {
            if let Some(cycle) = self.list.recompute(probe, &*renderer) {
                checkpoint.commit = Some(self.list.commit(&cycle, renderer));
                checkpoint.range = Some(cycle.range);
            }
            self.reschedule_drain(now_ms);
        }

        if self.scheduler.take_drain() {
            checkpoint.drain = Some(self.list.drain(renderer));
            self.reschedule_drain(now_ms);
        }
        checkpoint
    }

    fn reschedule_drain(&mut self, now_ms: u64) {
        if self.list.pending_uncloaks() > 0 {
            self.scheduler.schedule_drain(now_ms);
        } else {
            self.scheduler.suspend_drain();
        }
    }

    /// Cancels all timers, removes the listeners and clears the uncloak queue.
    ///
    /// Nothing runs after this until the next [`Self::start`].
    pub fn teardown(&mut self) {
        cdebug!(pending = self.list.pending_uncloaks(), "Controller::teardown");
        self.scheduler.stop();
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.signal.take();
        self.list.teardown();
    }

    pub fn push(&mut self, content: C, now_ms: u64) -> usize {
        let index = self.list.push(content);
        self.trigger(Trigger::ContentChanged, now_ms);
        index
    }

    pub fn insert(&mut self, index: usize, content: C, now_ms: u64) {
        self.list.insert(index, content);
        self.trigger(Trigger::ContentChanged, now_ms);
    }

    pub fn remove(&mut self, index: usize, now_ms: u64) -> Option<(C, Option<H>)> {
        let removed = self.list.remove(index)?;
        self.trigger(Trigger::ContentChanged, now_ms);
        Some(removed)
    }

    pub fn set_contents(
        &mut self,
        contents: impl IntoIterator<Item = C>,
        now_ms: u64,
    ) -> Vec<(C, Option<H>)> {
        let old = self.list.set_contents(contents);
        self.trigger(Trigger::ContentChanged, now_ms);
        old
    }
}
