use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use cloaking::{CloakingOptions, ItemGeometry, Measure, Renderer, Span, ViewportSnapshot};
use core::sync::atomic::{AtomicUsize, Ordering};

/// 100 items of 50px, recording what was materialized and released.
#[derive(Debug, Default)]
struct Stack {
    materialized: Vec<usize>,
    released: Vec<usize>,
    placeholders: usize,
    next_handle: u64,
}

impl Measure for Stack {
    fn measure(&self, index: usize) -> Option<ItemGeometry> {
        (index < 100).then(|| ItemGeometry::new(index as i64 * 50, 50))
    }
}

impl Renderer<u32> for Stack {
    type Handle = u64;

    fn materialize(&mut self, index: usize, _content: &u32) -> u64 {
        self.materialized.push(index);
        self.next_handle += 1;
        self.next_handle
    }

    fn release(&mut self, index: usize, _handle: u64) {
        self.released.push(index);
    }

    fn apply_placeholder_height(&mut self, _index: usize, _pixels: u32) {
        self.placeholders += 1;
    }

    fn set_loading_label(&mut self, _index: usize, _text: &str) {}
}

#[derive(Debug, Default)]
struct Source {
    target: Option<ScrollTarget>,
    signal: Option<TriggerSignal>,
    unsubscribed: Arc<AtomicUsize>,
}

impl EventSource for Source {
    fn subscribe(&mut self, target: &ScrollTarget, signal: TriggerSignal) -> Subscription {
        self.target = Some(target.clone());
        self.signal = Some(signal);
        let count = Arc::clone(&self.unsubscribed);
        Subscription::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }
}

impl Source {
    fn scroll(&self, now_ms: u64) {
        if let Some(signal) = &self.signal {
            signal.raise(now_ms);
        }
    }
}

fn viewport(scroll_top: i64) -> ViewportSnapshot {
    ViewportSnapshot::new(scroll_top, 500, 5000)
}

fn controller(slack_ratio: f32) -> Controller<u32, u64> {
    let list = cloaking::CloakedList::with_contents(
        CloakingOptions::new().with_slack_ratio(slack_ratio),
        0..100,
    );
    Controller::from_list(list, SchedulerOptions::new())
}

#[test]
fn debounce_restarts_on_every_trigger() {
    let mut s = ScrollScheduler::new(SchedulerOptions::new());
    s.trigger(0);
    assert_eq!(s.next_deadline(), None);

    s.start();
    s.trigger(0);
    assert!(!s.tick(5).any());
    s.trigger(8);
    assert_eq!(s.debounce_deadline(), Some(18));
    assert!(!s.tick(15).any());
    assert!(s.tick(18).recompute);
    assert!(s.take_recompute());
    assert!(!s.take_recompute());
    assert!(!s.tick(100).any());
}

#[test]
fn rearming_replaces_the_pending_timer() {
    let mut s = ScrollScheduler::new(SchedulerOptions::new().with_uncloak_interval_ms(40));
    s.start();
    s.schedule_drain(0);
    s.schedule_drain(20);
    assert_eq!(s.drain_deadline(), Some(60));
    assert!(!s.tick(40).drain);
    assert!(s.tick(60).drain);

    s.trigger(100);
    s.request_recompute();
    assert_eq!(s.debounce_deadline(), None);
    assert!(s.due().recompute);

    s.stop();
    assert_eq!(s.due(), Due::default());
    assert_eq!(s.next_deadline(), None);
}

#[test]
fn start_subscribes_and_recomputes_immediately() {
    let mut source = Source::default();
    let mut stack = Stack::default();
    let mut c = Controller::from_list(
        cloaking::CloakedList::with_contents(CloakingOptions::new(), 0..100u32),
        SchedulerOptions::new().with_scroll_target(ScrollTarget::selector(".feed")),
    );
    assert!(!c.list().is_enabled());

    c.start(&mut source);
    assert_eq!(source.target, Some(ScrollTarget::selector(".feed")));
    assert!(c.list().is_enabled());
    assert!(c.tick(0).recompute);

    let checkpoint = c.after_render(0, &viewport(0), &mut stack);
    assert_eq!(checkpoint.range.map(|r| r.materialize), Some(Span::new(0, 29)));
    assert_eq!(checkpoint.commit.map(|r| r.materialized), Some(10));
    assert_eq!(c.next_deadline(), Some(DEFAULT_UNCLOAK_INTERVAL_MS));
}

#[test]
fn scroll_jump_drains_in_paced_batches() {
    let mut source = Source::default();
    let mut stack = Stack::default();
    let mut c = controller(0.5);

    c.start(&mut source);
    c.tick(0);
    c.after_render(0, &viewport(0), &mut stack);

    let mut drains = Vec::new();
    while let Some(deadline) = c.next_deadline() {
        assert!(c.tick(deadline).drain);
        let drained = c.after_render(deadline, &viewport(0), &mut stack).drain;
        drains.push(drained.map_or(0, |d| d.materialized.len()));
    }
    assert_eq!(drains, alloc::vec![3, 3, 3, 1]);

    // A burst of scroll events coalesces into one recompute.
    source.scroll(300);
    assert!(!c.tick(300).any());
    source.scroll(305);
    assert!(!c.tick(310).any());
    assert!(c.tick(315).recompute);

    let checkpoint = c.after_render(315, &viewport(1000), &mut stack);
    assert_eq!(checkpoint.range.map(|r| r.materialize), Some(Span::new(15, 34)));
    let commit = checkpoint.commit.unwrap_or_default();
    assert_eq!(commit.released, 15);
    assert_eq!(commit.materialized, 10);
    assert_eq!(c.list().pending_uncloaks(), 5);
    assert_eq!(c.next_deadline(), Some(365));

    assert!(!c.tick(364).any());
    assert!(c.tick(365).drain);
    let first = c.after_render(365, &viewport(1000), &mut stack).drain;
    assert_eq!(first.map(|d| d.materialized), Some(alloc::vec![30, 31, 32]));
    assert_eq!(c.next_deadline(), Some(415));

    c.tick(415);
    let second = c.after_render(415, &viewport(1000), &mut stack).drain;
    assert_eq!(second.map(|d| d.materialized), Some(alloc::vec![33, 34]));
    assert_eq!(c.next_deadline(), None);
    assert!(!c.tick(10_000).any());
}

#[test]
fn content_changes_trigger_a_recompute() {
    let mut source = Source::default();
    let mut stack = Stack::default();
    let mut c: Controller<u32, u64> = Controller::new(CloakingOptions::new(), SchedulerOptions::new());

    c.start(&mut source);
    c.tick(0);
    let checkpoint = c.after_render(0, &viewport(0), &mut stack);
    assert_eq!(checkpoint.commit, None);
    assert_eq!(c.next_deadline(), None);

    let old = c.set_contents(0..100, 20);
    assert!(old.is_empty());
    assert_eq!(c.last_trigger(), Some(Trigger::ContentChanged));
    assert!(!c.tick(25).any());
    assert!(c.tick(30).recompute);

    let commit = c.after_render(30, &viewport(0), &mut stack).commit.unwrap_or_default();
    assert_eq!(commit.materialized, 10);
    assert_eq!(commit.placeholders, 90);
}

#[test]
fn teardown_cancels_timers_and_unsubscribes() {
    let mut source = Source::default();
    let mut stack = Stack::default();
    let mut c = controller(1.0);

    c.start(&mut source);
    c.tick(0);
    c.after_render(0, &viewport(0), &mut stack);
    assert!(c.next_deadline().is_some());
    let materialized = stack.materialized.len();

    c.teardown();
    assert_eq!(source.unsubscribed.load(Ordering::SeqCst), 1);
    assert!(!c.is_started());
    assert_eq!(c.next_deadline(), None);
    assert_eq!(c.list().pending_uncloaks(), 0);

    source.scroll(60);
    assert!(!c.tick(100).any());
    assert_eq!(
        c.after_render(100, &viewport(0), &mut stack),
        Checkpoint::default()
    );
    assert_eq!(stack.materialized.len(), materialized);

    c.teardown();
    assert_eq!(source.unsubscribed.load(Ordering::SeqCst), 1);
}

#[test]
fn subscription_unsubscribes_exactly_once() {
    let count = Arc::new(AtomicUsize::new(0));

    let c = Arc::clone(&count);
    let s = Subscription::new(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    assert!(s.is_active());
    s.unsubscribe();
    assert_eq!(count.load(Ordering::SeqCst), 1);

    let c = Arc::clone(&count);
    drop(Subscription::new(move || {
        c.fetch_add(1, Ordering::SeqCst);
    }));
    assert_eq!(count.load(Ordering::SeqCst), 2);

    assert!(!Subscription::noop().is_active());
}

#[test]
fn signal_keeps_only_the_latest_trigger() {
    let signal = TriggerSignal::default();
    assert!(!signal.is_raised());
    assert_eq!(signal.take(), None);

    let listener = signal.clone();
    listener.raise(5);
    listener.raise(9);
    assert!(signal.is_raised());
    assert_eq!(signal.take(), Some(9));
    assert_eq!(signal.take(), None);
}
