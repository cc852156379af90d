use cloaking::{CloakingOptions, ItemGeometry, Measure, Renderer, ViewportSnapshot};
use cloaking_adapter::{
    Controller, EventSource, SchedulerOptions, ScrollTarget, Subscription, TriggerSignal,
};

struct Rows;

impl Measure for Rows {
    fn measure(&self, index: usize) -> Option<ItemGeometry> {
        Some(ItemGeometry::new(index as i64 * 50, 50))
    }
}

impl Renderer<u32> for Rows {
    type Handle = u32;

    fn materialize(&mut self, _index: usize, content: &u32) -> u32 {
        *content
    }

    fn release(&mut self, _index: usize, _handle: u32) {}

    fn apply_placeholder_height(&mut self, _index: usize, _pixels: u32) {}

    fn set_loading_label(&mut self, _index: usize, _text: &str) {}
}

/// Stands in for a UI toolkit: keeps the signal so the loop below can "scroll".
#[derive(Default)]
struct Host {
    signal: Option<TriggerSignal>,
}

impl EventSource for Host {
    fn subscribe(&mut self, target: &ScrollTarget, signal: TriggerSignal) -> Subscription {
        println!("subscribe {target:?}");
        self.signal = Some(signal);
        Subscription::new(|| println!("unsubscribe"))
    }
}

fn main() {
    // Example: a timer loop driving debounced recomputes and paced queue drains.
    //
    // An adapter would:
    // - forward scroll/resize events to the signal (here: `host.signal`)
    // - call tick(now_ms) from a timer, sleeping until next_deadline() when idle
    // - call after_render(...) once its render pass settles whenever tick() reported due work
    let mut c: Controller<u32, u32> = Controller::new(
        CloakingOptions::new().with_slack_ratio(0.5),
        SchedulerOptions::new(),
    );
    c.set_contents(0..1_000, 0);

    let mut host = Host::default();
    let mut rows = Rows;
    c.start(&mut host);

    let mut scroll_top = 0i64;
    for now_ms in (0..600u64).step_by(5) {
        // Scroll 200px every 20ms for the first 100ms.
        if now_ms > 0 && now_ms <= 100 && now_ms % 20 == 0 {
            scroll_top += 200;
            if let Some(signal) = &host.signal {
                signal.raise(now_ms);
            }
        }

        if !c.tick(now_ms).any() {
            continue;
        }
        let probe = ViewportSnapshot::new(scroll_top, 500, 50_000);
        let checkpoint = c.after_render(now_ms, &probe, &mut rows);
        if let Some(range) = checkpoint.range {
            println!(
                "t={now_ms} recompute range={:?} commit={:?}",
                range.materialize, checkpoint.commit
            );
        }
        if let Some(drain) = checkpoint.drain {
            println!("t={now_ms} drained {:?}", drain.materialized);
        }
    }

    c.teardown();
    println!("next_deadline={:?}", c.next_deadline());
}
