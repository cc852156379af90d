// Example: one recompute/commit cycle, then draining the uncloak queue.
use cloaking::{CloakedList, CloakingOptions, ItemGeometry, Measure, Renderer, ViewportSnapshot};

/// Rows of 40px laid out top to bottom; "live content" is just a counter.
struct Rows {
    live: usize,
}

impl Measure for Rows {
    fn measure(&self, index: usize) -> Option<ItemGeometry> {
        Some(ItemGeometry::new(index as i64 * 40, 40))
    }
}

impl Renderer<String> for Rows {
    type Handle = usize;

    fn materialize(&mut self, index: usize, content: &String) -> usize {
        self.live += 1;
        println!("materialize #{index}: {content}");
        index
    }

    fn release(&mut self, _index: usize, _handle: usize) {
        self.live -= 1;
    }

    fn apply_placeholder_height(&mut self, _index: usize, _pixels: u32) {}

    fn set_loading_label(&mut self, index: usize, text: &str) {
        println!("label #{index}: {text}");
    }
}

fn main() {
    let options = CloakingOptions::new()
        .with_default_height(40)
        .with_on_top_visible_changed(Some(|c: Option<&String>| println!("top -> {c:?}")));
    let mut list: CloakedList<String, usize> =
        CloakedList::with_contents(options, (0..10_000).map(|i| format!("row {i}")));
    list.set_enabled(true);

    let mut rows = Rows { live: 0 };
    let probe = ViewportSnapshot::new(200_000, 600, 400_000);
    if let Some(cycle) = list.recompute(&probe, &rows) {
        println!("window={:?}", cycle.window);
        println!("range={:?}", cycle.range);
        let report = list.commit(&cycle, &mut rows);
        println!("commit={report:?}");
    }

    while list.pending_uncloaks() > 0 {
        let drained = list.drain(&mut rows);
        println!("drained {:?}, {} left", drained.materialized, drained.remaining);
    }
    println!("live={} stats={:?}", rows.live, list.stats());
}
