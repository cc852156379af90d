// Example: running cycles against the store's own estimated layout (no layout engine).
use cloaking::{CloakedList, CloakingOptions, ItemGeometry, Measure, Renderer};

struct Null;

impl Measure for Null {
    fn measure(&self, _index: usize) -> Option<ItemGeometry> {
        None
    }
}

impl Renderer<u32> for Null {
    type Handle = ();

    fn materialize(&mut self, _index: usize, _content: &u32) -> Self::Handle {}

    fn release(&mut self, _index: usize, _handle: ()) {}

    fn apply_placeholder_height(&mut self, _index: usize, _pixels: u32) {}

    fn set_loading_label(&mut self, _index: usize, _text: &str) {}
}

fn main() {
    let mut list: CloakedList<u32, ()> =
        CloakedList::with_contents(CloakingOptions::new().with_slack_ratio(0.5), 0..1_000);
    list.set_enabled(true);

    // Pretend a few rows were rendered taller than the default.
    for i in [3, 4, 5] {
        list.record_height(i, 320);
    }
    println!("total_height={}", list.store().total_height());
    println!("row at 1000px={:?}", list.store().index_at_offset(1_000));

    let mut renderer = Null;
    for scroll_top in [0, 5_000, 60_000] {
        let Some(cycle) = list.recompute_estimated(scroll_top, 800) else {
            continue;
        };
        list.commit(&cycle, &mut renderer);
        println!(
            "scroll_top={scroll_top} range={:?} visible={:?} queued={}",
            cycle.range.materialize,
            cycle.range.visible,
            list.pending_uncloaks()
        );
    }
}
