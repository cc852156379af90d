use alloc::vec::Vec;

use crate::fenwick::Fenwick;
use crate::{ItemGeometry, ItemState, Measure};

/// One list entry.
///
/// `content` is owned by the caller's data model and never copied by the engine except to hand
/// it to visibility hooks. `handle` is present only once the renderer has materialized the item.
#[derive(Clone, Debug)]
pub struct Item<C, H> {
    pub(crate) content: C,
    pub(crate) state: ItemState,
    pub(crate) measured_height: Option<u32>,
    pub(crate) handle: Option<H>,
    /// Placeholder height currently applied while cloaked.
    pub(crate) placeholder: Option<u32>,
    pub(crate) loading: bool,
}

impl<C, H> Item<C, H> {
    fn new(content: C, state: ItemState) -> Self {
        Self {
            content,
            state,
            measured_height: None,
            handle: None,
            placeholder: None,
            loading: false,
        }
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn measured_height(&self) -> Option<u32> {
        self.measured_height
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn placeholder(&self) -> Option<u32> {
        self.placeholder
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the renderer currently holds live content for this item.
    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// Splits a removed item into its content and (if still live) its handle.
    pub fn into_parts(self) -> (C, Option<H>) {
        (self.content, self.handle)
    }
}

/// Ordered item descriptors backing the list.
///
/// Besides the items themselves, the store keeps prefix sums over each item's reserved height
/// (its last measured height, or the default). That gives hosts without a real layout engine an
/// estimated layout: `ItemStore` implements [`Measure`] by stacking reserved heights from 0.
#[derive(Clone, Debug)]
pub struct ItemStore<C, H> {
    items: Vec<Item<C, H>>,
    default_height: u32,
    heights: Fenwick,
}

impl<C, H> ItemStore<C, H> {
    pub fn new(default_height: u32) -> Self {
        Self {
            items: Vec::new(),
            default_height,
            heights: Fenwick::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item<C, H>> {
        self.items.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Item<C, H>> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item<C, H>> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item<C, H>> {
        self.items.iter_mut()
    }

    pub fn content(&self, index: usize) -> Option<&C> {
        self.items.get(index).map(|it| &it.content)
    }

    pub fn state(&self, index: usize) -> Option<ItemState> {
        self.items.get(index).map(|it| it.state)
    }

    pub fn count_in(&self, state: ItemState) -> usize {
        self.items.iter().filter(|it| it.state == state).count()
    }

    pub fn default_height(&self) -> u32 {
        self.default_height
    }

    pub(crate) fn set_default_height(&mut self, default_height: u32) {
        if self.default_height == default_height {
            return;
        }
        self.default_height = default_height;
        self.rebuild_heights();
    }

    pub(crate) fn push(&mut self, content: C, state: ItemState) -> usize {
        let index = self.items.len();
        self.items.push(Item::new(content, state));
        self.heights.push(self.default_height as u64);
        index
    }

    pub(crate) fn insert(&mut self, index: usize, content: C, state: ItemState) {
        let index = index.min(self.items.len());
        self.items.insert(index, Item::new(content, state));
        self.rebuild_heights();
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Item<C, H>> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.rebuild_heights();
        Some(item)
    }

    pub(crate) fn take_all(&mut self) -> Vec<Item<C, H>> {
        self.heights = Fenwick::new();
        core::mem::take(&mut self.items)
    }

    /// Height an item occupies while cloaked.
    pub fn reserved_height(&self, index: usize) -> Option<u32> {
        self.items
            .get(index)
            .map(|it| it.measured_height.unwrap_or(self.default_height))
    }

    /// Records a rendered height for an item. Zero heights are ignored (not laid out yet).
    pub(crate) fn record_height(&mut self, index: usize, height: u32) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        if height == 0 {
            return;
        }
        let cur = item.measured_height.unwrap_or(self.default_height);
        item.measured_height = Some(height);
        self.heights.add(index, height as i64 - cur as i64);
    }

    /// Sum of all reserved heights.
    pub fn total_height(&self) -> u64 {
        self.heights.total()
    }

    /// Estimated top offset of an item.
    pub fn offset_of(&self, index: usize) -> Option<u64> {
        (index < self.items.len()).then(|| self.heights.prefix_sum(index))
    }

    /// Estimated item at a pixel offset, clamped to the last item.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        let consumed = self.heights.lower_bound(offset);
        Some(consumed.min(self.items.len() - 1))
    }

    fn rebuild_heights(&mut self) {
        let default_height = self.default_height;
        self.heights = Fenwick::from_heights(
            self.items
                .iter()
                .map(|it| it.measured_height.unwrap_or(default_height)),
        );
        debug_assert_eq!(self.heights.len(), self.items.len());
    }
}

impl<C, H> Measure for ItemStore<C, H> {
    fn measure(&self, index: usize) -> Option<ItemGeometry> {
        let top = self.offset_of(index)?;
        let height = self.reserved_height(index)?;
        Some(ItemGeometry::new(top as i64, height))
    }
}
