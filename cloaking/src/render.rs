use crate::ItemGeometry;

/// Reads the rendered geometry of list items.
///
/// Measuring is usually expensive (it forces layout in a DOM), so the engine only calls it for
/// the handful of items touched by the binary search and the forward scan.
pub trait Measure {
    /// Returns `None` when the item has no layout yet; the engine treats it as zero-height.
    fn measure(&self, index: usize) -> Option<ItemGeometry>;
}

impl<M: Measure + ?Sized> Measure for &M {
    fn measure(&self, index: usize) -> Option<ItemGeometry> {
        (**self).measure(index)
    }
}

/// The rendering collaborator: turns content into live handles and back.
///
/// All requests are fire-and-forget. They are issued from [`crate::CloakedList::commit`] and
/// [`crate::CloakedList::drain`], which adapters run at their post-render checkpoint.
pub trait Renderer<C>: Measure {
    type Handle;

    fn materialize(&mut self, index: usize, content: &C) -> Self::Handle;

    fn release(&mut self, index: usize, handle: Self::Handle);

    /// Reserves `pixels` of vertical space for a cloaked item.
    fn apply_placeholder_height(&mut self, index: usize, pixels: u32);

    fn set_loading_label(&mut self, index: usize, text: &str);
}
