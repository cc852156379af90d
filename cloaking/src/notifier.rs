use crate::CloakingOptions;

/// Which visible endpoints changed in a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityChange {
    pub top: bool,
    pub bottom: bool,
}

impl VisibilityChange {
    pub fn any(&self) -> bool {
        self.top || self.bottom
    }
}

/// Compares two endpoint values.
pub fn endpoint_changed<C: PartialEq>(prev: Option<&C>, next: Option<&C>) -> bool {
    prev != next
}

/// Tracks the topmost and bottommost strictly visible content between cycles.
#[derive(Clone, Debug)]
pub struct VisibilityNotifier<C> {
    top: Option<C>,
    bottom: Option<C>,
}

impl<C> Default for VisibilityNotifier<C> {
    fn default() -> Self {
        Self {
            top: None,
            bottom: None,
        }
    }
}

impl<C: Clone + PartialEq> VisibilityNotifier<C> {
    pub fn top(&self) -> Option<&C> {
        self.top.as_ref()
    }

    pub fn bottom(&self) -> Option<&C> {
        self.bottom.as_ref()
    }

    /// Records the new endpoints and fires the matching hook once per changed endpoint.
    pub fn observe(
        &mut self,
        top: Option<&C>,
        bottom: Option<&C>,
        options: &CloakingOptions<C>,
    ) -> VisibilityChange {
        let change = VisibilityChange {
            top: endpoint_changed(self.top.as_ref(), top),
            bottom: endpoint_changed(self.bottom.as_ref(), bottom),
        };

        if change.top {
            self.top = top.cloned();
            if let Some(cb) = &options.on_top_visible_changed {
                cb(top);
            }
        }
        if change.bottom {
            self.bottom = bottom.cloned();
            if let Some(cb) = &options.on_bottom_visible_changed {
                cb(bottom);
            }
        }
        change
    }

    /// Forgets the previous endpoints without firing hooks.
    pub fn reset(&mut self) {
        self.top = None;
        self.bottom = None;
    }
}
