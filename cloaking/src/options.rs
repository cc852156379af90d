use alloc::sync::Arc;

pub const DEFAULT_SLACK_RATIO: f32 = 1.0;
pub const DEFAULT_HEIGHT: u32 = 100;
pub const DEFAULT_LOADING_TEXT: &str = "Loading…";
pub const DEFAULT_UNCLOAK_BATCH_SIZE: usize = 3;

/// A pixel-height provider for fixed elements (sticky headers/footers) that shrink the effective
/// viewport. It is queried on every recompute.
pub type OffsetProvider = Arc<dyn Fn() -> u32 + Send + Sync>;

/// Fired when the topmost or bottommost strictly visible content changes.
///
/// The argument is `None` when nothing is visible.
pub type VisibleChangedCallback<C> = Arc<dyn Fn(Option<&C>) + Send + Sync>;

/// Receives the ordered sequence of strictly visible contents, once per committed cycle.
pub type ObjectsSeenCallback<C> = Arc<dyn Fn(&[C]) + Send + Sync>;

/// Configuration for [`crate::CloakedList`].
///
/// Closures are stored in `Arc`s, so cloning is cheap and adapters can tweak a few fields and
/// hand the options back via `CloakedList::set_options`.
pub struct CloakingOptions<C> {
    /// Extra margin above and below the viewport, as a fraction of the viewport height.
    ///
    /// Values that are not strictly positive fall back to `1.0`.
    pub slack_ratio: f32,
    /// Placeholder height for items that were never measured.
    ///
    /// Zero falls back to the default (100).
    pub default_height: u32,
    /// Label requested for the first unready item past the materialized window.
    pub loading_text: Arc<str>,
    /// Maximum number of queued items materialized per drain.
    ///
    /// Zero falls back to the default (3).
    pub uncloak_batch_size: usize,
    /// Materialize freshly added items right away instead of starting them cloaked.
    pub uncloak_default: bool,

    pub fixed_top_offset: Option<OffsetProvider>,
    pub fixed_bottom_offset: Option<OffsetProvider>,

    pub on_top_visible_changed: Option<VisibleChangedCallback<C>>,
    pub on_bottom_visible_changed: Option<VisibleChangedCallback<C>>,
    pub on_objects_seen: Option<ObjectsSeenCallback<C>>,
}

impl<C> Clone for CloakingOptions<C> {
    fn clone(&self) -> Self {
        Self {
            slack_ratio: self.slack_ratio,
            default_height: self.default_height,
            loading_text: Arc::clone(&self.loading_text),
            uncloak_batch_size: self.uncloak_batch_size,
            uncloak_default: self.uncloak_default,
            fixed_top_offset: self.fixed_top_offset.clone(),
            fixed_bottom_offset: self.fixed_bottom_offset.clone(),
            on_top_visible_changed: self.on_top_visible_changed.clone(),
            on_bottom_visible_changed: self.on_bottom_visible_changed.clone(),
            on_objects_seen: self.on_objects_seen.clone(),
        }
    }
}

impl<C> Default for CloakingOptions<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> CloakingOptions<C> {
    pub fn new() -> Self {
        Self {
            slack_ratio: DEFAULT_SLACK_RATIO,
            default_height: DEFAULT_HEIGHT,
            loading_text: Arc::from(DEFAULT_LOADING_TEXT),
            uncloak_batch_size: DEFAULT_UNCLOAK_BATCH_SIZE,
            uncloak_default: false,
            fixed_top_offset: None,
            fixed_bottom_offset: None,
            on_top_visible_changed: None,
            on_bottom_visible_changed: None,
            on_objects_seen: None,
        }
    }

    /// Returns a copy with out-of-range values replaced by their defaults.
    pub fn sanitized(mut self) -> Self {
        if !(self.slack_ratio.is_finite() && self.slack_ratio > 0.0) {
            cwarn!(
                slack_ratio = self.slack_ratio,
                "slack_ratio must be > 0; using default"
            );
            self.slack_ratio = DEFAULT_SLACK_RATIO;
        }
        if self.default_height == 0 {
            cwarn!("default_height must be > 0; using default");
            self.default_height = DEFAULT_HEIGHT;
        }
        if self.uncloak_batch_size == 0 {
            cwarn!("uncloak_batch_size must be > 0; using default");
            self.uncloak_batch_size = DEFAULT_UNCLOAK_BATCH_SIZE;
        }
        self
    }

    pub(crate) fn fixed_offsets(&self) -> (u32, u32) {
        let top = self.fixed_top_offset.as_ref().map_or(0, |f| f());
        let bottom = self.fixed_bottom_offset.as_ref().map_or(0, |f| f());
        (top, bottom)
    }

    pub fn with_slack_ratio(mut self, slack_ratio: f32) -> Self {
        self.slack_ratio = slack_ratio;
        self
    }

    pub fn with_default_height(mut self, default_height: u32) -> Self {
        self.default_height = default_height;
        self
    }

    pub fn with_loading_text(mut self, loading_text: impl Into<Arc<str>>) -> Self {
        self.loading_text = loading_text.into();
        self
    }

    pub fn with_uncloak_batch_size(mut self, batch_size: usize) -> Self {
        self.uncloak_batch_size = batch_size;
        self
    }

    pub fn with_uncloak_default(mut self, uncloak_default: bool) -> Self {
        self.uncloak_default = uncloak_default;
        self
    }

    pub fn with_fixed_top_offset(
        mut self,
        provider: Option<impl Fn() -> u32 + Send + Sync + 'static>,
    ) -> Self {
        self.fixed_top_offset = provider.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_fixed_bottom_offset(
        mut self,
        provider: Option<impl Fn() -> u32 + Send + Sync + 'static>,
    ) -> Self {
        self.fixed_bottom_offset = provider.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_top_visible_changed(
        mut self,
        f: Option<impl Fn(Option<&C>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_top_visible_changed = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_bottom_visible_changed(
        mut self,
        f: Option<impl Fn(Option<&C>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_bottom_visible_changed = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_objects_seen(mut self, f: Option<impl Fn(&[C]) + Send + Sync + 'static>) -> Self {
        self.on_objects_seen = f.map(|f| Arc::new(f) as _);
        self
    }
}

impl<C> core::fmt::Debug for CloakingOptions<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CloakingOptions")
            .field("slack_ratio", &self.slack_ratio)
            .field("default_height", &self.default_height)
            .field("loading_text", &self.loading_text)
            .field("uncloak_batch_size", &self.uncloak_batch_size)
            .field("uncloak_default", &self.uncloak_default)
            .field("fixed_top_offset", &self.fixed_top_offset.is_some())
            .field("fixed_bottom_offset", &self.fixed_bottom_offset.is_some())
            .finish_non_exhaustive()
    }
}
