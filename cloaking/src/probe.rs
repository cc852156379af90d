use crate::Window;

/// Read-only sensor for the scroll container.
///
/// Implementations report the current scroll offset, the container's visible height, and the
/// total height of the list content, all in the same pixel space as [`crate::ItemGeometry`].
pub trait ViewportProbe {
    fn scroll_top(&self) -> i64;

    fn viewport_height(&self) -> u32;

    /// Total content height, or 0 when unknown.
    fn content_height(&self) -> u64;
}

impl<P: ViewportProbe + ?Sized> ViewportProbe for &P {
    fn scroll_top(&self) -> i64 {
        (**self).scroll_top()
    }

    fn viewport_height(&self) -> u32 {
        (**self).viewport_height()
    }

    fn content_height(&self) -> u64 {
        (**self).content_height()
    }
}

/// A captured probe reading.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportSnapshot {
    pub scroll_top: i64,
    pub viewport_height: u32,
    pub content_height: u64,
}

impl ViewportSnapshot {
    pub fn new(scroll_top: i64, viewport_height: u32, content_height: u64) -> Self {
        Self {
            scroll_top,
            viewport_height,
            content_height,
        }
    }

    pub fn capture(probe: &impl ViewportProbe) -> Self {
        Self {
            scroll_top: probe.scroll_top(),
            viewport_height: probe.viewport_height(),
            content_height: probe.content_height(),
        }
    }

    /// Computes the pixel bounds for one recompute cycle.
    ///
    /// `fixed_top`/`fixed_bottom` shrink the viewport (sticky headers and footers). Slack is
    /// `round(viewport_height * slack_ratio)` on each side; when the slacked window runs past the
    /// top of the content the overflow is carried to the bottom (and vice versa), so the window
    /// keeps its span wherever the content allows it.
    pub fn window(&self, slack_ratio: f32, fixed_top: u32, fixed_bottom: u32) -> Window {
        let height = self.viewport_height as i64;
        let slack = slack_pixels(self.viewport_height, slack_ratio);
        let last_pixel = (self.content_height > 0).then(|| self.content_height as i64 - 1);

        let viewport_top = self.scroll_top.saturating_add(fixed_top as i64);
        let mut viewport_bottom = self
            .scroll_top
            .saturating_add(height - 1)
            .saturating_sub(fixed_bottom as i64);
        if let Some(last) = last_pixel {
            viewport_bottom = viewport_bottom.min(last);
        }

        let mut materialize_top = viewport_top.saturating_sub(slack);
        let mut materialize_bottom = viewport_bottom.saturating_add(slack);
        if materialize_top < 0 {
            materialize_bottom = materialize_bottom.saturating_sub(materialize_top);
            materialize_top = 0;
        }
        if let Some(last) = last_pixel {
            if materialize_bottom > last {
                materialize_top = materialize_top
                    .saturating_sub(materialize_bottom - last)
                    .max(0);
                materialize_bottom = last;
            }
        }
        if materialize_bottom < materialize_top {
            materialize_bottom = materialize_top;
        }

        Window {
            viewport_top,
            viewport_bottom,
            slack,
            materialize_top,
            materialize_bottom,
        }
    }
}

impl ViewportProbe for ViewportSnapshot {
    fn scroll_top(&self) -> i64 {
        self.scroll_top
    }

    fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    fn content_height(&self) -> u64 {
        self.content_height
    }
}

pub(crate) fn slack_pixels(viewport_height: u32, slack_ratio: f32) -> i64 {
    let slack = viewport_height as f64 * slack_ratio as f64;
    if slack <= 0.0 {
        return 0;
    }
    // Round half up; `f64::round` is not available without std.
    (slack + 0.5) as i64
}
