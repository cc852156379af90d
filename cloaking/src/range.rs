use crate::{ItemGeometry, Measure, Range, Span, Window};

/// Finds the first item whose bottom edge lies below `materialize_top`.
///
/// Items must be laid out top to bottom without overlap; this is a precondition, not something
/// the search verifies. Unmeasured items count as candidates. When every item ends above
/// `materialize_top` the result saturates to the last index.
///
/// `count` must be non-zero.
pub fn find_first<M: Measure + ?Sized>(geometry: &M, count: usize, materialize_top: i64) -> usize {
    debug_assert!(count > 0, "find_first: empty list");
    let ends_below = |i: usize| {
        geometry
            .measure(i)
            .is_none_or(|g| g.bottom() > materialize_top)
    };

    let mut min = 0usize;
    let mut max = count.saturating_sub(1);
    while max > min {
        let mid = min + (max - min) / 2;
        if ends_below(mid) {
            max = mid.saturating_sub(1);
        } else {
            min = mid + 1;
        }
    }

    // Narrowing past a candidate can stop one short of the true boundary.
    if min + 1 < count && !ends_below(min) {
        min += 1;
    }
    min
}

/// Moves `first` past items that end at or above `materialize_top`.
///
/// The binary search can stop on an unmeasured item while the measured items after it are still
/// above the window. A run of unmeasured items is skipped only when the next measured item is
/// above the window too. Never moves past the last index.
fn skip_leading_above<M: Measure + ?Sized>(
    geometry: &M,
    count: usize,
    mut first: usize,
    materialize_top: i64,
) -> usize {
    while first + 1 < count {
        match geometry.measure(first) {
            Some(g) if g.bottom() <= materialize_top => first += 1,
            Some(_) => break,
            None => match (first + 1..count).find_map(|i| geometry.measure(i).map(|g| (i, g))) {
                Some((i, g)) if g.bottom() <= materialize_top => first = i,
                _ => break,
            },
        }
    }
    first
}

/// Computes the materialize range and the strictly visible subset for `window`.
///
/// Returns `None` for an empty list. Geometry is read only for the items touched by the binary
/// search plus the contiguous run that the forward scan walks over.
pub fn locate<M: Measure + ?Sized>(geometry: &M, count: usize, window: &Window) -> Option<Range> {
    if count == 0 {
        return None;
    }

    let first = skip_leading_above(
        geometry,
        count,
        find_first(geometry, count, window.materialize_top),
        window.materialize_top,
    );
    let mut visible: Option<Span> = None;
    let mut cursor = window.materialize_top;

    let mut i = first;
    while i < count {
        // Missing layout: zero height at the running cursor, revisited on a later cycle.
        let measured = geometry.measure(i);
        let g = measured.unwrap_or_else(|| ItemGeometry::new(cursor, 0));
        if g.top > window.materialize_bottom {
            break;
        }
        if measured.is_some() && window.is_visible(g) {
            visible = Some(match visible {
                Some(v) => Span::new(v.first, i),
                None => Span::new(i, i),
            });
        }
        cursor = g.bottom();
        i += 1;
    }

    let last = i.saturating_sub(1).max(first);
    let range = Range {
        materialize: Span::new(first, last),
        visible,
        scan_end: i.min(count - 1),
    };
    ctrace!(
        first,
        last,
        visible = ?range.visible,
        materialize_top = window.materialize_top,
        materialize_bottom = window.materialize_bottom,
        "locate"
    );
    Some(range)
}
