use crate::defs::{ClipSpan, CLIP_HEIGHT, CLIP_WIDTH};

/// Per-scanline occlusion tracking: one sorted, non-overlapping, coalesced
/// list of *occluded* spans per row. The gaps between consecutive spans are
/// exactly the screen regions still open; two sentinel spans bracket
/// `[0, width)` so every gap is interior and no walk needs boundary cases.
///
/// This is the classic active-span-list trick for hidden-surface removal
/// without a z-buffer, the same shape as Doom's solidsegs list but kept per
/// scanline.
pub struct SpanBuffer {
    rows: Vec<Vec<ClipSpan>>,
    width: i16,
    height: usize,
}

impl SpanBuffer {
    pub fn new() -> Self {
        Self {
            rows: Vec::with_capacity(CLIP_HEIGHT),
            width: 0,
            height: 0,
        }
    }

    /// Reset every active row to its two sentinels. Row storage is retained
    /// across frames, so steady-state frames allocate nothing.
    pub fn setup(&mut self, width: usize, height: usize) {
        assert!(width <= CLIP_WIDTH, "span buffer width over {CLIP_WIDTH}");
        assert!(height <= CLIP_HEIGHT, "span buffer height over {CLIP_HEIGHT}");
        self.width = width as i16;
        self.height = height;
        if self.rows.len() < height {
            self.rows.resize_with(height, Vec::new);
        }
        for row in self.rows[..height].iter_mut() {
            row.clear();
            row.push(ClipSpan { x0: i16::MIN, x1: 0 });
            row.push(ClipSpan {
                x0: width as i16,
                x1: i16::MAX,
            });
        }
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True if any part of `[x0, x1)` on this row is not yet occluded.
    /// Early-exits once the walked spans pass the query.
    pub fn is_visible(&self, row: usize, x0: i16, x1: i16) -> bool {
        if x1 <= x0 {
            return false;
        }
        let spans = &self.rows[row];
        for pair in spans.windows(2) {
            let gap_start = pair[0].x1;
            if gap_start >= x1 {
                return false;
            }
            let gap_end = pair[1].x0;
            if x0.max(gap_start) < x1.min(gap_end) {
                return true;
            }
        }
        false
    }

    /// Occlude `[x0, x1)` on this row, merging into the span list: extend
    /// left, extend right, swallow a whole gap (coalescing its two bounding
    /// spans), or insert mid-gap. Returns whether any part of the interval
    /// was still visible before the draw; a fully-hidden surface is not
    /// worth rasterizing.
    pub fn draw_span(&mut self, row: usize, x0: i16, x1: i16) -> bool {
        if x1 <= x0 {
            return false;
        }
        let spans = &mut self.rows[row];
        let mut any = false;
        let mut i = 0;
        while i + 1 < spans.len() {
            let gap_start = spans[i].x1;
            if gap_start >= x1 {
                break;
            }
            let gap_end = spans[i + 1].x0;
            let a = x0.max(gap_start);
            let b = x1.min(gap_end);
            if a >= b {
                i += 1;
                continue;
            }
            any = true;

            if a == gap_start && b == gap_end {
                // The whole gap goes; its two bounding spans become one.
                spans[i].x1 = spans[i + 1].x1;
                spans.remove(i + 1);
            } else if a == gap_start {
                spans[i].x1 = b;
                i += 1;
            } else if b == gap_end {
                spans[i + 1].x0 = a;
                i += 1;
            } else {
                spans.insert(i + 1, ClipSpan { x0: a, x1: b });
                i += 2;
            }
        }
        any
    }

    /// The raw span list of one row, sentinels included. Diagnostics and
    /// tests only.
    pub fn row(&self, row: usize) -> &[ClipSpan] {
        &self.rows[row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(width: usize, height: usize) -> SpanBuffer {
        let mut buf = SpanBuffer::new();
        buf.setup(width, height);
        buf
    }

    /// Sorted, non-overlapping, coalesced, sentinels intact.
    fn assert_row_invariants(buf: &SpanBuffer, row: usize) {
        let spans = buf.row(row);
        assert!(spans.len() >= 2);
        assert_eq!(spans.first().unwrap().x0, i16::MIN);
        assert_eq!(spans.last().unwrap().x1, i16::MAX);
        for span in spans {
            assert!(span.x0 < span.x1);
        }
        for pair in spans.windows(2) {
            // Strictly apart: touching spans must have been coalesced.
            assert!(pair[0].x1 < pair[1].x0);
        }
    }

    #[test]
    fn fresh_row_is_fully_visible() {
        let buf = fresh(640, 4);
        assert!(buf.is_visible(0, 0, 640));
        assert!(buf.is_visible(0, 100, 101));
        // Outside the viewport is born occluded.
        assert!(!buf.is_visible(0, -50, 0));
        assert!(!buf.is_visible(0, 640, 700));
        assert_row_invariants(&buf, 0);
    }

    #[test]
    fn draw_then_query_round_trip() {
        let mut buf = fresh(640, 4);
        assert!(buf.draw_span(1, 100, 200));
        assert!(!buf.is_visible(1, 100, 200));
        assert!(!buf.is_visible(1, 120, 180));
        assert!(buf.is_visible(1, 0, 101));
        assert!(buf.is_visible(1, 199, 300));
        // Other rows untouched.
        assert!(buf.is_visible(0, 100, 200));
        assert_row_invariants(&buf, 1);
    }

    #[test]
    fn gap_between_two_draws_stays_visible() {
        let mut buf = fresh(640, 2);
        buf.draw_span(0, 50, 100);
        buf.draw_span(0, 200, 250);
        assert!(buf.is_visible(0, 80, 220));
        assert!(buf.is_visible(0, 100, 200));
        assert!(!buf.is_visible(0, 60, 90));

        // Fill the gap; the straddling query flips to hidden.
        assert!(buf.draw_span(0, 100, 200));
        assert!(!buf.is_visible(0, 80, 220));
        assert_row_invariants(&buf, 0);
        // 50..250 coalesced into a single span between the sentinels.
        assert_eq!(buf.row(0).len(), 3);
        assert_eq!(buf.row(0)[1], ClipSpan { x0: 50, x1: 250 });
    }

    #[test]
    fn drawing_twice_is_idempotent() {
        let mut buf = fresh(640, 1);
        assert!(buf.draw_span(0, 300, 400));
        let snapshot = buf.row(0).to_vec();
        assert!(!buf.draw_span(0, 300, 400));
        assert_eq!(buf.row(0), snapshot.as_slice());
        assert_row_invariants(&buf, 0);
    }

    #[test]
    fn exact_edge_touch_coalesces() {
        let mut buf = fresh(640, 1);
        buf.draw_span(0, 100, 200);
        buf.draw_span(0, 200, 300);
        assert_row_invariants(&buf, 0);
        assert_eq!(buf.row(0)[1], ClipSpan { x0: 100, x1: 300 });
        // No zero-width seam at 200.
        assert!(!buf.is_visible(0, 195, 205));
    }

    #[test]
    fn draw_reports_partial_visibility() {
        let mut buf = fresh(640, 1);
        buf.draw_span(0, 0, 320);
        // Half hidden, half fresh.
        assert!(buf.draw_span(0, 300, 340));
        // Now entirely hidden.
        assert!(!buf.draw_span(0, 10, 330));
        assert_row_invariants(&buf, 0);
    }

    #[test]
    fn one_draw_spanning_many_gaps() {
        let mut buf = fresh(640, 1);
        buf.draw_span(0, 100, 110);
        buf.draw_span(0, 200, 210);
        buf.draw_span(0, 300, 310);
        assert!(buf.draw_span(0, 50, 400));
        assert_row_invariants(&buf, 0);
        assert_eq!(buf.row(0)[1], ClipSpan { x0: 50, x1: 400 });
        assert!(!buf.is_visible(0, 50, 400));
        assert!(buf.is_visible(0, 0, 51));
        assert!(buf.is_visible(0, 399, 640));
    }

    #[test]
    fn full_row_draw_collapses_to_one_span() {
        let mut buf = fresh(640, 1);
        buf.draw_span(0, 250, 350);
        assert!(buf.draw_span(0, 0, 640));
        // Everything coalesced into the sentinels.
        assert_eq!(buf.row(0).len(), 1);
        assert!(!buf.is_visible(0, 0, 640));
    }

    #[test]
    fn setup_resets_previous_frame() {
        let mut buf = fresh(640, 2);
        buf.draw_span(0, 0, 640);
        buf.setup(640, 2);
        assert!(buf.is_visible(0, 0, 640));
        assert_row_invariants(&buf, 0);
    }

    #[test]
    fn mid_gap_insert_keeps_order() {
        let mut buf = fresh(640, 1);
        buf.draw_span(0, 300, 320);
        buf.draw_span(0, 100, 120);
        buf.draw_span(0, 500, 520);
        assert_row_invariants(&buf, 0);
        let row = buf.row(0);
        assert_eq!(row[1], ClipSpan { x0: 100, x1: 120 });
        assert_eq!(row[2], ClipSpan { x0: 300, x1: 320 });
        assert_eq!(row[3], ClipSpan { x0: 500, x1: 520 });
    }
}
