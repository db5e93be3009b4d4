use glam::Vec2;

/// Scan-convert one screen-space triangle into half-open per-row spans.
///
/// Vertices are sorted by Y and the two short edges stepped against the long
/// one with incremental `x += dx/dy`, sampling at pixel centres: row `r`
/// samples `y = r + 0.5`, and pixel `x` is covered iff `x + 0.5` lies inside
/// the row interval. Rows and spans are clamped to the viewport.
///
/// `emit` is the span sink: probe or draw, returning whether the span was
/// visible. The return value is the OR over all emitted rows; degenerate
/// triangles and rows emit nothing.
pub fn scan_triangle(
    tri: [Vec2; 3],
    width: i32,
    height: i32,
    mut emit: impl FnMut(usize, i16, i16) -> bool,
) -> bool {
    let mut v = tri;
    if v[1].y < v[0].y {
        v.swap(0, 1);
    }
    if v[2].y < v[1].y {
        v.swap(1, 2);
    }
    if v[1].y < v[0].y {
        v.swap(0, 1);
    }
    let [top, mid, bot] = v;

    let long_dy = bot.y - top.y;
    if long_dy <= f32::EPSILON {
        return false;
    }
    let long_step = (bot.x - top.x) / long_dy;

    // First row whose centre sits at or below y, clamped to the viewport.
    let row_at = |y: f32| (y - 0.5).ceil().clamp(0.0, height as f32) as i32;
    let r_top = row_at(top.y);
    let r_mid = row_at(mid.y);
    let r_bot = row_at(bot.y);

    let mut any = false;
    let mut emit_row = |row: i32, xa: f32, xb: f32, any: &mut bool| {
        let (lo, hi) = if xa <= xb { (xa, xb) } else { (xb, xa) };
        let x0 = (lo - 0.5).ceil().clamp(0.0, width as f32) as i16;
        let x1 = (hi - 0.5).ceil().clamp(0.0, width as f32) as i16;
        if x1 > x0 {
            *any |= emit(row as usize, x0, x1);
        }
    };

    if r_mid > r_top {
        let step = (mid.x - top.x) / (mid.y - top.y);
        let base = r_top as f32 + 0.5;
        let mut x_long = top.x + (base - top.y) * long_step;
        let mut x_edge = top.x + (base - top.y) * step;
        for row in r_top..r_mid {
            emit_row(row, x_long, x_edge, &mut any);
            x_long += long_step;
            x_edge += step;
        }
    }

    if r_bot > r_mid {
        let step = (bot.x - mid.x) / (bot.y - mid.y);
        let base = r_mid as f32 + 0.5;
        let mut x_long = top.x + (base - top.y) * long_step;
        let mut x_edge = mid.x + (base - mid.y) * step;
        for row in r_mid..r_bot {
            emit_row(row, x_long, x_edge, &mut any);
            x_long += long_step;
            x_edge += step;
        }
    }

    any
}
