use super::Bounds;

/// Golden ratio: the target aspect ratio for squarified rows.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Squarified layout of `values` (in order) inside `bounds`.
///
/// Rows are grown while the worst aspect ratio in the row keeps improving,
/// then laid along the shorter side of the remaining space. `values` are
/// expected to be sorted descending for good results, but any order works.
pub fn squarify(values: &[f64], ratio: f64, bounds: Bounds) -> Vec<Bounds> {
    let n = values.len();
    let mut out = vec![Bounds::default(); n];
    let Bounds {
        mut x0,
        mut y0,
        x1,
        y1,
    } = bounds;
    let mut value: f64 = values.iter().sum();

    let mut i0 = 0;
    let mut i1 = 0;
    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        // Leading empty nodes join the next row.
        let mut sum_value;
        loop {
            sum_value = values[i1];
            i1 += 1;
            if sum_value != 0.0 || i1 >= n {
                break;
            }
        }

        let mut min_value = sum_value;
        let mut max_value = sum_value;
        let alpha = (dy / dx).max(dx / dy) / (value * ratio);
        let mut beta = sum_value * sum_value * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        // Keep adding nodes while the aspect ratio maintains or improves.
        while i1 < n {
            let node_value = values[i1];
            sum_value += node_value;
            min_value = min_value.min(node_value);
            max_value = max_value.max(node_value);
            beta = sum_value * sum_value * alpha;
            let new_ratio = (max_value / beta).max(beta / min_value);
            if new_ratio > min_ratio {
                sum_value -= node_value;
                break;
            }
            min_ratio = new_ratio;
            i1 += 1;
        }

        let row = &values[i0..i1];
        let cells = &mut out[i0..i1];
        if dx < dy {
            // Horizontal band across the full width.
            let band_y1 = if value != 0.0 {
                y0 + dy * sum_value / value
            } else {
                y1
            };
            dice(row, sum_value, Bounds::new(x0, y0, x1, band_y1), cells);
            if value != 0.0 {
                y0 = band_y1;
            }
        } else {
            // Vertical band across the full height.
            let band_x1 = if value != 0.0 {
                x0 + dx * sum_value / value
            } else {
                x1
            };
            slice(row, sum_value, Bounds::new(x0, y0, band_x1, y1), cells);
            if value != 0.0 {
                x0 = band_x1;
            }
        }

        value -= sum_value;
        i0 = i1;
    }

    out
}

/// Lay `values` left to right across `bounds`, each spanning its full height.
pub fn dice(values: &[f64], total: f64, bounds: Bounds, out: &mut [Bounds]) {
    let k = if total != 0.0 {
        (bounds.x1 - bounds.x0) / total
    } else {
        0.0
    };
    let mut x = bounds.x0;
    for (cell, &v) in out.iter_mut().zip(values) {
        let next = x + v * k;
        *cell = Bounds::new(x, bounds.y0, next, bounds.y1);
        x = next;
    }
}

/// Lay `values` top to bottom across `bounds`, each spanning its full width.
pub fn slice(values: &[f64], total: f64, bounds: Bounds, out: &mut [Bounds]) {
    let k = if total != 0.0 {
        (bounds.y1 - bounds.y0) / total
    } else {
        0.0
    };
    let mut y = bounds.y0;
    for (cell, &v) in out.iter_mut().zip(values) {
        let next = y + v * k;
        *cell = Bounds::new(bounds.x0, y, bounds.x1, next);
        y = next;
    }
}
