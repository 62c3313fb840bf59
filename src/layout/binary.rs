use super::Bounds;

/// Balanced binary partition of `values` (in order) inside `bounds`.
///
/// The list is split where the running sum is closest to half of the total,
/// along the longer axis, recursively.
pub fn binary(values: &[f64], bounds: Bounds) -> Vec<Bounds> {
    let n = values.len();
    let mut out = vec![Bounds::default(); n];
    if n == 0 {
        return out;
    }

    let mut sums = Vec::with_capacity(n + 1);
    let mut running = 0.0;
    sums.push(running);
    for &v in values {
        running += v;
        sums.push(running);
    }

    partition(&sums, 0, n, running, bounds, &mut out);
    out
}

fn partition(sums: &[f64], i: usize, j: usize, value: f64, b: Bounds, out: &mut [Bounds]) {
    if i + 1 >= j {
        out[i] = b;
        return;
    }

    let value_offset = sums[i];
    let value_target = value / 2.0 + value_offset;

    // Binary search for the first split point whose running sum reaches the target.
    let mut k = i + 1;
    let mut hi = j - 1;
    while k < hi {
        let mid = (k + hi) / 2;
        if sums[mid] < value_target {
            k = mid + 1;
        } else {
            hi = mid;
        }
    }
    if value_target - sums[k - 1] < sums[k] - value_target && i + 1 < k {
        k -= 1;
    }

    let value_left = sums[k] - value_offset;
    let value_right = value - value_left;

    if b.x1 - b.x0 > b.y1 - b.y0 {
        let xk = if value != 0.0 {
            (b.x0 * value_right + b.x1 * value_left) / value
        } else {
            b.x1
        };
        partition(sums, i, k, value_left, Bounds::new(b.x0, b.y0, xk, b.y1), out);
        partition(sums, k, j, value_right, Bounds::new(xk, b.y0, b.x1, b.y1), out);
    } else {
        let yk = if value != 0.0 {
            (b.y0 * value_right + b.y1 * value_left) / value
        } else {
            b.y1
        };
        partition(sums, i, k, value_left, Bounds::new(b.x0, b.y0, b.x1, yk), out);
        partition(sums, k, j, value_right, Bounds::new(b.x0, yk, b.x1, b.y1), out);
    }
}
