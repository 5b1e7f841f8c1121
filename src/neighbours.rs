//! Scalar nearest-value lookup by bisection.
//!
//! `find_nearest` bisects into a sorted slice for each query rather than
//! scanning linearly.

/// Position at which `test` would be inserted into the non-decreasing slice
/// `vals` to keep it sorted, to the right of any equal elements (`bisect`,
/// not `bisect_left`).
fn bisect_right(vals: &[f64], test: f64) -> usize {
    match vals.binary_search_by(|v| v.partial_cmp(&test).unwrap()) {
        Ok(mut i) => {
            while i < vals.len() && vals[i] == test {
                i += 1;
            }
            i
        }
        Err(i) => i,
    }
}

fn find_nearest_one(vals: &[f64], test: f64) -> usize {
    let i = bisect_right(vals, test);
    if i == 0 && test <= vals[0] {
        return 0;
    }
    if i == vals.len() && test >= vals[vals.len() - 1] {
        return vals.len() - 1;
    }
    let (lo, hi) = (i - 1, i);
    if (test - vals[lo]).abs() <= (test - vals[hi]).abs() {
        lo
    } else {
        hi
    }
}

/// For each value in `queries`, the index into `sorted_vals` of its nearest
/// neighbour under `|a - b|`, ties resolved to the earlier index.
///
/// `sorted_vals` must be non-decreasing and non-empty; sortedness is not
/// checked or enforced - violating it yields unspecified, non-panicking
/// results rather than an error.
pub fn find_nearest(sorted_vals: &[f64], queries: &[f64]) -> Vec<usize> {
    queries.iter().map(|&q| find_nearest_one(sorted_vals, q)).collect()
}
