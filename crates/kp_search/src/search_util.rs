//! Fixed-step instant grids shared by the transit and interlink stages.

/// Number of steps of size `step` needed to cover `[start, end)`.
pub(crate) fn step_count(start: f64, end: f64, step: f64) -> u64 {
    if end <= start || step <= 0.0 {
        return 0;
    }
    // Julian dates near 2.4e6 carry ~5e-10 day rounding; do not let that
    // add a step to a span that is an exact multiple of `step`.
    ((end - start) / step - 1e-6).ceil().max(1.0) as u64
}

/// Instants `start + k * step` inside `[start, end)`, computed from `k` so
/// long scans do not accumulate rounding drift.
pub(crate) fn instants(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    (0..step_count(start, end, step)).map(move |k| start + k as f64 * step)
}
