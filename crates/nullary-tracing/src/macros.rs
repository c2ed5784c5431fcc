//! Timing helpers for generator phases

/// Execute a block with timing, logging the duration at debug level.
///
/// Evaluates to `(result, duration_us)`. The block's value is returned as-is,
/// so `?` can be applied to the result outside the macro.
///
/// ```rust
/// use nullary_tracing::timed_block;
///
/// let (sum, _duration_us) = timed_block!("sum", { (1..=10).sum::<i32>() });
/// assert_eq!(sum, 55);
/// ```
#[macro_export]
macro_rules! timed_block {
    ($name:expr, $block:block) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let duration_us = start.elapsed().as_micros() as u64;
        $crate::debug!(phase = $name, duration_us = duration_us, "phase complete");
        (result, duration_us)
    }};
}
