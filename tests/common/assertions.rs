//! Domain-specific assertion macros for runplot harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* pipeline invariant was violated and on *which* line
//! or series.

// ---------------------------------------------------------------------------
// Prepared-table assertions
// ---------------------------------------------------------------------------

/// Assert that a prepared line carries the eight named columns (nine when
/// the item count is present).
///
/// ```rust
/// assert_prepared_line!("2024-01-15 10:00:01|INFO|gw|1.1.1.1|ua|GET|x|200");
/// ```
#[macro_export]
macro_rules! assert_prepared_line {
    ($line:expr) => {{
        let line: &str = &$line;
        let cols = line.split('|').count();
        if cols != runplot_core::NormalizedRecord::FIELD_COUNT
            && cols != runplot_core::NormalizedRecord::FIELD_COUNT + 1
        {
            panic!(
                "assert_prepared_line! failed: {} columns in {:?}",
                cols, line
            );
        }
    }};
}

/// Assert that a prepared line contains none of the characters the
/// normalizer is supposed to strip.
#[macro_export]
macro_rules! assert_no_residue {
    ($line:expr) => {{
        let line: &str = &$line;
        for residue in ['"', '{', '}', '[', ']', '(', ')'] {
            if line.contains(residue) {
                panic!(
                    "assert_no_residue! failed: {:?} left in {:?}",
                    residue, line
                );
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Series assertions
// ---------------------------------------------------------------------------

/// Assert the number of series a chart will draw.
#[macro_export]
macro_rules! assert_series_count {
    ($fs:expr, $n:expr) => {{
        let fs: &runplot_core::FieldSeries = &$fs;
        let expected: usize = $n;
        if fs.series.len() != expected {
            panic!(
                "assert_series_count! failed for field {}:\n  expected: {}\n  actual:   {}\n  values:   {:?}",
                fs.field,
                expected,
                fs.series.len(),
                fs.series.iter().map(|s| &s.value).collect::<Vec<_>>()
            );
        }
    }};
}

/// Assert that the series for `value` exists and has the given total count.
#[macro_export]
macro_rules! assert_series_total {
    ($fs:expr, $value:expr, $total:expr) => {{
        let fs: &runplot_core::FieldSeries = &$fs;
        let value: &str = $value;
        match fs.series.iter().find(|s| s.value == value) {
            Some(s) => pretty_assertions::assert_eq!(
                s.total(),
                $total,
                "total of {:?} in field {}",
                value,
                fs.field
            ),
            None => panic!(
                "assert_series_total! failed: no series {:?} in field {}.\n  Available: {:?}",
                value,
                fs.field,
                fs.series.iter().map(|s| &s.value).collect::<Vec<_>>()
            ),
        }
    }};
}
