//! Zero-Cost Safety Macros
//!
//! "Roll Cage" - debug checks in dev, raw speed in prod
//!
//! In Debug mode: Normal bounds-checked access (panics with useful errors)
//! In Release mode: Unsafe unchecked access (zero overhead)
//!
//! Usage:
//! ```rust
//! use waterline_engine::fast;
//!
//! let idx = 2;
//!
//! let field = vec![0.0f32, 0.25, 0.5, 0.25, 0.0];
//! // Read: fast!(slice, [index])
//! let h = *fast!(field, [idx]);
//! assert_eq!(h, 0.5);
//! ```

/// Zero-cost bounds checking macro
///
/// - Debug: Uses normal indexing with bounds checks
/// - Release: Uses get_unchecked
///
/// Only use it where the index is already proven in range by the caller
/// (e.g. clamped sample indices in the mesh deformation pass).
#[macro_export]
macro_rules! fast {
    // Read pattern: fast!(slice, [index])
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};
}

/// Finite-value check over a field slice.
///
/// - Debug: panics on the first NaN/inf with its index and the step label
/// - Release: compiles to nothing
///
/// Only reached when `checkFinite` is enabled in the config.
#[macro_export]
macro_rules! debug_assert_finite {
    ($slice:expr, $label:expr) => {{
        #[cfg(debug_assertions)]
        {
            if let Some(bad) = $slice.iter().position(|v: &f32| !v.is_finite()) {
                panic!(
                    "{}: non-finite sample {} at index {}",
                    $label, $slice[bad], bad
                );
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_fast_read() {
        let arr = vec![1.0f32, 2.0, 3.0, 4.0, 5.0];
        let val = *fast!(arr, [2]);
        assert_eq!(val, 3.0);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_fast_bounds_check_debug() {
        let arr = vec![1.0f32, 2.0, 3.0];
        let _ = *fast!(arr, [10]); // Should panic in debug
    }

    #[test]
    fn finite_field_passes() {
        let field = vec![0.0f32, -1.5, 2.25];
        debug_assert_finite!(field, "finite_field_passes");
    }

    #[test]
    #[should_panic(expected = "non-finite sample")]
    #[cfg(debug_assertions)]
    fn nan_field_panics_in_debug() {
        let field = vec![0.0f32, f32::NAN, 2.25];
        debug_assert_finite!(field, "nan_field_panics_in_debug");
    }
}
