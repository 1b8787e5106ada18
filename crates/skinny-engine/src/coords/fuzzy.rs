/// Relative float comparison with a `1e-5` tolerance.
///
/// Zero only compares equal to values that are themselves null
/// (see [`fuzzy_is_null`]); a relative test is meaningless there.
#[inline]
pub fn fuzzy_eq(a: f32, b: f32) -> bool {
    if a == b {
        return true;
    }
    if fuzzy_is_null(a) || fuzzy_is_null(b) {
        return fuzzy_is_null(a - b);
    }
    (a - b).abs() * 100_000.0 <= a.abs().min(b.abs())
}

/// Returns true when `v` is within `1e-5` of zero.
#[inline]
pub fn fuzzy_is_null(v: f32) -> bool {
    v.abs() <= 0.000_01
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values() {
        assert!(fuzzy_eq(1.0, 1.0));
        assert!(fuzzy_eq(100.0, 100.000_5));
        assert!(!fuzzy_eq(100.0, 100.1));
    }

    #[test]
    fn zero_uses_absolute_tolerance() {
        assert!(fuzzy_eq(0.0, 0.000_001));
        assert!(!fuzzy_eq(0.0, 0.001));
        assert!(fuzzy_is_null(-0.000_002));
    }
}
