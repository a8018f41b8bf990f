/// Linear rescale of `v` from `[a, b]` to `[c, d]`.
///
/// A zero-width source interval (`a == b`) is not trapped: the result is NaN or ±∞.
/// Callers owning the interval are expected to guard against it.
pub fn remap(v: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    (v - a) / (b - a) * (d - c) + c
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::remap;

    #[test]
    fn maps_interval_endpoints() {
        assert_relative_eq!(remap(0.0, 0.0, 1.0, 10.0, 20.0), 10.0);
        assert_relative_eq!(remap(1.0, 0.0, 1.0, 10.0, 20.0), 20.0);
        assert_relative_eq!(remap(0.25, 0.0, 1.0, 10.0, 20.0), 12.5);
    }

    #[test]
    fn round_trip_restores_value() {
        let cases = [
            (3.7, -2.0, 5.0, 100.0, -40.0),
            (-12.0, 0.5, 0.75, 0.0, 1.0),
            (1e6, -1e3, 1e3, 2.0, 3.0),
        ];
        for (v, a, b, c, d) in cases {
            let there = remap(v, a, b, c, d);
            assert_relative_eq!(remap(there, c, d, a, b), v, max_relative = 1e-9);
        }
    }

    #[test]
    fn reversed_target_flips_direction() {
        assert_relative_eq!(remap(0.2, 0.0, 1.0, 1.0, 0.0), 0.8);
    }

    #[test]
    fn degenerate_source_is_not_trapped() {
        assert!(remap(0.5, 1.0, 1.0, 0.0, 1.0).is_infinite());
        assert!(remap(1.0, 1.0, 1.0, 0.0, 1.0).is_nan());
    }
}
