//! Log2 exposure encoding around middle grey.
//!
//! Scene values ("open domain", unbounded linear light) are expressed in
//! stops (EV) relative to a middle grey, clipped to an EV range and
//! normalized to [0, 1]. The formation curve operates on that normalized
//! encoding.
//!
//! ```text
//! od = grey * 2^ev
//! normalized = (clamp(log2(od / grey), min_ev, max_ev) - min_ev) / (max_ev - min_ev)
//! ```
//!
//! # Example
//!
//! ```rust
//! use agx_curve::log2::{open_domain_to_normalized_log2, MIDDLE_GREY};
//!
//! // Middle grey sits 10 stops above the bottom of a 16.5 stop range.
//! let v = open_domain_to_normalized_log2(MIDDLE_GREY, MIDDLE_GREY, -10.0, 6.5);
//! assert!((v - 10.0 / 16.5).abs() < 1e-12);
//! ```

/// Scene-referred middle grey.
pub const MIDDLE_GREY: f64 = 0.18;

/// Absolute log2 of the open-domain value `ev` stops away from `grey`.
///
/// This is the form OpenColorIO's `lg2` allocation expects.
#[inline]
pub fn calculate_ocio_log2(ev: f64, grey: f64) -> f64 {
    ev_to_open_domain(ev, grey).log2()
}

/// Open-domain value `ev` stops away from `grey`.
#[inline]
pub fn ev_to_open_domain(ev: f64, grey: f64) -> f64 {
    ev.exp2() * grey
}

/// Stops between `od` and `grey`.
#[inline]
pub fn open_domain_to_ev(od: f64, grey: f64) -> f64 {
    (od / grey).log2()
}

/// Scales an open-domain value by `ev` stops.
#[inline]
pub fn adjust_exposure(od: f64, ev: f64) -> f64 {
    od * ev.exp2()
}

/// Encodes an open-domain value to normalized log2.
///
/// Non-positive inputs are treated as machine epsilon, then the exposure is
/// clamped to `[min_ev, max_ev]`. An empty or NaN range gives a meaningless
/// result but never panics.
pub fn open_domain_to_normalized_log2(od: f64, grey: f64, min_ev: f64, max_ev: f64) -> f64 {
    let od = if od <= 0.0 { f64::EPSILON } else { od };
    let ev = open_domain_to_ev(od, grey).max(min_ev).min(max_ev);
    (ev - min_ev) / (max_ev - min_ev)
}

/// Decodes normalized log2 back to the open domain.
///
/// The input is clamped to [0, 1].
pub fn normalized_log2_to_open_domain(v: f64, grey: f64, min_ev: f64, max_ev: f64) -> f64 {
    let v = v.clamp(0.0, 1.0);
    ev_to_open_domain(v * (max_ev - min_ev) + min_ev, grey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ocio_log2() {
        assert_relative_eq!(calculate_ocio_log2(0.0, MIDDLE_GREY), MIDDLE_GREY.log2());
        assert_relative_eq!(
            calculate_ocio_log2(-10.0, MIDDLE_GREY),
            -10.0 + MIDDLE_GREY.log2(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            calculate_ocio_log2(6.5, MIDDLE_GREY),
            6.5 + MIDDLE_GREY.log2(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_ev_roundtrip() {
        for ev in [-10.0, -2.5, 0.0, 3.0, 6.5] {
            let od = ev_to_open_domain(ev, MIDDLE_GREY);
            assert_relative_eq!(open_domain_to_ev(od, MIDDLE_GREY), ev, epsilon = 1e-12);
        }
        assert_relative_eq!(adjust_exposure(0.18, 1.0), 0.36);
    }

    #[test]
    fn test_normalized_roundtrip() {
        for v in [0.0, 0.1, 10.0 / 16.5, 0.9, 1.0] {
            let od = normalized_log2_to_open_domain(v, MIDDLE_GREY, -10.0, 6.5);
            let back = open_domain_to_normalized_log2(od, MIDDLE_GREY, -10.0, 6.5);
            assert_relative_eq!(back, v, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalized_clamps() {
        assert_eq!(open_domain_to_normalized_log2(0.0, MIDDLE_GREY, -10.0, 6.5), 0.0);
        assert_eq!(open_domain_to_normalized_log2(-5.0, MIDDLE_GREY, -10.0, 6.5), 0.0);
        assert_eq!(open_domain_to_normalized_log2(1e9, MIDDLE_GREY, -10.0, 6.5), 1.0);
        assert_relative_eq!(
            normalized_log2_to_open_domain(2.0, MIDDLE_GREY, -10.0, 6.5),
            ev_to_open_domain(6.5, MIDDLE_GREY)
        );
    }

    #[test]
    fn test_normalized_empty_range_is_total() {
        // Reversed bounds: ev 0 lifts to 2, then drops to 1.
        let v = open_domain_to_normalized_log2(MIDDLE_GREY, MIDDLE_GREY, 2.0, 1.0);
        assert_eq!(v, 1.0);
        let v = open_domain_to_normalized_log2(MIDDLE_GREY, MIDDLE_GREY, f64::NAN, 6.5);
        assert!(v.is_nan());
    }
}
