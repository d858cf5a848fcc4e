use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
///
/// Residual mass, pressure, expansion and the relaxation coefficients all use
/// this type so a step is bit-for-bit reproducible on every platform.
pub type Fixed64 = I32F32;

/// Steps taken by a network session.
pub type Ticks = u64;

/// Convert an f64 to Fixed64. Use only for initialization, never in the step.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Convert Fixed64 to f64. Use only for display, never in the step.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed64_basic_arithmetic() {
        let a = f64_to_fixed64(1.5);
        let b = f64_to_fixed64(2.0);
        assert_eq!(fixed64_to_f64(a + b), 3.5);
    }

    #[test]
    fn fixed64_negative_values_round_trip() {
        let a = f64_to_fixed64(-0.25);
        assert!(a < Fixed64::ZERO);
        assert_eq!(fixed64_to_f64(a), -0.25);
    }

    #[test]
    fn symmetric_transfer_cancels_exactly() {
        let k = f64_to_fixed64(0.3);
        let diff = f64_to_fixed64(1.0 / 3.0);
        let mut a = f64_to_fixed64(2.0);
        let mut b = f64_to_fixed64(0.7);
        let before = a + b;
        a -= diff * k;
        b += diff * k;
        assert_eq!(a + b, before);
    }

    #[test]
    fn fixed64_determinism() {
        let a = f64_to_fixed64(1.0 / 3.0);
        let b = f64_to_fixed64(1.0 / 3.0);
        assert_eq!(a * f64_to_fixed64(0.3), b * f64_to_fixed64(0.3));
    }
}
