use crate::fixed::Fixed64;

/// Observable pressure of a stored residual mass.
///
/// Negative mass reads as zero pressure; everything else passes through.
/// Residual mass, not pressure, is the quantity that transfers add to.
#[inline]
pub fn pressure_of(residual_mass: Fixed64) -> Fixed64 {
    residual_mass.max(Fixed64::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::f64_to_fixed64;

    #[test]
    fn negative_mass_clamps_to_zero() {
        assert_eq!(pressure_of(f64_to_fixed64(-0.4)), Fixed64::ZERO);
        assert_eq!(pressure_of(Fixed64::MIN), Fixed64::ZERO);
    }

    #[test]
    fn non_negative_mass_passes_through() {
        assert_eq!(pressure_of(Fixed64::ZERO), Fixed64::ZERO);
        assert_eq!(pressure_of(f64_to_fixed64(2.75)), f64_to_fixed64(2.75));
    }
}
