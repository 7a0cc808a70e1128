use super::CanvasError;

/// Fraction of the measured display rate a requested rate must stay below.
pub const FEASIBLE_FRACTION: f64 = 0.9;

/// How [`check_feasible`] reports an infeasible frame rate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FpsPolicy {
    /// Return `CanvasError::FrameRateTooHigh`.
    #[default]
    Raise,
    /// Return `Ok(false)`.
    Report,
}

/// Decides whether `requested` fps can be sustained by a display measured at
/// `measured` fps. Infeasible iff `requested >= 0.9 * measured`.
pub fn check_feasible(requested: f64, measured: f64, policy: FpsPolicy) -> Result<bool, CanvasError> {
    let limit = FEASIBLE_FRACTION * measured;
    if requested < limit {
        return Ok(true);
    }
    match policy {
        FpsPolicy::Raise => Err(CanvasError::FrameRateTooHigh { requested, limit }),
        FpsPolicy::Report => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn below_limit_is_feasible() {
        assert!(check_feasible(50.0, 60.0, FpsPolicy::Raise).unwrap());
    }

    #[test]
    fn at_limit_is_infeasible() {
        assert!(!check_feasible(54.0, 60.0, FpsPolicy::Report).unwrap());
        let err = check_feasible(54.0, 60.0, FpsPolicy::Raise).unwrap_err();
        assert!(matches!(err, CanvasError::FrameRateTooHigh { requested, .. } if requested == 54.0));
    }

    #[test]
    fn zero_measurement_rejects_everything() {
        assert!(!check_feasible(0.0, 0.0, FpsPolicy::Report).unwrap());
    }

    proptest! {
        #[test]
        fn feasible_iff_below_ninety_percent(requested in 0.0f64..500.0, measured in 0.0f64..500.0) {
            let feasible = check_feasible(requested, measured, FpsPolicy::Report).unwrap();
            prop_assert_eq!(feasible, requested < 0.9 * measured);
        }
    }
}
