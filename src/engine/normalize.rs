/// GPA scales accepted by the audit form.
pub const SUPPORTED_GPA_SCALES: [f64; 4] = [4.0, 5.0, 10.0, 100.0];

/// Profile validation failures. Raised before any listing is scored, since
/// GPA normalization is a prerequisite for every acceptance-probability
/// branch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("gpa scale {0} is not one of the supported scales (4.0, 5.0, 10.0, 100.0)")]
    UnsupportedScale(f64),
    #[error("gpa {gpa} must lie between 0 and the scale maximum {max}")]
    GpaOutOfRange { gpa: f64, max: f64 },
}

/// Rescale a (gpa, scale) pair to the canonical 0–10 range.
///
/// The scale must be one of `SUPPORTED_GPA_SCALES` and the gpa must lie in
/// [0, scale]. The result is rounded to one decimal.
pub fn normalized_gpa(gpa: f64, gpa_scale: f64) -> Result<f64, ValidationError> {
    if !SUPPORTED_GPA_SCALES
        .iter()
        .any(|scale| (*scale - gpa_scale).abs() < f64::EPSILON)
    {
        return Err(ValidationError::UnsupportedScale(gpa_scale));
    }

    if !gpa.is_finite() || gpa < 0.0 || gpa > gpa_scale {
        return Err(ValidationError::GpaOutOfRange {
            gpa,
            max: gpa_scale,
        });
    }

    Ok(round1(gpa / gpa_scale * 10.0))
}

/// Round to one decimal, ties away from zero (round-half-up for this
/// all-positive domain). Every rubric value that reaches a report goes
/// through this.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescales_each_supported_scale() {
        assert_eq!(normalized_gpa(8.5, 10.0).expect("valid"), 8.5);
        assert_eq!(normalized_gpa(3.6, 4.0).expect("valid"), 9.0);
        assert_eq!(normalized_gpa(4.2, 5.0).expect("valid"), 8.4);
        assert_eq!(normalized_gpa(87.0, 100.0).expect("valid"), 8.7);
    }

    #[test]
    fn rounds_to_one_decimal_half_up() {
        // 2/3 of the scale lands on a repeating decimal; 6.66... -> 6.7.
        let value = normalized_gpa(2.0, 4.0).expect("valid");
        assert_eq!(value, 5.0);
        assert_eq!(round1(6.666_666_6), 6.7);
        assert_eq!(round1(6.25), 6.3);
    }

    #[test]
    fn results_stay_in_canonical_range() {
        for scale in SUPPORTED_GPA_SCALES {
            for step in 0..=20 {
                let gpa = scale * (step as f64) / 20.0;
                let normalized = normalized_gpa(gpa, scale).expect("valid pair");
                assert!((0.0..=10.0).contains(&normalized), "{normalized} out of range");
            }
        }
    }

    #[test]
    fn rejects_unsupported_scale() {
        match normalized_gpa(3.0, 6.0) {
            Err(ValidationError::UnsupportedScale(scale)) => assert_eq!(scale, 6.0),
            other => panic!("expected unsupported scale, got {other:?}"),
        }
    }

    #[test]
    fn rejects_gpa_outside_scale() {
        assert!(matches!(
            normalized_gpa(4.5, 4.0),
            Err(ValidationError::GpaOutOfRange { .. })
        ));
        assert!(matches!(
            normalized_gpa(-0.1, 4.0),
            Err(ValidationError::GpaOutOfRange { .. })
        ));
    }
}
