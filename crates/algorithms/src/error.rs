use crate::path::PointIndex;

/// The analyzer's result type.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// The analyzer's error enumeration.
///
/// Errors are reported before any corner is visited. Degenerate geometry (empty paths,
/// sub-paths with too few corners, collinear turns) is not an error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Unsupported parameter: {0}")]
    UnsupportedParameter(#[from] UnsupportedParameter),
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum UnsupportedParameter {
    #[error("Position of point {0} is not a finite number")]
    PositionIsNaN(PointIndex),
    #[error("Curves must be approximated with at least one segment")]
    CurvePointsIsZero,
    #[error("Probe distance {0} is not a positive finite number")]
    InvalidProbeDistance(f64),
    #[error("Sampling majority {majority} is not between 1 and {max}")]
    MajorityOutOfRange { majority: u32, max: u32 },
}

#[test]
fn error_messages() {
    let err: AnalysisError = UnsupportedParameter::PositionIsNaN(PointIndex(3)).into();
    assert_eq!(
        err.to_string(),
        "Unsupported parameter: Position of point 3 is not a finite number"
    );

    let err = UnsupportedParameter::MajorityOutOfRange {
        majority: 5,
        max: 4,
    };
    assert_eq!(
        err.to_string(),
        "Sampling majority 5 is not between 1 and 4"
    );
}
