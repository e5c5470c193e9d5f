//! Parameters of the corner analysis.

use crate::corner::PROBES_PER_DISTANCE;
use crate::error::UnsupportedParameter;
use crate::path::FillRule;

/// Number of probe distances tried by the sampling step.
pub const NUM_PROBE_DISTANCES: usize = 4;

/// Parameters for the corner analyzer.
///
/// The sampling parameters are empirical: they reproduce a small-sample majority vote at
/// increasing distances from each corner and are not claimed to be optimal.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct AnalyzerOptions {
    /// Number of line segments used to approximate each quadratic or cubic span.
    ///
    /// Default value: `AnalyzerOptions::DEFAULT_CURVE_POINTS`.
    pub curve_points: u32,

    /// How containment in the approximation polygon is decided.
    ///
    /// Default value: `EvenOdd`.
    pub fill_rule: FillRule,

    /// Distances from the vertex at which corners are probed, smallest first.
    ///
    /// Default value: `AnalyzerOptions::DEFAULT_PROBE_DISTANCES`.
    pub probe_distances: [f64; NUM_PROBE_DISTANCES],

    /// Number of probes (out of four per distance) that must fall inside the shape on
    /// one side of a corner for the sampling at that distance to be conclusive.
    ///
    /// Default value: `AnalyzerOptions::DEFAULT_SAMPLING_MAJORITY`.
    pub sampling_majority: u32,

    /// Whether a corner's vote is flipped when its incoming edge crosses the rest of the
    /// sub-path an odd number of times.
    ///
    /// Default value: `true`.
    pub parity_correction: bool,
}

impl AnalyzerOptions {
    /// Default number of segments per curve.
    pub const DEFAULT_CURVE_POINTS: u32 = 10;
    /// Default fill rule.
    pub const DEFAULT_FILL_RULE: FillRule = FillRule::EvenOdd;
    /// Default probe distances.
    pub const DEFAULT_PROBE_DISTANCES: [f64; NUM_PROBE_DISTANCES] = [0.5, 1.5, 3.0, 6.0];
    /// Default sampling majority.
    pub const DEFAULT_SAMPLING_MAJORITY: u32 = 3;

    pub const DEFAULT: Self = AnalyzerOptions {
        curve_points: Self::DEFAULT_CURVE_POINTS,
        fill_rule: Self::DEFAULT_FILL_RULE,
        probe_distances: Self::DEFAULT_PROBE_DISTANCES,
        sampling_majority: Self::DEFAULT_SAMPLING_MAJORITY,
        parity_correction: true,
    };

    #[inline]
    pub const fn with_curve_points(mut self, curve_points: u32) -> Self {
        self.curve_points = curve_points;
        self
    }

    #[inline]
    pub const fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }

    #[inline]
    pub const fn with_probe_distances(mut self, distances: [f64; NUM_PROBE_DISTANCES]) -> Self {
        self.probe_distances = distances;
        self
    }

    #[inline]
    pub const fn with_sampling_majority(mut self, majority: u32) -> Self {
        self.sampling_majority = majority;
        self
    }

    #[inline]
    pub const fn with_parity_correction(mut self, enabled: bool) -> Self {
        self.parity_correction = enabled;
        self
    }

    /// Checks that the parameters can be used.
    pub fn validate(&self) -> Result<(), UnsupportedParameter> {
        if self.curve_points == 0 {
            return Err(UnsupportedParameter::CurvePointsIsZero);
        }

        for &distance in &self.probe_distances {
            if !distance.is_finite() || distance <= 0.0 {
                return Err(UnsupportedParameter::InvalidProbeDistance(distance));
            }
        }

        let max = PROBES_PER_DISTANCE as u32;
        if self.sampling_majority == 0 || self.sampling_majority > max {
            return Err(UnsupportedParameter::MajorityOutOfRange {
                majority: self.sampling_majority,
                max,
            });
        }

        Ok(())
    }
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn default_options_are_valid() {
    assert_eq!(AnalyzerOptions::default(), AnalyzerOptions::DEFAULT);
    assert_eq!(AnalyzerOptions::DEFAULT.validate(), Ok(()));
}

#[test]
fn invalid_options() {
    assert_eq!(
        AnalyzerOptions::DEFAULT.with_curve_points(0).validate(),
        Err(UnsupportedParameter::CurvePointsIsZero)
    );
    assert_eq!(
        AnalyzerOptions::DEFAULT
            .with_probe_distances([0.5, -1.0, 3.0, 6.0])
            .validate(),
        Err(UnsupportedParameter::InvalidProbeDistance(-1.0))
    );
    assert!(AnalyzerOptions::DEFAULT
        .with_probe_distances([0.5, std::f64::NAN, 3.0, 6.0])
        .validate()
        .is_err());
    assert_eq!(
        AnalyzerOptions::DEFAULT.with_sampling_majority(5).validate(),
        Err(UnsupportedParameter::MajorityOutOfRange {
            majority: 5,
            max: 4
        })
    );
    assert!(AnalyzerOptions::DEFAULT
        .with_sampling_majority(0)
        .validate()
        .is_err());
}
