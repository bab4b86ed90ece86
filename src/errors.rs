//! Error types produced while validating, generating, optimizing and assembling
//! aircraft components.

use thiserror::Error;

use crate::analysis::SimulationResult;
use crate::parameters::ComponentKind;

/// Error returned when a numeric design parameter is rejected.
///
/// Parameters are rejected, never silently clamped: a value outside its
/// documented range comes back to the caller with the offending field and the
/// bounds it violated so the surrounding layer can present actionable feedback.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Returned when a field lies outside its declared `[min, max]` range.
    #[error("{field} must be within [{min}, {max}] (received {value})")]
    OutOfRange {
        /// Name of the rejected field.
        field: &'static str,
        /// Rejected value.
        value: f64,
        /// Lower bound of the declared range.
        min: f64,
        /// Upper bound of the declared range.
        max: f64,
    },
    /// Returned when a field is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Name of the rejected field.
        field: &'static str,
    },
}

/// Error returned when geometry generation fails.
///
/// Generation re-checks its inputs even though validation runs first, so a
/// logic gap upstream surfaces as a typed failure instead of a degenerate mesh
/// or a division by zero further down the pipeline.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerationError {
    /// Returned when the parameters were rejected by range validation.
    #[error("parameters rejected: {0}")]
    Rejected(#[from] ValidationError),
    /// Returned when a dimension is zero or negative after validation.
    #[error("{field} must be positive to produce geometry (received {value})")]
    DegenerateDimension {
        /// Name of the degenerate dimension.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Returned when the tip chord exceeds the root chord.
    #[error("tip chord {tip_chord_m} m exceeds root chord {root_chord_m} m; taper may only narrow")]
    InvertedTaper {
        /// Chord at the wing root in metres.
        root_chord_m: f64,
        /// Chord at the wing tip in metres.
        tip_chord_m: f64,
    },
}

/// Error returned when components cannot be compiled into an aircraft.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlacementError {
    /// Returned when a required component has no generated geometry.
    #[error("{component} has no generated geometry")]
    MissingComponent {
        /// Component that is missing.
        component: ComponentKind,
    },
    /// Returned when a component's geometry predates its current parameters.
    #[error(
        "{component} geometry is stale (generated at version {geometry_version}, \
         parameters at version {parameter_version})"
    )]
    StaleComponent {
        /// Component whose geometry is out of date.
        component: ComponentKind,
        /// Version stamp the geometry was generated from.
        geometry_version: u64,
        /// Current parameter version for the component.
        parameter_version: u64,
    },
    /// Returned when two placed components violate the minimum clearance.
    #[error(
        "{first} and {second} are {clearance_m:.3} m apart; at least {required_m:.3} m required"
    )]
    Interference {
        /// First component of the offending pair.
        first: ComponentKind,
        /// Second component of the offending pair.
        second: ComponentKind,
        /// Measured clearance between bounding volumes in metres.
        clearance_m: f64,
        /// Required minimum clearance in metres.
        required_m: f64,
    },
}

/// Error returned when the corrective-design loop cannot reach its target.
///
/// The last simulation attempted before giving up is always preserved so the
/// caller can surface the honest FAIL instead of a fabricated PASS.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum OptimizationFailed {
    /// Returned when thickness reached its upper bound without passing.
    #[error(
        "thickness saturated at {thickness_pct}% with safety factor {:.2}",
        last_result.safety_factor
    )]
    ThicknessSaturated {
        /// Thickness at which the search saturated, in percent of chord.
        thickness_pct: u32,
        /// Result of the final attempted simulation.
        last_result: SimulationResult,
    },
    /// Returned when the iteration budget ran out before passing.
    #[error(
        "no passing design after {iterations} iterations (safety factor {:.2})",
        last_result.safety_factor
    )]
    IterationsExhausted {
        /// Number of correction iterations performed.
        iterations: u32,
        /// Result of the final attempted simulation.
        last_result: SimulationResult,
    },
    /// Returned when regeneration of a candidate design failed outright.
    #[error("candidate design could not be generated: {0}")]
    CandidateRejected(#[from] GenerationError),
    /// Returned when re-analysis of a generated candidate rejected its
    /// inputs.
    #[error("candidate analysis failed: {0}")]
    AnalysisRejected(#[from] ValidationError),
}
