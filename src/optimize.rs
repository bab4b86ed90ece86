//! Corrective-design loop that thickens a failing wing until it passes.
//!
//! Deliberately a local greedy correction, not a general solver: peak stress
//! scales with `1/t^2` through the section modulus, so the loop only ever
//! widens thickness along that one sensitivity, on its integer grid, and
//! terminates after a small fixed budget or when the bound saturates.

use crate::analysis::{self, MissionProfile, SimulationResult};
use crate::errors::OptimizationFailed;
use crate::geometry;
use crate::materials::Material;
use crate::parameters::{bounds, ComponentParameters, WingParameters};

/// Tuning for the corrective-design loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptimizerConfig {
    /// Safety factor the loop aims for; slightly above the 1.5 pass
    /// threshold so the corrected design carries margin.
    pub target_safety_factor: f64,
    /// Maximum number of thicken-and-reanalyze iterations.
    pub max_iterations: u32,
    /// Forced thickness step, in whole percent, when the scaling rule
    /// rounds to no progress.
    pub min_increment_pct: u32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            target_safety_factor: 1.55,
            max_iterations: 4,
            min_increment_pct: 2,
        }
    }
}

/// Outcome of a successful correction.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimizationReport {
    /// Parameters of the passing design.
    pub parameters: WingParameters,
    /// Simulation result of the passing design.
    pub result: SimulationResult,
    /// Iterations spent; zero when the input already passed.
    pub iterations: u32,
}

/// Thicken a failing wing until it passes or the search is exhausted.
///
/// Each iteration scales thickness by `sqrt(target / current)` (from
/// `stress ∝ 1/t^2`) and floors to the integer grid; only when that stalls
/// at or below the current thickness is a `min_increment_pct` step forced.
/// The result is clamped at the thickness bound, then the candidate is
/// regenerated and reanalyzed before the next step; thickness grows
/// strictly every iteration, so the loop always terminates.
///
/// A result that already passes is returned unchanged with zero iterations.
///
/// # Errors
///
/// [`OptimizationFailed::ThicknessSaturated`] when the bound is reached
/// without passing, [`OptimizationFailed::IterationsExhausted`] when the
/// budget runs out; both carry the last attempted [`SimulationResult`] so
/// the honest FAIL survives. [`OptimizationFailed::CandidateRejected`] if a
/// candidate cannot be generated at all, and
/// [`OptimizationFailed::AnalysisRejected`] if its re-analysis rejects an
/// input (an out-of-range material, for instance).
pub fn optimize(
    wing: &WingParameters,
    current: &SimulationResult,
    material: &Material,
    mission: &MissionProfile,
    config: &OptimizerConfig,
) -> Result<OptimizationReport, OptimizationFailed> {
    if current.passed() {
        return Ok(OptimizationReport {
            parameters: *wing,
            result: *current,
            iterations: 0,
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_thickness_pct = bounds::WING_THICKNESS.max as u32;

    let mut candidate = *wing;
    let mut last_result = *current;
    for iteration in 1..=config.max_iterations {
        if candidate.thickness_pct >= max_thickness_pct {
            return Err(OptimizationFailed::ThicknessSaturated {
                thickness_pct: candidate.thickness_pct,
                last_result,
            });
        }

        let ratio = config.target_safety_factor / last_result.safety_factor;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let scaled = (f64::from(candidate.thickness_pct) * ratio.sqrt()).floor() as u32;
        // The forced step exists only to break stalls on the integer grid;
        // a scaled value that already moves forward is used as-is.
        let proposed = if scaled > candidate.thickness_pct {
            scaled
        } else {
            candidate.thickness_pct + config.min_increment_pct.max(1)
        }
        .min(max_thickness_pct);
        candidate.thickness_pct = proposed;

        // Regenerate so a candidate that cannot mesh is rejected before it
        // is ever analyzed or reported.
        let model = geometry::generate(&ComponentParameters::Wing(candidate))?;
        debug_assert!(model.mesh.indices_are_valid());

        last_result = analysis::analyze(&candidate, material, mission)?;

        if last_result.passed() {
            return Ok(OptimizationReport {
                parameters: candidate,
                result: last_result,
                iterations: iteration,
            });
        }
        if candidate.thickness_pct >= max_thickness_pct {
            return Err(OptimizationFailed::ThicknessSaturated {
                thickness_pct: candidate.thickness_pct,
                last_result,
            });
        }
    }

    Err(OptimizationFailed::IterationsExhausted {
        iterations: config.max_iterations,
        last_result,
    })
}
