//! Beam-theory structural validation of a wing against a mission profile.
//!
//! The wing is treated as a cantilever beam fixed at the root: lift from the
//! mission's dynamic pressure bends the structure, the root section resists
//! with its section modulus, and the ratio of material yield strength to peak
//! bending stress is the safety factor. First-order by design; the point is a
//! reproducible go/no-go answer in microseconds, not certification accuracy.

use serde::{Deserialize, Serialize};

use crate::atmosphere;
use crate::errors::ValidationError;
use crate::materials::Material;
use crate::parameters::{bounds, WingParameters};

/// Assumed lift coefficient for the validated flight condition, sized for a
/// maneuvering load rather than cruise.
pub const LIFT_COEFFICIENT: f64 = 1.2;
/// Fraction of total lift carried by one cantilevered half-wing.
pub const LIFT_SHARE_PER_SIDE: f64 = 0.5;
/// Centroid of the spanwise lift distribution as a fraction of full span.
pub const MOMENT_ARM_SPAN_FRACTION: f64 = 0.25;
/// Section modulus of the root as a fraction of `chord * thickness^2`,
/// approximating a hollow spar box.
pub const SECTION_MODULUS_FACTOR: f64 = 0.15;
/// Design-code pass threshold for the safety factor. Not configurable.
pub const PASS_SAFETY_FACTOR: f64 = 1.5;
/// Reporting cap applied to very comfortable safety factors.
pub const SAFETY_FACTOR_CAP: f64 = 100.0;

/// Flight condition a component is validated under.
///
/// Session-scoped and mutable; editing it invalidates any simulation result
/// computed from the previous values.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct MissionProfile {
    /// Altitude in metres.
    pub altitude_m: f64,
    /// True airspeed in metres per second.
    pub speed_m_s: f64,
}

impl MissionProfile {
    /// Validate altitude and speed against their declared ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        bounds::ALTITUDE.check(self.altitude_m)?;
        bounds::SPEED.check(self.speed_m_s)?;
        Ok(())
    }

    /// Mach number at the mission altitude.
    #[must_use]
    pub fn mach(&self) -> f64 {
        self.speed_m_s / atmosphere::speed_of_sound_m_s(self.altitude_m)
    }
}

/// Go/no-go outcome of a structural simulation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SimulationStatus {
    /// Safety factor at or above the design-code threshold.
    Pass,
    /// Safety factor below the design-code threshold.
    Fail,
}

/// Intermediate quantities surfaced alongside the verdict.
///
/// Field names and units (kg/m³, Pa) are part of the presentation-layer
/// contract and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SimulationDetails {
    /// Air density at the mission altitude in kilograms per cubic metre.
    pub air_density: f64,
    /// Dynamic pressure `0.5 * rho * v^2` in pascals.
    pub dynamic_pressure: f64,
    /// Mach number at the mission condition.
    pub mach: f64,
    /// Altitude band of the mission.
    pub zone: atmosphere::Zone,
}

/// Result of one structural simulation.
///
/// Owned by the exact (parameters, mission, material) triple that produced
/// it; any edit to those invalidates the result. Field names and units
/// (MPa, kN) are part of the presentation-layer contract.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SimulationResult {
    /// PASS or FAIL against the fixed 1.5 threshold.
    pub status: SimulationStatus,
    /// Yield strength over peak stress, capped at 100 for reporting.
    pub safety_factor: f64,
    /// Peak root bending stress in megapascals.
    pub max_stress: f64,
    /// Total lift force in kilonewtons.
    pub lift_force_kn: f64,
    /// Intermediate aerodynamic quantities.
    pub details: SimulationDetails,
}

impl SimulationResult {
    /// Whether the design passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == SimulationStatus::Pass
    }
}

/// Run the cantilever beam analysis for a wing, material and mission.
///
/// Steps, in order: air density from the atmosphere model, dynamic pressure,
/// trapezoidal-planform lift at [`LIFT_COEFFICIENT`], root bending moment
/// from the per-side lift at [`MOMENT_ARM_SPAN_FRACTION`] of span, root
/// section modulus `SECTION_MODULUS_FACTOR * chord * t^2`, peak stress and
/// finally the safety factor against the material's yield strength.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the wing, the mission profile or the
/// material properties are out of range. Degenerate sections (zero chord or
/// thickness) cannot reach the stress division: they are rejected here and
/// by the geometry generator before this stage.
pub fn analyze(
    wing: &WingParameters,
    material: &Material,
    mission: &MissionProfile,
) -> Result<SimulationResult, ValidationError> {
    wing.validate()?;
    mission.validate()?;
    bounds::MATERIAL_YIELD.check(material.yield_strength_mpa)?;
    bounds::MATERIAL_DENSITY.check(material.density_kg_m3)?;

    let air_density = atmosphere::air_density_kg_m3(mission.altitude_m);
    let dynamic_pressure = 0.5 * air_density * mission.speed_m_s * mission.speed_m_s;

    let planform_area = wing.planform_area_m2();
    let lift_force_n = dynamic_pressure * planform_area * LIFT_COEFFICIENT;

    let moment_arm_m = wing.span_m * MOMENT_ARM_SPAN_FRACTION;
    let root_moment_nm = lift_force_n * LIFT_SHARE_PER_SIDE * moment_arm_m;

    let thickness_m = wing.root_chord_m * wing.thickness_fraction();
    let section_modulus_m3 = SECTION_MODULUS_FACTOR * wing.root_chord_m * thickness_m * thickness_m;

    let max_stress_mpa = root_moment_nm / section_modulus_m3 / 1.0e6;
    let safety_factor = (material.yield_strength_mpa / max_stress_mpa).min(SAFETY_FACTOR_CAP);
    let status = if safety_factor >= PASS_SAFETY_FACTOR {
        SimulationStatus::Pass
    } else {
        SimulationStatus::Fail
    };

    Ok(SimulationResult {
        status,
        safety_factor,
        max_stress: max_stress_mpa,
        lift_force_kn: lift_force_n / 1_000.0,
        details: SimulationDetails {
            air_density,
            dynamic_pressure,
            mach: mission.mach(),
            zone: atmosphere::zone(mission.altitude_m),
        },
    })
}
