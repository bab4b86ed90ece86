//! Human-readable summaries of simulation and assembly results.
//!
//! Rendering is presentation only: every number comes straight from the
//! result structs, so a reader can cross-check the report against the JSON
//! the same structs serialize to.

use std::fmt::Write;

use crate::analysis::{MissionProfile, SimulationResult, SimulationStatus};
use crate::assembly::AssembledAircraft;
use crate::materials::Material;
use crate::parameters::WingParameters;

/// Render a textual summary of one structural simulation.
#[must_use]
pub fn render_simulation(
    wing: &WingParameters,
    material: &Material,
    mission: &MissionProfile,
    result: &SimulationResult,
) -> String {
    let mut output = String::new();

    // Lead with the verdict; the supporting numbers follow for anyone who
    // wants to check the chain by hand.
    let verdict = match result.status {
        SimulationStatus::Pass => "PASS",
        SimulationStatus::Fail => "FAIL",
    };
    writeln!(
        &mut output,
        "Structural check: {verdict} (safety factor {:.2}, threshold 1.50)",
        result.safety_factor
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Wing: span {:.1} m, chord {:.2} -> {:.2} m, sweep {:.0} deg, thickness {}%",
        wing.span_m, wing.root_chord_m, wing.tip_chord_m, wing.sweep_deg, wing.thickness_pct
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Material: {} (yield {:.0} MPa)",
        material.name, material.yield_strength_mpa
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Mission: {:.0} m / {:.0} m/s ({:?} zone, Mach {:.2})",
        mission.altitude_m, mission.speed_m_s, result.details.zone, result.details.mach
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Loads: q = {:.3e} Pa, lift = {:.1} kN, peak root stress = {:.1} MPa",
        result.details.dynamic_pressure, result.lift_force_kn, result.max_stress
    )
    .expect("writing to string cannot fail");

    output
}

/// Render a textual summary of a compiled aircraft.
#[must_use]
pub fn render_assembly(aircraft: &AssembledAircraft, material: &Material) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Assembly: {} placed instances",
        aircraft.placement_count()
    )
    .expect("writing to string cannot fail");

    for component in [&aircraft.fuselage, &aircraft.wing, &aircraft.engines] {
        for placement in &component.placements {
            let t = placement.translation.vector;
            writeln!(
                &mut output,
                "  {} at ({:.2}, {:.2}, {:.2}) m, volume {:.3} m^3",
                component.kind, t.x, t.y, t.z, component.geometry.volume_m3
            )
            .expect("writing to string cannot fail");
        }
    }

    writeln!(
        &mut output,
        "Totals: {:.3} m^3 enclosed, {:.0} kg structural mass in {}",
        aircraft.total_volume_m3(),
        aircraft.total_mass_kg(material),
        material.name
    )
    .expect("writing to string cannot fail");

    output
}
