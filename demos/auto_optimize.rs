use aerocraft::analysis::MissionProfile;
use aerocraft::optimize::OptimizerConfig;
use aerocraft::parameters::WingParameters;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A thin wing flown fast and low, so the structural check fails.
    let wing = WingParameters {
        span_m: 2.0,
        root_chord_m: 0.5,
        tip_chord_m: 0.3,
        sweep_deg: 20.0,
        thickness_pct: 12,
    };
    let material = aerocraft::materials::find("Aluminum 7075-T6")
        .ok_or("unknown material")?
        .clone();
    let mission = MissionProfile {
        altitude_m: 1_000.0,
        speed_m_s: 900.0,
    };

    // Run the check and print the honest verdict.
    let failing = aerocraft::analyze(&wing, &material, &mission)?;
    println!(
        "initial design: {:?} (safety factor {:.2})",
        failing.status, failing.safety_factor
    );

    // Let the corrective loop thicken the section until it passes.
    let report = aerocraft::optimize(
        &wing,
        &failing,
        &material,
        &mission,
        &OptimizerConfig::default(),
    )?;
    println!(
        "corrected design: thickness {}% after {} iteration(s), safety factor {:.2}",
        report.parameters.thickness_pct, report.iterations, report.result.safety_factor
    );

    Ok(())
}
