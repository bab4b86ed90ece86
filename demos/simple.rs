use aerocraft::analysis::MissionProfile;
use aerocraft::parameters::{ComponentParameters, WingParameters};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Describe a small tapered wing.
    let wing = WingParameters {
        span_m: 2.0,
        root_chord_m: 0.5,
        tip_chord_m: 0.3,
        sweep_deg: 20.0,
        thickness_pct: 12,
    };

    // Generate its watertight mesh.
    let model = aerocraft::generate(&ComponentParameters::Wing(wing))?;
    println!(
        "wing: {} vertices, {} triangles, {:.4} m^3",
        model.mesh.vertices.len(),
        model.mesh.indices.len(),
        model.volume_m3
    );

    // Check it against a cruise condition.
    let material = aerocraft::materials::find("Aluminum 7075-T6")
        .ok_or("unknown material")?
        .clone();
    let mission = MissionProfile {
        altitude_m: 10_000.0,
        speed_m_s: 250.0,
    };
    let result = aerocraft::analyze(&wing, &material, &mission)?;
    println!(
        "{:?} with safety factor {:.1}",
        result.status, result.safety_factor
    );

    Ok(())
}
