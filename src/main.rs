use std::error::Error;

use aerocraft::analysis::MissionProfile;
use aerocraft::assembly::AssemblyConfig;
use aerocraft::optimize::OptimizerConfig;
use aerocraft::parameters::{
    ComponentKind, ComponentParameters, EngineParameters, FuselageParameters, WingParameters,
};
use aerocraft::report;
use aerocraft::session::DesignSession;

fn main() -> Result<(), Box<dyn Error>> {
    // A regional-jet-sized design flown well past its comfort zone, so the
    // run demonstrates the full check-correct-compile pipeline.
    let material = aerocraft::materials::find("Aluminum 7075-T6")
        .ok_or("material catalog is missing Aluminum 7075-T6")?
        .clone();
    let mission = MissionProfile {
        altitude_m: 1_000.0,
        speed_m_s: 320.0,
    };
    let mut session = DesignSession::new(material.clone(), mission)?;

    // Apply the three components and generate their geometry.
    let components = [
        ComponentParameters::Wing(WingParameters {
            span_m: 20.0,
            root_chord_m: 3.0,
            tip_chord_m: 1.2,
            sweep_deg: 25.0,
            thickness_pct: 6,
        }),
        ComponentParameters::Fuselage(FuselageParameters {
            length_m: 20.0,
            diameter_m: 2.0,
        }),
        ComponentParameters::Engine(EngineParameters {
            length_m: 3.0,
            diameter_m: 1.0,
        }),
    ];
    for params in components {
        session.apply_parameters(params)?;
        let model = session.regenerate(params.kind())?;
        println!(
            "generated {}: {} vertices, {:.3} m^3",
            params.kind(),
            model.mesh.vertices.len(),
            model.volume_m3
        );
    }

    // Validate the wing against the mission, correcting it when it fails.
    let mut result = session.analyze()?;
    if !result.passed() {
        println!("initial design failed; running the corrective loop");
        result = session.optimize(&OptimizerConfig::default())?;
    }
    let Some(ComponentParameters::Wing(wing)) = session.parameters(ComponentKind::Wing).copied()
    else {
        return Err("wing parameters missing after analysis".into());
    };
    println!();
    print!(
        "{}",
        report::render_simulation(&wing, session.material(), session.mission(), &result)
    );

    // Compile the validated components into one positioned aircraft.
    let aircraft = session.compile(&AssemblyConfig::default())?;
    println!();
    print!("{}", report::render_assembly(aircraft, &material));

    Ok(())
}
