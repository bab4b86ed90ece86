#![warn(clippy::pedantic)]

use aerocraft::analysis::MissionProfile;
use aerocraft::assembly::AssemblyConfig;
use aerocraft::collaborators::{
    ExportError, ExportFormat, ExportOptions, ExtractionError, GeometryExporter,
    ParameterExtractor,
};
use aerocraft::errors::{GenerationError, PlacementError};
use aerocraft::geometry::GeometryModel;
use aerocraft::optimize::OptimizerConfig;
use aerocraft::parameters::{
    ComponentKind, ComponentParameters, EngineParameters, FuselageParameters, WingParameters,
};
use aerocraft::session::{DesignSession, SessionError};
use aerocraft::{Material, SimulationStatus};

#[derive(Debug, Clone, Copy)]
struct ReferenceDesign {
    wing: WingParameters,
    fuselage: FuselageParameters,
    engine: EngineParameters,
}

impl Default for ReferenceDesign {
    fn default() -> Self {
        Self {
            wing: WingParameters {
                span_m: 2.0,
                root_chord_m: 0.5,
                tip_chord_m: 0.3,
                sweep_deg: 20.0,
                thickness_pct: 12,
            },
            fuselage: FuselageParameters {
                length_m: 20.0,
                diameter_m: 2.0,
            },
            engine: EngineParameters {
                length_m: 3.0,
                diameter_m: 1.0,
            },
        }
    }
}

fn aluminum() -> Material {
    aerocraft::materials::find("Aluminum 7075-T6")
        .expect("catalog entry exists")
        .clone()
}

fn cruise_session() -> DesignSession {
    DesignSession::new(
        aluminum(),
        MissionProfile {
            altitude_m: 10_000.0,
            speed_m_s: 250.0,
        },
    )
    .expect("cruise mission is in range")
}

#[test]
fn cruise_pipeline_matches_the_hand_calculation() {
    let design = ReferenceDesign::default();
    let mut session = cruise_session();
    session
        .apply_parameters(ComponentParameters::Wing(design.wing))
        .expect("wing parameters accepted");
    session
        .regenerate(ComponentKind::Wing)
        .expect("wing geometry generates");
    let result = session.analyze().expect("analysis runs");

    // Walk the same chain by hand: exponential density, dynamic pressure,
    // trapezoidal lift, root moment, spar-box section modulus.
    let rho = 1.225 * (-10_000.0_f64 / 8_500.0).exp();
    let q = 0.5 * rho * 250.0 * 250.0;
    let lift = q * (2.0 * (0.5 + 0.3) / 2.0) * 1.2;
    let moment = lift * 0.5 * (2.0 * 0.25);
    let thickness = 0.5 * 0.12;
    let section_modulus = 0.15 * 0.5 * thickness * thickness;
    let stress_mpa = moment / section_modulus / 1.0e6;

    assert_eq!(result.status, SimulationStatus::Pass);
    assert!((result.max_stress - stress_mpa).abs() < 1.0e-9);
    assert!((result.safety_factor - 503.0 / stress_mpa).abs() < 1.0e-9);
    assert!((result.lift_force_kn - lift / 1_000.0).abs() < 1.0e-9);
}

#[test]
fn overloaded_session_corrects_itself_in_one_step() {
    let design = ReferenceDesign::default();
    let mut session = DesignSession::new(
        aluminum(),
        MissionProfile {
            altitude_m: 1_000.0,
            speed_m_s: 900.0,
        },
    )
    .expect("overload mission is in range");
    session
        .apply_parameters(ComponentParameters::Wing(design.wing))
        .expect("wing parameters accepted");

    let failing = session.analyze().expect("analysis runs");
    assert_eq!(failing.status, SimulationStatus::Fail);

    let passing = session
        .optimize(&OptimizerConfig::default())
        .expect("correction converges");
    assert!(passing.passed());

    // The 12% section scales to exactly 13% by the stress ratio, which
    // already clears the threshold; no forced minimum step applies.
    let Some(ComponentParameters::Wing(corrected)) =
        session.parameters(ComponentKind::Wing).copied()
    else {
        panic!("wing parameters present after correction");
    };
    assert_eq!(corrected.thickness_pct, 13);
    assert_eq!(session.simulation_result(), Some(&passing));
    assert!(
        session.current_geometry(ComponentKind::Wing).is_some(),
        "corrected wing geometry is regenerated"
    );
}

#[test]
fn degenerate_design_is_rejected_end_to_end() {
    let mut session = cruise_session();
    let mut wing = ReferenceDesign::default().wing;
    wing.tip_chord_m = 0.9;
    session
        .apply_parameters(ComponentParameters::Wing(wing))
        .expect("range validation alone accepts the taper");

    let error = session
        .regenerate(ComponentKind::Wing)
        .expect_err("inverted taper cannot mesh");
    assert_eq!(
        error,
        SessionError::Generation(GenerationError::InvertedTaper {
            root_chord_m: 0.5,
            tip_chord_m: 0.9,
        })
    );
    assert!(session.current_geometry(ComponentKind::Wing).is_none());
}

#[test]
fn assembly_demands_current_geometry_for_every_component() {
    let design = ReferenceDesign::default();
    let mut session = cruise_session();
    let wing = WingParameters {
        span_m: 20.0,
        root_chord_m: 3.0,
        tip_chord_m: 1.2,
        sweep_deg: 25.0,
        thickness_pct: 12,
    };
    for params in [
        ComponentParameters::Wing(wing),
        ComponentParameters::Fuselage(design.fuselage),
        ComponentParameters::Engine(design.engine),
    ] {
        session.apply_parameters(params).expect("parameters accepted");
    }
    session
        .regenerate(ComponentKind::Wing)
        .expect("wing generates");
    session
        .regenerate(ComponentKind::Fuselage)
        .expect("fuselage generates");

    let error = session
        .compile(&AssemblyConfig::default())
        .expect_err("engine geometry was never generated");
    assert_eq!(
        error,
        SessionError::Placement(PlacementError::MissingComponent {
            component: ComponentKind::Engine,
        })
    );

    session
        .regenerate(ComponentKind::Engine)
        .expect("engine generates");
    let aircraft = session
        .compile(&AssemblyConfig::default())
        .expect("layout has clearance");
    assert_eq!(aircraft.placement_count(), 4);

    let expected_volume = aerocraft::geometry::wing_volume_m3(&wing)
        + aerocraft::geometry::fuselage_volume_m3(&design.fuselage)
        + 2.0 * aerocraft::geometry::engine_volume_m3(&design.engine);
    assert!((aircraft.total_volume_m3() - expected_volume).abs() < 1.0e-9);
}

/// Extractor stub standing in for the natural-language collaborator.
struct CannedExtractor {
    response: Result<ComponentParameters, ExtractionError>,
}

impl ParameterExtractor for CannedExtractor {
    fn extract(&self, _text: &str) -> Result<ComponentParameters, ExtractionError> {
        self.response.clone()
    }
}

#[test]
fn extracted_parameters_are_revalidated_before_acceptance() {
    let mut session = cruise_session();

    // A hallucinated span outside the declared range must be rejected even
    // though it arrived through the extraction path.
    let extractor = CannedExtractor {
        response: Ok(ComponentParameters::Wing(WingParameters {
            span_m: 200.0,
            root_chord_m: 0.5,
            tip_chord_m: 0.3,
            sweep_deg: 20.0,
            thickness_pct: 12,
        })),
    };
    let error = session
        .extract_and_apply(&extractor, "a two hundred metre wing")
        .expect_err("out-of-range extraction rejected");
    assert!(matches!(error, SessionError::Validation(_)));
    assert!(session.parameters(ComponentKind::Wing).is_none());

    // A collaborator failure surfaces verbatim and changes nothing.
    let failing = CannedExtractor {
        response: Err(ExtractionError("no parameters found".into())),
    };
    let error = session
        .extract_and_apply(&failing, "gibberish")
        .expect_err("extraction failure surfaces");
    assert!(matches!(error, SessionError::Extraction(_)));
    assert!(session.parameters(ComponentKind::Wing).is_none());
}

/// Exporter stub that refuses every request.
struct BrokenExporter;

impl GeometryExporter for BrokenExporter {
    fn export(
        &self,
        _model: &GeometryModel,
        format: ExportFormat,
        _options: &ExportOptions,
    ) -> Result<Vec<u8>, ExportError> {
        Err(ExportError {
            format,
            reason: "kernel unavailable".into(),
        })
    }
}

#[test]
fn export_failure_leaves_the_session_intact() {
    let design = ReferenceDesign::default();
    let mut session = cruise_session();
    session
        .apply_parameters(ComponentParameters::Wing(design.wing))
        .expect("wing parameters accepted");
    session
        .regenerate(ComponentKind::Wing)
        .expect("wing generates");

    let error = session
        .export(
            ComponentKind::Wing,
            &BrokenExporter,
            ExportFormat::Step,
            &ExportOptions::default(),
        )
        .expect_err("broken exporter surfaces its failure");
    assert!(matches!(error, SessionError::Export(_)));

    // The stored geometry is untouched by the failed export.
    assert!(session.current_geometry(ComponentKind::Wing).is_some());
}
