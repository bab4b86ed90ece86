//! Compilation of validated components into one positioned aircraft.
//!
//! Components keep their local geometry; placement is a rigid transform per
//! instance, so any component can still be exported or edited on its own
//! after compilation. Interference is checked against bounding volumes and
//! reported as a typed failure, never silently accepted.

use nalgebra::Isometry3;

use crate::errors::PlacementError;
use crate::geometry::GeometryModel;
use crate::materials::Material;
use crate::mesh::Aabb;
use crate::parameters::{ComponentKind, EngineParameters, FuselageParameters, WingParameters};

/// Layout rules for positioning the three components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AssemblyConfig {
    /// Wing longitudinal station as a fraction of fuselage length.
    pub wing_station_fraction: f64,
    /// Engine lateral offset as a fraction of the semi-span.
    pub engine_span_fraction: f64,
    /// Engine vertical drop as a fraction of the fuselage radius, measured
    /// from the fuselage centerline to the top of the nacelle.
    pub engine_drop_fraction: f64,
    /// Minimum clearance between the nacelle and the fuselage or wing
    /// bounding volumes, in metres.
    pub min_clearance_m: f64,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            wing_station_fraction: 0.45,
            engine_span_fraction: 0.3,
            engine_drop_fraction: 0.6,
            min_clearance_m: 0.05,
        }
    }
}

/// One component of a compiled aircraft: local geometry plus the rigid
/// transform of each placed instance.
#[derive(Clone, Debug, PartialEq)]
pub struct AssembledComponent {
    /// Component family.
    pub kind: ComponentKind,
    /// Owned copy of the component geometry, independent of later edits to
    /// the session that produced it.
    pub geometry: GeometryModel,
    /// Rigid transform per placed instance (two for mirrored engines).
    pub placements: Vec<Isometry3<f64>>,
}

impl AssembledComponent {
    /// World-space bounding box of one placed instance, covering the full
    /// rigid transform including any rotation.
    fn placed_bounds(&self, placement: &Isometry3<f64>) -> Option<Aabb> {
        self.geometry
            .mesh
            .bounding_box()
            .map(|aabb| aabb.transformed(placement))
    }
}

/// A complete aircraft compiled from its three validated components.
///
/// Exists only while all three components are current; the owning session
/// drops it as soon as any component is edited or regenerated.
#[derive(Clone, Debug, PartialEq)]
pub struct AssembledAircraft {
    /// Fuselage at the origin.
    pub fuselage: AssembledComponent,
    /// Wing at its longitudinal station, spanwise-symmetric.
    pub wing: AssembledComponent,
    /// Engine nacelle, mirrored left and right.
    pub engines: AssembledComponent,
}

impl AssembledAircraft {
    /// Total number of placed component instances.
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.fuselage.placements.len() + self.wing.placements.len() + self.engines.placements.len()
    }

    /// Total enclosed volume across all placed instances, in cubic metres.
    #[must_use]
    pub fn total_volume_m3(&self) -> f64 {
        self.fuselage.geometry.volume_m3 * self.fuselage.placements.len() as f64
            + self.wing.geometry.volume_m3 * self.wing.placements.len() as f64
            + self.engines.geometry.volume_m3 * self.engines.placements.len() as f64
    }

    /// Structural mass for one material applied to every component.
    #[must_use]
    pub fn total_mass_kg(&self, material: &Material) -> f64 {
        self.total_volume_m3() * material.density_kg_m3
    }
}

/// Compile the three components into a positioned aircraft.
///
/// Precondition: each geometry was generated from the supplied parameters
/// and those parameters are the session's current ones; the session layer
/// enforces the staleness half of that contract before calling here.
///
/// Layout: fuselage at the origin with its nose at `x = 0`; wing at
/// `wing_station_fraction` of fuselage length, centered on the fuselage
/// axis; one engine per side at `engine_span_fraction` of the semi-span,
/// hung below the wing clear of the fuselage.
///
/// # Errors
///
/// Returns [`PlacementError::Interference`] when a nacelle comes closer
/// than the configured minimum clearance to the fuselage or wing bounding
/// volumes.
pub fn compile(
    wing_params: &WingParameters,
    wing_geometry: &GeometryModel,
    fuselage_params: &FuselageParameters,
    fuselage_geometry: &GeometryModel,
    engine_params: &EngineParameters,
    engine_geometry: &GeometryModel,
    config: &AssemblyConfig,
) -> Result<AssembledAircraft, PlacementError> {
    let fuselage = AssembledComponent {
        kind: ComponentKind::Fuselage,
        geometry: fuselage_geometry.clone(),
        placements: vec![Isometry3::identity()],
    };

    let wing_station_x = config.wing_station_fraction * fuselage_params.length_m;
    let wing = AssembledComponent {
        kind: ComponentKind::Wing,
        geometry: wing_geometry.clone(),
        placements: vec![Isometry3::translation(wing_station_x, 0.0, 0.0)],
    };

    let engine_y = config.engine_span_fraction * wing_params.span_m / 2.0;
    let engine_z = -(config.engine_drop_fraction * fuselage_params.radius_m()
        + engine_params.radius_m());
    let engines = AssembledComponent {
        kind: ComponentKind::Engine,
        geometry: engine_geometry.clone(),
        placements: vec![
            Isometry3::translation(wing_station_x, engine_y, engine_z),
            Isometry3::translation(wing_station_x, -engine_y, engine_z),
        ],
    };

    check_engine_clearance(&engines, &fuselage, config)?;
    check_engine_clearance(&engines, &wing, config)?;

    Ok(AssembledAircraft {
        fuselage,
        wing,
        engines,
    })
}

/// Verify every engine instance keeps the minimum clearance to `other`.
fn check_engine_clearance(
    engines: &AssembledComponent,
    other: &AssembledComponent,
    config: &AssemblyConfig,
) -> Result<(), PlacementError> {
    for (engine_box, other_box) in engine_instance_boxes(engines, other) {
        let clearance = engine_box.clearance_to(&other_box);
        if clearance < config.min_clearance_m {
            return Err(PlacementError::Interference {
                first: engines.kind,
                second: other.kind,
                clearance_m: clearance,
                required_m: config.min_clearance_m,
            });
        }
    }
    Ok(())
}

/// Pair each engine instance box with each placed instance box of `other`.
fn engine_instance_boxes(
    engines: &AssembledComponent,
    other: &AssembledComponent,
) -> Vec<(Aabb, Aabb)> {
    let mut pairs = Vec::new();
    for engine_placement in &engines.placements {
        let Some(engine_box) = engines.placed_bounds(engine_placement) else {
            continue;
        };
        for other_placement in &other.placements {
            if let Some(other_box) = other.placed_bounds(other_placement) {
                pairs.push((engine_box, other_box));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::generate;
    use crate::parameters::ComponentParameters;

    fn airliner() -> (WingParameters, FuselageParameters, EngineParameters) {
        let wing = WingParameters {
            span_m: 20.0,
            root_chord_m: 3.0,
            tip_chord_m: 1.2,
            sweep_deg: 25.0,
            thickness_pct: 12,
        };
        let fuselage = FuselageParameters {
            length_m: 20.0,
            diameter_m: 2.0,
        };
        let engine = EngineParameters {
            length_m: 3.0,
            diameter_m: 1.0,
        };
        (wing, fuselage, engine)
    }

    fn compile_airliner(
        config: &AssemblyConfig,
    ) -> Result<AssembledAircraft, PlacementError> {
        let (wing, fuselage, engine) = airliner();
        let wing_geometry = generate(&ComponentParameters::Wing(wing)).expect("wing generates");
        let fuselage_geometry =
            generate(&ComponentParameters::Fuselage(fuselage)).expect("fuselage generates");
        let engine_geometry =
            generate(&ComponentParameters::Engine(engine)).expect("engine generates");
        compile(
            &wing,
            &wing_geometry,
            &fuselage,
            &fuselage_geometry,
            &engine,
            &engine_geometry,
            config,
        )
    }

    #[test]
    fn proportionate_aircraft_compiles_with_mirrored_engines() {
        let aircraft =
            compile_airliner(&AssemblyConfig::default()).expect("layout has clearance");
        assert_eq!(aircraft.placement_count(), 4);

        let wing_x = aircraft.wing.placements[0].translation.vector.x;
        assert_relative_eq!(wing_x, 0.45 * 20.0);

        let left = aircraft.engines.placements[1].translation.vector;
        let right = aircraft.engines.placements[0].translation.vector;
        assert_relative_eq!(left.y, -right.y);
        assert!(right.z < 0.0, "engines hang below the centerline");
    }

    #[test]
    fn compiled_aircraft_owns_its_geometry() {
        let aircraft =
            compile_airliner(&AssemblyConfig::default()).expect("layout has clearance");
        // Volumes survive independently of the inputs that produced them.
        let (wing, fuselage, engine) = airliner();
        let expected = crate::geometry::fuselage_volume_m3(&fuselage)
            + crate::geometry::wing_volume_m3(&wing)
            + 2.0 * crate::geometry::engine_volume_m3(&engine);
        assert_relative_eq!(aircraft.total_volume_m3(), expected, epsilon = 1.0e-9);
    }

    #[test]
    fn placed_bounds_cover_rotated_instances() {
        let (_, _, engine) = airliner();
        let geometry = generate(&ComponentParameters::Engine(engine)).expect("engine generates");
        let component = AssembledComponent {
            kind: ComponentKind::Engine,
            geometry,
            placements: Vec::new(),
        };
        let yawed = nalgebra::Isometry3::new(
            nalgebra::Vector3::zeros(),
            nalgebra::Vector3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2),
        );
        let bounds = component.placed_bounds(&yawed).expect("mesh is non-empty");
        // The 3 m nacelle length swings from X into Y under the quarter
        // turn; the world box must follow it.
        assert!(bounds.max.y - bounds.min.y > 2.9);
        assert!(bounds.max.x - bounds.min.x < 1.1);
    }

    #[test]
    fn inboard_engines_interfere_with_the_fuselage() {
        let config = AssemblyConfig {
            engine_span_fraction: 0.05,
            engine_drop_fraction: 0.0,
            ..AssemblyConfig::default()
        };
        let error = compile_airliner(&config).expect_err("nacelle overlaps the fuselage");
        match error {
            PlacementError::Interference { first, second, .. } => {
                assert_eq!(first, ComponentKind::Engine);
                assert_eq!(second, ComponentKind::Fuselage);
            }
            other => panic!("unexpected placement failure: {other:?}"),
        }
    }

    #[test]
    fn clearance_requirement_is_configurable() {
        let config = AssemblyConfig {
            min_clearance_m: 10.0,
            ..AssemblyConfig::default()
        };
        assert!(matches!(
            compile_airliner(&config),
            Err(PlacementError::Interference { .. })
        ));
    }
}
