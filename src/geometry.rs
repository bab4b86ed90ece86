//! Parametric mesh generation with closed-form mass properties.
//!
//! `generate` is a pure function: identical parameters produce bit-identical
//! output, and nothing here touches state outside the call. Reported volume
//! and surface area come from closed-form formulas evaluated in constant
//! time; the tessellation resolution only affects the triangle mesh handed to
//! renderers and exporters, never the mass properties.

use std::f64::consts::PI;

use crate::errors::GenerationError;
use crate::materials::Material;
use crate::mesh::{Point, TriangleMesh};
use crate::parameters::{
    ComponentParameters, EngineParameters, FuselageParameters, WingParameters,
};

/// Cross-section area of an airfoil as a fraction of `chord * thickness`.
pub const AIRFOIL_AREA_FACTOR: f64 = 0.65;
/// Wetted-area correction applied per unit thickness fraction.
const WETTED_AREA_THICKNESS_CORRECTION: f64 = 0.25;

/// Fraction of fuselage length occupied by the nose frustum.
const FUSELAGE_NOSE_FRACTION: f64 = 0.25;
/// Fraction of fuselage length occupied by the tail frustum.
const FUSELAGE_TAIL_FRACTION: f64 = 0.25;
/// Nose-tip radius as a fraction of the maximum fuselage radius.
const FUSELAGE_NOSE_RADIUS_RATIO: f64 = 0.2;
/// Tail-cone radius as a fraction of the maximum fuselage radius.
const FUSELAGE_TAIL_RADIUS_RATIO: f64 = 0.35;

/// Fraction of nacelle length occupied by the inlet frustum.
const ENGINE_INLET_FRACTION: f64 = 0.2;
/// Fraction of nacelle length occupied by the exhaust frustum.
const ENGINE_EXHAUST_FRACTION: f64 = 0.2;
/// Inlet-lip radius as a fraction of the core radius.
const ENGINE_INLET_RADIUS_RATIO: f64 = 0.85;
/// Exhaust-nozzle radius as a fraction of the core radius.
const ENGINE_EXHAUST_RADIUS_RATIO: f64 = 0.55;

/// Mesh resolution knobs, deliberately separate from the volume formulas.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tessellation {
    /// Spanwise (or lengthwise) stations per half component.
    pub span_steps: u32,
    /// Samples around one cross-section ring.
    pub ring_segments: u32,
}

impl Default for Tessellation {
    fn default() -> Self {
        Self {
            span_steps: 12,
            ring_segments: 24,
        }
    }
}

/// Generated geometry for one component.
///
/// Derived data, never authoritative: the owning parameters can always
/// regenerate it, and a parameter edit invalidates it.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryModel {
    /// Watertight triangle mesh for rendering and export.
    pub mesh: TriangleMesh,
    /// Closed-form enclosed volume in cubic metres.
    pub volume_m3: f64,
    /// Closed-form outer surface area in square metres.
    pub surface_area_m2: f64,
}

impl GeometryModel {
    /// Component mass for a chosen material, `volume * density`.
    ///
    /// Computed on demand because material selection is independent of
    /// geometry; the model caches nothing material-specific.
    #[must_use]
    pub fn mass_kg(&self, material: &Material) -> f64 {
        self.volume_m3 * material.density_kg_m3
    }
}

/// Generate geometry at the default tessellation.
///
/// # Errors
///
/// Returns [`GenerationError::Rejected`] for out-of-range parameters and the
/// degenerate-geometry variants for inputs that validation cannot express
/// (inverted taper, non-positive dimensions).
pub fn generate(params: &ComponentParameters) -> Result<GeometryModel, GenerationError> {
    generate_with(params, &Tessellation::default())
}

/// Generate geometry at an explicit tessellation resolution.
///
/// The resolution changes vertex and index counts only; `volume_m3` and
/// `surface_area_m2` are identical across resolutions for the same
/// parameters.
///
/// # Errors
///
/// Same contract as [`generate`].
pub fn generate_with(
    params: &ComponentParameters,
    tessellation: &Tessellation,
) -> Result<GeometryModel, GenerationError> {
    params.validate()?;
    match params {
        ComponentParameters::Wing(wing) => generate_wing(wing, tessellation),
        ComponentParameters::Fuselage(fuselage) => generate_fuselage(fuselage, tessellation),
        ComponentParameters::Engine(engine) => generate_engine(engine, tessellation),
    }
}

/// Closed-form wing volume by Simpson's rule over the linear chord taper.
///
/// Section area at local chord `c` is `AIRFOIL_AREA_FACTOR * (t/c) * c^2`,
/// quadratic in the spanwise coordinate, so the three-point rule
/// `V = span/6 * (A_root + 4*A_mid + A_tip)` is exact.
#[must_use]
pub fn wing_volume_m3(wing: &WingParameters) -> f64 {
    let area_at = |chord: f64| AIRFOIL_AREA_FACTOR * wing.thickness_fraction() * chord * chord;
    let a_root = area_at(wing.root_chord_m);
    let a_mid = area_at((wing.root_chord_m + wing.tip_chord_m) / 2.0);
    let a_tip = area_at(wing.tip_chord_m);
    wing.span_m / 6.0 * (a_root + 4.0 * a_mid + a_tip)
}

/// Closed-form fuselage volume: nose frustum + cylindrical barrel + tail
/// frustum of revolution.
#[must_use]
pub fn fuselage_volume_m3(fuselage: &FuselageParameters) -> f64 {
    let r = fuselage.radius_m();
    let nose_len = fuselage.length_m * FUSELAGE_NOSE_FRACTION;
    let tail_len = fuselage.length_m * FUSELAGE_TAIL_FRACTION;
    let barrel_len = fuselage.length_m - nose_len - tail_len;
    frustum_volume(nose_len, FUSELAGE_NOSE_RADIUS_RATIO * r, r)
        + PI * r * r * barrel_len
        + frustum_volume(tail_len, r, FUSELAGE_TAIL_RADIUS_RATIO * r)
}

/// Closed-form nacelle volume: inlet frustum + core cylinder + exhaust
/// frustum.
#[must_use]
pub fn engine_volume_m3(engine: &EngineParameters) -> f64 {
    let r = engine.radius_m();
    let inlet_len = engine.length_m * ENGINE_INLET_FRACTION;
    let exhaust_len = engine.length_m * ENGINE_EXHAUST_FRACTION;
    let core_len = engine.length_m - inlet_len - exhaust_len;
    frustum_volume(inlet_len, ENGINE_INLET_RADIUS_RATIO * r, r)
        + PI * r * r * core_len
        + frustum_volume(exhaust_len, r, ENGINE_EXHAUST_RADIUS_RATIO * r)
}

/// Volume of a cone frustum, `pi*h/3 * (r0^2 + r0*r1 + r1^2)`.
fn frustum_volume(height: f64, r0: f64, r1: f64) -> f64 {
    PI * height / 3.0 * (r0 * r0 + r0 * r1 + r1 * r1)
}

/// Lateral (slant) surface of a cone frustum.
fn frustum_lateral_area(height: f64, r0: f64, r1: f64) -> f64 {
    let slant = (height * height + (r1 - r0) * (r1 - r0)).sqrt();
    PI * (r0 + r1) * slant
}

/// Wetted wing area: both faces of the planform with a thickness correction.
fn wing_surface_area_m2(wing: &WingParameters) -> f64 {
    2.0 * wing.planform_area_m2()
        * (1.0 + WETTED_AREA_THICKNESS_CORRECTION * wing.thickness_fraction())
}

fn fuselage_surface_area_m2(fuselage: &FuselageParameters) -> f64 {
    let r = fuselage.radius_m();
    let nose_r = FUSELAGE_NOSE_RADIUS_RATIO * r;
    let tail_r = FUSELAGE_TAIL_RADIUS_RATIO * r;
    let nose_len = fuselage.length_m * FUSELAGE_NOSE_FRACTION;
    let tail_len = fuselage.length_m * FUSELAGE_TAIL_FRACTION;
    let barrel_len = fuselage.length_m - nose_len - tail_len;
    frustum_lateral_area(nose_len, nose_r, r)
        + 2.0 * PI * r * barrel_len
        + frustum_lateral_area(tail_len, r, tail_r)
        + PI * nose_r * nose_r
        + PI * tail_r * tail_r
}

fn engine_surface_area_m2(engine: &EngineParameters) -> f64 {
    let r = engine.radius_m();
    let inlet_r = ENGINE_INLET_RADIUS_RATIO * r;
    let exhaust_r = ENGINE_EXHAUST_RADIUS_RATIO * r;
    let inlet_len = engine.length_m * ENGINE_INLET_FRACTION;
    let exhaust_len = engine.length_m * ENGINE_EXHAUST_FRACTION;
    let core_len = engine.length_m - inlet_len - exhaust_len;
    frustum_lateral_area(inlet_len, inlet_r, r)
        + 2.0 * PI * r * core_len
        + frustum_lateral_area(exhaust_len, r, exhaust_r)
        + PI * inlet_r * inlet_r
        + PI * exhaust_r * exhaust_r
}

fn generate_wing(
    wing: &WingParameters,
    tessellation: &Tessellation,
) -> Result<GeometryModel, GenerationError> {
    if wing.span_m <= 0.0 {
        return Err(GenerationError::DegenerateDimension {
            field: "span",
            value: wing.span_m,
        });
    }
    if wing.root_chord_m <= 0.0 {
        return Err(GenerationError::DegenerateDimension {
            field: "root_chord",
            value: wing.root_chord_m,
        });
    }
    if wing.tip_chord_m > wing.root_chord_m {
        return Err(GenerationError::InvertedTaper {
            root_chord_m: wing.root_chord_m,
            tip_chord_m: wing.tip_chord_m,
        });
    }

    let chord_samples = (tessellation.ring_segments.max(6) as usize) / 2;
    let half_steps = tessellation.span_steps.max(1) as usize;
    let station_count = 2 * half_steps + 1;

    // Master section: a biconvex polygon at unit chord, amplitude-scaled so
    // its shoelace area is exactly AIRFOIL_AREA_FACTOR * thickness_fraction.
    // Every station ring is this polygon scaled by the local chord, which
    // makes the lofted mesh volume agree with the Simpson formula to
    // floating-point precision at any resolution.
    let master = master_section(chord_samples, AIRFOIL_AREA_FACTOR * wing.thickness_fraction());

    let semi_span = wing.span_m / 2.0;
    let sweep_tan = wing.sweep_deg.to_radians().tan();
    let mut rings = Vec::with_capacity(station_count);
    for station in 0..station_count {
        let y = -semi_span + wing.span_m * station as f64 / (station_count - 1) as f64;
        let eta = y.abs() / semi_span;
        let chord = wing.chord_at(eta);
        let leading_edge_x = sweep_tan * y.abs();
        let ring: Vec<Point> = master
            .iter()
            .map(|&(sx, sz)| Point::new(leading_edge_x + chord * sx, y, chord * sz))
            .collect();
        rings.push(ring);
    }

    let mut mesh = loft_rings(&rings);
    mesh.recompute_normals();
    Ok(GeometryModel {
        mesh,
        volume_m3: wing_volume_m3(wing),
        surface_area_m2: wing_surface_area_m2(wing),
    })
}

/// Biconvex unit-chord section as (x, z) pairs forming a closed ring.
///
/// `target_area` is the required shoelace area of the polygon; the parabolic
/// arc `z = x*(1-x)` is amplitude-scaled to hit it exactly, so the section
/// shape factor is a property of the formula, not of the sampling density.
fn master_section(chord_samples: usize, target_area: f64) -> Vec<(f64, f64)> {
    let n = chord_samples.max(3);
    let mut ring = Vec::with_capacity(2 * n);
    for j in 0..=n {
        let x = j as f64 / n as f64;
        ring.push((x, x * (1.0 - x)));
    }
    for j in (1..n).rev() {
        let x = j as f64 / n as f64;
        ring.push((x, -(x * (1.0 - x))));
    }

    let raw_area = shoelace_area(&ring);
    let scale = target_area / raw_area;
    for point in &mut ring {
        point.1 *= scale;
    }
    ring
}

/// Absolute shoelace area of a closed polygon.
fn shoelace_area(ring: &[(f64, f64)]) -> f64 {
    let mut doubled = 0.0;
    for (i, &(x0, z0)) in ring.iter().enumerate() {
        let (x1, z1) = ring[(i + 1) % ring.len()];
        doubled += x0 * z1 - x1 * z0;
    }
    (doubled / 2.0).abs()
}

fn generate_fuselage(
    fuselage: &FuselageParameters,
    tessellation: &Tessellation,
) -> Result<GeometryModel, GenerationError> {
    if fuselage.length_m <= 0.0 {
        return Err(GenerationError::DegenerateDimension {
            field: "fuselage_length",
            value: fuselage.length_m,
        });
    }
    let r = fuselage.radius_m();
    if r <= 0.0 {
        return Err(GenerationError::DegenerateDimension {
            field: "fuselage_diameter",
            value: fuselage.diameter_m,
        });
    }
    let profile = [
        (0.0, FUSELAGE_NOSE_RADIUS_RATIO * r),
        (fuselage.length_m * FUSELAGE_NOSE_FRACTION, r),
        (fuselage.length_m * (1.0 - FUSELAGE_TAIL_FRACTION), r),
        (fuselage.length_m, FUSELAGE_TAIL_RADIUS_RATIO * r),
    ];
    let mut mesh = revolve_profile(&profile, tessellation);
    mesh.recompute_normals();
    Ok(GeometryModel {
        mesh,
        volume_m3: fuselage_volume_m3(fuselage),
        surface_area_m2: fuselage_surface_area_m2(fuselage),
    })
}

fn generate_engine(
    engine: &EngineParameters,
    tessellation: &Tessellation,
) -> Result<GeometryModel, GenerationError> {
    if engine.length_m <= 0.0 {
        return Err(GenerationError::DegenerateDimension {
            field: "engine_length",
            value: engine.length_m,
        });
    }
    let r = engine.radius_m();
    if r <= 0.0 {
        return Err(GenerationError::DegenerateDimension {
            field: "engine_diameter",
            value: engine.diameter_m,
        });
    }
    let profile = [
        (0.0, ENGINE_INLET_RADIUS_RATIO * r),
        (engine.length_m * ENGINE_INLET_FRACTION, r),
        (engine.length_m * (1.0 - ENGINE_EXHAUST_FRACTION), r),
        (engine.length_m, ENGINE_EXHAUST_RADIUS_RATIO * r),
    ];
    let mut mesh = revolve_profile(&profile, tessellation);
    mesh.recompute_normals();
    Ok(GeometryModel {
        mesh,
        volume_m3: engine_volume_m3(engine),
        surface_area_m2: engine_surface_area_m2(engine),
    })
}

/// Surface of revolution around the X axis from an (x, radius) profile.
fn revolve_profile(profile: &[(f64, f64)], tessellation: &Tessellation) -> TriangleMesh {
    let segments = tessellation.ring_segments.max(8) as usize;
    let mut rings = Vec::with_capacity(profile.len());
    for &(x, radius) in profile {
        let ring: Vec<Point> = (0..segments)
            .map(|k| {
                let theta = 2.0 * PI * k as f64 / segments as f64;
                Point::new(x, radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        rings.push(ring);
    }
    loft_rings(&rings)
}

/// Connect a sequence of equal-length rings into a capped, watertight mesh.
///
/// Walls are quad strips split into triangles; both end rings are closed with
/// centroid fans. Orientation is normalized so the enclosed volume is
/// positive.
fn loft_rings(rings: &[Vec<Point>]) -> TriangleMesh {
    let ring_len = rings[0].len();
    debug_assert!(rings.iter().all(|ring| ring.len() == ring_len));

    let mut vertices: Vec<Point> = Vec::with_capacity(rings.len() * ring_len + 2);
    for ring in rings {
        vertices.extend_from_slice(ring);
    }

    let vertex = |ring: usize, k: usize| (ring * ring_len + k % ring_len) as u32;
    let mut indices = Vec::with_capacity((rings.len() - 1) * ring_len * 2 + ring_len * 2);
    for i in 0..rings.len() - 1 {
        for k in 0..ring_len {
            indices.push([vertex(i, k), vertex(i + 1, k), vertex(i + 1, k + 1)]);
            indices.push([vertex(i, k), vertex(i + 1, k + 1), vertex(i, k + 1)]);
        }
    }

    let start_center = centroid(&rings[0]);
    let end_center = centroid(rings.last().expect("at least one ring"));
    let start_center_idx = vertices.len() as u32;
    vertices.push(start_center);
    let end_center_idx = vertices.len() as u32;
    vertices.push(end_center);

    let last = rings.len() - 1;
    for k in 0..ring_len {
        indices.push([start_center_idx, vertex(0, k), vertex(0, k + 1)]);
        indices.push([end_center_idx, vertex(last, k + 1), vertex(last, k)]);
    }

    let mut mesh = TriangleMesh {
        vertices,
        indices,
        normals: None,
    };
    if mesh.signed_volume_m3() < 0.0 {
        for tri in &mut mesh.indices {
            tri.swap(1, 2);
        }
    }
    mesh
}

/// Average of a ring's vertices.
fn centroid(ring: &[Point]) -> Point {
    let mut sum = nalgebra::Vector3::zeros();
    for p in ring {
        sum += p.to_vector();
    }
    Point::from(sum / ring.len() as f64)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn reference_wing() -> WingParameters {
        WingParameters {
            span_m: 2.0,
            root_chord_m: 0.5,
            tip_chord_m: 0.3,
            sweep_deg: 20.0,
            thickness_pct: 12,
        }
    }

    #[test]
    fn wing_volume_matches_simpson_by_hand() {
        let wing = reference_wing();
        let t = 0.12;
        let area = |c: f64| 0.65 * t * c * c;
        let expected = 2.0 / 6.0 * (area(0.5) + 4.0 * area(0.4) + area(0.3));
        assert_relative_eq!(wing_volume_m3(&wing), expected, epsilon = 1.0e-12);
    }

    #[test]
    fn wing_mesh_volume_agrees_with_closed_form() {
        let wing = reference_wing();
        let model =
            generate(&ComponentParameters::Wing(wing)).expect("reference wing generates");
        assert_relative_eq!(
            model.mesh.signed_volume_m3(),
            model.volume_m3,
            max_relative = 1.0e-3
        );
    }

    #[test]
    fn reported_volume_is_invariant_to_tessellation() {
        let params = ComponentParameters::Wing(reference_wing());
        let coarse = generate_with(
            &params,
            &Tessellation {
                span_steps: 2,
                ring_segments: 8,
            },
        )
        .expect("coarse mesh generates");
        let fine = generate_with(
            &params,
            &Tessellation {
                span_steps: 48,
                ring_segments: 96,
            },
        )
        .expect("fine mesh generates");
        assert_eq!(coarse.volume_m3.to_bits(), fine.volume_m3.to_bits());
        assert_eq!(
            coarse.surface_area_m2.to_bits(),
            fine.surface_area_m2.to_bits()
        );
        assert!(fine.mesh.vertices.len() > coarse.mesh.vertices.len());
    }

    #[test]
    fn generation_is_deterministic() {
        let params = ComponentParameters::Wing(reference_wing());
        let first = generate(&params).expect("first generation succeeds");
        let second = generate(&params).expect("second generation succeeds");
        assert_eq!(first, second);
    }

    #[test]
    fn meshes_are_watertight_with_valid_indices() {
        let components = [
            ComponentParameters::Wing(reference_wing()),
            ComponentParameters::Fuselage(FuselageParameters {
                length_m: 12.0,
                diameter_m: 1.6,
            }),
            ComponentParameters::Engine(EngineParameters {
                length_m: 2.4,
                diameter_m: 1.0,
            }),
        ];
        for params in components {
            let model = generate(&params).expect("component generates");
            assert!(model.mesh.indices_are_valid(), "{:?}", params.kind());
            assert!(model.mesh.signed_volume_m3() > 0.0, "{:?}", params.kind());
            assert!(model.volume_m3 > 0.0);
            assert!(model.surface_area_m2 > 0.0);
        }
    }

    #[test]
    fn revolution_solids_match_their_frustum_formulas_closely() {
        // The inscribed-polygon mesh slightly underestimates the circular
        // sections; the closed form is authoritative. Sanity-check agreement
        // at a fine angular resolution.
        let fuselage = FuselageParameters {
            length_m: 12.0,
            diameter_m: 1.6,
        };
        let model = generate_with(
            &ComponentParameters::Fuselage(fuselage),
            &Tessellation {
                span_steps: 12,
                ring_segments: 256,
            },
        )
        .expect("fuselage generates");
        assert_relative_eq!(
            model.mesh.signed_volume_m3(),
            fuselage_volume_m3(&fuselage),
            max_relative = 1.0e-3
        );
    }

    #[test]
    fn inverted_taper_is_a_generation_error() {
        let mut wing = reference_wing();
        wing.tip_chord_m = 0.9;
        let error = generate(&ComponentParameters::Wing(wing)).expect_err("taper rejected");
        assert_eq!(
            error,
            GenerationError::InvertedTaper {
                root_chord_m: 0.5,
                tip_chord_m: 0.9,
            }
        );
    }

    #[test]
    fn out_of_range_parameters_are_rejected_before_meshing() {
        let mut wing = reference_wing();
        wing.root_chord_m = 0.0;
        let error = generate(&ComponentParameters::Wing(wing)).expect_err("zero chord rejected");
        assert!(matches!(error, GenerationError::Rejected(_)));
    }

    #[test]
    fn mass_follows_material_density() {
        let model = generate(&ComponentParameters::Wing(reference_wing()))
            .expect("reference wing generates");
        let material = crate::materials::find("Aluminum 7075-T6").expect("catalog entry");
        assert_relative_eq!(
            model.mass_kg(material),
            model.volume_m3 * 2810.0,
            epsilon = 1.0e-9
        );
    }
}
