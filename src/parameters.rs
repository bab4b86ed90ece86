//! Bounded design parameters for the parametric component catalog.
//!
//! Every numeric field carries a documented `[min, max]` range. Validation
//! rejects out-of-range input with a [`ValidationError`]; nothing is clamped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Identifier for the three component families in the catalog.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ComponentKind {
    /// Lifting surface, modelled as a tapered swept planform.
    Wing,
    /// Main body, modelled as a tapered body of revolution.
    Fuselage,
    /// Engine nacelle, modelled as a cylinder with conical inlet and exhaust.
    Engine,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wing => write!(f, "wing"),
            Self::Fuselage => write!(f, "fuselage"),
            Self::Engine => write!(f, "engine"),
        }
    }
}

/// Inclusive range a design parameter must stay within.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bound {
    /// Field the bound applies to.
    pub field: &'static str,
    /// Smallest accepted value.
    pub min: f64,
    /// Largest accepted value.
    pub max: f64,
}

impl Bound {
    /// Declare a bound for a named field.
    const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    /// Check a value against the bound.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFinite`] for NaN or infinite input and
    /// [`ValidationError::OutOfRange`] when the value falls outside the range.
    pub fn check(&self, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field: self.field });
        }
        if value < self.min || value > self.max {
            return Err(ValidationError::OutOfRange {
                field: self.field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Declared ranges for every design parameter in the catalog.
pub mod bounds {
    use super::Bound;

    /// Full wing span in metres.
    pub const WING_SPAN: Bound = Bound::new("span", 0.5, 80.0);
    /// Chord at the wing root in metres.
    pub const WING_ROOT_CHORD: Bound = Bound::new("root_chord", 0.1, 15.0);
    /// Chord at the wing tip in metres.
    pub const WING_TIP_CHORD: Bound = Bound::new("tip_chord", 0.05, 15.0);
    /// Leading-edge sweep in degrees.
    pub const WING_SWEEP: Bound = Bound::new("sweep_angle", 0.0, 60.0);
    /// Section thickness as a percentage of local chord.
    pub const WING_THICKNESS: Bound = Bound::new("thickness", 4.0, 25.0);
    /// Fuselage length in metres.
    pub const FUSELAGE_LENGTH: Bound = Bound::new("fuselage_length", 1.0, 80.0);
    /// Fuselage diameter in metres.
    pub const FUSELAGE_DIAMETER: Bound = Bound::new("fuselage_diameter", 0.5, 10.0);
    /// Nacelle length in metres.
    pub const ENGINE_LENGTH: Bound = Bound::new("engine_length", 0.5, 12.0);
    /// Nacelle diameter in metres.
    pub const ENGINE_DIAMETER: Bound = Bound::new("engine_diameter", 0.3, 4.0);
    /// Mission altitude in metres.
    pub const ALTITUDE: Bound = Bound::new("altitude", 0.0, 25_000.0);
    /// Mission speed in metres per second.
    pub const SPEED: Bound = Bound::new("speed", 50.0, 1_000.0);
    /// Material yield strength in megapascals, as received from the
    /// simulation request surface.
    pub const MATERIAL_YIELD: Bound = Bound::new("material_yield", 1.0, 10_000.0);
    /// Material density in kilograms per cubic metre.
    pub const MATERIAL_DENSITY: Bound = Bound::new("material_density", 1.0, 25_000.0);
}

/// Design parameters for a tapered, swept wing.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct WingParameters {
    /// Full span, tip to tip, in metres.
    pub span_m: f64,
    /// Chord at the root in metres.
    pub root_chord_m: f64,
    /// Chord at the tip in metres.
    pub tip_chord_m: f64,
    /// Leading-edge sweep in degrees.
    pub sweep_deg: f64,
    /// Section thickness in whole percent of local chord.
    ///
    /// Kept on an integer grid; this is the axis the corrective-design loop
    /// walks when a mission overloads the structure.
    pub thickness_pct: u32,
}

impl WingParameters {
    /// Validate every field against its declared range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        bounds::WING_SPAN.check(self.span_m)?;
        bounds::WING_ROOT_CHORD.check(self.root_chord_m)?;
        bounds::WING_TIP_CHORD.check(self.tip_chord_m)?;
        bounds::WING_SWEEP.check(self.sweep_deg)?;
        bounds::WING_THICKNESS.check(f64::from(self.thickness_pct))?;
        Ok(())
    }

    /// Trapezoidal planform area in square metres.
    #[must_use]
    pub fn planform_area_m2(&self) -> f64 {
        self.span_m * (self.root_chord_m + self.tip_chord_m) / 2.0
    }

    /// Section thickness as a fraction of local chord.
    #[must_use]
    pub fn thickness_fraction(&self) -> f64 {
        f64::from(self.thickness_pct) / 100.0
    }

    /// Local chord at a spanwise position, `eta` running 0 (root) to 1 (tip).
    #[must_use]
    pub fn chord_at(&self, eta: f64) -> f64 {
        self.root_chord_m + (self.tip_chord_m - self.root_chord_m) * eta
    }
}

/// Design parameters for the fuselage body of revolution.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct FuselageParameters {
    /// Overall length in metres.
    pub length_m: f64,
    /// Maximum diameter in metres.
    pub diameter_m: f64,
}

impl FuselageParameters {
    /// Validate every field against its declared range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        bounds::FUSELAGE_LENGTH.check(self.length_m)?;
        bounds::FUSELAGE_DIAMETER.check(self.diameter_m)?;
        Ok(())
    }

    /// Maximum radius in metres.
    #[must_use]
    pub fn radius_m(&self) -> f64 {
        self.diameter_m / 2.0
    }
}

/// Design parameters for an engine nacelle.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct EngineParameters {
    /// Overall length in metres.
    pub length_m: f64,
    /// Core diameter in metres.
    pub diameter_m: f64,
}

impl EngineParameters {
    /// Validate every field against its declared range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        bounds::ENGINE_LENGTH.check(self.length_m)?;
        bounds::ENGINE_DIAMETER.check(self.diameter_m)?;
        Ok(())
    }

    /// Core radius in metres.
    #[must_use]
    pub fn radius_m(&self) -> f64 {
        self.diameter_m / 2.0
    }
}

/// Parameters for one component of the aircraft, tagged by component family.
///
/// This is the closed catalog the geometry generator dispatches on; there is
/// no string-keyed component lookup anywhere in the core.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum ComponentParameters {
    /// A tapered, swept wing.
    Wing(WingParameters),
    /// A fuselage body of revolution.
    Fuselage(FuselageParameters),
    /// An engine nacelle.
    Engine(EngineParameters),
}

impl ComponentParameters {
    /// Component family these parameters describe.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Wing(_) => ComponentKind::Wing,
            Self::Fuselage(_) => ComponentKind::Fuselage,
            Self::Engine(_) => ComponentKind::Engine,
        }
    }

    /// Validate every field against its declared range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Wing(wing) => wing.validate(),
            Self::Fuselage(fuselage) => fuselage.validate(),
            Self::Engine(engine) => engine.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
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
    fn reference_wing_is_valid() {
        reference_wing().validate().expect("reference wing in range");
    }

    #[test]
    fn out_of_range_span_is_rejected_not_clamped() {
        let mut wing = reference_wing();
        wing.span_m = 200.0;
        let error = wing.validate().expect_err("oversized span rejected");
        assert_eq!(
            error,
            ValidationError::OutOfRange {
                field: "span",
                value: 200.0,
                min: bounds::WING_SPAN.min,
                max: bounds::WING_SPAN.max,
            }
        );
        // The caller's value is untouched; rejection never rewrites input.
        assert_eq!(wing.span_m, 200.0);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let mut wing = reference_wing();
        wing.root_chord_m = f64::NAN;
        assert_eq!(
            wing.validate(),
            Err(ValidationError::NonFinite { field: "root_chord" })
        );
    }

    #[test]
    fn zero_thickness_cannot_be_expressed_in_range() {
        let mut wing = reference_wing();
        wing.thickness_pct = 0;
        assert!(matches!(
            wing.validate(),
            Err(ValidationError::OutOfRange { field: "thickness", .. })
        ));
    }

    #[test]
    fn planform_area_uses_the_trapezoid_rule() {
        let wing = reference_wing();
        let expected = 2.0 * (0.5 + 0.3) / 2.0;
        assert!((wing.planform_area_m2() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn chord_interpolates_linearly_from_root_to_tip() {
        let wing = reference_wing();
        assert!((wing.chord_at(0.0) - 0.5).abs() < f64::EPSILON);
        assert!((wing.chord_at(1.0) - 0.3).abs() < f64::EPSILON);
        assert!((wing.chord_at(0.5) - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn catalog_dispatch_is_exhaustive_over_kinds() {
        let wing = ComponentParameters::Wing(reference_wing());
        let fuselage = ComponentParameters::Fuselage(FuselageParameters {
            length_m: 12.0,
            diameter_m: 1.6,
        });
        let engine = ComponentParameters::Engine(EngineParameters {
            length_m: 2.4,
            diameter_m: 1.0,
        });
        assert_eq!(wing.kind(), ComponentKind::Wing);
        assert_eq!(fuselage.kind(), ComponentKind::Fuselage);
        assert_eq!(engine.kind(), ComponentKind::Engine);
        fuselage.validate().expect("fuselage in range");
        engine.validate().expect("engine in range");
    }
}
