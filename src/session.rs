//! Session-scoped design state with a single-writer versioning discipline.
//!
//! Each user session owns one [`DesignSession`]: the current parameters per
//! component, the mission profile and material, and whatever derived values
//! (geometry, simulation result, assembled aircraft) are still current.
//! Every edit bumps a monotonically increasing revision; derived values are
//! stamped with the revision they were computed from and are discarded the
//! moment an edit supersedes them. Computations for different sessions
//! share nothing and need no locking.

use thiserror::Error;

use crate::analysis::{self, MissionProfile, SimulationResult};
use crate::assembly::{self, AssembledAircraft, AssemblyConfig};
use crate::collaborators::{
    ExportError, ExportFormat, ExportOptions, ExtractionError, GeometryExporter,
    ParameterExtractor,
};
use crate::errors::{GenerationError, OptimizationFailed, PlacementError, ValidationError};
use crate::geometry::{self, GeometryModel};
use crate::materials::Material;
use crate::optimize::{self, OptimizerConfig};
use crate::parameters::{ComponentKind, ComponentParameters, WingParameters};

/// Failure surfaced by a session operation.
///
/// Mostly a composition of the core taxonomy; the one session-specific case
/// is asking for a computation before the component it needs exists.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SessionError {
    /// No parameters have been applied for the required component.
    #[error("no {component} parameters have been applied to this session")]
    MissingParameters {
        /// Component the operation needed.
        component: ComponentKind,
    },
    /// A parameter or mission field was out of range.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Geometry generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// Assembly compilation failed.
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// The corrective-design loop could not reach its target.
    #[error(transparent)]
    Optimization(#[from] OptimizationFailed),
    /// A parameter-extraction collaborator failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// An export collaborator failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Geometry stamped with the parameter revision it was generated from.
#[derive(Clone, Debug, PartialEq)]
struct StampedGeometry {
    revision: u64,
    model: GeometryModel,
}

/// Per-component parameter and geometry state.
#[derive(Clone, Debug, Default, PartialEq)]
struct Slot {
    parameters: Option<ComponentParameters>,
    /// Revision at which the parameters were last edited.
    edited_at: u64,
    geometry: Option<StampedGeometry>,
}

impl Slot {
    fn current_geometry(&self) -> Option<&GeometryModel> {
        self.geometry
            .as_ref()
            .filter(|stamped| stamped.revision == self.edited_at)
            .map(|stamped| &stamped.model)
    }
}

/// Revision pair a simulation result depends on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResultStamp {
    /// Wing-parameter revision the result was computed from.
    pub wing_revision: u64,
    /// Mission/material revision the result was computed from.
    pub environment_revision: u64,
}

/// One user session's design state.
#[derive(Clone, Debug)]
pub struct DesignSession {
    material: Material,
    mission: MissionProfile,
    /// Bumped on every edit; stamps attached to derived values come from
    /// the revision current at computation time.
    revision: u64,
    /// Revision of the last mission or material edit.
    environment_edited_at: u64,
    wing: Slot,
    fuselage: Slot,
    engine: Slot,
    result: Option<(ResultStamp, SimulationResult)>,
    aircraft: Option<AssembledAircraft>,
}

impl DesignSession {
    /// Open a session with a material and mission profile.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the mission is out of range.
    pub fn new(material: Material, mission: MissionProfile) -> Result<Self, ValidationError> {
        mission.validate()?;
        Ok(Self {
            material,
            mission,
            revision: 0,
            environment_edited_at: 0,
            wing: Slot::default(),
            fuselage: Slot::default(),
            engine: Slot::default(),
            result: None,
            aircraft: None,
        })
    }

    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    fn slot(&self, kind: ComponentKind) -> &Slot {
        match kind {
            ComponentKind::Wing => &self.wing,
            ComponentKind::Fuselage => &self.fuselage,
            ComponentKind::Engine => &self.engine,
        }
    }

    fn slot_mut(&mut self, kind: ComponentKind) -> &mut Slot {
        match kind {
            ComponentKind::Wing => &mut self.wing,
            ComponentKind::Fuselage => &mut self.fuselage,
            ComponentKind::Engine => &mut self.engine,
        }
    }

    /// Current mission profile.
    #[must_use]
    pub fn mission(&self) -> &MissionProfile {
        &self.mission
    }

    /// Current material.
    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Current parameters for a component, if any have been applied.
    #[must_use]
    pub fn parameters(&self, kind: ComponentKind) -> Option<&ComponentParameters> {
        self.slot(kind).parameters.as_ref()
    }

    /// Revision stamp of a component's current parameters.
    #[must_use]
    pub fn parameter_revision(&self, kind: ComponentKind) -> u64 {
        self.slot(kind).edited_at
    }

    /// Apply validated parameters to their component slot.
    ///
    /// Bumps the revision and drops every derived value the edit
    /// supersedes: the slot's geometry becomes stale, a wing edit drops the
    /// simulation result, and any compiled aircraft is dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any field is out of range; the
    /// session is left untouched in that case.
    pub fn apply_parameters(&mut self, params: ComponentParameters) -> Result<u64, SessionError> {
        params.validate()?;
        let revision = self.bump();
        let kind = params.kind();
        let slot = self.slot_mut(kind);
        slot.parameters = Some(params);
        slot.edited_at = revision;
        if kind == ComponentKind::Wing {
            self.result = None;
        }
        self.aircraft = None;
        Ok(revision)
    }

    /// Run a collaborator extraction and apply its output.
    ///
    /// The extracted parameters are treated as untrusted and re-validated
    /// field by field; a collaborator failure surfaces verbatim and leaves
    /// the session untouched.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's [`ExtractionError`] or the validation
    /// failure of its output.
    pub fn extract_and_apply(
        &mut self,
        extractor: &impl ParameterExtractor,
        text: &str,
    ) -> Result<u64, SessionError> {
        let params = extractor.extract(text)?;
        self.apply_parameters(params)
    }

    /// Replace the mission profile, invalidating the simulation result.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the mission is out of range.
    pub fn set_mission(&mut self, mission: MissionProfile) -> Result<(), SessionError> {
        mission.validate()?;
        self.mission = mission;
        self.environment_edited_at = self.bump();
        self.result = None;
        Ok(())
    }

    /// Replace the material, invalidating the simulation result.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.environment_edited_at = self.bump();
        self.result = None;
    }

    /// Regenerate geometry for a component from its current parameters.
    ///
    /// The geometry is stamped with the parameter revision it was built
    /// from and returned by reference.
    ///
    /// # Errors
    ///
    /// [`SessionError::MissingParameters`] when the slot is empty, or the
    /// underlying [`GenerationError`].
    pub fn regenerate(&mut self, kind: ComponentKind) -> Result<&GeometryModel, SessionError> {
        let slot = self.slot(kind);
        let params = slot
            .parameters
            .ok_or(SessionError::MissingParameters { component: kind })?;
        let revision = slot.edited_at;
        let model = geometry::generate(&params)?;
        // Synchronous, so the revision read above is still current.
        let stamped = self
            .slot_mut(kind)
            .geometry
            .insert(StampedGeometry { revision, model });
        Ok(&stamped.model)
    }

    /// Offer generated geometry computed at `revision` for storage.
    ///
    /// Returns `false` and discards the geometry when a newer parameter
    /// edit has superseded the revision it was computed from; the stale
    /// value is never written back (last-write-wins per session).
    pub fn submit_geometry(
        &mut self,
        kind: ComponentKind,
        revision: u64,
        model: GeometryModel,
    ) -> bool {
        let slot = self.slot_mut(kind);
        if slot.edited_at != revision {
            return false;
        }
        slot.geometry = Some(StampedGeometry { revision, model });
        true
    }

    /// Geometry for a component, only while it matches the current
    /// parameters.
    #[must_use]
    pub fn current_geometry(&self, kind: ComponentKind) -> Option<&GeometryModel> {
        self.slot(kind).current_geometry()
    }

    /// Stamp a simulation result computed now would carry.
    #[must_use]
    pub fn result_stamp(&self) -> ResultStamp {
        ResultStamp {
            wing_revision: self.wing.edited_at,
            environment_revision: self.environment_edited_at,
        }
    }

    /// Run the structural analysis for the current wing, mission and
    /// material, storing and returning the stamped result.
    ///
    /// # Errors
    ///
    /// [`SessionError::MissingParameters`] without a wing, or the
    /// analyzer's [`ValidationError`].
    pub fn analyze(&mut self) -> Result<SimulationResult, SessionError> {
        let wing = self.wing_parameters()?;
        let stamp = self.result_stamp();
        let result = analysis::analyze(&wing, &self.material, &self.mission)?;
        let accepted = self.submit_result(stamp, result);
        debug_assert!(accepted, "synchronous analysis cannot be superseded");
        Ok(result)
    }

    /// Offer a simulation result computed at `stamp` for storage.
    ///
    /// Returns `false` and discards the result when a newer edit has
    /// superseded either revision in the stamp.
    pub fn submit_result(&mut self, stamp: ResultStamp, result: SimulationResult) -> bool {
        if stamp != self.result_stamp() {
            return false;
        }
        self.result = Some((stamp, result));
        true
    }

    /// The stored simulation result, only while it is still current.
    #[must_use]
    pub fn simulation_result(&self) -> Option<&SimulationResult> {
        self.result
            .as_ref()
            .filter(|(stamp, _)| *stamp == self.result_stamp())
            .map(|(_, result)| result)
    }

    /// Run the corrective-design loop for a failing wing.
    ///
    /// Analyzes first when no current result exists. On success the
    /// corrected parameters are applied to the session, wing geometry is
    /// regenerated, and the passing result is stored and returned.
    ///
    /// # Errors
    ///
    /// [`OptimizationFailed`] when the target is unreachable (the failing
    /// result stays stored), plus the usual missing-parameter and
    /// validation failures.
    pub fn optimize(&mut self, config: &OptimizerConfig) -> Result<SimulationResult, SessionError> {
        let wing = self.wing_parameters()?;
        let current = match self.simulation_result() {
            Some(result) => *result,
            None => self.analyze()?,
        };
        let report = optimize::optimize(&wing, &current, &self.material, &self.mission, config)?;
        if report.iterations > 0 {
            self.apply_parameters(ComponentParameters::Wing(report.parameters))?;
            self.regenerate(ComponentKind::Wing)?;
            let accepted = self.submit_result(self.result_stamp(), report.result);
            debug_assert!(accepted, "synchronous optimization cannot be superseded");
        }
        Ok(report.result)
    }

    /// Compile the three current components into an aircraft.
    ///
    /// Precondition checks run first: every slot must hold parameters and
    /// geometry generated from its current revision. The compiled aircraft
    /// owns copies of the geometry and survives until the next edit.
    ///
    /// # Errors
    ///
    /// [`PlacementError::MissingComponent`] or
    /// [`PlacementError::StaleComponent`] for precondition violations,
    /// [`PlacementError::Interference`] from the layout check.
    pub fn compile(&mut self, config: &AssemblyConfig) -> Result<&AssembledAircraft, SessionError> {
        self.require_current(ComponentKind::Wing)?;
        self.require_current(ComponentKind::Fuselage)?;
        self.require_current(ComponentKind::Engine)?;

        // The slots were checked above; each holds the variant its edits
        // were routed by.
        let (Some(ComponentParameters::Wing(wing_params)), Some(wing_geometry)) =
            (self.wing.parameters, self.wing.current_geometry())
        else {
            unreachable!("wing slot checked above");
        };
        let (Some(ComponentParameters::Fuselage(fuselage_params)), Some(fuselage_geometry)) =
            (self.fuselage.parameters, self.fuselage.current_geometry())
        else {
            unreachable!("fuselage slot checked above");
        };
        let (Some(ComponentParameters::Engine(engine_params)), Some(engine_geometry)) =
            (self.engine.parameters, self.engine.current_geometry())
        else {
            unreachable!("engine slot checked above");
        };

        let aircraft = assembly::compile(
            &wing_params,
            wing_geometry,
            &fuselage_params,
            fuselage_geometry,
            &engine_params,
            engine_geometry,
            config,
        )?;
        Ok(self.aircraft.insert(aircraft))
    }

    /// The compiled aircraft, if one exists and no edit has dropped it.
    #[must_use]
    pub fn aircraft(&self) -> Option<&AssembledAircraft> {
        self.aircraft.as_ref()
    }

    /// Export a component's current geometry through a collaborator.
    ///
    /// A collaborator failure is surfaced verbatim; the stored geometry and
    /// any compiled aircraft are untouched either way.
    ///
    /// # Errors
    ///
    /// Precondition failures as for [`Self::compile`], or the
    /// collaborator's [`ExportError`].
    pub fn export(
        &self,
        kind: ComponentKind,
        exporter: &impl GeometryExporter,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<Vec<u8>, SessionError> {
        self.require_current(kind)?;
        let Some(geometry) = self.current_geometry(kind) else {
            unreachable!("slot checked above");
        };
        Ok(exporter.export(geometry, format, options)?)
    }

    fn wing_parameters(&self) -> Result<WingParameters, SessionError> {
        match self.wing.parameters {
            Some(ComponentParameters::Wing(wing)) => Ok(wing),
            _ => Err(SessionError::MissingParameters {
                component: ComponentKind::Wing,
            }),
        }
    }

    /// Check a slot's compile precondition: parameters applied and geometry
    /// generated from the current revision.
    fn require_current(&self, kind: ComponentKind) -> Result<(), SessionError> {
        let slot = self.slot(kind);
        if slot.parameters.is_none() {
            return Err(PlacementError::MissingComponent { component: kind }.into());
        }
        match &slot.geometry {
            None => Err(PlacementError::MissingComponent { component: kind }.into()),
            Some(stamped) if stamped.revision != slot.edited_at => {
                Err(PlacementError::StaleComponent {
                    component: kind,
                    geometry_version: stamped.revision,
                    parameter_version: slot.edited_at,
                }
                .into())
            }
            Some(_) => Ok(()),
        }
    }
}
