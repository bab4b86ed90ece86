#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod analysis;
pub mod assembly;
pub mod atmosphere;
pub mod collaborators;
pub mod errors;
pub mod geometry;
pub mod materials;
pub mod mesh;
pub mod optimize;
pub mod parameters;
pub mod report;
pub mod session;

pub use analysis::{analyze, MissionProfile, SimulationResult, SimulationStatus};
pub use assembly::{AssembledAircraft, AssemblyConfig};
pub use errors::{GenerationError, OptimizationFailed, PlacementError, ValidationError};
pub use geometry::{generate, GeometryModel, Tessellation};
pub use materials::Material;
pub use optimize::{optimize, OptimizerConfig};
pub use parameters::{
    ComponentKind, ComponentParameters, EngineParameters, FuselageParameters, WingParameters,
};
pub use session::{DesignSession, SessionError};
