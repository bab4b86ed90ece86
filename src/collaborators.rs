//! Seams for the I/O-bound collaborators that surround the core.
//!
//! Natural-language parameter extraction and CAD-format export are slow,
//! external concerns. The core talks to them through these traits, treats
//! their output as untrusted, and surfaces their failures verbatim without
//! ever letting one corrupt in-core state.

use thiserror::Error;

use crate::geometry::GeometryModel;
use crate::parameters::ComponentParameters;

/// Failure reported by a parameter-extraction collaborator.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("parameter extraction failed: {0}")]
pub struct ExtractionError(pub String);

/// Natural-language to design-parameter extraction.
///
/// Implementations typically wrap a remote model call and may block. The
/// returned parameters are untrusted: the session re-validates every field
/// against its declared range before accepting them.
pub trait ParameterExtractor {
    /// Extract component parameters from free-form text.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError`] when no parameters can be derived.
    fn extract(&self, text: &str) -> Result<ComponentParameters, ExtractionError>;
}

/// CAD export formats offered by the export collaborator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExportFormat {
    /// Stereolithography triangle soup.
    Stl,
    /// ISO 10303 STEP.
    Step,
    /// Initial Graphics Exchange Specification.
    Iges,
}

/// Options forwarded to the export collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportOptions {
    /// Binary rather than text encoding where the format supports both.
    pub binary: bool,
    /// Scale applied to metres on the way out (1.0 = export in metres).
    pub unit_scale: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            binary: true,
            unit_scale: 1.0,
        }
    }
}

/// Failure reported by an export collaborator.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("export to {format:?} failed: {reason}")]
pub struct ExportError {
    /// Format the export was attempting.
    pub format: ExportFormat,
    /// Collaborator-supplied description.
    pub reason: String,
}

/// CAD-kernel wrapper that encodes geometry into an interchange format.
///
/// The core hands over vertices, indices, normals and the closed-form
/// volume; all STEP/IGES/STL encoding happens behind this trait.
pub trait GeometryExporter {
    /// Encode a geometry model into the requested format.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when the collaborator cannot encode the
    /// model; the model itself is left untouched either way.
    fn export(
        &self,
        model: &GeometryModel,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<Vec<u8>, ExportError>;
}
