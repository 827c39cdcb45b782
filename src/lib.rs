//! magic-circle: procedural magic circle emblems.
//!
//! Composition is a pure function of structural inputs, a viewport and an
//! injected RNG. Rendering is stateless over the resulting
//! [`CircleDefinition`] and any [`render::DrawingSurface`]; export re-renders
//! the same definition through a scale transform.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{CircleStudio, StudioConfig, VisualParams, render};
pub use crate::core::{CircleDefinition, Composer, ComposerConfig, StructuralInputs, compose};
pub use error::{CircleError, CircleResult};
