use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{CircleDefinition, Composer, ComposerConfig, StructuralInputs, Viewport};
use crate::error::{CircleError, CircleResult};
use crate::render::{DrawingSurface, ImageEncoder, PaintStats};

use super::{
    ControlsProvider, ExportReport, ExportRequest, ExportSink, VisualParams, export_image, render,
};

/// Construction-time settings for a [`CircleStudio`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioConfig {
    pub viewport: Viewport,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub visual: VisualParams,
}

impl StudioConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            seed: None,
            composer: ComposerConfig::default(),
            visual: VisualParams::default(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_visual(mut self, visual: VisualParams) -> Self {
        self.visual = visual;
        self
    }

    #[must_use]
    pub fn with_composer(mut self, composer: ComposerConfig) -> Self {
        self.composer = composer;
        self
    }
}

/// Owns the current definition and drives compose, redraw and export.
///
/// The definition is replaced wholesale on every regeneration and is never
/// touched by visual-only updates.
pub struct CircleStudio<S: DrawingSurface> {
    composer: Composer,
    rng: StdRng,
    viewport: Viewport,
    visual: VisualParams,
    surface: Option<S>,
    definition: Option<CircleDefinition>,
}

impl<S: DrawingSurface> CircleStudio<S> {
    pub fn new(config: StudioConfig) -> CircleResult<Self> {
        if !config.viewport.is_valid() {
            return Err(CircleError::InvalidViewport {
                width: config.viewport.width,
                height: config.viewport.height,
            });
        }
        config.visual.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            composer: Composer::new(config.composer)?,
            rng,
            viewport: config.viewport,
            visual: config.visual,
            surface: None,
            definition: None,
        })
    }

    #[must_use]
    pub fn with_surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn attach_surface(&mut self, surface: S) -> Option<S> {
        self.surface.replace(surface)
    }

    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn into_surface(self) -> Option<S> {
        self.surface
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn visual_params(&self) -> &VisualParams {
        &self.visual
    }

    #[must_use]
    pub fn definition(&self) -> Option<&CircleDefinition> {
        self.definition.as_ref()
    }

    /// Composes a new definition without drawing it.
    pub fn compose_from(&mut self, inputs: &StructuralInputs) -> &CircleDefinition {
        let definition = self.composer.compose(inputs, self.viewport, &mut self.rng);
        debug!(summary = ?definition.summary(), "composed new circle");
        self.definition.insert(definition)
    }

    /// Samples structural controls, composes a new definition and draws it.
    ///
    /// Requires a surface; on failure the previous definition stays in place.
    pub fn regenerate<P: ControlsProvider + ?Sized>(
        &mut self,
        controls: &P,
    ) -> CircleResult<PaintStats> {
        if self.surface.is_none() {
            return Err(drawing_surface_missing());
        }
        let inputs = StructuralInputs::from_controls(controls)?;
        self.compose_from(&inputs);
        self.redraw()
    }

    /// Samples visual controls and redraws the existing definition.
    pub fn apply_visual_controls<P: ControlsProvider + ?Sized>(
        &mut self,
        controls: &P,
    ) -> CircleResult<PaintStats> {
        let visual = VisualParams::from_controls(controls, &self.visual)?;
        self.set_visual_params(visual)
    }

    pub fn set_visual_params(&mut self, visual: VisualParams) -> CircleResult<PaintStats> {
        visual.validate()?;
        self.visual = visual;
        self.redraw()
    }

    /// Installs an externally built definition after validating it.
    pub fn replace_definition(&mut self, definition: CircleDefinition) -> CircleResult<()> {
        definition.validate()?;
        self.definition = Some(definition);
        Ok(())
    }

    /// Paints the current definition with the current visual parameters.
    pub fn redraw(&mut self) -> CircleResult<PaintStats> {
        let Some(definition) = self.definition.as_ref() else {
            return Err(CircleError::MissingDefinition);
        };
        let Some(surface) = self.surface.as_mut() else {
            return Err(drawing_surface_missing());
        };
        render(definition, &self.visual, surface, self.viewport)
    }

    /// Exports the current definition at `request.scale` onto a fresh
    /// surface. The attached display surface is left untouched.
    pub fn export<E, F, K>(
        &self,
        request: &ExportRequest,
        make_surface: F,
        sink: &mut K,
    ) -> CircleResult<ExportReport>
    where
        E: DrawingSurface + ImageEncoder,
        F: FnOnce(Viewport) -> CircleResult<E>,
        K: ExportSink + ?Sized,
    {
        export_image(
            self.definition.as_ref(),
            &self.visual,
            self.viewport,
            request,
            make_surface,
            sink,
        )
    }
}

fn drawing_surface_missing() -> CircleError {
    warn!("no drawing surface attached");
    CircleError::PreconditionNotMet {
        input: "drawing surface",
    }
}
