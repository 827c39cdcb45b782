use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{CircleError, CircleResult};
use crate::render::{
    CircleLayerKind, CirclePrimitive, LinePrimitive, PathPrimitive, TextPrimitive,
};

/// One backend-agnostic draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Circle(CirclePrimitive),
    Path(PathPrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> CircleResult<()> {
        match self {
            Self::Circle(circle) => circle.validate(),
            Self::Path(path) => path.validate(),
            Self::Line(line) => line.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerPrimitives {
    pub kind: CircleLayerKind,
    pub commands: Vec<DrawCommand>,
}

/// Materialized scene for one circle draw pass, layers in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    /// Empty frame with one layer per kind in canonical order.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let layers = CircleLayerKind::CANONICAL_ORDER
            .into_iter()
            .map(|kind| LayerPrimitives {
                kind,
                commands: Vec::new(),
            })
            .collect();
        Self { viewport, layers }
    }

    pub fn push(&mut self, kind: CircleLayerKind, command: DrawCommand) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.commands.push(command);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CircleLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    fn layer_mut(&mut self, kind: CircleLayerKind) -> Option<&mut LayerPrimitives> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }

    /// All commands in paint order.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.layers.iter().flat_map(|layer| layer.commands.iter())
    }

    pub fn validate(&self) -> CircleResult<()> {
        if !self.viewport.is_valid() {
            return Err(CircleError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for command in self.commands() {
            command.validate()?;
        }
        Ok(())
    }
}
