use serde::{Deserialize, Serialize};

/// Element group of a circle frame. Later layers overdraw earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CircleLayerKind {
    Rings,
    Shapes,
    ConnectingLines,
    VertexSymbols,
    RingSymbols,
    RadialLines,
}

impl CircleLayerKind {
    /// Back-to-front paint order.
    pub const CANONICAL_ORDER: [Self; 6] = [
        Self::Rings,
        Self::Shapes,
        Self::ConnectingLines,
        Self::VertexSymbols,
        Self::RingSymbols,
        Self::RadialLines,
    ];

    /// Whether the configured line style (dash pattern) applies to this layer.
    #[must_use]
    pub const fn uses_line_style(self) -> bool {
        matches!(self, Self::ConnectingLines | Self::RadialLines)
    }
}

#[cfg(test)]
mod tests {
    use super::CircleLayerKind;

    #[test]
    fn canonical_order_paints_radial_lines_last() {
        assert_eq!(CircleLayerKind::CANONICAL_ORDER[0], CircleLayerKind::Rings);
        assert_eq!(
            CircleLayerKind::CANONICAL_ORDER.last(),
            Some(&CircleLayerKind::RadialLines)
        );
    }

    #[test]
    fn only_line_layers_take_dash_style() {
        let dashed: Vec<_> = CircleLayerKind::CANONICAL_ORDER
            .into_iter()
            .filter(|kind| kind.uses_line_style())
            .collect();
        assert_eq!(
            dashed,
            vec![CircleLayerKind::ConnectingLines, CircleLayerKind::RadialLines]
        );
    }
}
