pub mod composer;
pub mod composer_config;
pub mod definition;
pub mod geometry;
pub mod selector;
pub mod shape;
pub mod themes;
pub mod types;

pub use composer::{Composer, StructuralInputs, compose};
pub use composer_config::{Band, ComposerConfig, CountRange};
pub use definition::{
    CIRCLE_DEFINITION_JSON_SCHEMA_V1, CircleDefinition, CircleDefinitionJsonContractV1,
    DefinitionSummary, InnerShape, LineSegment, Ring, SymbolPlacement,
};
pub use selector::ShapeSelector;
pub use shape::{MAX_SHAPE_VERTICES, VertexList};
pub use themes::SymbolTheme;
pub use types::{Point, Viewport};
