use thiserror::Error;

pub type CircleResult<T> = Result<T, CircleError>;

#[derive(Debug, Error)]
pub enum CircleError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A required collaborator or control value was not available.
    #[error("precondition not met: `{input}` is not available")]
    PreconditionNotMet { input: &'static str },

    #[error("no circle definition has been composed yet")]
    MissingDefinition,

    #[error("drawing backend failure: {0}")]
    Backend(String),

    #[error("export failed: {0}")]
    Export(String),
}
