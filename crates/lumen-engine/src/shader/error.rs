use crate::device::GpuError;

use super::ShaderStage;

/// Failure while splitting, compiling, or linking shader sources.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShaderError {
    #[error("`#type` marker on line {line} is not followed by a separator and a stage name")]
    MalformedMarker { line: usize },

    #[error("unknown shader stage `{name}` on line {line}")]
    UnknownStage { name: String, line: usize },

    #[error("shader stage `{stage}` declared again on line {line}")]
    DuplicateStage { stage: ShaderStage, line: usize },

    #[error("shader source has no `{stage}` stage")]
    MissingStage { stage: ShaderStage },

    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("failed to link shader program")]
    Link(#[from] GpuError),
}
