use naga::front::glsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::{ShaderError, ShaderStage};

/// Entry point every stage must define.
pub const ENTRY_POINT: &str = "main";

/// A GLSL stage that parsed and validated successfully.
#[derive(Debug)]
pub struct CompiledStage {
    stage: ShaderStage,
    module: naga::Module,
    uses_uniforms: bool,
}

impl CompiledStage {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn module(&self) -> &naga::Module {
        &self.module
    }

    /// Whether the stage declares any uniform block.
    pub fn uses_uniforms(&self) -> bool {
        self.uses_uniforms
    }

    pub(crate) fn into_module(self) -> naga::Module {
        self.module
    }
}

/// Compiles one GLSL (`#version 450`) stage.
///
/// Parse and validation diagnostics are rendered against `source` and
/// returned as [`ShaderError::Compile`].
pub fn compile_stage(stage: ShaderStage, source: &str) -> Result<CompiledStage, ShaderError> {
    let mut frontend = glsl::Frontend::default();
    let options = glsl::Options::from(stage.to_naga());

    let module = frontend
        .parse(&options, source)
        .map_err(|errors| compile_failed(stage, errors.emit_to_string(source)))?;

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|err| compile_failed(stage, err.emit_to_string(source)))?;

    let has_entry = module
        .entry_points
        .iter()
        .any(|ep| ep.name == ENTRY_POINT && ep.stage == stage.to_naga());
    if !has_entry {
        return Err(compile_failed(
            stage,
            format!("no `{ENTRY_POINT}` entry point for the {stage} stage"),
        ));
    }

    let uses_uniforms = module
        .global_variables
        .iter()
        .any(|(_, var)| var.space == naga::AddressSpace::Uniform);

    log::debug!("compiled {stage} shader (uniforms: {uses_uniforms})");

    Ok(CompiledStage {
        stage,
        module,
        uses_uniforms,
    })
}

fn compile_failed(stage: ShaderStage, log: String) -> ShaderError {
    log::error!("failed to compile {stage} shader");
    log::error!("{log}");
    ShaderError::Compile { stage, log }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = "#version 450 core
layout(location = 0) in vec2 a_Position;
void main() {
    gl_Position = vec4(a_Position, 0.0, 1.0);
}
";

    const FRAGMENT_SOLID: &str = "#version 450 core
layout(location = 0) out vec4 o_Color;
void main() {
    o_Color = vec4(0.2, 0.3, 0.8, 1.0);
}
";

    const FRAGMENT_UNIFORM: &str = "#version 450 core
layout(location = 0) out vec4 o_Color;
layout(set = 0, binding = 0) uniform Tint {
    vec4 u_Color;
};
void main() {
    o_Color = u_Color;
}
";

    #[test]
    fn vertex_stage_compiles() {
        let compiled = compile_stage(ShaderStage::Vertex, VERTEX).unwrap();
        assert_eq!(compiled.stage(), ShaderStage::Vertex);
        assert_eq!(compiled.module().entry_points.len(), 1);
        assert!(!compiled.uses_uniforms());
    }

    #[test]
    fn fragment_stage_compiles() {
        let compiled = compile_stage(ShaderStage::Fragment, FRAGMENT_SOLID).unwrap();
        assert!(!compiled.uses_uniforms());
    }

    #[test]
    fn uniform_block_is_detected() {
        let compiled = compile_stage(ShaderStage::Fragment, FRAGMENT_UNIFORM).unwrap();
        assert!(compiled.uses_uniforms());
    }

    #[test]
    fn syntax_error_reports_stage() {
        let broken = "#version 450 core\nvoid main() { gl_Position = ; }\n";
        match compile_stage(ShaderStage::Vertex, broken) {
            Err(ShaderError::Compile { stage, log }) => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(!log.is_empty());
            }
            other => panic!("expected compile error, got {other:?}"),
        }
    }

    #[test]
    fn undeclared_identifier_fails() {
        let broken = "#version 450 core
layout(location = 0) out vec4 o_Color;
void main() {
    o_Color = missing_color;
}
";
        let err = compile_stage(ShaderStage::Fragment, broken).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Fragment, .. }));
        assert!(err.to_string().starts_with("failed to compile fragment shader"));
    }

    #[test]
    fn empty_source_fails() {
        assert!(compile_stage(ShaderStage::Vertex, "").is_err());
    }
}
