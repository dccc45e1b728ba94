//! Shader sources, compilation, and program linking.
//!
//! A single annotated file carries every stage of a program:
//!
//! ```text
//! #type vertex
//! #version 450 core
//! ...
//! #type fragment
//! #version 450 core
//! ...
//! ```
//!
//! [`parse_shader_source`] splits it, [`compile_stage`] compiles one stage
//! with naga's GLSL frontend, and [`ShaderProgram`] links both into a render
//! pipeline.

mod compile;
mod error;
mod program;
mod source;
mod stage;

pub use compile::{compile_stage, CompiledStage, ENTRY_POINT};
pub use error::ShaderError;
pub use program::{ProgramDesc, ShaderProgram};
pub use source::{load_shader_file, parse_shader_source, ShaderSources, STAGE_MARKER};
pub use stage::ShaderStage;
