use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use super::{ShaderError, ShaderStage};

/// Token that opens a stage segment, e.g. `#type vertex`.
pub const STAGE_MARKER: &str = "#type";

/// Stage sources split out of a single annotated shader file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    stages: BTreeMap<ShaderStage, String>,
}

impl ShaderSources {
    pub fn get(&self, stage: ShaderStage) -> Option<&str> {
        self.stages.get(&stage).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing stage is an error.
    pub fn require(&self, stage: ShaderStage) -> Result<&str, ShaderError> {
        self.get(stage).ok_or(ShaderError::MissingStage { stage })
    }

    /// Stages present, in pipeline order.
    pub fn stages(&self) -> impl Iterator<Item = ShaderStage> + '_ {
        self.stages.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    fn insert(&mut self, stage: ShaderStage, body: &str, line: usize) -> Result<(), ShaderError> {
        if self.stages.contains_key(&stage) {
            return Err(ShaderError::DuplicateStage { stage, line });
        }
        self.stages.insert(stage, body.to_string());
        Ok(())
    }
}

/// Splits an annotated shader source into its stages.
///
/// A segment starts with a marker line (`#type` + one separator + stage name);
/// its body is everything after that line up to the next `#type` or end of
/// input. Text before the first marker is ignored, and the rest of a marker
/// line after the stage name is skipped.
pub fn parse_shader_source(src: &str) -> Result<ShaderSources, ShaderError> {
    let mut sources = ShaderSources::default();
    let mut cursor = src.find(STAGE_MARKER);

    while let Some(pos) = cursor {
        let line = line_number(src, pos);
        let after = pos + STAGE_MARKER.len();

        let line_end = src[after..].find('\n').map_or(src.len(), |i| after + i);
        let name = stage_name(&src[after..line_end]).ok_or(ShaderError::MalformedMarker { line })?;
        let stage = ShaderStage::from_name(name).ok_or_else(|| ShaderError::UnknownStage {
            name: name.to_string(),
            line,
        })?;

        let next = src[after..].find(STAGE_MARKER).map(|i| after + i);
        let body_start = (line_end + 1).min(src.len());
        let body_end = next.unwrap_or(src.len());

        // A second marker on the same line leaves this stage empty.
        let body = src.get(body_start..body_end).unwrap_or("");

        sources.insert(stage, body, line)?;
        cursor = next;
    }

    Ok(sources)
}

/// Reads and splits a shader file.
pub fn load_shader_file(path: impl AsRef<Path>) -> Result<ShaderSources> {
    let path = path.as_ref();
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read shader file {}", path.display()))?;

    let sources = parse_shader_source(&src)
        .with_context(|| format!("failed to parse shader file {}", path.display()))?;

    log::debug!(
        "loaded {} ({} stage(s): {})",
        path.display(),
        sources.len(),
        sources.stages().map(ShaderStage::name).collect::<Vec<_>>().join(", ")
    );

    Ok(sources)
}

/// Extracts the stage name from the remainder of a marker line.
///
/// Exactly one whitespace separator must follow the marker; the name runs to
/// the next whitespace. Returns `None` when the separator or the name is
/// missing.
fn stage_name(header: &str) -> Option<&str> {
    let mut chars = header.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars
            .as_str()
            .split(char::is_whitespace)
            .next()
            .filter(|name| !name.is_empty()),
        _ => None,
    }
}

fn line_number(src: &str, offset: usize) -> usize {
    src[..offset].matches('\n').count() + 1
}
