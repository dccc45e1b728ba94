use std::path::PathBuf;

use anyhow::{Context, Result};
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::GpuInit;
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::paint::Color;
use lumen_engine::render::{QuadRenderer, RenderCtx};
use lumen_engine::shader::{load_shader_file, ShaderSources};
use lumen_engine::window::{Runtime, RuntimeConfig};

const DEFAULT_SHADER: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/Texture.glsl");

/// Per-frame change of the tint's red channel.
const TINT_STEP: f32 = 0.05;

/// Red channel that bounces between 0 and 1.
#[derive(Debug, Clone, Copy)]
struct Pulse {
    value: f32,
    step: f32,
}

impl Pulse {
    fn new(step: f32) -> Self {
        Self { value: 0.0, step }
    }

    fn advance(&mut self) -> f32 {
        if self.value > 1.0 {
            self.step = -self.step.abs();
        } else if self.value < 0.0 {
            self.step = self.step.abs();
        }
        self.value += self.step;
        self.value.clamp(0.0, 1.0)
    }
}

struct QuadDemo {
    sources: Option<ShaderSources>,
    renderer: Option<QuadRenderer>,
    red: Pulse,
}

impl QuadDemo {
    fn new(sources: ShaderSources) -> Self {
        Self {
            sources: Some(sources),
            renderer: None,
            red: Pulse::new(TINT_STEP),
        }
    }
}

impl App for QuadDemo {
    fn on_start(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        // Sources are only needed until the program is linked.
        let sources = self.sources.take().context("renderer already started")?;
        self.renderer = Some(QuadRenderer::new(ctx, &sources)?);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        let Some(renderer) = self.renderer.as_ref() else {
            return Ok(AppControl::Continue);
        };

        let tint = Color::from_straight(self.red.advance(), 0.3, 0.8, 1.0);

        if ctx.time.frame_index % 600 == 0 {
            log::debug!("frame {} (dt {:.2} ms)", ctx.time.frame_index, ctx.time.dt * 1000.0);
        }

        ctx.render(Color::BLACK, |rctx, target| {
            renderer.set_tint(rctx.queue, tint);
            renderer.draw(target);
            Ok(())
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SHADER));

    // Fail before a window exists if the file cannot be split.
    let sources = load_shader_file(&path)?;
    log::info!("shader file {}", path.display());

    Runtime::run(RuntimeConfig::default(), GpuInit::default(), QuadDemo::new(sources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_engine::shader::{compile_stage, parse_shader_source, ShaderStage};

    #[test]
    fn shipped_shader_splits_into_both_stages() {
        let sources = load_shader_file(DEFAULT_SHADER).unwrap();
        assert_eq!(sources.stages().collect::<Vec<_>>(), ShaderStage::ALL.to_vec());
    }

    #[test]
    fn shipped_shader_stages_compile() {
        let src = include_str!("../shaders/Texture.glsl");
        let sources = parse_shader_source(src).unwrap();

        let vertex = compile_stage(ShaderStage::Vertex, sources.require(ShaderStage::Vertex).unwrap())
            .unwrap();
        let fragment =
            compile_stage(ShaderStage::Fragment, sources.require(ShaderStage::Fragment).unwrap())
                .unwrap();

        assert!(!vertex.uses_uniforms());
        assert!(fragment.uses_uniforms());
    }

    #[test]
    fn pulse_stays_in_unit_range_and_turns_around() {
        let mut pulse = Pulse::new(TINT_STEP);
        let values: Vec<f32> = (0..100).map(|_| pulse.advance()).collect();

        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        let peak = values.iter().position(|&v| v == 1.0).unwrap();
        assert!(values[peak + 2] < 1.0);
    }
}
