use std::borrow::Cow;

use crate::device::check;

use super::compile::{compile_stage, ENTRY_POINT};
use super::{ShaderError, ShaderSources, ShaderStage};

/// Fixed-function state a program is linked against.
#[derive(Debug, Clone)]
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub color_format: wgpu::TextureFormat,
    pub blend: Option<wgpu::BlendState>,
    pub topology: wgpu::PrimitiveTopology,
}

/// A linked vertex + fragment program (a wgpu render pipeline).
///
/// The pipeline layout is derived from the shaders, so uniform bind groups
/// must be created from [`bind_group_layout`](Self::bind_group_layout).
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    uses_uniforms: bool,
}

impl ShaderProgram {
    /// Compiles both stages of `sources` and links them.
    ///
    /// Compiled stage modules are released once the pipeline exists.
    pub fn new(
        device: &wgpu::Device,
        sources: &ShaderSources,
        desc: &ProgramDesc<'_>,
    ) -> Result<Self, ShaderError> {
        let vertex = compile_stage(ShaderStage::Vertex, sources.require(ShaderStage::Vertex)?)?;
        let fragment =
            compile_stage(ShaderStage::Fragment, sources.require(ShaderStage::Fragment)?)?;

        let uses_uniforms = vertex.uses_uniforms() || fragment.uses_uniforms();

        let pipeline = check::call(device, "link shader program", || {
            let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("lumen vertex shader"),
                source: wgpu::ShaderSource::Naga(Cow::Owned(vertex.into_module())),
            });
            let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("lumen fragment shader"),
                source: wgpu::ShaderSource::Naga(Cow::Owned(fragment.into_module())),
            });

            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(desc.label),
                layout: None,

                vertex: wgpu::VertexState {
                    module: &vs,
                    entry_point: Some(ENTRY_POINT),
                    compilation_options: Default::default(),
                    buffers: desc.vertex_buffers,
                },

                fragment: Some(wgpu::FragmentState {
                    module: &fs,
                    entry_point: Some(ENTRY_POINT),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: desc.color_format,
                        blend: desc.blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: desc.topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        })?;

        log::debug!("linked shader program `{}`", desc.label);

        Ok(Self {
            pipeline,
            uses_uniforms,
        })
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Whether any stage declares a uniform block.
    pub fn uses_uniforms(&self) -> bool {
        self.uses_uniforms
    }

    /// Layout of bind group `index` as derived from the shaders.
    pub fn bind_group_layout(&self, index: u32) -> wgpu::BindGroupLayout {
        self.pipeline.get_bind_group_layout(index)
    }
}
