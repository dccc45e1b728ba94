use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::device::check;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::shader::{ProgramDesc, ShaderProgram, ShaderSources};

use super::geometry::{Vertex, QUAD_INDEX_FORMAT, QUAD_INDICES, QUAD_VERTICES};

/// Uniform block bound at `set = 0, binding = 0` when the program declares one.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TintUniform {
    color: [f32; 4],
}

struct TintBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws one static indexed quad with a user-supplied shader program.
///
/// Buffers and the program are created up front; drawing never allocates.
pub struct QuadRenderer {
    program: ShaderProgram,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    tint: Option<TintBinding>,
}

impl QuadRenderer {
    /// Links `sources` and uploads the quad geometry.
    pub fn new(ctx: &RenderCtx<'_>, sources: &ShaderSources) -> Result<Self> {
        let vertex_layouts = [Vertex::layout()];
        let program = ShaderProgram::new(
            ctx.device,
            sources,
            &ProgramDesc {
                label: "lumen quad pipeline",
                vertex_buffers: &vertex_layouts,
                color_format: ctx.surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        )
        .context("failed to build quad shader program")?;

        let (vertex_buffer, index_buffer) = check::call(ctx.device, "upload quad geometry", || {
            let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("lumen quad vbo"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("lumen quad ibo"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            });
            (vbo, ibo)
        })?;

        let tint = if program.uses_uniforms() {
            Some(Self::create_tint(ctx, &program)?)
        } else {
            None
        };

        log::debug!(
            "quad renderer ready ({} vertices, {} indices, tint: {})",
            QUAD_VERTICES.len(),
            QUAD_INDICES.len(),
            tint.is_some()
        );

        Ok(Self {
            program,
            vertex_buffer,
            index_buffer,
            index_count: QUAD_INDICES.len() as u32,
            tint,
        })
    }

    fn create_tint(ctx: &RenderCtx<'_>, program: &ShaderProgram) -> Result<TintBinding> {
        let binding = check::call(ctx.device, "create tint uniform", || {
            let buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("lumen quad tint ubo"),
                contents: bytemuck::bytes_of(&TintUniform {
                    color: Color::BLACK.to_array(),
                }),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("lumen quad tint bind group"),
                layout: &program.bind_group_layout(0),
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });

            TintBinding { buffer, bind_group }
        })
        .context("shader uniforms must be a single vec4 block at set 0, binding 0")?;

        Ok(binding)
    }

    /// Updates the tint uniform. No-op for programs without uniforms.
    pub fn set_tint(&self, queue: &wgpu::Queue, color: Color) {
        let Some(tint) = self.tint.as_ref() else { return };
        let u = TintUniform {
            color: color.to_array(),
        };
        queue.write_buffer(&tint.buffer, 0, bytemuck::bytes_of(&u));
    }

    /// Records the indexed quad draw into `target`, keeping its cleared contents.
    pub fn draw(&self, target: &mut RenderTarget<'_>) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumen quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(self.program.pipeline());
        if let Some(tint) = self.tint.as_ref() {
            rpass.set_bind_group(0, &tint.bind_group, &[]);
        }
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), QUAD_INDEX_FORMAT);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_uniform_is_one_vec4() {
        assert_eq!(std::mem::size_of::<TintUniform>(), 16);
    }
}
