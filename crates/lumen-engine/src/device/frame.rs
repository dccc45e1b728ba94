/// One acquired swapchain image plus the encoder recording into it.
///
/// Holding the surface texture blocks acquisition of the next frame, so a
/// frame must be submitted (or dropped) within the redraw that acquired it.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Queues the recorded commands and presents the image.
    pub(crate) fn finish(self, queue: &wgpu::Queue) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = self;

        queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }
}
