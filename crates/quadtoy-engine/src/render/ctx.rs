use winit::dpi::PhysicalSize;

/// Renderer-facing context (device/queue + surface format + framebuffer size).
///
/// Intentionally small and stable.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,

    /// Framebuffer size in physical pixels, sampled this frame.
    pub resolution: PhysicalSize<u32>,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        resolution: PhysicalSize<u32>,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            resolution,
        }
    }
}

/// Target for drawing (encoder + color view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self {
            encoder,
            color_view,
        }
    }
}
