use super::helpers;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth buffers owned by the renderer.
///
/// - `depth_*` matches the swapchain size and is recreated on resize.
/// - `shadow_*` is the fixed-size sun shadow map, sampled by the scene pass.
pub(crate) struct RenderTargets {
    _depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    _shadow_tex: wgpu::Texture,
    pub(crate) shadow_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32, shadow_size: u32) -> Self {
        let (depth_tex, depth_view) = create_depth(device, width, height);
        let (shadow_tex, shadow_view) = helpers::create_texture_view(
            device,
            "shadow_map",
            shadow_size,
            shadow_size,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        Self {
            _depth_tex: depth_tex,
            depth_view,
            _shadow_tex: shadow_tex,
            shadow_view,
        }
    }

    pub(crate) fn recreate_depth(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        (self._depth_tex, self.depth_view) = create_depth(device, width, height);
    }
}

fn create_depth(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    helpers::create_texture_view(
        device,
        "depth_tex",
        width,
        height,
        DEPTH_FORMAT,
        wgpu::TextureUsages::RENDER_ATTACHMENT,
    )
}
