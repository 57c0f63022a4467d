use super::helpers;

/// Offscreen targets for one frame.
///
/// - `hdr_*` holds the lit model in Rgba16Float, with `depth_view` alongside.
/// - `bloom_*` are half-res ping-pong buffers for bright pass and blur.
pub(crate) struct RenderTargets {
    _hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    _depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    _bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    _bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (_hdr_tex, hdr_view) = helpers::create_sampled_target(device, "hdr_tex", width, height);
        let (_depth_tex, depth_view) = helpers::create_texture(
            device,
            "depth_tex",
            width,
            height,
            helpers::DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let (bw, bh) = helpers::half_extent(width, height);
        let (_bloom_a, bloom_a_view) = helpers::create_sampled_target(device, "bloom_a", bw, bh);
        let (_bloom_b, bloom_b_view) = helpers::create_sampled_target(device, "bloom_b", bw, bh);
        Self {
            _hdr_tex,
            hdr_view,
            _depth_tex,
            depth_view,
            _bloom_a,
            bloom_a_view,
            _bloom_b,
            bloom_b_view,
        }
    }
}
