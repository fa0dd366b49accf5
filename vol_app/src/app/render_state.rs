use volcast::{
    render::{CastStats, CastThread, RendererFront},
    volumetric::Volume,
    OrbitCamera, RenderConfig, ViewCommand,
};

/// State of rendering
///
/// Applies view commands to camera, drives the render thread
pub struct RenderState {
    pub camera: OrbitCamera,
    pub renderer_front: RendererFront,
}

impl RenderState {
    /// Start render thread owning `volume`, classified by preset `transfer_function`
    ///
    /// Camera starts at given angles, in degrees
    pub fn new(
        volume: Volume,
        config: RenderConfig,
        transfer_function: &str,
        yaw: f32,
        pitch: f32,
    ) -> Self {
        let mut camera = OrbitCamera::new(volume.get_bound_box(), config.resolution);
        camera.set_angles(yaw, pitch);

        let mut renderer_front = RendererFront::new();
        renderer_front.start_rendering(
            CastThread::new(volume, config).with_transfer_function_name(transfer_function),
        );

        Self {
            camera,
            renderer_front,
        }
    }

    /// Move camera and cast a frame from the new view
    ///
    /// Blocks until the frame is in the shared buffer.
    pub fn render(&mut self, command: ViewCommand) -> volcast::Result<CastStats> {
        let view = self.camera.apply(command);
        self.renderer_front.render(view)
    }

    /// Last frame as 8-bit RGB, top row first
    pub fn frame_rgb8(&self, background: [u8; 3]) -> Option<Vec<u8>> {
        let buffer = self.renderer_front.get_buffer_handle_borrow()?;
        let plane = buffer.lock();
        Some(plane.to_rgb8(background))
    }

    pub fn shutdown_renderer(&mut self) {
        self.renderer_front.finish();
    }
}
