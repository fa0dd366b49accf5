use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;

use crate::{
    camera::ViewTransform,
    config::RenderConfig,
    error::{Result, VolcastError},
    volumetric::{ColoredVolume, Volume},
};

use super::{cast_all, median_filter, CastStats, ImagePlane, RayCaster};

/// How often a waiting front checks the render thread is still alive
const LIVENESS_CHECK: Duration = Duration::from_millis(200);

/// Messages to renderer
///
/// Messages queue up and one is read after frame is done
#[derive(Debug, Clone, Copy)]
pub enum RendererMessage {
    /// Cast one frame from given view
    Render(ViewTransform),
    /// Shut down, thread will get ready to be joined
    ShutDown,
}

/// Interface for renderers running in different thread
///
/// Must be implemented by renderers that wish to communicate using
/// [`RendererFront`].
pub trait RenderThread {
    /// Get reference to shared image plane
    fn get_shared_buffer(&self) -> Arc<Mutex<ImagePlane>>;

    /// Spawn thread with renderer
    ///
    /// Renderer waits for messages, does _not_ start rendering.
    fn start(self) -> JoinHandle<()>;

    /// Communication setter
    fn set_communication(&mut self, communication: (Sender<CastStats>, Receiver<RendererMessage>));
}

/// Background renderer owning its volume.
///
/// Classifies once on start, then casts one frame per [`RendererMessage::Render`].
pub struct CastThread {
    volume: Volume,
    config: RenderConfig,
    /// Overrides `config.transfer_function` when set
    transfer_function_name: Option<String>,
    shared_buffer: Arc<Mutex<ImagePlane>>,
    communication: (Sender<CastStats>, Receiver<RendererMessage>),
}

impl CastThread {
    pub fn new(volume: Volume, config: RenderConfig) -> CastThread {
        let buffer = Arc::new(Mutex::new(ImagePlane::new(config.resolution)));

        // Dummy channels
        // Replaced once started
        let (sender_void, _) = crossbeam::channel::unbounded();
        let never = crossbeam::channel::never();

        CastThread {
            volume,
            config,
            transfer_function_name: None,
            shared_buffer: buffer,
            communication: (sender_void, never),
        }
    }

    /// Classify by preset name instead, see [`ColoredVolume::classify_named`]
    pub fn with_transfer_function_name(mut self, name: &str) -> CastThread {
        self.transfer_function_name = Some(name.to_owned());
        self
    }

    fn run(self) {
        let colored = match &self.transfer_function_name {
            Some(name) => ColoredVolume::classify_named(&self.volume, name),
            None => ColoredVolume::classify(&self.volume, self.config.transfer_function),
        };
        let caster = RayCaster::new(&colored, &self.volume, &self.config);
        let (result_sender, message_receiver) = &self.communication;

        // Master loop
        loop {
            let view = match message_receiver.recv() {
                Ok(RendererMessage::Render(view)) => view,
                Ok(RendererMessage::ShutDown) | Err(_) => break,
            };

            let stats = {
                let mut plane = self.shared_buffer.lock();
                let stats = cast_all(&caster, &view, &mut plane, self.config.num_threads);
                if let Some(kernel) = self.config.median_kernel {
                    median_filter(&mut plane, kernel);
                }
                stats
            };

            log::debug!("Frame done, {} rays hit", stats.rays_hit);

            // Front went away
            if result_sender.send(stats).is_err() {
                break;
            }
        }
        log::debug!("Render thread shutting down");
    }
}

impl RenderThread for CastThread {
    fn get_shared_buffer(&self) -> Arc<Mutex<ImagePlane>> {
        self.shared_buffer.clone()
    }

    fn start(self) -> JoinHandle<()> {
        thread::spawn(move || self.run())
    }

    fn set_communication(&mut self, communication: (Sender<CastStats>, Receiver<RendererMessage>)) {
        self.communication = communication;
    }
}

/// Communicating with renderer
///
/// Can be active or inactive.
pub struct RendererFront {
    handle: Option<JoinHandle<()>>,
    buffer: Option<Arc<Mutex<ImagePlane>>>,
    communication_in: (Sender<RendererMessage>, Receiver<RendererMessage>),
    communication_out: (Sender<CastStats>, Receiver<CastStats>),
}

impl RendererFront {
    /// Create inactive front
    pub fn new() -> Self {
        let communication_in = crossbeam::channel::bounded(100); // main -> renderer
        let communication_out = crossbeam::channel::bounded(100); // renderer -> main
        Self {
            handle: None,
            buffer: None,
            communication_in,
            communication_out,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Send message to renderer
    pub fn send_message(&self, msg: RendererMessage) -> Result<()> {
        if !self.is_active() {
            return Err(VolcastError::RendererDisconnected);
        }
        self.communication_in
            .0
            .send(msg)
            .map_err(|_| VolcastError::RendererDisconnected)
    }

    /// Receive message from renderer
    ///
    /// Blocking call, returns error if the render thread exits without sending.
    pub fn receive_message(&self) -> Result<CastStats> {
        let handle = self
            .handle
            .as_ref()
            .ok_or(VolcastError::RendererDisconnected)?;

        loop {
            match self.communication_out.1.recv_timeout(LIVENESS_CHECK) {
                Ok(stats) => return Ok(stats),
                Err(RecvTimeoutError::Timeout) if !handle.is_finished() => continue,
                // frame could arrive right before the thread exited
                Err(_) => {
                    return self
                        .communication_out
                        .1
                        .try_recv()
                        .map_err(|_| VolcastError::RendererDisconnected)
                }
            }
        }
    }

    /// Request frame from `view` and wait until it is done
    pub fn render(&self, view: ViewTransform) -> Result<CastStats> {
        self.send_message(RendererMessage::Render(view))?;
        self.receive_message()
    }

    /// Getter for shared image plane
    /// If front is inactive, return `None`
    pub fn get_buffer_handle(&self) -> Option<Arc<Mutex<ImagePlane>>> {
        self.buffer.as_ref().cloned()
    }

    /// Borrow buffer handle
    /// Avoids incrementing atomic reference counter
    /// Otherwise equivalent to `get_buffer_handle`
    pub fn get_buffer_handle_borrow(&self) -> Option<&Arc<Mutex<ImagePlane>>> {
        self.buffer.as_ref()
    }

    /// Start `renderer`
    ///
    /// Front goes into active state.
    /// If front was already active, previous renderer gets shutdown first.
    pub fn start_rendering<R: RenderThread>(&mut self, mut renderer: R) {
        if self.is_active() {
            log::info!("Shutting down current renderer");
            self.finish();
        }

        let communication = (
            self.communication_out.0.clone(),
            self.communication_in.1.clone(),
        );
        renderer.set_communication(communication);
        let buffer = renderer.get_shared_buffer();
        let handle = renderer.start(); // start thread but wait for render message
        self.buffer = Some(buffer);
        self.handle = Some(handle);
    }

    /// Shut down renderer and sync thread with parent
    ///
    /// Call is blocking until thread is joined.
    /// Front goes into inactive state.
    pub fn finish(&mut self) {
        if let Some(handle) = self.handle.take() {
            // Thread may already be gone, then the message is not needed
            let _ = self.communication_in.0.send(RendererMessage::ShutDown);
            if handle.join().is_err() {
                log::error!("Render thread panicked");
            }
            self.buffer = None;
        }
        // leftovers of the old renderer
        while self.communication_in.1.try_recv().is_ok() {}
        while self.communication_out.1.try_recv().is_ok() {}
    }
}

impl Default for RendererFront {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RendererFront {
    fn drop(&mut self) {
        self.finish();
    }
}
