use roam_engine::{
    Aabb, EngineContext, FrameBuffer, InputEvent, InputQueue, InteractableId, LoadError,
    ProtocolLayout, SceneManifest, TickMode, WalkConfig, Walkthrough,
};
use roam_engine::systems::frame;
use glam::Vec3;

/// Generic walkthrough runner that wires up the frame loop.
///
/// Each concrete walkthrough (e.g., `portfolio-room`) creates a `thread_local!`
/// WalkRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct WalkRunner<W: Walkthrough> {
    walkthrough: W,
    ctx: EngineContext,
    input: InputQueue,
    ticks: TickMode,
    frame_buffer: FrameBuffer,
    initialized: bool,
}

impl<W: Walkthrough> WalkRunner<W> {
    pub fn new(walkthrough: W) -> Self {
        let config = walkthrough.config();
        let ticks = TickMode::from_fixed_dt(config.fixed_dt);
        let frame_buffer = FrameBuffer::new(ProtocolLayout::from_config(&config));

        Self {
            walkthrough,
            ctx: EngineContext::new(config),
            input: InputQueue::new(),
            ticks,
            frame_buffer,
            initialized: false,
        }
    }

    /// Initialize the walkthrough. Call once after construction.
    pub fn init(&mut self) {
        self.walkthrough.init(&mut self.ctx);
        self.sync_layout();
        self.publish();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one rendered frame: fold input, tick the core, publish the frame buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        frame::apply_input(&mut self.ctx, &self.input);

        let steps = self.ticks.ticks(dt);
        for _ in 0..steps {
            frame::step(&mut self.ctx);
            self.walkthrough.update(&mut self.ctx, &self.input);
        }

        self.input.drain();
        self.publish();
    }

    /// Write the frame buffer, then start collecting the next frame's events.
    fn publish(&mut self) {
        self.frame_buffer.write(&self.ctx);
        self.ctx.clear_frame_data();
    }

    /// Grow the event section so a full frame of prompt and overlay edges fits.
    fn sync_layout(&mut self) {
        let needed = ProtocolLayout::for_scene(
            &self.ctx.config,
            self.ctx.interactables.len(),
            self.ticks.max_ticks_per_frame() as usize,
            self.ctx.events.len(),
        );
        if needed.max_events > self.frame_buffer.layout().max_events {
            log::info!("frame buffer: room for {} events per frame", needed.max_events);
            self.frame_buffer.set_layout(needed);
        }
    }

    /// Replace the declared interactables with those of a JSON scene manifest.
    ///
    /// Teardown events for the old scene go out with the next tick. The frame
    /// buffer may be reallocated, so the host re-reads its pointer afterwards.
    pub fn load_manifest(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let manifest = SceneManifest::from_json(json)?;
        let count = self.ctx.load_manifest(&manifest);
        self.sync_layout();
        Ok(count)
    }

    /// The host finished loading an interactable. Bad ids are logged and ignored.
    pub fn interactable_ready(&mut self, id: u32, anchor: Vec3, bounds: Option<Aabb>) {
        let result = self.ctx.interactable_ready(InteractableId(id), anchor, bounds);
        log_load_error(result);
    }

    /// The host failed to load an interactable.
    pub fn interactable_failed(&mut self, id: u32) {
        let result = self.ctx.interactable_failed(InteractableId(id));
        log_load_error(result);
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn config(&self) -> &WalkConfig {
        &self.ctx.config
    }

    // ---- Frame buffer accessors for host reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.ptr()
    }

    pub fn frame_floats(&self) -> u32 {
        self.frame_buffer.layout().buffer_total_floats as u32
    }

    pub fn camera_data_offset(&self) -> u32 {
        self.frame_buffer.layout().camera_data_offset as u32
    }

    pub fn event_data_offset(&self) -> u32 {
        self.frame_buffer.layout().event_data_offset as u32
    }

    pub fn event_count(&self) -> u32 {
        self.frame_buffer.event_count() as u32
    }

    pub fn max_events(&self) -> u32 {
        self.frame_buffer.layout().max_events as u32
    }

    // ---- Overlay queries ----

    pub fn overlay_visible(&self, id: u32) -> bool {
        self.ctx.overlay_visible(InteractableId(id))
    }

    /// Id of the interactable whose overlay is open, or -1.
    pub fn open_overlay(&self) -> i32 {
        self.ctx.open_overlay().map_or(-1, |id| id.0 as i32)
    }

    pub fn pointer_locked(&self) -> bool {
        self.ctx.agent.locked
    }
}

fn log_load_error(result: Result<(), LoadError>) {
    if let Err(err) = result {
        log::warn!("ignoring load report: {}", err);
    }
}
