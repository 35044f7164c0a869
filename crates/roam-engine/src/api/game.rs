use glam::{Vec2, Vec3};

use crate::api::types::{InteractableId, OverlayHandle, SceneEvent};
use crate::assets::manifest::SceneManifest;
use crate::core::agent::AgentState;
use crate::core::bounds::WorldBounds;
use crate::core::collision::Aabb;
use crate::core::controller::MotionTuning;
use crate::core::proximity;
use crate::core::registry::{Declaration, InteractableRegistry, LoadError};
use crate::input::bindings::ButtonState;
use crate::input::queue::InputQueue;
use crate::renderer::camera::CameraTransform;

/// Configuration for the engine, provided by the walkthrough.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Fixed timestep in seconds. `None` runs one tick per rendered frame,
    /// which makes movement speed follow the display refresh rate.
    pub fixed_dt: Option<f32>,
    /// Starting eye position.
    pub spawn: Vec3,
    /// Play area the agent is clamped into.
    pub bounds: WorldBounds,
    /// Half-size of the agent's collision box.
    pub agent_half_extents: Vec3,
    /// Rest eye height above the floor (default: 1.8).
    pub eye_height: f32,
    /// Per-tick movement constants.
    pub motion: MotionTuning,
    /// Maximum number of scene events written per frame (default: 32).
    pub max_events: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            fixed_dt: None,
            spawn: Vec3::new(0.0, 1.8, 10.0),
            bounds: WorldBounds::default(),
            agent_half_extents: Vec3::new(0.3, 1.8, 0.3),
            eye_height: 1.8,
            motion: MotionTuning::default(),
            max_events: 32,
        }
    }
}

/// The contract every walkthrough must fulfill.
pub trait Walkthrough {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> WalkConfig {
        WalkConfig::default()
    }

    /// Declare interactables, typically by loading a scene manifest.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Called after every core step. `ctx.step_events()` holds the events that
    /// step raised; `ctx.events` holds everything raised this frame so far.
    fn update(&mut self, _ctx: &mut EngineContext, _input: &InputQueue) {}
}

/// Actions raised by input edges, consumed by the next frame step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingActions {
    pub interact: bool,
    pub toggle_fullscreen: bool,
}

/// All mutable walkthrough state, passed to every update.
pub struct EngineContext {
    pub config: WalkConfig,
    pub agent: AgentState,
    pub buttons: ButtonState,
    pub interactables: InteractableRegistry,
    pub bounds: WorldBounds,
    pub camera: CameraTransform,
    pub events: Vec<SceneEvent>,
    pub pending: PendingActions,
    frame: u64,
    step_start: usize,
}

impl EngineContext {
    pub fn new(config: WalkConfig) -> Self {
        let agent = AgentState::new(config.spawn, config.agent_half_extents, config.eye_height);
        let camera = CameraTransform::from_agent(&agent);
        Self {
            bounds: config.bounds,
            agent,
            camera,
            buttons: ButtonState::new(),
            interactables: InteractableRegistry::new(),
            events: Vec::with_capacity(config.max_events),
            pending: PendingActions::default(),
            frame: 0,
            step_start: 0,
            config,
        }
    }

    /// Emit a scene event to be forwarded to the host.
    pub fn emit_event(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.step_start = 0;
    }

    /// Events raised since the current core step began.
    pub fn step_events(&self) -> &[SceneEvent] {
        &self.events[self.step_start.min(self.events.len())..]
    }

    pub(crate) fn begin_step(&mut self) {
        self.step_start = self.events.len();
    }

    /// Number of completed frame steps.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub(crate) fn advance_frame(&mut self) {
        self.frame += 1;
    }

    /// Declare every interactable in the manifest and apply its overrides.
    /// Replaces previously declared interactables, first hiding their prompts
    /// and closing their overlays. Returns how many were declared.
    pub fn load_manifest(&mut self, manifest: &SceneManifest) -> usize {
        if let Some(tuning) = manifest.tuning {
            self.config.motion = tuning;
        }
        if let Some(b) = manifest.bounds {
            self.bounds = WorldBounds::new(Vec2::from(b.min), Vec2::from(b.max));
        }
        if let Some(spawn) = manifest.spawn {
            self.agent.position = Vec3::from(spawn);
            self.agent.velocity = Vec3::ZERO;
        }

        proximity::dismiss_all(&mut self.interactables, &mut self.events);
        self.interactables.clear();
        let mut next_overlay = 0;
        for desc in &manifest.interactables {
            let overlay = desc.overlay.as_ref().map(|_| {
                let handle = OverlayHandle(next_overlay);
                next_overlay += 1;
                handle
            });
            self.interactables.declare(Declaration {
                label: desc.label.clone(),
                trigger_radius: desc.trigger_radius,
                overlay,
                collides: desc.collides,
            });
        }
        self.camera = CameraTransform::from_agent(&self.agent);
        log::info!(
            "scene manifest: {} interactables, {} overlays",
            self.interactables.len(),
            next_overlay
        );
        self.interactables.len()
    }

    /// The host finished loading an interactable.
    pub fn interactable_ready(&mut self, id: InteractableId, anchor: Vec3, bounds: Option<Aabb>) -> Result<(), LoadError> {
        self.interactables.mark_ready(id, anchor, bounds)?;
        log::debug!("interactable {} ready at {:?}", id.0, anchor);
        Ok(())
    }

    /// The host failed to load an interactable; it stays absent for the session.
    pub fn interactable_failed(&mut self, id: InteractableId) -> Result<(), LoadError> {
        self.interactables.mark_failed(id)?;
        let label = self
            .interactables
            .declaration(id)
            .map(|d| d.label.as_str())
            .unwrap_or("?");
        log::warn!("interactable {} ({}) failed to load; continuing without it", id.0, label);
        Ok(())
    }

    /// The interactable whose overlay is visible, if any.
    pub fn open_overlay(&self) -> Option<InteractableId> {
        proximity::open_overlay(&self.interactables)
    }

    pub fn overlay_visible(&self, id: InteractableId) -> bool {
        self.interactables
            .get(id)
            .is_some_and(|i| i.overlay_visible())
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(WalkConfig::default())
    }
}
