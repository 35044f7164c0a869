use std::collections::HashSet;

use roam_engine::*;
use glam::Vec3;

/// Scene description shipped with the demo. The host page reads the same file
/// to know which model and overlay belong to each interactable index.
const SCENE_JSON: &str = include_str!("../assets/scene.json");

/// Half the side length of the room's floor, minus a little wall clearance.
const ROOM_HALF: f32 = 9.9;
const EYE_HEIGHT: f32 = 1.8;

/// A square room with a few exhibits; walk up to one and press E to read about it.
pub struct PortfolioRoom {
    /// Exhibits whose overlay has been opened at least once.
    visited: HashSet<InteractableId>,
    exhibits_with_overlay: usize,
}

impl PortfolioRoom {
    pub fn new() -> Self {
        Self {
            visited: HashSet::new(),
            exhibits_with_overlay: 0,
        }
    }

    fn label(ctx: &EngineContext, id: InteractableId) -> &str {
        ctx.interactables
            .declaration(id)
            .map(|d| d.label.as_str())
            .unwrap_or("?")
    }
}

impl Walkthrough for PortfolioRoom {
    fn config(&self) -> WalkConfig {
        WalkConfig {
            spawn: Vec3::new(0.0, EYE_HEIGHT, ROOM_HALF),
            bounds: WorldBounds::square(ROOM_HALF),
            eye_height: EYE_HEIGHT,
            ..WalkConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        match SceneManifest::from_json(SCENE_JSON) {
            Ok(manifest) => {
                self.exhibits_with_overlay = manifest
                    .interactables
                    .iter()
                    .filter(|i| i.overlay.is_some())
                    .count();
                ctx.load_manifest(&manifest);
            }
            Err(err) => log::error!("PortfolioRoom: bundled scene is invalid: {}", err),
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, _input: &InputQueue) {
        for event in ctx.step_events() {
            match *event {
                SceneEvent::OverlayOpened { id, .. } => {
                    log::info!("PortfolioRoom: reading {}", Self::label(ctx, id));
                    if self.visited.insert(id) && self.visited.len() == self.exhibits_with_overlay {
                        log::info!("PortfolioRoom: every exhibit visited");
                    }
                }
                SceneEvent::OverlayClosed { id, .. } => {
                    log::debug!("PortfolioRoom: closed {}", Self::label(ctx, id));
                }
                _ => {}
            }
        }
    }
}
