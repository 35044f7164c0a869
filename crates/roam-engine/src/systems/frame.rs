//! Per-frame driver. The order is fixed:
//! input edges → controller → collision → boundary clamp → proximity →
//! interact trigger → camera hand-off.

use crate::api::game::EngineContext;
use crate::api::types::SceneEvent;
use crate::core::{collision, controller, proximity};
use crate::input::bindings::Action;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::CameraTransform;

/// Fold this frame's input edges into held buttons, look angles, lock
/// state and pending one-shot actions. Call once per rendered frame.
pub fn apply_input(ctx: &mut EngineContext, input: &InputQueue) {
    for event in input.iter() {
        match *event {
            InputEvent::KeyDown { key_code } => match ctx.buttons.press(key_code) {
                Some(Action::Interact) => ctx.pending.interact = true,
                Some(Action::ToggleFullscreen) => ctx.pending.toggle_fullscreen = true,
                None => {}
            },
            InputEvent::KeyUp { key_code } => ctx.buttons.release(key_code),
            InputEvent::Look { dx, dy } => {
                let sensitivity = ctx.config.motion.look_sensitivity;
                ctx.agent.look(dx, dy, sensitivity);
            }
            InputEvent::PointerLock { locked } => {
                if ctx.agent.locked != locked {
                    log::debug!("pointer lock {}", if locked { "engaged" } else { "released" });
                }
                ctx.agent.locked = locked;
                if !locked {
                    ctx.buttons.release_all();
                }
            }
        }
    }
}

/// Run one tick of the walkthrough core.
pub fn step(ctx: &mut EngineContext) {
    ctx.begin_step();

    if ctx.agent.locked {
        let intents = ctx.buttons.intents();
        controller::step(&mut ctx.agent, intents, &ctx.config.motion);
    }

    let resolved = collision::resolve(
        ctx.agent.position,
        ctx.agent.half_extents,
        ctx.interactables.obstacles(),
    );
    ctx.agent.position = ctx.bounds.clamp(resolved);

    proximity::update_all(&mut ctx.interactables, ctx.agent.position, &mut ctx.events);

    let pending = std::mem::take(&mut ctx.pending);
    if pending.interact {
        proximity::trigger(&mut ctx.interactables, &mut ctx.events);
    }
    if pending.toggle_fullscreen {
        ctx.emit_event(SceneEvent::FullscreenToggled);
    }

    ctx.camera = CameraTransform::from_agent(&ctx.agent);
    ctx.advance_frame();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game::WalkConfig;
    use crate::api::types::{InteractableId, OverlayHandle};
    use crate::core::collision::Aabb;
    use crate::core::registry::Declaration;
    use crate::input::bindings::key_codes;
    use glam::Vec3;

    fn ctx_at(spawn: Vec3) -> EngineContext {
        EngineContext::new(WalkConfig {
            spawn,
            ..WalkConfig::default()
        })
    }

    fn press(ctx: &mut EngineContext, events: &[InputEvent]) {
        let mut q = InputQueue::new();
        for e in events {
            q.push(*e);
        }
        apply_input(ctx, &q);
    }

    fn declare(ctx: &mut EngineContext, radius: f32, overlay: bool) -> InteractableId {
        ctx.interactables.declare(Declaration {
            label: format!("exhibit-{}", ctx.interactables.len()),
            trigger_radius: radius,
            overlay: overlay.then_some(OverlayHandle(0)),
            collides: true,
        })
    }

    #[test]
    fn unlocked_agent_does_not_move() {
        let mut ctx = ctx_at(Vec3::new(0.0, 1.8, 5.0));
        press(&mut ctx, &[InputEvent::KeyDown { key_code: key_codes::W }]);
        for _ in 0..10 {
            step(&mut ctx);
        }
        assert_eq!(ctx.agent.position, Vec3::new(0.0, 1.8, 5.0));
        assert_eq!(ctx.frame(), 10);
    }

    #[test]
    fn locked_agent_walks_forward() {
        let mut ctx = ctx_at(Vec3::new(0.0, 1.8, 5.0));
        press(
            &mut ctx,
            &[
                InputEvent::PointerLock { locked: true },
                InputEvent::KeyDown { key_code: key_codes::W },
            ],
        );
        for _ in 0..30 {
            step(&mut ctx);
        }
        assert!(ctx.agent.position.z < 5.0);
        assert_eq!(ctx.camera.z, ctx.agent.position.z);
    }

    #[test]
    fn losing_lock_releases_movement_keys() {
        let mut ctx = ctx_at(Vec3::new(0.0, 1.8, 5.0));
        press(
            &mut ctx,
            &[
                InputEvent::PointerLock { locked: true },
                InputEvent::KeyDown { key_code: key_codes::D },
                InputEvent::PointerLock { locked: false },
            ],
        );
        assert!(!ctx.buttons.intents().any());
    }

    #[test]
    fn clamp_applies_even_without_movement() {
        let mut ctx = ctx_at(Vec3::new(25.0, 1.8, -30.0));
        step(&mut ctx);
        assert_eq!(ctx.agent.position, Vec3::new(9.9, 1.8, -9.9));
    }

    #[test]
    fn walking_into_the_wall_stops_at_bounds() {
        let mut ctx = ctx_at(Vec3::new(0.0, 1.8, -9.0));
        press(
            &mut ctx,
            &[
                InputEvent::PointerLock { locked: true },
                InputEvent::KeyDown { key_code: key_codes::ARROW_UP },
            ],
        );
        for _ in 0..200 {
            step(&mut ctx);
            assert!(ctx.bounds.contains(ctx.agent.position));
        }
        assert_eq!(ctx.agent.position.z, -9.9);
    }

    #[test]
    fn pending_obstacles_do_not_block() {
        let mut ctx = ctx_at(Vec3::new(0.0, 1.8, 0.0));
        declare(&mut ctx, 0.0, false);
        step(&mut ctx);
        assert_eq!(ctx.agent.position, Vec3::new(0.0, 1.8, 0.0));
    }

    #[test]
    fn ready_obstacle_pushes_agent_out() {
        let mut ctx = ctx_at(Vec3::new(0.0, 1.8, 1.2));
        let id = declare(&mut ctx, 0.0, false);
        let pedestal = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.2, 1.0));
        ctx.interactable_ready(id, Vec3::ZERO, Some(pedestal)).unwrap();

        step(&mut ctx);
        let agent_box = ctx.agent.collision_box();
        assert!(!agent_box.intersects(&pedestal));
        assert!((ctx.agent.position.z - 1.3).abs() < 1e-5);
    }

    #[test]
    fn interact_scenario_over_frames() {
        // Threshold 1.2; anchor level with the eye so distance is horizontal.
        let mut ctx = ctx_at(Vec3::new(1.5, 1.8, 0.0));
        let id = declare(&mut ctx, 1.2, true);
        ctx.interactable_ready(id, Vec3::new(0.0, 1.8, 0.0), None).unwrap();

        step(&mut ctx);
        assert!(!ctx.interactables.get(id).unwrap().prompt_visible());

        ctx.agent.position.x = 1.0;
        ctx.clear_frame_data();
        step(&mut ctx);
        assert!(ctx.interactables.get(id).unwrap().prompt_visible());
        assert_eq!(ctx.events, vec![SceneEvent::PromptShown { id }]);

        ctx.clear_frame_data();
        press(&mut ctx, &[InputEvent::KeyDown { key_code: key_codes::E }]);
        step(&mut ctx);
        assert!(ctx.overlay_visible(id));
        assert_eq!(ctx.open_overlay(), Some(id));

        ctx.agent.position.x = 1.5;
        ctx.clear_frame_data();
        step(&mut ctx);
        assert!(!ctx.overlay_visible(id));
        assert!(ctx
            .events
            .contains(&SceneEvent::OverlayClosed { id, overlay: OverlayHandle(0) }));
    }

    #[test]
    fn interact_is_consumed_by_one_step() {
        let mut ctx = ctx_at(Vec3::new(0.5, 1.8, 0.0));
        let id = declare(&mut ctx, 2.0, true);
        ctx.interactable_ready(id, Vec3::new(0.0, 1.8, 0.0), None).unwrap();

        press(&mut ctx, &[InputEvent::KeyDown { key_code: key_codes::E }]);
        step(&mut ctx);
        step(&mut ctx);
        assert!(ctx.overlay_visible(id));
    }

    #[test]
    fn each_step_exposes_only_its_own_events() {
        let mut ctx = ctx_at(Vec3::new(0.5, 1.8, 0.0));
        let id = declare(&mut ctx, 2.0, true);
        ctx.interactable_ready(id, Vec3::new(0.0, 1.8, 0.0), None).unwrap();

        press(&mut ctx, &[InputEvent::KeyDown { key_code: key_codes::E }]);
        step(&mut ctx);
        assert_eq!(ctx.step_events().len(), 2);

        step(&mut ctx);
        assert!(ctx.step_events().is_empty());
        assert_eq!(ctx.events.len(), 2);
    }

    #[test]
    fn fullscreen_key_emits_event() {
        let mut ctx = EngineContext::default();
        press(&mut ctx, &[InputEvent::KeyDown { key_code: key_codes::F11 }]);
        step(&mut ctx);
        assert_eq!(ctx.events, vec![SceneEvent::FullscreenToggled]);
    }
}
