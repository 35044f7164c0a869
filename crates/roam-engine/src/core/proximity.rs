//! Near/far state machine for interactables and the overlay toggling it drives.

use glam::Vec3;

use crate::api::types::{InteractableId, OverlayHandle, SceneEvent};
use crate::core::collision::Aabb;
use crate::core::registry::InteractableRegistry;

/// Whether the agent is within an interactable's trigger radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Proximity {
    #[default]
    Far,
    Near,
}

impl Proximity {
    /// Strictly inside the radius is near; the boundary itself is far.
    pub fn classify(distance: f32, trigger_radius: f32) -> Self {
        if distance < trigger_radius {
            Proximity::Near
        } else {
            Proximity::Far
        }
    }
}

/// Visibility flag for one host overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub handle: OverlayHandle,
    visible: bool,
}

impl Overlay {
    pub fn new(handle: OverlayHandle) -> Self {
        Self { handle, visible: false }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns false if it was already visible.
    pub fn show(&mut self) -> bool {
        !std::mem::replace(&mut self.visible, true)
    }

    /// Returns false if it was already hidden.
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }
}

/// A loaded scene object the player can walk up to.
#[derive(Debug, Clone, PartialEq)]
pub struct Interactable {
    pub id: InteractableId,
    pub label: String,
    /// Point distances are measured from.
    pub anchor: Vec3,
    /// Obstacle box, if this object collides.
    pub bounds: Option<Aabb>,
    pub trigger_radius: f32,
    pub overlay: Option<Overlay>,
    proximity: Proximity,
    prompt_visible: bool,
    distance: f32,
}

impl Interactable {
    pub fn new(id: InteractableId, label: impl Into<String>, anchor: Vec3, trigger_radius: f32) -> Self {
        Self {
            id,
            label: label.into(),
            anchor,
            bounds: None,
            trigger_radius,
            overlay: None,
            proximity: Proximity::Far,
            prompt_visible: false,
            distance: f32::INFINITY,
        }
    }

    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_overlay(mut self, handle: OverlayHandle) -> Self {
        self.overlay = Some(Overlay::new(handle));
        self
    }

    pub fn proximity(&self) -> Proximity {
        self.proximity
    }

    pub fn is_near(&self) -> bool {
        self.proximity == Proximity::Near
    }

    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay.as_ref().is_some_and(Overlay::is_visible)
    }

    /// Distance to the agent as of the last proximity update.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Recompute distance and run the near/far transition.
    ///
    /// Entering near shows the prompt. Entering far hides the prompt and
    /// force-closes an open overlay.
    pub fn update_proximity(&mut self, agent_position: Vec3, events: &mut Vec<SceneEvent>) {
        self.distance = agent_position.distance(self.anchor);
        let next = Proximity::classify(self.distance, self.trigger_radius);
        if next == self.proximity {
            return;
        }
        self.proximity = next;

        match next {
            Proximity::Near => {
                self.prompt_visible = true;
                events.push(SceneEvent::PromptShown { id: self.id });
            }
            Proximity::Far => {
                self.prompt_visible = false;
                events.push(SceneEvent::PromptHidden { id: self.id });
                self.close_overlay(events);
            }
        }
    }

    pub(crate) fn open_overlay(&mut self, events: &mut Vec<SceneEvent>) -> bool {
        if let Some(overlay) = self.overlay.as_mut() {
            if overlay.show() {
                events.push(SceneEvent::OverlayOpened { id: self.id, overlay: overlay.handle });
                return true;
            }
        }
        false
    }

    pub(crate) fn close_overlay(&mut self, events: &mut Vec<SceneEvent>) -> bool {
        if let Some(overlay) = self.overlay.as_mut() {
            if overlay.hide() {
                events.push(SceneEvent::OverlayClosed { id: self.id, overlay: overlay.handle });
                return true;
            }
        }
        false
    }

    /// Take down everything this interactable shows on the host, as if the
    /// agent had walked out of range.
    pub(crate) fn dismiss(&mut self, events: &mut Vec<SceneEvent>) {
        self.proximity = Proximity::Far;
        if self.prompt_visible {
            self.prompt_visible = false;
            events.push(SceneEvent::PromptHidden { id: self.id });
        }
        self.close_overlay(events);
    }
}

/// Run the proximity update for every ready interactable.
pub fn update_all(registry: &mut InteractableRegistry, agent_position: Vec3, events: &mut Vec<SceneEvent>) {
    for interactable in registry.iter_ready_mut() {
        interactable.update_proximity(agent_position, events);
    }
}

/// Handle an interact key edge.
///
/// Acts on the closest near interactable that has an overlay: closes it if
/// open, otherwise opens it and closes whatever else was open. Returns the
/// interactable acted on.
pub fn trigger(registry: &mut InteractableRegistry, events: &mut Vec<SceneEvent>) -> Option<InteractableId> {
    let target = registry
        .iter_ready()
        .filter(|i| i.is_near() && i.overlay.is_some())
        .fold(None::<&Interactable>, |best, candidate| match best {
            Some(b) if b.distance() <= candidate.distance() => Some(b),
            _ => Some(candidate),
        })
        .map(|i| i.id)?;

    let was_open = registry.get(target).is_some_and(Interactable::overlay_visible);
    if was_open {
        if let Some(interactable) = registry.get_mut(target) {
            interactable.close_overlay(events);
        }
    } else {
        for other in registry.iter_ready_mut().filter(|i| i.id != target) {
            other.close_overlay(events);
        }
        if let Some(interactable) = registry.get_mut(target) {
            interactable.open_overlay(events);
        }
    }
    Some(target)
}

/// Hide every visible prompt and close every open overlay. Used before the
/// registry is replaced so the host is not left showing stale UI.
pub fn dismiss_all(registry: &mut InteractableRegistry, events: &mut Vec<SceneEvent>) {
    for interactable in registry.iter_ready_mut() {
        interactable.dismiss(events);
    }
}

/// The interactable whose overlay is currently visible, if any.
pub fn open_overlay(registry: &InteractableRegistry) -> Option<InteractableId> {
    registry
        .iter_ready()
        .find(|i| i.overlay_visible())
        .map(|i| i.id)
}
