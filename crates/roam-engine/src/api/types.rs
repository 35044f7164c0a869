use bytemuck::{Pod, Zeroable};

/// Identifier of an interactable. Equal to its index in the scene manifest,
/// so the host can map it back to the model and overlay it loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractableId(pub u32);

/// Opaque reference to a show/hide-able UI surface owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct OverlayHandle(pub u32);

/// Something the host UI has to react to this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// Player came within trigger radius: show the "press E" prompt.
    PromptShown { id: InteractableId },
    /// Player walked out of trigger radius: hide the prompt.
    PromptHidden { id: InteractableId },
    /// Show the full overlay.
    OverlayOpened { id: InteractableId, overlay: OverlayHandle },
    /// Hide the full overlay.
    OverlayClosed { id: InteractableId, overlay: OverlayHandle },
    /// Fullscreen key was pressed; the host decides whether to enter or exit.
    FullscreenToggled,
}

impl SceneEvent {
    pub const KIND_PROMPT_SHOWN: f32 = 1.0;
    pub const KIND_PROMPT_HIDDEN: f32 = 2.0;
    pub const KIND_OVERLAY_OPENED: f32 = 3.0;
    pub const KIND_OVERLAY_CLOSED: f32 = 4.0;
    pub const KIND_FULLSCREEN_TOGGLED: f32 = 5.0;

    /// Flatten into the wire container read by the host.
    pub fn to_wire(&self) -> WireEvent {
        match *self {
            SceneEvent::PromptShown { id } => WireEvent {
                kind: Self::KIND_PROMPT_SHOWN,
                a: id.0 as f32,
                ..WireEvent::default()
            },
            SceneEvent::PromptHidden { id } => WireEvent {
                kind: Self::KIND_PROMPT_HIDDEN,
                a: id.0 as f32,
                ..WireEvent::default()
            },
            SceneEvent::OverlayOpened { id, overlay } => WireEvent {
                kind: Self::KIND_OVERLAY_OPENED,
                a: id.0 as f32,
                b: overlay.0 as f32,
                c: 0.0,
            },
            SceneEvent::OverlayClosed { id, overlay } => WireEvent {
                kind: Self::KIND_OVERLAY_CLOSED,
                a: id.0 as f32,
                b: overlay.0 as f32,
                c: 0.0,
            },
            SceneEvent::FullscreenToggled => WireEvent {
                kind: Self::KIND_FULLSCREEN_TOGGLED,
                ..WireEvent::default()
            },
        }
    }
}

/// A scene event as written into the shared frame buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WireEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl WireEvent {
    pub const FLOATS: usize = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<WireEvent>(), WireEvent::FLOATS * 4);
    }

    #[test]
    fn overlay_events_carry_id_and_handle() {
        let wire = SceneEvent::OverlayOpened {
            id: InteractableId(3),
            overlay: OverlayHandle(1),
        }
        .to_wire();
        assert_eq!(wire.kind, SceneEvent::KIND_OVERLAY_OPENED);
        assert_eq!(wire.a, 3.0);
        assert_eq!(wire.b, 1.0);
    }

    #[test]
    fn fullscreen_has_no_payload() {
        let wire = SceneEvent::FullscreenToggled.to_wire();
        assert_eq!(wire.kind, SceneEvent::KIND_FULLSCREEN_TOGGLED);
        assert_eq!(wire.a, 0.0);
    }
}
