//! Frame buffer layout shared with the host.
//! Must stay in sync with the host's `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 8 floats]
//! [Camera: 8 floats transform + 16 floats view matrix]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header every frame.
//! The host reads them from the header to compute offsets dynamically.
//! The event section grows with the scene, so after loading a manifest the
//! host must re-read the buffer pointer and size.

use crate::api::game::WalkConfig;
use crate::api::types::WireEvent;
use crate::renderer::camera::CameraTransform;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_EVENTS: usize = 2;
pub const HEADER_EVENT_COUNT: usize = 3;
pub const HEADER_POINTER_LOCKED: usize = 4;
/// Id of the interactable whose overlay is open, plus one. Zero means none.
pub const HEADER_OPEN_OVERLAY: usize = 5;
pub const HEADER_READY_COUNT: usize = 6;
pub const HEADER_DECLARED_COUNT: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the 4×4 column-major view matrix.
pub const VIEW_MATRIX_FLOATS: usize = 16;

/// Floats in the camera section.
pub const CAMERA_FLOATS: usize = CameraTransform::FLOATS + VIEW_MATRIX_FLOATS;

/// Floats per event: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = WireEvent::FLOATS;

/// Most events one core step can raise with `declared` interactables: per
/// interactable one prompt change and one overlay close, plus one overlay
/// opened by the interact key and one fullscreen toggle.
pub fn events_per_step(declared: usize) -> usize {
    2 * declared + 2
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum scene events per frame.
    pub max_events: usize,

    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where camera data begins.
    pub camera_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_events: usize) -> Self {
        let event_data_floats = max_events * EVENT_FLOATS;

        let camera_data_offset = HEADER_FLOATS;
        let event_data_offset = camera_data_offset + CAMERA_FLOATS;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_events,
            event_data_floats,
            camera_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a WalkConfig.
    pub fn from_config(config: &WalkConfig) -> Self {
        Self::new(config.max_events)
    }

    /// Layout large enough that no prompt or overlay edge is ever dropped.
    ///
    /// `carried` is the number of events already queued for the next frame,
    /// such as the teardown of a replaced scene.
    pub fn for_scene(config: &WalkConfig, declared: usize, ticks_per_frame: usize, carried: usize) -> Self {
        let needed = carried + events_per_step(declared) * ticks_per_frame;
        Self::new(config.max_events.max(needed))
    }
}
