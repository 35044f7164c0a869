use crate::api::game::EngineContext;
use crate::api::types::WireEvent;
use crate::bridge::protocol::*;
use crate::renderer::camera::CameraTransform;

/// Flat f32 buffer the host reads after every tick.
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
    event_count: usize,
}

impl FrameBuffer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let data = vec![0.0; layout.buffer_total_floats];
        Self {
            layout,
            data,
            event_count: 0,
        }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    /// Re-size for a new layout, zeroing the contents.
    pub fn set_layout(&mut self, layout: ProtocolLayout) {
        self.data.clear();
        self.data.resize(layout.buffer_total_floats, 0.0);
        self.layout = layout;
        self.event_count = 0;
    }

    /// Write header, camera and this frame's events.
    /// Events beyond capacity are dropped with a warning.
    pub fn write(&mut self, ctx: &EngineContext) {
        let max_events = self.layout.max_events;
        if ctx.events.len() > max_events {
            log::warn!(
                "{} scene events this frame, only {} fit; dropping the rest",
                ctx.events.len(),
                max_events
            );
        }
        self.event_count = ctx.events.len().min(max_events);

        let header = &mut self.data[..HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = ctx.frame() as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_EVENTS] = max_events as f32;
        header[HEADER_EVENT_COUNT] = self.event_count as f32;
        header[HEADER_POINTER_LOCKED] = if ctx.agent.locked { 1.0 } else { 0.0 };
        header[HEADER_OPEN_OVERLAY] = ctx.open_overlay().map_or(0.0, |id| (id.0 + 1) as f32);
        header[HEADER_READY_COUNT] = ctx.interactables.ready_count() as f32;
        header[HEADER_DECLARED_COUNT] = ctx.interactables.len() as f32;

        let camera_start = self.layout.camera_data_offset;
        let view_start = camera_start + CameraTransform::FLOATS;
        self.data[camera_start..view_start].copy_from_slice(bytemuck::cast_slice(&[ctx.camera]));
        self.data[view_start..self.layout.event_data_offset]
            .copy_from_slice(&ctx.camera.view_matrix().to_cols_array());

        let wire: Vec<WireEvent> = ctx.events[..self.event_count].iter().map(|e| e.to_wire()).collect();
        let events_start = self.layout.event_data_offset;
        let events_end = events_start + self.event_count * EVENT_FLOATS;
        self.data[events_start..events_end].copy_from_slice(bytemuck::cast_slice(&wire));
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw pointer for host reads out of WASM memory.
    pub fn ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{InteractableId, SceneEvent};

    #[test]
    fn writes_header_camera_and_events() {
        let mut ctx = EngineContext::default();
        ctx.emit_event(SceneEvent::PromptShown { id: InteractableId(2) });
        ctx.emit_event(SceneEvent::FullscreenToggled);

        let mut buf = FrameBuffer::new(ProtocolLayout::from_config(&ctx.config));
        buf.write(&ctx);
        let data = buf.as_slice();

        assert_eq!(data[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(data[HEADER_EVENT_COUNT], 2.0);
        assert_eq!(data[HEADER_OPEN_OVERLAY], 0.0);

        let cam = buf.layout().camera_data_offset;
        assert_eq!(data[cam + 2], ctx.camera.z);

        let ev = buf.layout().event_data_offset;
        assert_eq!(data[ev], SceneEvent::KIND_PROMPT_SHOWN);
        assert_eq!(data[ev + 1], 2.0);
        assert_eq!(data[ev + 4], SceneEvent::KIND_FULLSCREEN_TOGGLED);
    }

    #[test]
    fn set_layout_resizes_and_resets() {
        let ctx = EngineContext::default();
        let mut buf = FrameBuffer::new(ProtocolLayout::new(2));
        buf.write(&ctx);
        buf.set_layout(ProtocolLayout::new(50));
        assert_eq!(buf.layout().max_events, 50);
        assert_eq!(buf.as_slice().len(), HEADER_FLOATS + CAMERA_FLOATS + 200);
        assert!(buf.as_slice().iter().all(|&f| f == 0.0));
        assert_eq!(buf.event_count(), 0);
    }

    #[test]
    fn excess_events_are_dropped() {
        let mut ctx = EngineContext::default();
        for _ in 0..5 {
            ctx.emit_event(SceneEvent::FullscreenToggled);
        }
        let mut buf = FrameBuffer::new(ProtocolLayout::new(3));
        buf.write(&ctx);
        assert_eq!(buf.event_count(), 3);
        assert_eq!(buf.as_slice().len(), HEADER_FLOATS + CameraTransform::FLOATS + 16 + 12);
    }
}
