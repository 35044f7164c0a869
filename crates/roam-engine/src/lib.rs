pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{Walkthrough, WalkConfig, EngineContext, PendingActions};
pub use api::types::{InteractableId, OverlayHandle, SceneEvent, WireEvent};
pub use crate::core::agent::AgentState;
pub use crate::core::bounds::WorldBounds;
pub use crate::core::collision::Aabb;
pub use crate::core::controller::{Intents, MotionTuning};
pub use crate::core::proximity::{Interactable, Overlay, Proximity};
pub use crate::core::registry::{Declaration, InteractableRegistry, LoadError, SlotStatus};
pub use crate::core::time::{FixedTimestep, TickMode};
pub use renderer::camera::CameraTransform;
pub use input::queue::{InputEvent, InputQueue};
pub use input::bindings::{Action, Button, ButtonState};
pub use assets::manifest::SceneManifest;
pub use bridge::protocol::ProtocolLayout;
pub use bridge::frame_buffer::FrameBuffer;
