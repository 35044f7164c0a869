pub mod runner;

pub use runner::WalkRunner;

#[doc(hidden)]
pub mod __export {
    pub use glam::Vec3;
    pub use js_sys;
    pub use roam_engine::{Aabb, InputEvent};
}

/// Generate all `#[wasm_bindgen]` exports for a walkthrough.
///
/// Generates:
/// - `thread_local!` storage for the WalkRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, input, loader callbacks, frame buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyRoom;
///
/// roam_web::export_walkthrough!(MyRoom, "my-room");
/// ```
///
/// # Arguments
///
/// - `$walk_type`: The struct type that implements `roam_engine::Walkthrough`
/// - `$walk_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_walkthrough {
    ($walk_type:ty, $walk_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::WalkRunner<$walk_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::WalkRunner<$walk_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Walkthrough not initialized. Call roam_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn roam_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let walkthrough = <$walk_type>::new();
            let runner = $crate::WalkRunner::new(walkthrough);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $walk_name);
        }

        #[wasm_bindgen]
        pub fn roam_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        // ---- Input source ----

        #[wasm_bindgen]
        pub fn roam_key_down(key_code: u32) {
            with_runner(|r| r.push_input($crate::__export::InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn roam_key_up(key_code: u32) {
            with_runner(|r| r.push_input($crate::__export::InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn roam_look(dx: f32, dy: f32) {
            with_runner(|r| r.push_input($crate::__export::InputEvent::Look { dx, dy }));
        }

        #[wasm_bindgen]
        pub fn roam_pointer_lock(locked: bool) {
            with_runner(|r| r.push_input($crate::__export::InputEvent::PointerLock { locked }));
        }

        // ---- Scene loader ----

        /// Returns the number of declared interactables; throws on malformed JSON.
        #[wasm_bindgen]
        pub fn roam_load_manifest(json: &str) -> Result<u32, JsValue> {
            with_runner(|r| r.load_manifest(json))
                .map(|count| count as u32)
                .map_err(|err| {
                    log::error!("scene manifest rejected: {}", err);
                    $crate::__export::js_sys::Error::new(&format!("invalid scene manifest: {}", err)).into()
                })
        }

        #[wasm_bindgen]
        pub fn roam_interactable_ready(id: u32, x: f32, y: f32, z: f32) {
            let anchor = $crate::__export::Vec3::new(x, y, z);
            with_runner(|r| r.interactable_ready(id, anchor, None));
        }

        #[wasm_bindgen]
        pub fn roam_interactable_ready_with_bounds(
            id: u32,
            x: f32, y: f32, z: f32,
            min_x: f32, min_y: f32, min_z: f32,
            max_x: f32, max_y: f32, max_z: f32,
        ) {
            use $crate::__export::{Aabb, Vec3};
            let anchor = Vec3::new(x, y, z);
            let bounds = Aabb::new(Vec3::new(min_x, min_y, min_z), Vec3::new(max_x, max_y, max_z));
            with_runner(|r| r.interactable_ready(id, anchor, Some(bounds)));
        }

        #[wasm_bindgen]
        pub fn roam_interactable_failed(id: u32) {
            with_runner(|r| r.interactable_failed(id));
        }

        // ---- Overlay queries ----

        #[wasm_bindgen]
        pub fn roam_overlay_visible(id: u32) -> bool {
            with_runner(|r| r.overlay_visible(id))
        }

        #[wasm_bindgen]
        pub fn roam_open_overlay() -> i32 {
            with_runner(|r| r.open_overlay())
        }

        #[wasm_bindgen]
        pub fn roam_pointer_locked() -> bool {
            with_runner(|r| r.pointer_locked())
        }

        // ---- Frame buffer accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr())
        }

        #[wasm_bindgen]
        pub fn get_frame_floats() -> u32 {
            with_runner(|r| r.frame_floats())
        }

        #[wasm_bindgen]
        pub fn get_camera_data_offset() -> u32 {
            with_runner(|r| r.camera_data_offset())
        }

        #[wasm_bindgen]
        pub fn get_event_data_offset() -> u32 {
            with_runner(|r| r.event_data_offset())
        }

        #[wasm_bindgen]
        pub fn get_event_count() -> u32 {
            with_runner(|r| r.event_count())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}
