//! Browser frame scheduling via `requestAnimationFrame`

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{FrameCallback, FrameId, FrameScheduler};

/// `requestAnimationFrame` / `cancelAnimationFrame` on the page window
pub struct AnimationFrames {
    window: web_sys::Window,
}

impl AnimationFrames {
    /// `None` outside a window context (e.g. a worker)
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameId> {
        let closure = Closure::once_into_js(move |time: f64| callback(time));
        match self
            .window
            .request_animation_frame(closure.unchecked_ref())
        {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&self, id: FrameId) {
        if let Err(e) = self.window.cancel_animation_frame(id) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", id, e);
        }
    }
}
