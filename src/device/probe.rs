use std::sync::Arc;

use leptos::logging::log;
use leptos_use::use_event_listener;
use wasm_bindgen::JsValue;

/// Called on every viewport resize.
pub type ResizeHandler = Arc<dyn Fn() + Send + Sync>;

/// Read access to the ambient signals the classifier depends on.
///
/// Every method is failure-soft: an environment that lacks a capability
/// answers `None` or `false` instead of erroring.
pub trait EnvironmentProbe: Send + Sync + 'static {
    fn user_agent(&self) -> Option<String>;
    fn viewport_width(&self) -> Option<f64>;
    fn supports_touch_start(&self) -> bool;
    fn max_touch_points(&self) -> i32;
    fn matches_media(&self, query: &str) -> bool;
    /// Registers `handler` for viewport resizes until the returned handle is
    /// detached or dropped.
    fn on_resize(&self, handler: ResizeHandler) -> DetachHandle;
}

/// Releases a resize subscription exactly once, either through
/// [`DetachHandle::detach`] or on drop.
#[must_use = "dropping the handle releases the resize listener"]
pub struct DetachHandle {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl DetachHandle {
    pub fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A handle with nothing to release.
    pub fn inert() -> Self {
        Self { release: None }
    }

    pub fn is_attached(&self) -> bool {
        self.release.is_some()
    }

    pub fn detach(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for DetachHandle {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for DetachHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetachHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Reads `window` and `navigator` of the current browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserProbe;

fn warn_read_failed(what: &str, err: &JsValue) {
    log!("[WARN] [BrowserProbe] Failed to read {}: {:?}", what, err);
}

impl EnvironmentProbe for BrowserProbe {
    fn user_agent(&self) -> Option<String> {
        let window = web_sys::window()?;
        window
            .navigator()
            .user_agent()
            .map_err(|e| warn_read_failed("navigator.userAgent", &e))
            .ok()
    }

    fn viewport_width(&self) -> Option<f64> {
        let window = web_sys::window()?;
        window
            .inner_width()
            .map_err(|e| warn_read_failed("window.innerWidth", &e))
            .ok()
            .and_then(|width| width.as_f64())
    }

    fn supports_touch_start(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart"))
            .map_err(|e| warn_read_failed("window.ontouchstart", &e))
            .unwrap_or(false)
    }

    fn max_touch_points(&self) -> i32 {
        web_sys::window()
            .map(|window| window.navigator().max_touch_points())
            .unwrap_or(0)
    }

    fn matches_media(&self, query: &str) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        match window.match_media(query) {
            Ok(Some(list)) => list.matches(),
            Ok(None) => false,
            Err(e) => {
                warn_read_failed(query, &e);
                false
            }
        }
    }

    fn on_resize(&self, handler: ResizeHandler) -> DetachHandle {
        let Some(window) = web_sys::window() else {
            log!("[WARN] [BrowserProbe] No global window, resize events will not be observed.");
            return DetachHandle::inert();
        };
        let stop = use_event_listener(window, leptos::ev::resize, move |_| handler());
        DetachHandle::new(move || stop())
    }
}
