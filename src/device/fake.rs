use std::sync::{Arc, Mutex, MutexGuard};

use super::classify::{COARSE_POINTER_QUERY, FINE_POINTER_QUERY};
use super::probe::{DetachHandle, EnvironmentProbe, ResizeHandler};

#[derive(Default)]
struct FakeState {
    user_agent: Option<String>,
    viewport_width: Option<f64>,
    touch_start: bool,
    max_touch_points: i32,
    coarse_pointer: bool,
    fine_pointer: bool,
    listeners: Vec<(usize, ResizeHandler)>,
    next_listener_id: usize,
    user_agent_reads: usize,
}

/// In-memory environment; clones share state so a test can keep a handle
/// while the classifier owns another.
#[derive(Clone, Default)]
pub struct FakeProbe(Arc<Mutex<FakeState>>);

impl FakeProbe {
    pub fn new(user_agent: &str, width: f64) -> Self {
        let probe = Self::default();
        {
            let mut state = probe.state();
            state.user_agent = Some(user_agent.to_string());
            state.viewport_width = Some(width);
        }
        probe
    }

    pub fn desktop() -> Self {
        Self::new("Mozilla/5.0 (Windows NT 10.0; Win64; x64)", 1440.0).with_pointer(false, true)
    }

    pub fn iphone() -> Self {
        Self::new("Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X)", 375.0)
            .with_touch_start(true)
            .with_pointer(true, false)
    }

    pub fn with_touch_start(self, touch_start: bool) -> Self {
        self.state().touch_start = touch_start;
        self
    }

    pub fn with_max_touch_points(self, points: i32) -> Self {
        self.state().max_touch_points = points;
        self
    }

    pub fn with_pointer(self, coarse: bool, fine: bool) -> Self {
        {
            let mut state = self.state();
            state.coarse_pointer = coarse;
            state.fine_pointer = fine;
        }
        self
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.state().viewport_width = Some(width);
    }

    pub fn set_pointer(&self, coarse: bool, fine: bool) {
        let mut state = self.state();
        state.coarse_pointer = coarse;
        state.fine_pointer = fine;
    }

    pub fn listener_count(&self) -> usize {
        self.state().listeners.len()
    }

    /// Every evaluation reads the user agent exactly once.
    pub fn evaluations(&self) -> usize {
        self.state().user_agent_reads
    }

    /// Fires the registered resize handlers outside the lock, since they read
    /// the probe again.
    pub fn resize(&self) {
        let handlers: Vec<ResizeHandler> = self
            .state()
            .listeners
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler();
        }
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.0.lock().unwrap()
    }
}

impl EnvironmentProbe for FakeProbe {
    fn user_agent(&self) -> Option<String> {
        let mut state = self.state();
        state.user_agent_reads += 1;
        state.user_agent.clone()
    }

    fn viewport_width(&self) -> Option<f64> {
        self.state().viewport_width
    }

    fn supports_touch_start(&self) -> bool {
        self.state().touch_start
    }

    fn max_touch_points(&self) -> i32 {
        self.state().max_touch_points
    }

    fn matches_media(&self, query: &str) -> bool {
        let state = self.state();
        match query {
            COARSE_POINTER_QUERY => state.coarse_pointer,
            FINE_POINTER_QUERY => state.fine_pointer,
            _ => false,
        }
    }

    fn on_resize(&self, handler: ResizeHandler) -> DetachHandle {
        let id = {
            let mut state = self.state();
            let id = state.next_listener_id;
            state.next_listener_id += 1;
            state.listeners.push((id, handler));
            id
        };
        let shared = self.0.clone();
        DetachHandle::new(move || {
            shared
                .lock()
                .unwrap()
                .listeners
                .retain(|(listener_id, _)| *listener_id != id);
        })
    }
}
