mod classify;
#[cfg(test)]
mod fake;
mod probe;

pub use classify::{
    classify, Classification, ClassificationSignals, ClassifierConfig, EnvironmentSnapshot,
    COARSE_POINTER_QUERY, FINE_POINTER_QUERY, MOBILE_USER_AGENT_TOKENS, SMALL_SCREEN_MAX_WIDTH,
};
pub use probe::{BrowserProbe, DetachHandle, EnvironmentProbe, ResizeHandler};

use std::sync::Arc;

use leptos::logging::log;
use leptos::prelude::*;

/// Holds the current mobile/desktop decision as a signal and re-evaluates it
/// against its probe whenever the viewport is resized.
#[derive(Clone)]
pub struct DeviceClassifier {
    probe: Arc<dyn EnvironmentProbe>,
    config: Arc<ClassifierConfig>,
    is_mobile: RwSignal<bool>,
}

impl DeviceClassifier {
    pub fn new(probe: impl EnvironmentProbe) -> Self {
        Self::with_config(probe, ClassifierConfig::default())
    }

    pub fn with_config(probe: impl EnvironmentProbe, config: ClassifierConfig) -> Self {
        Self {
            probe: Arc::new(probe),
            config: Arc::new(config),
            is_mobile: RwSignal::new(false),
        }
    }

    pub fn is_mobile(&self) -> Signal<bool> {
        self.is_mobile.read_only().into()
    }

    pub fn classification(&self) -> Classification {
        Classification::from_is_mobile(self.is_mobile.try_get_untracked().unwrap_or(false))
    }

    /// Evaluates the environment and stores the result. Returns `true` only
    /// when the value changed, which is also the only case in which
    /// subscribers are notified.
    pub fn recompute(&self) -> bool {
        let snapshot = EnvironmentSnapshot::capture(self.probe.as_ref());
        let signals = ClassificationSignals::evaluate(&snapshot, &self.config);
        let next = signals.classification();
        log!(
            "[DEBUG] [DeviceClassifier] Evaluated {:?} with {:?} -> {:?}",
            snapshot,
            signals,
            next
        );

        let changed = self
            .is_mobile
            .try_maybe_update(|current| {
                let changed = *current != next.is_mobile();
                *current = next.is_mobile();
                (changed, changed)
            })
            .unwrap_or(false);
        if changed {
            log!(
                "[INFO] [DeviceClassifier] Classification changed: {:?} -> {:?}",
                Classification::from_is_mobile(!next.is_mobile()),
                next
            );
        }
        changed
    }

    /// Evaluates once, then follows viewport resizes until the returned
    /// handle is detached or dropped.
    pub fn attach(&self) -> DetachHandle {
        self.recompute();
        let classifier = self.clone();
        let subscription = self.probe.on_resize(Arc::new(move || {
            classifier.recompute();
        }));
        log!("[DEBUG] [DeviceClassifier] Attached resize listener.");
        DetachHandle::new(move || {
            subscription.detach();
            log!("[DEBUG] [DeviceClassifier] Detached resize listener.");
        })
    }
}

/// Reactive mobile/desktop flag for the current browser. The resize listener
/// lives as long as the calling owner.
pub fn use_is_mobile() -> Signal<bool> {
    use_is_mobile_with(BrowserProbe, ClassifierConfig::default())
}

pub fn use_is_mobile_with(probe: impl EnvironmentProbe, config: ClassifierConfig) -> Signal<bool> {
    let classifier = DeviceClassifier::with_config(probe, config);
    let handle = classifier.attach();
    on_cleanup(move || handle.detach());
    classifier.is_mobile()
}

#[derive(Clone, Copy, Debug)]
pub struct IsMobile(pub Signal<bool>);

impl IsMobile {
    #[track_caller]
    pub fn expect_context() -> Signal<bool> {
        expect_context::<Self>().0
    }
}

/// Runs [`use_is_mobile`] once and shares the result with every descendant.
pub fn provide_is_mobile() -> Signal<bool> {
    let is_mobile = use_is_mobile();
    provide_context(IsMobile(is_mobile));
    is_mobile
}
