pub mod app;
pub mod device;
pub mod interaction;

pub use device::{
    provide_is_mobile, use_is_mobile, use_is_mobile_with, Classification, ClassifierConfig,
    DeviceClassifier, EnvironmentProbe, IsMobile,
};
pub use interaction::InteractionMode;
