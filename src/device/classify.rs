use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::probe::EnvironmentProbe;

pub const SMALL_SCREEN_MAX_WIDTH: f64 = 768.0;
pub const MOBILE_USER_AGENT_TOKENS: [&str; 8] = [
    "Android",
    "webOS",
    "iPhone",
    "iPad",
    "iPod",
    "BlackBerry",
    "IEMobile",
    "Opera Mini",
];
pub const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";
pub const FINE_POINTER_QUERY: &str = "(pointer: fine)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Classification {
    #[default]
    Desktop,
    Mobile,
}

impl Classification {
    pub fn from_is_mobile(is_mobile: bool) -> Self {
        if is_mobile {
            Classification::Mobile
        } else {
            Classification::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Classification::Mobile
    }
}

/// Thresholds used by the classifier. Deserializes with per-field defaults,
/// so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub small_screen_max_width: f64,
    pub mobile_user_agent_tokens: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            small_screen_max_width: SMALL_SCREEN_MAX_WIDTH,
            mobile_user_agent_tokens: MOBILE_USER_AGENT_TOKENS
                .iter()
                .map(|token| token.to_string())
                .collect(),
        }
    }
}

impl ClassifierConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).context("[ClassifierConfig] Failed to parse JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.small_screen_max_width.is_finite() || self.small_screen_max_width <= 0.0 {
            bail!(
                "[ClassifierConfig] small_screen_max_width must be a positive number, got {}",
                self.small_screen_max_width
            );
        }
        // An empty token is a substring of every user agent.
        if let Some(index) = self
            .mobile_user_agent_tokens
            .iter()
            .position(|token| token.trim().is_empty())
        {
            bail!("[ClassifierConfig] mobile_user_agent_tokens[{index}] is empty");
        }
        Ok(())
    }

    pub fn matches_mobile_user_agent(&self, user_agent: &str) -> bool {
        let user_agent = user_agent.to_lowercase();
        self.mobile_user_agent_tokens
            .iter()
            .any(|token| user_agent.contains(&token.to_lowercase()))
    }
}

/// Raw environment state read during one evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvironmentSnapshot {
    pub user_agent: String,
    pub viewport_width: Option<f64>,
    pub has_touch_screen: bool,
    pub coarse_pointer: bool,
    pub fine_pointer: bool,
}

impl EnvironmentSnapshot {
    pub fn capture(probe: &dyn EnvironmentProbe) -> Self {
        Self {
            user_agent: probe.user_agent().unwrap_or_default(),
            viewport_width: probe.viewport_width(),
            has_touch_screen: probe.supports_touch_start() || probe.max_touch_points() > 0,
            coarse_pointer: probe.matches_media(COARSE_POINTER_QUERY),
            fine_pointer: probe.matches_media(FINE_POINTER_QUERY),
        }
    }
}

/// The derived booleans the final decision is made from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassificationSignals {
    pub mobile_user_agent: bool,
    pub small_screen: bool,
    pub touch_screen: bool,
    pub coarse_pointer: bool,
    pub no_fine_pointer: bool,
}

impl ClassificationSignals {
    pub fn evaluate(snapshot: &EnvironmentSnapshot, config: &ClassifierConfig) -> Self {
        Self {
            mobile_user_agent: config.matches_mobile_user_agent(&snapshot.user_agent),
            small_screen: snapshot
                .viewport_width
                .is_some_and(|width| width <= config.small_screen_max_width),
            touch_screen: snapshot.has_touch_screen,
            coarse_pointer: snapshot.coarse_pointer,
            no_fine_pointer: !snapshot.fine_pointer,
        }
    }

    /// A known mobile user agent wins outright. Otherwise every fallback
    /// signal must agree, so hybrid laptops with a fine pointer stay desktop.
    pub fn classification(self) -> Classification {
        Classification::from_is_mobile(
            self.mobile_user_agent
                || (self.small_screen
                    && self.touch_screen
                    && self.coarse_pointer
                    && self.no_fine_pointer),
        )
    }
}

pub fn classify(snapshot: &EnvironmentSnapshot, config: &ClassifierConfig) -> Classification {
    ClassificationSignals::evaluate(snapshot, config).classification()
}
