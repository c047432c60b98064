use crate::device::Classification;

pub const HOLD_DURATION_MS: u32 = 400;

/// How a revealable control reacts to input on the current device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    ClickToToggle,
    PressAndHold,
}

impl InteractionMode {
    pub fn from_is_mobile(is_mobile: bool) -> Self {
        Self::from(Classification::from_is_mobile(is_mobile))
    }

    pub fn label(self) -> &'static str {
        match self {
            InteractionMode::ClickToToggle => "click to toggle",
            InteractionMode::PressAndHold => "press and hold",
        }
    }

    /// Gestures that belong to the other mode are ignored.
    pub fn apply(self, state: RevealState, gesture: Gesture) -> RevealState {
        use Gesture::*;
        use RevealState::*;
        match (self, gesture) {
            (InteractionMode::ClickToToggle, Click) => match state {
                Revealed => Hidden,
                Hidden | Pressing => Revealed,
            },
            (InteractionMode::ClickToToggle, _) => state,
            (InteractionMode::PressAndHold, PressStart) => match state {
                Hidden => Pressing,
                other => other,
            },
            (InteractionMode::PressAndHold, HoldElapsed) => match state {
                Pressing => Revealed,
                other => other,
            },
            (InteractionMode::PressAndHold, PressEnd) => Hidden,
            (InteractionMode::PressAndHold, Click) => state,
        }
    }
}

impl From<Classification> for InteractionMode {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Desktop => InteractionMode::ClickToToggle,
            Classification::Mobile => InteractionMode::PressAndHold,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Click,
    PressStart,
    HoldElapsed,
    PressEnd,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Hidden,
    Pressing,
    Revealed,
}

impl RevealState {
    pub fn is_revealed(self) -> bool {
        self == RevealState::Revealed
    }
}
