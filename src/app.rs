use leptos::logging::log;
use leptos::prelude::*;
use leptos_use::use_timeout_fn;

use crate::device::{provide_is_mobile, IsMobile};
use crate::interaction::{Gesture, InteractionMode, RevealState, HOLD_DURATION_MS};

#[component]
pub fn App() -> impl IntoView {
    let is_mobile = provide_is_mobile();
    let mode = Memo::new(move |_| InteractionMode::from_is_mobile(is_mobile.get()));

    view! {
        <header>
            <span data-role="mode">{move || mode.get().label()}</span>
        </header>
        <main>
            <RevealButton label="Spoiler" hidden_text="The butler did it.".to_string() />
            <RevealButton label="Hint" hidden_text="Try resizing the window.".to_string() />
        </main>
    }
}

/// Shows `hidden_text` after a click on desktop, or while the button is
/// held on mobile.
#[component]
pub fn RevealButton(
    #[prop(into)] label: String,
    #[prop(into)] hidden_text: Signal<String>,
) -> impl IntoView {
    let is_mobile = IsMobile::expect_context();
    let mode = Memo::new(move |_| InteractionMode::from_is_mobile(is_mobile.get()));
    let (state, set_state) = signal(RevealState::default());

    let apply = move |gesture: Gesture| {
        set_state.update(|state| *state = mode.get_untracked().apply(*state, gesture));
    };

    let hold = use_timeout_fn(move |_| apply(Gesture::HoldElapsed), HOLD_DURATION_MS as f64);

    // A half-finished gesture from the previous mode must not leak into the new one.
    let stop_on_mode_change = hold.stop.clone();
    Effect::new(move |_| {
        let current = mode.get();
        log!("[DEBUG] [RevealButton] Interaction mode: {:?}", current);
        stop_on_mode_change();
        set_state.set(RevealState::Hidden);
    });

    let on_press = {
        let start = hold.start.clone();
        move |_: leptos::ev::PointerEvent| {
            apply(Gesture::PressStart);
            if state.get_untracked() == RevealState::Pressing {
                start(());
            }
        }
    };

    let release = {
        let stop = hold.stop.clone();
        move || {
            stop();
            apply(Gesture::PressEnd);
        }
    };
    let on_pointerup = {
        let release = release.clone();
        move |_: leptos::ev::PointerEvent| release()
    };
    let on_pointerleave = {
        let release = release.clone();
        move |_: leptos::ev::PointerEvent| release()
    };
    let on_pointercancel = move |_: leptos::ev::PointerEvent| release();

    view! {
        <div class="reveal">
            <button
                data-size="compact"
                data-mode=move || match mode.get() {
                    InteractionMode::ClickToToggle => "toggle",
                    InteractionMode::PressAndHold => "hold",
                }
                on:click=move |_| apply(Gesture::Click)
                on:pointerdown=on_press
                on:pointerup=on_pointerup
                on:pointerleave=on_pointerleave
                on:pointercancel=on_pointercancel
                on:contextmenu=move |ev| {
                    if mode.get_untracked() == InteractionMode::PressAndHold {
                        ev.prevent_default();
                    }
                }
            >
                {label}
            </button>
            <Show when=move || state.get().is_revealed()>
                <p>{move || hidden_text.get()}</p>
            </Show>
        </div>
    }
}
