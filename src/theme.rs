use leptos::{create_effect, create_signal, on_cleanup, ReadSignal, SignalSet};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Theme::Dark } else { Theme::Light }
    }

    /// Class toggled on `<body>` for the dark stylesheet rules
    #[must_use]
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark-mode"),
        }
    }
}

/// Hook that follows the system colour scheme.
///
/// Stays on the light theme when the media query API is unavailable.
#[must_use]
pub fn use_theme() -> ReadSignal<Theme> {
    let (theme, set_theme) = create_signal(Theme::Light);

    create_effect(move |_| {
        let Some(window) = web_sys::window() else { return };
        let Ok(Some(media_query)) = window.match_media("(prefers-color-scheme: dark)") else {
            return;
        };

        set_theme.set(Theme::from_dark(media_query.matches()));

        let closure = Closure::wrap(Box::new(move |event: JsValue| {
            let Ok(matches) = js_sys::Reflect::get(&event, &"matches".into()) else { return };
            let Some(is_dark) = matches.as_bool() else { return };
            set_theme.set(Theme::from_dark(is_dark));
        }) as Box<dyn FnMut(_)>);

        if media_query
            .add_listener_with_opt_callback(Some(closure.as_ref().unchecked_ref()))
            .is_err()
        {
            return;
        }

        on_cleanup(move || {
            let _ = media_query.remove_listener_with_opt_callback(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        });
    });

    theme
}
