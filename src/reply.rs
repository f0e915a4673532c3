//! What a UI event hands back to the browser: an optional fragment for the
//! htmx target, the toasts raised while handling it, and maybe a navigation.

use axum::{
    http::HeaderValue,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use std::time::Duration;
use uuid::Uuid;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    const fn classes(self) -> &'static str {
        match self {
            Self::Success => "bg-green-100 border-green-400 text-green-800",
            Self::Error => "bg-red-100 border-red-400 text-red-700",
            Self::Info => "bg-sky-100 border-sky-400 text-sky-800",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Notices collected while one UI event is handled.
#[derive(Clone, Debug, Default)]
pub struct Toasts(Vec<Toast>);

impl Toasts {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        debug!(?kind, %message, "Raising toast");
        self.0.push(Toast { kind, message });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, kind: ToastKind, message: &str) -> bool {
        self.0
            .iter()
            .any(|toast| toast.kind == kind && toast.message == message)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Now(String),
    After { to: String, delay: Duration },
}

#[derive(Debug)]
pub struct Reply {
    body: Option<Markup>,
    out_of_band: Vec<Markup>,
    toasts: Toasts,
    navigation: Option<Navigation>,
    toast_lifetime: Duration,
}

impl Reply {
    pub const fn new(toasts: Toasts, toast_lifetime: Duration) -> Self {
        Self {
            body: None,
            out_of_band: Vec::new(),
            toasts,
            navigation: None,
            toast_lifetime,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Markup) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_optional_body(mut self, body: Option<Markup>) -> Self {
        self.body = body;
        self
    }

    /// Swapped in by id (`hx-swap-oob`) whether or not there is a body.
    #[must_use]
    pub fn with_out_of_band(mut self, markup: Markup) -> Self {
        self.out_of_band.push(markup);
        self
    }

    #[must_use]
    pub fn navigate(mut self, navigation: Navigation) -> Self {
        self.navigation = Some(navigation);
        self
    }

    /// Toasts plus any delayed navigation, ready to drop into `#toasts`.
    pub fn extras(&self) -> Markup {
        let lifetime = self.toast_lifetime.as_millis();

        html! {
            @for toast in self.toasts.iter() {
                @let id = format!("toast-{}", Uuid::new_v4().simple());
                div id=(id) role="alert" class={"border px-4 py-3 rounded shadow-md min-w-72 " (toast.kind.classes())} {
                    span {(toast.message)}
                    button type="button" class="ml-4 font-bold" onclick="this.parentElement.remove()" {"×"}
                }
                script {
                    (PreEscaped(format!("setTimeout(() => document.getElementById('{id}')?.remove(), {lifetime});")))
                }
            }
            @if let Some(Navigation::After { to, delay }) = &self.navigation {
                script {
                    (PreEscaped(format!("setTimeout(() => window.location.assign({to:?}), {});", delay.as_millis())))
                }
            }
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let extras = self.extras();
        let swap_nothing = self.body.is_none();

        let markup = html! {
            @if let Some(body) = self.body {
                (body)
            }
            @for markup in self.out_of_band {
                (markup)
            }
            div hx-swap-oob="beforeend:#toasts" {
                (extras)
            }
        };

        let mut response = markup.into_response();
        let headers = response.headers_mut();
        if swap_nothing {
            headers.insert("hx-reswap", HeaderValue::from_static("none"));
        }
        if let Some(Navigation::Now(to)) = &self.navigation {
            match HeaderValue::from_str(to) {
                Ok(value) => {
                    headers.insert("hx-redirect", value);
                }
                Err(e) => warn!(?e, ?to, "Unable to navigate, bad header value"),
            }
        }
        response
    }
}
