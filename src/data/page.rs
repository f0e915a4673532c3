use crate::error::{MissingPageTokenSnafu, ParsePageTokenSnafu, RegistrarError};
use axum::{extract::FromRequestParts, http::request::Parts};
use snafu::{OptionExt, ResultExt};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Header every list fragment request carries, set once per rendered list page.
pub const PAGE_HEADER: &str = "x-registrar-page";

/// Identifies one open copy of the student list, so two tabs (or two admins)
/// never share a cache, a pending delete, or a ticket counter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageToken(Uuid);

impl PageToken {
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(original: &str) -> Result<Self, RegistrarError> {
        Uuid::parse_str(original.trim())
            .map(Self)
            .context(ParsePageTokenSnafu { original })
    }

    /// Value for an `hx-headers` attribute, inherited by everything inside it.
    pub fn hx_headers(self) -> String {
        format!(r#"{{"{PAGE_HEADER}": "{}"}}"#, self.0)
    }
}

impl Display for PageToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for PageToken {
    type Rejection = RegistrarError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(PAGE_HEADER)
            .and_then(|value| value.to_str().ok())
            .context(MissingPageTokenSnafu)?;
        Self::parse(header)
    }
}
