use crate::data::student::StudentId;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;

pub type RegistrarResult<T> = Result<T, RegistrarError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RegistrarError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse `{}` as milliseconds", name))]
    ParseDelay {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Unable to parse URL {:?}", original))]
    ParseUrl {
        source: url::ParseError,
        original: String,
    },
    #[snafu(display("URL {:?} cannot be used as an API base", original))]
    CannotBeABase { original: String },
    #[snafu(display("Invalid locale {:?}", provided))]
    InvalidLocale {
        source: icu::locale::ParseError,
        provided: String,
    },
    #[snafu(display("Invalid timezone {:?}", tz))]
    InvalidTimezone { source: jiff::Error, tz: String },
    #[snafu(display("Error creating date formatter"))]
    BadDateTimeFormatter {
        source: icu::datetime::DateTimeFormatterLoadError,
    },
    #[snafu(display("Unable to build HTTP client"))]
    BuildHttpClient { source: reqwest::Error },
    #[snafu(display("Error building request to backend"))]
    BuildRequest { source: reqwest::Error },
    #[snafu(display("Unable to reach backend"))]
    Unreachable { source: reqwest::Error },
    #[snafu(display("Connection to backend dropped while reading the response"))]
    ReadBody { source: reqwest::Error },
    #[snafu(display("Backend responded with {}", status))]
    Backend {
        status: StatusCode,
        body: Option<serde_json::Value>,
    },
    #[snafu(display("Backend rejected the request: {}", message.as_deref().unwrap_or("<no message>")))]
    Rejected { message: Option<String> },
    #[snafu(display("Unable to decode backend response"))]
    DecodeBody { source: serde_json::Error },
    #[snafu(display("Backend reported success without a payload"))]
    MissingPayload,
    #[snafu(display("Unable to find student with ID {} in the loaded list", id))]
    StudentNotCached { id: StudentId },
    #[snafu(display("Unable to parse student ID {:?}", original))]
    ParseStudentId {
        source: ParseIntError,
        original: String,
    },
    #[snafu(display("Unknown student status {:?}", provided))]
    UnknownStatus { provided: String },
    #[snafu(display("Unknown form field {:?}", provided))]
    UnknownField { provided: String },
    #[snafu(display("List request arrived without a page token"))]
    MissingPageToken,
    #[snafu(display("Unable to parse page token {:?}", original))]
    ParsePageToken {
        source: uuid::Error,
        original: String,
    },
    #[snafu(display("Unable to listen on {}", address))]
    Bind {
        source: std::io::Error,
        address: String,
    },
    #[snafu(display("Error serving the console"))]
    Serve { source: std::io::Error },
}

/// Which user-facing notice a failure maps to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// A response came back, but it was an error.
    Backend,
    /// The request went out and nothing came back.
    Unreachable,
    /// Something went wrong on our side before or after the exchange.
    Unexpected,
}

impl RegistrarError {
    pub const fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Backend { .. } | Self::Rejected { .. } => FailureKind::Backend,
            Self::Unreachable { .. } | Self::ReadBody { .. } => FailureKind::Unreachable,
            _ => FailureKind::Unexpected,
        }
    }
}

impl IntoResponse for RegistrarError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const BG: StatusCode = StatusCode::BAD_GATEWAY; //backend misbehaved

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Registrar Error "}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } | Self::ParseDelay { .. } => ISE,
            Self::ParseUrl { .. } | Self::CannotBeABase { .. } => ISE,
            Self::InvalidLocale { .. } | Self::InvalidTimezone { .. } => ISE,
            Self::BadDateTimeFormatter { .. } => ISE,
            Self::BuildHttpClient { .. } | Self::BuildRequest { .. } => ISE,
            Self::Unreachable { .. } | Self::ReadBody { .. } => BG,
            Self::Backend { status, .. } => *status,
            Self::Rejected { .. } | Self::DecodeBody { .. } | Self::MissingPayload => BG,
            Self::StudentNotCached { .. } => NF,
            Self::ParseStudentId { .. } | Self::UnknownStatus { .. } | Self::UnknownField { .. } => {
                BI
            }
            Self::MissingPageToken | Self::ParsePageToken { .. } => BI,
            Self::Bind { .. } | Self::Serve { .. } => ISE,
        };

        error!(?self, "Error!");
        (status_code, basic_error(self.to_string())).into_response()
    }
}
