//! The one place the console talks to the student backend.
//!
//! Every call goes out once (no retries), the body is read as JSON whatever the
//! status, and every failure is turned into a toast here before it is handed
//! back, so callers only need to decide whether they want to do anything else.

use crate::{
    data::{
        envelope::ResponseEnvelope,
        stats::StatisticsSummary,
        student::{StudentDraft, StudentId, StudentRecord, StudentStatus},
    },
    error::{
        BackendSnafu, BuildHttpClientSnafu, DecodeBodySnafu, FailureKind, ReadBodySnafu,
        RegistrarError, RegistrarResult,
    },
    reply::Toasts,
};
use endpoints::Endpoints;
use reqwest::{Client, Method, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned, de::IgnoredAny};
use snafu::ResultExt;
use url::Url;

pub mod endpoints;

pub const GENERIC_BACKEND_MESSAGE: &str = "An error occurred";
pub const UNREACHABLE_MESSAGE: &str =
    "Unable to connect to the server. Please check if the server is running.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Method and optional JSON body for one call.
#[derive(Debug)]
pub struct RequestOptions<'a, B: ?Sized = ()> {
    method: Method,
    body: Option<&'a B>,
}

impl RequestOptions<'static, ()> {
    pub const fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
        }
    }

    pub const fn delete() -> Self {
        Self {
            method: Method::DELETE,
            body: None,
        }
    }
}

impl<'a, B: Serialize + ?Sized> RequestOptions<'a, B> {
    pub const fn with_body(method: Method, body: &'a B) -> Self {
        Self {
            method,
            body: Some(body),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Gateway {
    http: Client,
    endpoints: Endpoints,
}

impl Gateway {
    pub fn new(endpoints: Endpoints) -> RegistrarResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("registrar/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(BuildHttpClientSnafu)?;

        Ok(Self { http, endpoints })
    }

    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send<T, B>(
        &self,
        endpoint: Url,
        RequestOptions { method, body }: RequestOptions<'_, B>,
    ) -> RegistrarResult<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!(%method, %endpoint, "Sending backend request");

        let mut builder = self
            .http
            .request(method, endpoint)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|source| {
            if source.is_builder() {
                RegistrarError::BuildRequest { source }
            } else {
                RegistrarError::Unreachable { source }
            }
        })?;

        let status = response.status();
        let bytes = response.bytes().await.context(ReadBodySnafu)?;

        if !status.is_success() {
            let body = serde_json::from_slice(&bytes).ok();
            return BackendSnafu { status, body }.fail();
        }

        serde_json::from_slice(&bytes).context(DecodeBodySnafu)
    }

    /// Sends one request and hands back the raw envelope. Failures are
    /// toasted before being returned.
    pub async fn request<T, B>(
        &self,
        endpoint: Url,
        options: RequestOptions<'_, B>,
        toasts: &mut Toasts,
    ) -> RegistrarResult<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(endpoint, options)
            .await
            .inspect_err(|e| notify_failure(e, toasts))
    }

    /// [`Self::request`], then insists on `success` and a payload.
    pub async fn fetch<T, B>(
        &self,
        endpoint: Url,
        options: RequestOptions<'_, B>,
        toasts: &mut Toasts,
    ) -> RegistrarResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(endpoint, options, toasts)
            .await?
            .into_payload()
            .inspect_err(|e| notify_failure(e, toasts))
    }

    /// For calls where only the success flag matters.
    pub async fn execute<B>(
        &self,
        endpoint: Url,
        options: RequestOptions<'_, B>,
        toasts: &mut Toasts,
    ) -> RegistrarResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.request::<IgnoredAny, B>(endpoint, options, toasts)
            .await?
            .into_success()
            .map(|_| ())
            .inspect_err(|e| notify_failure(e, toasts))
    }

    pub async fn list_students(&self, toasts: &mut Toasts) -> RegistrarResult<Vec<StudentRecord>> {
        self.fetch(self.endpoints.students(), RequestOptions::get(), toasts)
            .await
    }

    pub async fn get_student(
        &self,
        id: StudentId,
        toasts: &mut Toasts,
    ) -> RegistrarResult<StudentRecord> {
        self.fetch(self.endpoints.student(id), RequestOptions::get(), toasts)
            .await
    }

    pub async fn create_student(
        &self,
        draft: &StudentDraft,
        toasts: &mut Toasts,
    ) -> RegistrarResult<StudentRecord> {
        self.fetch(
            self.endpoints.students(),
            RequestOptions::with_body(Method::POST, draft),
            toasts,
        )
        .await
    }

    pub async fn update_student(
        &self,
        id: StudentId,
        draft: &StudentDraft,
        toasts: &mut Toasts,
    ) -> RegistrarResult<StudentRecord> {
        self.fetch(
            self.endpoints.student(id),
            RequestOptions::with_body(Method::PUT, draft),
            toasts,
        )
        .await
    }

    pub async fn delete_student(&self, id: StudentId, toasts: &mut Toasts) -> RegistrarResult<()> {
        self.execute(self.endpoints.student(id), RequestOptions::delete(), toasts)
            .await
    }

    pub async fn search_students(
        &self,
        keyword: &str,
        toasts: &mut Toasts,
    ) -> RegistrarResult<Vec<StudentRecord>> {
        self.fetch(self.endpoints.search(keyword), RequestOptions::get(), toasts)
            .await
    }

    pub async fn students_by_status(
        &self,
        status: StudentStatus,
        toasts: &mut Toasts,
    ) -> RegistrarResult<Vec<StudentRecord>> {
        self.fetch(self.endpoints.by_status(status), RequestOptions::get(), toasts)
            .await
    }

    pub async fn students_by_course(
        &self,
        course: &str,
        toasts: &mut Toasts,
    ) -> RegistrarResult<Vec<StudentRecord>> {
        self.fetch(self.endpoints.by_course(course), RequestOptions::get(), toasts)
            .await
    }

    pub async fn students_by_year(
        &self,
        year: u32,
        toasts: &mut Toasts,
    ) -> RegistrarResult<Vec<StudentRecord>> {
        self.fetch(self.endpoints.by_year(year), RequestOptions::get(), toasts)
            .await
    }

    pub async fn statistics(&self, toasts: &mut Toasts) -> RegistrarResult<StatisticsSummary> {
        self.fetch(self.endpoints.stats(), RequestOptions::get(), toasts)
            .await
    }
}

/// What the admin gets told for a given failure.
pub fn failure_message(error: &RegistrarError) -> String {
    let backend_message = match error {
        RegistrarError::Backend { body, .. } => body
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(serde_json::Value::as_str),
        RegistrarError::Rejected { message } => message.as_deref(),
        _ => None,
    };

    match error.failure_kind() {
        FailureKind::Backend => backend_message
            .filter(|message| !message.is_empty())
            .unwrap_or(GENERIC_BACKEND_MESSAGE)
            .to_string(),
        FailureKind::Unreachable => UNREACHABLE_MESSAGE.to_string(),
        FailureKind::Unexpected => UNEXPECTED_MESSAGE.to_string(),
    }
}

pub fn notify_failure(error: &RegistrarError, toasts: &mut Toasts) {
    warn!(?error, kind = ?error.failure_kind(), "Backend call failed");
    toasts.error(failure_message(error));
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn backend_errors_use_the_body_message() {
        let error = RegistrarError::Backend {
            status: StatusCode::CONFLICT,
            body: Some(json!({"success": false, "message": "Student with email a@b.c already exists"})),
        };
        assert_eq!(failure_message(&error), "Student with email a@b.c already exists");
    }

    #[test]
    fn backend_errors_without_a_message_fall_back() {
        for body in [None, Some(json!({"success": false})), Some(json!({"message": ""}))] {
            let error = RegistrarError::Backend {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body,
            };
            assert_eq!(failure_message(&error), GENERIC_BACKEND_MESSAGE);
        }
    }

    #[test]
    fn rejected_envelopes_count_as_backend_errors() {
        let error = RegistrarError::Rejected {
            message: Some("Student not found with ID: 9".into()),
        };
        assert_eq!(error.failure_kind(), FailureKind::Backend);
        assert_eq!(failure_message(&error), "Student not found with ID: 9");
    }

    #[test]
    fn local_failures_are_unexpected() {
        let mut toasts = Toasts::default();
        notify_failure(&RegistrarError::MissingPayload, &mut toasts);
        assert!(toasts.has(crate::reply::ToastKind::Error, UNEXPECTED_MESSAGE));
    }
}
