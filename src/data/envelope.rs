use crate::error::{MissingPayloadSnafu, RegistrarError, RegistrarResult};
use serde::Deserialize;
use snafu::OptionExt;

/// Every backend reply comes wrapped in one of these.
#[derive(Clone, Debug, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ResponseEnvelope<T> {
    /// Checks the success flag before handing over whatever payload there is.
    pub fn into_success(self) -> RegistrarResult<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(RegistrarError::Rejected {
                message: self.message,
            })
        }
    }

    /// Like [`Self::into_success`], but a payload has to be there.
    pub fn into_payload(self) -> RegistrarResult<T> {
        self.into_success()?.context(MissingPayloadSnafu)
    }
}
