use crate::foundation::error::{ReelError, ReelResult};

/// Acknowledgement shown after a successful submission.
pub const ACK_MESSAGE: &str = "Спасибо! Мы свяжемся с вами в ближайшее время.";
/// Message shown when the endpoint fails. Endpoint details are logged, never shown.
pub const FAILURE_MESSAGE: &str = "Не удалось отправить сообщение. Попробуйте позже.";

/// Fields of the contact form.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactPayload {
    /// Sender name. Required.
    pub name: String,
    /// Sender email. Required.
    pub email: String,
    /// Optional messenger handle, e.g. `@username`.
    #[serde(rename = "telegram", default)]
    pub contact_handle: String,
    /// Message body. Required.
    pub message: String,
}

impl ContactPayload {
    /// Check required fields the way the form does before submitting.
    pub fn validate(&self) -> ReelResult<()> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ReelError::validation(format!(
                    "contact field '{field}' is required"
                )));
            }
        }
        let email = self.email.trim();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(user, host)| !user.is_empty() && !host.is_empty());
        if !well_formed {
            return Err(ReelError::validation(format!(
                "contact email '{email}' is not an address"
            )));
        }
        Ok(())
    }
}

/// Receiver of contact form submissions.
pub trait ContactEndpoint {
    /// Deliver one submission.
    fn submit(&self, payload: &ContactPayload) -> ReelResult<()>;
}

/// Endpoint that only records the submission in the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogEndpoint;

impl ContactEndpoint for LogEndpoint {
    fn submit(&self, payload: &ContactPayload) -> ReelResult<()> {
        let json = serde_json::to_string(payload)
            .map_err(|e| ReelError::serde(format!("encode contact payload: {e}")))?;
        tracing::info!(payload = %json, "contact form submitted");
        Ok(())
    }
}

/// Result of [`submit_contact`], ready to show to the visitor.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Delivered; show [`ACK_MESSAGE`].
    Accepted {
        /// Acknowledgement text.
        message: &'static str,
    },
    /// The form is incomplete; nothing was sent.
    Invalid {
        /// Which field is wrong.
        reason: String,
    },
    /// The endpoint failed; show [`FAILURE_MESSAGE`].
    Failed {
        /// Generic failure text.
        message: &'static str,
    },
}

/// Validate `payload` and hand it to `endpoint` once. There are no retries.
pub fn submit_contact(endpoint: &dyn ContactEndpoint, payload: &ContactPayload) -> SubmitOutcome {
    if let Err(e) = payload.validate() {
        return SubmitOutcome::Invalid {
            reason: e.to_string(),
        };
    }
    match endpoint.submit(payload) {
        Ok(()) => SubmitOutcome::Accepted {
            message: ACK_MESSAGE,
        },
        Err(e) => {
            tracing::warn!(error = %e, "contact submission failed");
            SubmitOutcome::Failed {
                message: FAILURE_MESSAGE,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/form.rs"]
mod tests;
