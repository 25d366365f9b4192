use crate::wizard::{MissingField, Step};
use thiserror::Error;

/// Shown when the server gives no reason of its own
pub const GENERIC_UPLOAD_FAILURE: &str = "There was an error uploading your property.";

/// Why a submission attempt did not create a property
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("User not authenticated")]
    Unauthenticated,

    #[error("A submission is already in progress")]
    InFlight,

    #[error("Server rejected the property ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to encode submission: {0}")]
    Encode(String),
}

impl SubmissionError {
    /// Text suitable for an alert. Server-provided messages are passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Unauthenticated => "User not authenticated".to_string(),
            SubmissionError::InFlight => "Your property is already being submitted.".to_string(),
            SubmissionError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_UPLOAD_FAILURE.to_string(),
        }
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        SubmissionError::Encode(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("{step} cannot advance, missing: {}", join_fields(.missing))]
    ValidationBlocked {
        step: Step,
        missing: Vec<MissingField>,
    },

    #[error("{0} is not the final step")]
    NotAtFinalStep(Step),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

fn join_fields(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_used_verbatim() {
        let err = SubmissionError::Server {
            status: 400,
            message: Some("Address is required".to_string()),
        };
        assert_eq!(err.user_message(), "Address is required");
    }

    #[test]
    fn missing_server_message_falls_back_to_generic() {
        let err = SubmissionError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_UPLOAD_FAILURE);
        assert_eq!(err.to_string(), "Server rejected the property (500): no message");
    }

    #[test]
    fn validation_error_lists_fields() {
        let err = WizardError::ValidationBlocked {
            step: Step::Three,
            missing: vec![MissingField::SquareFeet, MissingField::Price],
        };
        assert_eq!(
            err.to_string(),
            "step 3 cannot advance, missing: squareFeet, price"
        );
    }
}
