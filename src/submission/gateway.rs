use super::builder::SubmissionPayload;
use super::credentials::CredentialProvider;
use crate::api::client::{error_message, ApiClient};
use crate::error::SubmissionError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Anything that can deliver a built payload to the create-property endpoint
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Send the payload once. No retries.
    async fn submit(&self, payload: SubmissionPayload) -> Result<serde_json::Value, SubmissionError>;
}

/// Authenticated `POST /properties` with a single-flight guard
pub struct SubmissionGateway {
    api: ApiClient,
    credentials: Arc<dyn CredentialProvider>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the request finishes, however it finishes
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SubmissionGateway {
    pub fn new(api: ApiClient, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            api,
            credentials,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

#[async_trait]
impl SubmissionTransport for SubmissionGateway {
    async fn submit(&self, payload: SubmissionPayload) -> Result<serde_json::Value, SubmissionError> {
        let token = self
            .credentials
            .bearer_token()
            .ok_or(SubmissionError::Unauthenticated)?;

        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            warn!("Rejected submission, another one is still in flight");
            SubmissionError::InFlight
        })?;

        let image_count = payload.images().len();
        let form = payload.into_form()?;
        let url = self.api.url("/properties");

        info!("Submitting property with {} image(s)", image_count);
        debug!("POST {}", url);

        let response = self
            .api
            .http()
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            warn!("Property upload failed with status {}", status);
            return Err(SubmissionError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<serde_json::Value>().await?;
        info!("✅ Property sent for verification");
        Ok(body)
    }
}
