use super::draft::{Draft, DraftPatch};
use super::sequencer::{StepSequencer, Transition};
use super::validator::{Step, ValidationPolicy};
use crate::error::WizardError;
use crate::submission::{SubmissionBuilder, SubmissionTransport};
use tracing::{info, warn};

pub const SUBMITTED_MESSAGE: &str = "Your property has been sent for verification!";

/// What the caller should do after a forward action
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Show this step next
    Moved(Step),
    /// Property created; the draft is gone and the caller moves to the listing view
    Submitted(serde_json::Value),
}

/// One upload-wizard session: the step sequencer plus the way out to the server
pub struct WizardSession<T> {
    sequencer: StepSequencer,
    transport: T,
}

impl<T: SubmissionTransport> WizardSession<T> {
    pub fn new(transport: T, policy: ValidationPolicy) -> Self {
        Self {
            sequencer: StepSequencer::new(policy),
            transport,
        }
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    pub fn step(&self) -> Step {
        self.sequencer.step()
    }

    pub fn draft(&self) -> &Draft {
        self.sequencer.draft()
    }

    pub fn can_advance(&self) -> bool {
        self.sequencer.can_advance()
    }

    pub fn retreat(&mut self) -> Step {
        self.sequencer.retreat()
    }

    /// The "Next" button: advance on steps 1 and 2, merge and submit on step 3
    pub async fn next(&mut self, patch: DraftPatch) -> Result<Outcome, WizardError> {
        match self.sequencer.advance(patch)? {
            Transition::Moved(step) => Ok(Outcome::Moved(step)),
            Transition::ReadyToSubmit => self.submit().await,
        }
    }

    /// Build and send the draft. The draft survives a failure so the user can retry.
    pub async fn submit(&mut self) -> Result<Outcome, WizardError> {
        let step = self.sequencer.step();
        if step != Step::Three {
            return Err(WizardError::NotAtFinalStep(step));
        }

        let missing = self.sequencer.missing();
        if !missing.is_empty() {
            return Err(WizardError::ValidationBlocked { step, missing });
        }

        let payload = SubmissionBuilder::build(self.sequencer.draft())?;

        match self.transport.submit(payload).await {
            Ok(body) => {
                info!("{}", SUBMITTED_MESSAGE);
                self.sequencer.reset();
                Ok(Outcome::Submitted(body))
            }
            Err(e) => {
                warn!("Submission failed: {}", e.user_message());
                Err(e.into())
            }
        }
    }

    /// Leave the wizard without submitting
    pub fn discard(&mut self) {
        self.sequencer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmissionError;
    use crate::models::{ImageAttachment, ListingType};
    use crate::submission::SubmissionPayload;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeTransport {
        fail_with: Mutex<Option<SubmissionError>>,
        sent: Mutex<Vec<SubmissionPayload>>,
    }

    impl FakeTransport {
        fn failing(err: SubmissionError) -> Self {
            Self {
                fail_with: Mutex::new(Some(err)),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl SubmissionTransport for FakeTransport {
        async fn submit(
            &self,
            payload: SubmissionPayload,
        ) -> Result<serde_json::Value, SubmissionError> {
            self.sent.lock().unwrap().push(payload);
            match self.fail_with.lock().unwrap().take() {
                Some(err) => Err(err),
                None => Ok(serde_json::json!({ "_id": "new-property" })),
            }
        }
    }

    fn step3_patch() -> DraftPatch {
        DraftPatch {
            square_feet: Some(850),
            price: Some(15000.0),
            description: Some("Bright 2BHK".to_string()),
            listing_type: Some(ListingType::Rental),
            ..Default::default()
        }
    }

    async fn walk_to_step3<T: SubmissionTransport>(session: &mut WizardSession<T>) {
        session.next(DraftPatch::default()).await.unwrap();
        session
            .next(DraftPatch {
                images: Some(vec![ImageAttachment::new("a.jpg", vec![1, 2, 3])]),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn next_on_final_step_submits_and_resets() {
        let mut session = WizardSession::new(FakeTransport::default(), ValidationPolicy::Lenient);
        walk_to_step3(&mut session).await;

        let outcome = session.next(step3_patch()).await.unwrap();
        assert!(matches!(outcome, Outcome::Submitted(_)));
        assert!(session.draft().is_empty());
        assert_eq!(session.step(), Step::One);

        let sent = session.transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].field("squareFeet"), Some("850"));
        assert_eq!(sent[0].images().len(), 1);
    }

    #[tokio::test]
    async fn failed_submit_keeps_draft_for_retry() {
        let transport = FakeTransport::failing(SubmissionError::Server {
            status: 500,
            message: None,
        });
        let mut session = WizardSession::new(transport, ValidationPolicy::Lenient);
        walk_to_step3(&mut session).await;

        let err = session.next(step3_patch()).await.unwrap_err();
        assert!(matches!(err, WizardError::Submission(SubmissionError::Server { status: 500, .. })));
        assert_eq!(session.step(), Step::Three);
        assert_eq!(session.draft().price, 15000.0);
        assert_eq!(session.draft().images.len(), 1);

        let outcome = session.submit().await.unwrap();
        assert!(matches!(outcome, Outcome::Submitted(_)));
        assert_eq!(session.transport.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn blocked_final_step_never_reaches_transport() {
        let mut session = WizardSession::new(FakeTransport::default(), ValidationPolicy::Lenient);
        walk_to_step3(&mut session).await;

        let err = session
            .next(DraftPatch {
                square_feet: Some(0),
                ..step3_patch()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::ValidationBlocked { .. }));
        assert!(session.transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_before_final_step_is_rejected() {
        let mut session = WizardSession::new(FakeTransport::default(), ValidationPolicy::Lenient);
        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, WizardError::NotAtFinalStep(Step::One)));
    }

    #[tokio::test]
    async fn discard_drops_collected_data() {
        let mut session = WizardSession::new(FakeTransport::default(), ValidationPolicy::Lenient);
        walk_to_step3(&mut session).await;
        session.discard();
        assert!(session.draft().is_empty());
        assert_eq!(session.step(), Step::One);
    }
}
