use super::draft::{Draft, DraftPatch, DraftStore};
use super::steps::{Step1Form, Step2Form, Step3Form};
use super::validator::{MissingField, Step, StepValidator, ValidationPolicy};
use crate::error::WizardError;
use tracing::debug;

/// Result of a successful forward move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Now on this step
    Moved(Step),
    /// Step 3 data merged; the draft can be submitted
    ReadyToSubmit,
}

/// Moves between the three wizard steps and merges each step's data into the draft
#[derive(Debug)]
pub struct StepSequencer {
    step: Step,
    store: DraftStore,
    validator: StepValidator,
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self::new(ValidationPolicy::default())
    }
}

impl StepSequencer {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            step: Step::One,
            store: DraftStore::new(),
            validator: StepValidator::new(policy),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        self.store.draft()
    }

    /// Whether the forward control is live for the draft as it stands
    pub fn can_advance(&self) -> bool {
        self.validator.allows(self.step, self.store.draft())
    }

    /// Fields the current step still needs
    pub fn missing(&self) -> Vec<MissingField> {
        self.validator.missing(self.step, self.store.draft())
    }

    /// Merge `patch` and move forward. On step 3 this only merges, see [`Self::complete_step3`].
    pub fn advance(&mut self, patch: DraftPatch) -> Result<Transition, WizardError> {
        let Some(next) = self.step.next() else {
            return self.complete_step3(patch);
        };

        self.merge_checked(patch)?;
        debug!("Advancing from {} to {}", self.step, next);
        self.step = next;
        Ok(Transition::Moved(next))
    }

    /// Merge the final step's data without submitting
    pub fn complete_step3(&mut self, patch: DraftPatch) -> Result<Transition, WizardError> {
        if self.step != Step::Three {
            return Err(WizardError::NotAtFinalStep(self.step));
        }

        self.merge_checked(patch)?;
        debug!("Final step complete, draft ready to submit");
        Ok(Transition::ReadyToSubmit)
    }

    /// Step back without touching the draft. No-op on step 1.
    pub fn retreat(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            debug!("Retreating from {} to {}", self.step, previous);
            self.step = previous;
        }
        self.step
    }

    /// Discard the draft and start over at step 1
    pub fn reset(&mut self) {
        self.store.reset();
        self.step = Step::One;
    }

    pub fn step1_form(&self) -> Step1Form {
        Step1Form::from_draft(self.draft())
    }

    pub fn step2_form(&self) -> Step2Form {
        Step2Form::from_draft(self.draft())
    }

    pub fn step3_form(&self) -> Step3Form {
        Step3Form::from_draft(self.draft())
    }

    // Rejected patches leave the draft untouched.
    fn merge_checked(&mut self, patch: DraftPatch) -> Result<(), WizardError> {
        let mut candidate = self.store.draft().clone();
        candidate.apply(patch.clone());

        let missing = self.validator.missing(self.step, &candidate);
        if !missing.is_empty() {
            return Err(WizardError::ValidationBlocked {
                step: self.step,
                missing,
            });
        }

        self.store.merge(patch);
        Ok(())
    }
}
