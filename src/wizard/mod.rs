pub mod draft;
pub mod sequencer;
pub mod session;
pub mod steps;
pub mod validator;

pub use draft::{Draft, DraftPatch, DraftStore};
pub use sequencer::{StepSequencer, Transition};
pub use session::{Outcome, WizardSession};
pub use steps::{Step1Form, Step2Form, Step3Form};
pub use validator::{MissingField, Step, StepValidator, ValidationPolicy};
