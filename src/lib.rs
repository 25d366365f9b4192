pub mod api;
pub mod config;
pub mod error;
pub mod manifest;
pub mod models;
pub mod submission;
pub mod wizard;

pub use config::Config;
pub use error::{SubmissionError, WizardError};
