pub mod builder;
pub mod credentials;
pub mod gateway;

pub use builder::{SubmissionBuilder, SubmissionPayload, IMAGE_FIELD, LOCATION_FIELD};
pub use credentials::{CredentialProvider, FileTokenStore, StaticCredentials};
pub use gateway::{SubmissionGateway, SubmissionTransport};
