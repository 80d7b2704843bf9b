pub mod cache;
mod credential;
mod error;
mod fetcher;
mod gcp;
mod retrying;
mod value;

pub use cache::FetchCache;
pub use credential::{Credential, CredentialError, DEFAULT_TOKEN_ENV};
pub use error::{FetchError, FetchErrorKind};
pub use fetcher::{EnvFetcher, FileFetcher, SecretFetcher};
pub use gcp::{classify_status, GcpSecretManagerFetcher, DEFAULT_ENDPOINT};
pub use retrying::RetryingFetcher;
pub use value::SecretValue;
