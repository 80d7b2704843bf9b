mod context;
mod error;
mod walker;

pub use context::ResolutionContext;
pub use error::{ResolveError, ResolveErrorKind};
pub use walker::{resolve, Walker};
