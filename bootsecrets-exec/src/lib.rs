#![forbid(unsafe_code)]

//! Boot-time resolution of secret references in a configuration tree.
//!
//! Parsing and casting live in `bootsecrets-core`; this crate fetches,
//! deduplicates and substitutes.

pub mod bootstrap;
pub mod resolve;
pub mod retry;
pub mod secrets;

pub use crate::bootstrap::{Bootstrap, BootstrapConfig, Resolution, ResolutionReport};
pub use crate::resolve::{resolve, ResolutionContext, ResolveError, ResolveErrorKind, Walker};
