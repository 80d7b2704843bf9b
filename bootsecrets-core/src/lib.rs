#![forbid(unsafe_code)]

//! Configuration tree model, secret reference recognition and type casting.
//!
//! Everything here is synchronous and side-effect free; fetching lives in `bootsecrets-exec`.

pub mod cast;
pub mod error;
pub mod node;
pub mod parser;
pub mod path;
pub mod reference;
pub mod scan;

pub use crate::cast::cast;
pub use crate::error::{CastError, MalformedReference, ParseError};
pub use crate::node::ConfigNode;
pub use crate::parser::{
    parse_config_str, to_json_value, to_yaml_value, ConfigFormat, ParsedConfig,
};
pub use crate::path::{NodePath, PathSegment};
pub use crate::reference::{
    is_reference, recognize, FetchKey, SecretReference, TypeTag, Version, LATEST, MARKER,
};
pub use crate::scan::{scan_references, ScanError, ScanReport, ScannedReference};
