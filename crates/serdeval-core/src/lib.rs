//! # serdeval-core
//!
//! Syntax validation for structured text formats.
//!
//! Validates:
//! - JSON, JSON Lines and Jupyter notebooks
//! - YAML, TOML, INI and HCL configuration
//! - XML, Markdown and CSV documents
//! - GraphQL queries and schemas
//! - Protocol Buffers text format
//! - pip requirements files and Dockerfiles
//!
//! Formats can be requested explicitly, taken from a file name, or sniffed
//! from content. Parse failures are data, not errors: every validation call
//! returns a [`ValidationOutcome`].
//!
//! ```
//! use serdeval_core::{Format, detect_format, new_validator, validate_auto};
//!
//! assert_eq!(detect_format(br#"{"name": "test"}"#), Format::Json);
//!
//! let validator = new_validator(Format::Toml).unwrap();
//! assert!(validator.validate_str("name = \"test\"").valid);
//!
//! let outcome = validate_auto(b"<root><unclosed></root>");
//! assert_eq!(outcome.format, Format::Xml);
//! assert!(!outcome.valid);
//! ```

pub mod config;
pub mod detect;
pub mod error;
pub mod format;
pub mod outcome;
pub mod registry;
mod validators;

pub use config::{Config, ConfigBuilder, generate_schema};
pub use detect::{EXTENSION_TABLE, detect_format, detect_format_from_filename};
pub use error::{ConfigError, ValidatorError};
pub use format::Format;
pub use outcome::{UNDETECTED_MESSAGE, ValidationOutcome};
pub use registry::{
    ParseCheck, Validator, ValidatorRegistry, ValidatorRegistryBuilder, default_registry,
    new_validator, validate_auto, validate_named,
};
