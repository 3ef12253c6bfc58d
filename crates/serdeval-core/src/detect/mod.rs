//! Format detection for validator dispatch.
//!
//! This module provides:
//!
//! - [`detect_format`] -- content sniffing over an untyped byte buffer
//! - [`detect_format_from_filename`] -- extension/name lookup, no I/O
//! - [`EXTENSION_TABLE`] -- the static extension to [`Format`] mapping
//!
//! Both detectors are pure functions: identical input always yields the same
//! [`Format`], and neither touches the file system.
//!
//! [`Format`]: crate::Format

mod content;
mod filename;

pub use content::detect_format;
pub use filename::{EXTENSION_TABLE, detect_format_from_filename};
