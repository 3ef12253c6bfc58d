//! Filename-based format detection.
//!
//! Pure string inspection: the name is never resolved against the file
//! system.

use crate::format::Format;

/// Lower-case file extensions (no dot) and the format each one implies.
///
/// `txt` is deliberately absent: only names containing `requirements` map a
/// `.txt` file to [`Format::Requirements`].
pub const EXTENSION_TABLE: &[(&str, Format)] = &[
    ("json", Format::Json),
    ("yaml", Format::Yaml),
    ("yml", Format::Yaml),
    ("xml", Format::Xml),
    ("toml", Format::Toml),
    ("csv", Format::Csv),
    ("graphql", Format::Graphql),
    ("gql", Format::Graphql),
    ("ini", Format::Ini),
    ("cfg", Format::Ini),
    ("conf", Format::Ini),
    ("hcl", Format::Hcl),
    ("tf", Format::Hcl),
    ("tfvars", Format::Hcl),
    ("pb", Format::Protobuf),
    ("proto", Format::Protobuf),
    ("textproto", Format::Protobuf),
    ("pbtxt", Format::Protobuf),
    ("md", Format::Markdown),
    ("markdown", Format::Markdown),
    ("mkd", Format::Markdown),
    ("mdwn", Format::Markdown),
    ("mdown", Format::Markdown),
    ("mdtxt", Format::Markdown),
    ("mdtext", Format::Markdown),
    ("jsonl", Format::Jsonl),
    ("ndjson", Format::Jsonl),
    ("jsonlines", Format::Jsonl),
    ("ipynb", Format::Jupyter),
    ("dockerfile", Format::Dockerfile),
    ("containerfile", Format::Dockerfile),
];

fn lookup_extension(extension: &str) -> Format {
    EXTENSION_TABLE
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map_or(Format::Unknown, |&(_, format)| format)
}

/// Last path segment, accepting both `/` and `\` separators.
fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

fn is_dockerfile_name(base: &str) -> bool {
    base == "dockerfile" || base.starts_with("dockerfile.")
}

/// Detect the format implied by a file name.
///
/// Extension-less Dockerfiles and variants such as `Dockerfile.prod` are
/// recognised by name; `*.txt` files are requirements lists only when the
/// name mentions `requirements`. Everything else goes through
/// [`EXTENSION_TABLE`], case-insensitively.
///
/// # Examples
///
/// ```
/// use serdeval_core::{Format, detect_format_from_filename};
///
/// assert_eq!(detect_format_from_filename("Dockerfile.prod"), Format::Dockerfile);
/// assert_eq!(detect_format_from_filename("requirements-dev.txt"), Format::Requirements);
/// assert_eq!(detect_format_from_filename("config/app.YML"), Format::Yaml);
/// assert_eq!(detect_format_from_filename("x.unknownext"), Format::Unknown);
/// ```
pub fn detect_format_from_filename(name: &str) -> Format {
    let base = base_name(name).to_lowercase();
    if is_dockerfile_name(&base) {
        return Format::Dockerfile;
    }

    let Some((_, extension)) = base.rsplit_once('.') else {
        return Format::Unknown;
    };

    if extension == "txt" {
        return if name.to_lowercase().contains("requirements") {
            Format::Requirements
        } else {
            Format::Unknown
        };
    }

    lookup_extension(extension)
}
