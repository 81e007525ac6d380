//! Error types for the release codecs

use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Codec errors
///
/// Field-level problems (malformed dates, unknown size types, failed
/// checksum sub-parses) are logged and skipped, never surfaced here.
/// These variants cover structural failures of the underlying readers
/// and writers only.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML escape error: {0}")]
    XmlEscape(#[from] quick_xml::escape::EscapeError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cache encode error: {0}")]
    CacheEncode(#[from] ciborium::ser::Error<std::io::Error>),

    #[error("Cache decode error: {0}")]
    CacheDecode(#[from] ciborium::de::Error<std::io::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
