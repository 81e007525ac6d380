//! Checksum sub-records attached to releases
//!
//! A checksum identifies the download artifact of a release by digest.
//! This module only transports digests between formats; computing or
//! verifying hashes is the consumer's business.

use std::fmt;
use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::debug;

use crate::context::Context;
use crate::error::Result;
use crate::kinds::ChecksumKind;

/// One checksum of a release artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    kind: ChecksumKind,
    value: String,
}

impl Checksum {
    /// Create a new checksum from a kind and hex digest
    pub fn new(kind: ChecksumKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// The checksum algorithm
    pub fn kind(&self) -> ChecksumKind {
        self.kind
    }

    /// The hex digest
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Load a checksum from a `<checksum>` XML element.
    ///
    /// The reader must be positioned just past the start tag; the
    /// element's content is consumed either way. Returns `Ok(None)`
    /// (logged, non-fatal) when the `type` attribute is missing or
    /// names an unknown algorithm, or when the digest text is empty.
    pub fn from_xml(
        ctx: &Context,
        start: &BytesStart<'_>,
        reader: &mut Reader<&[u8]>,
    ) -> Result<Option<Checksum>> {
        let mut kind = ChecksumKind::Unknown;
        for attr in start.attributes() {
            let attr = attr?;
            if attr.key.as_ref() == b"type" {
                kind = ChecksumKind::from_str(&attr.unescape_value()?);
            }
        }

        let raw = reader.read_text(start.name())?;
        if kind == ChecksumKind::Unknown {
            debug!("Skipping checksum with unknown type in {}", ctx.display_name());
            return Ok(None);
        }

        let value = quick_xml::escape::unescape(&raw)?.trim().to_string();
        if value.is_empty() {
            debug!("Skipping empty {} checksum in {}", kind.as_str(), ctx.display_name());
            return Ok(None);
        }

        Ok(Some(Checksum { kind, value }))
    }

    /// Serialize as a `<checksum>` element into the caller's writer
    pub fn to_xml<W: Write>(&self, _ctx: &Context, writer: &mut Writer<W>) -> Result<()> {
        let mut elem = BytesStart::new("checksum");
        elem.push_attribute(("type", self.kind.as_str()));
        writer.write_event(Event::Start(elem))?;
        writer.write_event(Event::Text(BytesText::new(&self.value)))?;
        writer.write_event(Event::End(BytesEnd::new("checksum")))?;
        Ok(())
    }

    /// Key/value pair for the binary cache's checksum sub-structure
    pub fn to_cache_parts(&self) -> (u32, String) {
        (self.kind as u32, self.value.clone())
    }

    /// Rebuild from a cache key/value pair.
    ///
    /// Returns `None` for unknown kind codes; the entry is dropped.
    pub fn from_cache_parts(code: u32, value: &str) -> Option<Checksum> {
        let kind = ChecksumKind::from_u32(code);
        if kind == ChecksumKind::Unknown {
            return None;
        }
        Some(Checksum {
            kind,
            value: value.to_string(),
        })
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.value)
    }
}
