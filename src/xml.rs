//! XML codec for release records
//!
//! The document-level parser owns the `quick_xml` reader and hands a
//! `<release>` start tag over to [`Release::from_xml`], which consumes
//! the element's subtree and builds a record. Serialization emits one
//! `<release>` element into a writer owned by the caller.
//!
//! Field-level problems are logged and skipped; a load only fails when
//! the underlying XML is structurally broken.

use std::collections::BTreeMap;
use std::io::Write;
use std::rc::Rc;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};
use tracing::debug;

use crate::checksum::Checksum;
use crate::context::{Context, FormatStyle};
use crate::error::Result;
use crate::iso8601::{format_iso8601, parse_iso8601};
use crate::kinds::{ReleaseKind, SizeKind, UrgencyKind};
use crate::release::Release;

/// Unescaped value of the named attribute, if present
fn attr_value(elem: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in elem.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Rebuild a child element's opening tag, extracting `xml:lang`.
///
/// Returns the locale (if the element carried one) and the opening tag
/// text without the language attribute and without the closing `>`.
fn rebuild_tag(elem: &BytesStart<'_>) -> Result<(Option<String>, String)> {
    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let mut locale = None;
    let mut open = format!("<{name}");
    for attr in elem.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"xml:lang" {
            locale = Some(attr.unescape_value()?.into_owned());
        } else {
            open.push(' ');
            open.push_str(&String::from_utf8_lossy(attr.key.as_ref()));
            open.push_str("=\"");
            open.push_str(&String::from_utf8_lossy(&attr.value));
            open.push('"');
        }
    }
    Ok((locale, open))
}

/// Parse a SingleDocument-style `<description>` element into one
/// markup blob per locale.
///
/// Each child element carries an optional `xml:lang` attribute;
/// untranslated children are grouped under the `"C"` key, translated
/// ones under their locale with the language attribute stripped. The
/// reader must be positioned just past the description start tag; the
/// subtree is consumed up to the matching end tag.
pub fn parse_localized_description(
    reader: &mut Reader<&[u8]>,
    end: QName<'_>,
) -> Result<BTreeMap<String, String>> {
    let mut blocks: BTreeMap<String, String> = BTreeMap::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let (locale, open) = rebuild_tag(&e)?;
                let name = e.name().as_ref().to_vec();
                let inner = reader.read_text(QName(&name))?;
                let buf = blocks.entry(locale.unwrap_or_else(|| "C".to_string())).or_default();
                buf.push_str(&open);
                buf.push('>');
                buf.push_str(inner.trim());
                buf.push_str("</");
                buf.push_str(&String::from_utf8_lossy(&name));
                buf.push('>');
            }
            Event::Empty(e) => {
                let (locale, open) = rebuild_tag(&e)?;
                let buf = blocks.entry(locale.unwrap_or_else(|| "C".to_string())).or_default();
                buf.push_str(&open);
                buf.push_str("/>");
            }
            Event::End(e) if e.name() == end => break,
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(blocks)
}

/// Write one localized markup fragment, tagging top-level elements
/// with `xml:lang` when a locale is given.
fn write_fragment<W: Write>(
    writer: &mut Writer<W>,
    markup: &str,
    lang: Option<&str>,
) -> Result<()> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);
    let mut depth = 0usize;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let mut e = e.into_owned();
                if depth == 0 {
                    if let Some(lang) = lang {
                        e.push_attribute(("xml:lang", lang));
                    }
                }
                writer.write_event(Event::Start(e))?;
                depth += 1;
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                writer.write_event(Event::End(e))?;
            }
            Event::Empty(e) => {
                let mut e = e.into_owned();
                if depth == 0 {
                    if let Some(lang) = lang {
                        e.push_attribute(("xml:lang", lang));
                    }
                }
                writer.write_event(Event::Empty(e))?;
            }
            Event::Text(t) => writer.write_event(Event::Text(t))?,
            Event::CData(t) => writer.write_event(Event::CData(t))?,
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(())
}

/// Emit the `<description>` block(s) for a set of localized texts.
///
/// Collection style writes one `<description>` element per locale,
/// the untranslated `"C"` entry without a language attribute.
/// SingleDocument style writes a single `<description>` whose
/// translated children carry `xml:lang` attributes.
pub fn emit_description_nodes<W: Write>(
    ctx: &Context,
    descriptions: &BTreeMap<String, String>,
    writer: &mut Writer<W>,
) -> Result<()> {
    if descriptions.is_empty() {
        return Ok(());
    }
    match ctx.style() {
        FormatStyle::Collection => {
            for (locale, markup) in descriptions {
                let mut elem = BytesStart::new("description");
                if locale != "C" {
                    elem.push_attribute(("xml:lang", locale.as_str()));
                }
                writer.write_event(Event::Start(elem))?;
                // stored markup is already escaped, pass it through as-is
                writer.write_event(Event::Text(BytesText::from_escaped(markup.as_str())))?;
                writer.write_event(Event::End(BytesEnd::new("description")))?;
            }
        }
        FormatStyle::SingleDocument => {
            writer.write_event(Event::Start(BytesStart::new("description")))?;
            if let Some(markup) = descriptions.get("C") {
                write_fragment(writer, markup, None)?;
            }
            for (locale, markup) in descriptions {
                if locale != "C" {
                    write_fragment(writer, markup, Some(locale))?;
                }
            }
            writer.write_event(Event::End(BytesEnd::new("description")))?;
        }
    }
    Ok(())
}

impl Release {
    /// Load a release from a `<release>` XML element.
    ///
    /// `start` is the element's start tag; `reader` must be positioned
    /// just past it and is consumed up to the matching end tag. The
    /// context is attached to the new record.
    pub fn from_xml(
        ctx: &Rc<Context>,
        start: &BytesStart<'_>,
        reader: &mut Reader<&[u8]>,
    ) -> Result<Release> {
        let mut release = Release::new();
        release.set_context(Rc::clone(ctx));

        // Attributes are collected once and applied in a fixed order,
        // so a `timestamp` attribute overrides a value set from `date`
        // no matter how the document orders them.
        let mut attrs: Vec<(Vec<u8>, String)> = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            attrs.push((attr.key.as_ref().to_vec(), attr.unescape_value()?.into_owned()));
        }
        let attr = |name: &[u8]| {
            attrs
                .iter()
                .find(|(key, _)| key.as_slice() == name)
                .map(|(_, value)| value.as_str())
        };

        if let Some(value) = attr(b"type") {
            release.set_kind(ReleaseKind::from_str(value));
        }
        if let Some(value) = attr(b"version") {
            release.set_version(Some(value));
        }
        if let Some(value) = attr(b"date") {
            match parse_iso8601(value) {
                Some(ts) if ts >= 0 => release.set_timestamp(ts as u64),
                _ => debug!(
                    "Invalid ISO-8601 date '{}' in releases of {}",
                    value,
                    ctx.display_name()
                ),
            }
        }
        if let Some(value) = attr(b"timestamp") {
            match value.trim().parse::<u64>() {
                Ok(ts) => release.set_timestamp(ts),
                Err(_) => {
                    debug!(
                        "Invalid release timestamp '{}' in {}",
                        value,
                        ctx.display_name()
                    );
                    release.set_timestamp(0);
                }
            }
        }
        if let Some(value) = attr(b"urgency") {
            release.set_urgency(UrgencyKind::from_str(value));
        }

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"location" => {
                        let raw = reader.read_text(e.name())?;
                        let url = quick_xml::escape::unescape(&raw)?;
                        release.add_location(url.trim().to_string());
                    }
                    b"checksum" => {
                        if let Some(checksum) = Checksum::from_xml(ctx, &e, reader)? {
                            release.add_checksum(checksum);
                        }
                    }
                    b"size" => {
                        let kind_attr = attr_value(&e, b"type")?;
                        let raw = reader.read_text(e.name())?;
                        let kind = SizeKind::from_str(kind_attr.as_deref().unwrap_or(""));
                        if kind == SizeKind::Unknown {
                            debug!(
                                "Ignoring size of unknown type '{}' in {}",
                                kind_attr.as_deref().unwrap_or(""),
                                ctx.display_name()
                            );
                        } else {
                            let value = quick_xml::escape::unescape(&raw)?
                                .trim()
                                .parse::<u64>()
                                .unwrap_or(0);
                            if value > 0 {
                                release.set_size(kind, value);
                            }
                        }
                    }
                    b"description" => match ctx.style() {
                        FormatStyle::Collection => {
                            // in collection documents the description tag
                            // itself carries the language property
                            let locale = attr_value(&e, b"xml:lang")?
                                .unwrap_or_else(|| "C".to_string());
                            let markup = reader.read_text(e.name())?.trim().to_string();
                            release.set_description(&markup, Some(&locale));
                        }
                        FormatStyle::SingleDocument => {
                            let blocks = parse_localized_description(reader, e.name())?;
                            for (locale, text) in blocks {
                                release.set_description(&text, Some(&locale));
                            }
                        }
                    },
                    _ => {
                        reader.read_to_end(e.name())?;
                    }
                },
                Event::End(e) if e.name() == start.name() => break,
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(release)
    }

    /// Serialize this release as a `<release>` element into the
    /// caller's writer.
    ///
    /// The `type` and `version` attributes are always written; an
    /// unset version becomes an empty attribute value so the element
    /// shape stays uniform across records.
    pub fn to_xml<W: Write>(&self, ctx: &Context, writer: &mut Writer<W>) -> Result<()> {
        let mut elem = BytesStart::new("release");
        elem.push_attribute(("type", self.kind().as_str()));
        elem.push_attribute(("version", self.version().unwrap_or("")));

        if self.timestamp() > 0 {
            match ctx.style() {
                FormatStyle::Collection => {
                    let ts = self.timestamp().to_string();
                    elem.push_attribute(("timestamp", ts.as_str()));
                }
                FormatStyle::SingleDocument => {
                    if let Some(date) = format_iso8601(self.timestamp()) {
                        elem.push_attribute(("date", date.as_str()));
                    }
                }
            }
        }
        if self.urgency() != UrgencyKind::Unknown {
            elem.push_attribute(("urgency", self.urgency().as_str()));
        }
        writer.write_event(Event::Start(elem))?;

        for location in self.locations() {
            writer.write_event(Event::Start(BytesStart::new("location")))?;
            writer.write_event(Event::Text(BytesText::new(location)))?;
            writer.write_event(Event::End(BytesEnd::new("location")))?;
        }

        for checksum in self.checksums() {
            checksum.to_xml(ctx, writer)?;
        }

        for kind in SizeKind::VARIANTS {
            if self.size(kind) > 0 {
                let mut size_elem = BytesStart::new("size");
                size_elem.push_attribute(("type", kind.as_str()));
                writer.write_event(Event::Start(size_elem))?;
                writer.write_event(Event::Text(BytesText::new(&self.size(kind).to_string())))?;
                writer.write_event(Event::End(BytesEnd::new("size")))?;
            }
        }

        emit_description_nodes(ctx, self.descriptions(), writer)?;

        writer.write_event(Event::End(BytesEnd::new("release")))?;
        Ok(())
    }
}
