//! YAML codec for release records
//!
//! The compact catalog format covers fewer fields than the XML one:
//! locations are write-only, checksums and sizes are not represented
//! at all. Unknown mapping keys are tolerated so newer catalogs keep
//! loading on older code.

use std::rc::Rc;

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::context::{Context, FormatStyle};
use crate::error::Result;
use crate::iso8601::{format_iso8601, parse_iso8601};
use crate::kinds::{ReleaseKind, UrgencyKind};
use crate::release::Release;

/// Look up a string-keyed entry of a YAML mapping
fn mapping_lookup<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    mapping
        .iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

/// Resolve a possibly locale-keyed YAML value to the text for `locale`.
///
/// Catalog values are either a plain scalar or a mapping from locale
/// tags to translated texts; the mapping form falls back to the
/// untranslated `"C"` entry.
pub fn localized_yaml_value(value: &Value, locale: &str) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Mapping(m) => mapping_lookup(m, locale)
            .or_else(|| mapping_lookup(m, "C"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Read an unsigned integer that may be written as a scalar or string
fn yaml_u64(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

impl Release {
    /// Load a release from a YAML mapping.
    ///
    /// The caller's document parser owns the YAML tree and hands over
    /// one mapping per release. Unrecognized keys are logged and
    /// skipped; the format is forward-compatible by design.
    pub fn from_yaml(ctx: &Rc<Context>, node: &Mapping) -> Result<Release> {
        let mut release = Release::new();
        release.set_context(Rc::clone(ctx));

        for (key, value) in node {
            let Some(key) = key.as_str() else {
                debug!("Ignoring non-string release key in {}", ctx.display_name());
                continue;
            };
            match key {
                "unix-timestamp" => {
                    release.set_timestamp(yaml_u64(value).unwrap_or(0));
                }
                "date" => {
                    let raw = value.as_str().unwrap_or("");
                    match parse_iso8601(raw) {
                        Some(ts) if ts >= 0 => release.set_timestamp(ts as u64),
                        _ => debug!(
                            "Invalid ISO-8601 date '{}' in {}",
                            raw,
                            ctx.display_name()
                        ),
                    }
                }
                "type" => {
                    release.set_kind(ReleaseKind::from_str(value.as_str().unwrap_or("")));
                }
                "version" => {
                    release.set_version(value.as_str());
                }
                "urgency" => {
                    release.set_urgency(UrgencyKind::from_str(value.as_str().unwrap_or("")));
                }
                "description" => {
                    let locale = release.active_locale().to_string();
                    if let Some(text) = localized_yaml_value(value, &locale) {
                        release.set_description(&text, None);
                    }
                }
                other => {
                    debug!("Unknown key 'release/{}' in {}", other, ctx.display_name());
                }
            }
        }

        Ok(release)
    }

    /// Serialize this release as a YAML mapping.
    ///
    /// The caller appends the mapping to its releases sequence.
    /// Checksums and sizes are intentionally never emitted; the format
    /// does not carry them.
    pub fn to_yaml(&self, ctx: &Context) -> Mapping {
        let mut node = Mapping::new();

        if let Some(version) = self.version() {
            node.insert("version".into(), version.into());
        }
        node.insert("type".into(), self.kind().as_str().into());

        if self.timestamp() > 0 {
            match ctx.style() {
                FormatStyle::Collection => {
                    node.insert("unix-timestamp".into(), self.timestamp().into());
                }
                FormatStyle::SingleDocument => {
                    if let Some(date) = format_iso8601(self.timestamp()) {
                        node.insert("date".into(), date.into());
                    }
                }
            }
        }

        if self.urgency() != UrgencyKind::Unknown {
            node.insert("urgency".into(), self.urgency().as_str().into());
        }

        if !self.descriptions().is_empty() {
            let mut localized = Mapping::new();
            for (locale, text) in self.descriptions() {
                localized.insert(locale.as_str().into(), text.as_str().into());
            }
            node.insert("description".into(), Value::Mapping(localized));
        }

        if !self.locations().is_empty() {
            let locations: Vec<Value> = self
                .locations()
                .iter()
                .map(|url| url.as_str().into())
                .collect();
            node.insert("locations".into(), Value::Sequence(locations));
        }

        node
    }
}
