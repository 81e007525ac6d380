//! Release records
//!
//! A `Release` is one versioned changelog entry of a software
//! component: a version number, a timestamp, localized description
//! markup, download locations, checksums and sizes. Records are built
//! in one pass by a codec load routine and treated as read-mostly
//! afterwards; all mutation goes through the accessors here, which
//! enforce the record's invariants.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::checksum::Checksum;
use crate::context::Context;
use crate::kinds::{ChecksumKind, ReleaseKind, SizeKind, UrgencyKind};
use crate::vercmp::compare_versions;

/// A single upstream release of a software component
#[derive(Debug, Clone, Default)]
pub struct Release {
    kind: ReleaseKind,
    version: Option<String>,
    description: BTreeMap<String, String>,
    timestamp: u64,
    urgency: UrgencyKind,
    locations: Vec<String>,
    checksums: Vec<Checksum>,
    sizes: [u64; SizeKind::COUNT],
    context: Option<Rc<Context>>,
    active_locale_override: Option<String>,
}

impl Release {
    /// Create a new, empty release record
    pub fn new() -> Self {
        Self::default()
    }

    /// The type of the release (stable or development)
    pub fn kind(&self) -> ReleaseKind {
        self.kind
    }

    /// Set the release type
    pub fn set_kind(&mut self, kind: ReleaseKind) {
        self.kind = kind;
    }

    /// The release version string, if set
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Set or clear the release version
    pub fn set_version(&mut self, version: Option<&str>) {
        self.version = version.map(str::to_string);
    }

    /// Compare the version numbers of two releases.
    ///
    /// Both versions are forwarded to the comparator unchanged; one or
    /// both being unset is handled there.
    pub fn vercmp(&self, other: &Release) -> Ordering {
        compare_versions(self.version(), other.version())
    }

    /// The release timestamp as unix time, 0 for unset
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Set the release timestamp
    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    /// The urgency of installing this release
    pub fn urgency(&self) -> UrgencyKind {
        self.urgency
    }

    /// Set the release urgency
    pub fn set_urgency(&mut self, urgency: UrgencyKind) {
        self.urgency = urgency;
    }

    /// The stored size of the given kind, 0 for unset
    pub fn size(&self, kind: SizeKind) -> u64 {
        self.sizes[kind as usize]
    }

    /// Set the release size for the given kind.
    ///
    /// Writing to the `Unknown` sentinel is a caller contract
    /// violation and is silently ignored.
    pub fn set_size(&mut self, kind: SizeKind, size: u64) {
        if kind == SizeKind::Unknown {
            return;
        }
        self.sizes[kind as usize] = size;
    }

    /// The description markup for the active locale.
    ///
    /// Falls back to the untranslated `"C"` entry when the active
    /// locale has no text; `None` when neither exists.
    pub fn description(&self) -> Option<&str> {
        self.description
            .get(self.active_locale())
            .or_else(|| self.description.get("C"))
            .map(String::as_str)
    }

    /// All stored description blocks, keyed by locale
    pub fn descriptions(&self) -> &BTreeMap<String, String> {
        &self.description
    }

    /// Set the description markup for a locale.
    ///
    /// With `locale` of `None` the text is stored under the currently
    /// active locale, not under a fixed default.
    pub fn set_description(&mut self, description: &str, locale: Option<&str>) {
        let locale = locale
            .map(str::to_string)
            .unwrap_or_else(|| self.active_locale().to_string());
        self.description.insert(locale, description.to_string());
    }

    /// The locale used to resolve localized texts.
    ///
    /// Resolution order: the per-record override if set, then the
    /// attached context's locale, then the literal `"C"`.
    pub fn active_locale(&self) -> &str {
        if self.active_locale_override.is_none() {
            if let Some(ctx) = &self.context {
                return ctx.locale();
            }
        }
        self.active_locale_override.as_deref().unwrap_or("C")
    }

    /// Override the active locale for this record only
    pub fn set_active_locale(&mut self, locale: impl Into<String>) {
        self.active_locale_override = Some(locale.into());
    }

    /// The download locations, in insertion order
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Append a download location URL
    pub fn add_location(&mut self, location: impl Into<String>) {
        self.locations.push(location.into());
    }

    /// All stored checksums, in insertion order
    pub fn checksums(&self) -> &[Checksum] {
        &self.checksums
    }

    /// The first stored checksum of the given kind, if any
    pub fn checksum(&self, kind: ChecksumKind) -> Option<&Checksum> {
        self.checksums.iter().find(|cs| cs.kind() == kind)
    }

    /// Append a checksum; duplicates by kind are not rejected
    pub fn add_checksum(&mut self, checksum: Checksum) {
        self.checksums.push(checksum);
    }

    /// The document context this release is associated with
    pub fn context(&self) -> Option<&Rc<Context>> {
        self.context.as_ref()
    }

    /// Attach the document context this release belongs to.
    ///
    /// The previous context reference is replaced wholesale, and the
    /// per-record locale override is cleared so the new context takes
    /// effect.
    pub fn set_context(&mut self, context: Rc<Context>) {
        self.context = Some(context);
        self.active_locale_override = None;
    }
}
