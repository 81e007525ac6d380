//! Binary cache codec for release records
//!
//! The cache exists for fast reload of already-parsed catalogs without
//! retokenizing XML or YAML. Entries are CBOR maps with a fixed key
//! set; sub-structures are ordered maps so serialization is
//! deterministic and re-encoding a decoded entry is byte-identical.
//!
//! The format is deliberately lossy towards localization: only the
//! description text of the locale active at serialization time is
//! stored, and the target locale must be supplied again on reload
//! because it is not recoverable from the entry itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::checksum::Checksum;
use crate::error::Result;
use crate::kinds::{ReleaseKind, SizeKind, UrgencyKind};
use crate::release::Release;

/// Distinguish a key holding `null` from an absent key.
///
/// Plain `Option<Option<T>>` collapses both to `None` on deserialize;
/// wrapping the inner parse keeps the three states apart.
fn nullable_field<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// One release record in its on-disk cache shape.
///
/// `version` and `description` are tri-state: an absent key, a present
/// key holding `null`, and a present key holding text stay
/// distinguishable across a round-trip. `locations`, `checksums` and
/// `sizes` omit their key entirely when empty. Checksums are keyed by
/// their numeric kind code, so a duplicate kind overwrites the earlier
/// entry (last write wins) -- unlike the XML shape, which keeps both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CacheEntry {
    #[serde(default)]
    pub kind: u32,
    #[serde(
        default,
        deserialize_with = "nullable_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<Option<String>>,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub urgency: u32,
    #[serde(
        default,
        deserialize_with = "nullable_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksums: Option<BTreeMap<u32, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<BTreeMap<u32, u64>>,
}

impl CacheEntry {
    /// Encode this entry as CBOR bytes
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)?;
        Ok(buf)
    }

    /// Decode an entry from CBOR bytes
    pub fn from_slice(bytes: &[u8]) -> Result<CacheEntry> {
        Ok(ciborium::from_reader(bytes)?)
    }
}

impl Release {
    /// Serialize the current active state of this release for the
    /// on-disk cache.
    ///
    /// The multi-locale description mapping collapses to the single
    /// text resolved for the active locale.
    pub fn to_cache_entry(&self) -> CacheEntry {
        let checksums: BTreeMap<u32, String> = self
            .checksums()
            .iter()
            .map(Checksum::to_cache_parts)
            .collect();

        let sizes: BTreeMap<u32, u64> = SizeKind::VARIANTS
            .iter()
            .filter(|kind| self.size(**kind) > 0)
            .map(|kind| (*kind as u32, self.size(*kind)))
            .collect();

        CacheEntry {
            kind: self.kind() as u32,
            version: Some(self.version().map(str::to_string)),
            timestamp: self.timestamp(),
            urgency: self.urgency() as u32,
            description: Some(self.description().map(str::to_string)),
            locations: if self.locations().is_empty() {
                None
            } else {
                Some(self.locations().to_vec())
            },
            checksums: if checksums.is_empty() {
                None
            } else {
                Some(checksums)
            },
            sizes: if sizes.is_empty() { None } else { Some(sizes) },
        }
    }

    /// Rebuild a release from a cache entry.
    ///
    /// The target locale must be supplied by the caller; the stored
    /// description text becomes that locale's entry, whatever locale
    /// it was serialized under. Absent `kind`, `timestamp` and
    /// `urgency` keys fall back to zero/unknown.
    pub fn from_cache_entry(entry: &CacheEntry, locale: &str) -> Release {
        let mut release = Release::new();
        release.set_active_locale(locale);

        release.set_kind(ReleaseKind::from_u32(entry.kind));
        if let Some(version) = &entry.version {
            release.set_version(version.as_deref());
        }
        release.set_timestamp(entry.timestamp);
        release.set_urgency(UrgencyKind::from_u32(entry.urgency));
        if let Some(Some(text)) = &entry.description {
            release.set_description(text, None);
        }

        if let Some(locations) = &entry.locations {
            for url in locations {
                release.add_location(url.clone());
            }
        }
        if let Some(sizes) = &entry.sizes {
            for (code, size) in sizes {
                release.set_size(SizeKind::from_u32(*code), *size);
            }
        }
        if let Some(checksums) = &entry.checksums {
            for (code, value) in checksums {
                if let Some(checksum) = Checksum::from_cache_parts(*code, value) {
                    release.add_checksum(checksum);
                }
            }
        }

        release
    }
}
