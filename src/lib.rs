//! Release Codec
//!
//! Models a single upstream release (one versioned changelog entry of
//! a software component) and transcodes it across three catalog
//! representations: a verbose XML document format, a compact YAML
//! catalog format, and a CBOR binary cache for fast reload.
//!
//! ## Features
//!
//! - **One in-memory model**: a [`Release`] record with localized
//!   descriptions, locations, checksums and sizes
//! - **Locale fallback**: per-record overrides, shared document
//!   context, untranslated `"C"` fallback
//! - **Per-format coverage**: XML carries everything; YAML drops
//!   checksums and sizes; the cache collapses descriptions to the
//!   active locale -- asymmetries the formats guarantee, not bugs
//! - **Tolerant loading**: malformed fields are logged and skipped,
//!   a load only fails on structurally broken input
//!
//! ## Format capabilities
//!
//! ```text
//! field        XML        YAML        cache
//! type         rw         rw          rw
//! version      rw         rw          rw
//! timestamp    rw         rw          rw
//! urgency      rw         rw          rw
//! description  rw (all)   rw (all)    rw (active locale only)
//! locations    rw         w           rw
//! checksums    rw         --          rw (keyed, last wins)
//! sizes        rw         --          rw
//! ```

pub mod cache;
pub mod checksum;
pub mod context;
pub mod error;
mod iso8601;
pub mod kinds;
pub mod release;
pub mod vercmp;
pub mod xml;
pub mod yaml;

pub use cache::CacheEntry;
pub use checksum::Checksum;
pub use context::{Context, FormatStyle};
pub use error::{CodecError, Result};
pub use kinds::{ChecksumKind, ReleaseKind, SizeKind, UrgencyKind};
pub use release::Release;
pub use vercmp::compare_versions;
