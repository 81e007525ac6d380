//! Cross-format round-trip tests
//!
//! Exercises the per-format capability subsets end to end: XML keeps
//! everything, YAML drops checksums and sizes, the binary cache
//! collapses descriptions to one locale and re-encodes byte-for-byte.

use std::rc::Rc;

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

use release_codec::{
    CacheEntry, Checksum, ChecksumKind, Context, FormatStyle, Release, ReleaseKind, SizeKind,
    UrgencyKind,
};

fn load_xml(ctx: &Rc<Context>, xml: &str) -> Release {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"release" => {
                return Release::from_xml(ctx, &e, &mut reader).unwrap();
            }
            Event::Eof => panic!("no release element in input"),
            _ => {}
        }
    }
}

fn save_xml(ctx: &Context, release: &Release) -> String {
    let mut writer = Writer::new(Vec::new());
    release.to_xml(ctx, &mut writer).unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

// =============================================================================
// XML
// =============================================================================

#[test]
fn test_xml_roundtrip_preserves_all_fields() {
    let ctx = Context::new(FormatStyle::Collection).shared();

    let mut rel = Release::new();
    rel.set_kind(ReleaseKind::Development);
    rel.set_version(Some("1.2"));
    rel.set_timestamp(1000);
    rel.set_size(SizeKind::Download, 2048);

    let xml = save_xml(&ctx, &rel);
    let reloaded = load_xml(&ctx, &xml);

    assert_eq!(reloaded.kind(), ReleaseKind::Development);
    assert_eq!(reloaded.version(), Some("1.2"));
    assert_eq!(reloaded.timestamp(), 1000);
    assert_eq!(reloaded.size(SizeKind::Download), 2048);
    assert_eq!(reloaded.size(SizeKind::Installed), 0);
}

#[test]
fn test_xml_roundtrip_locations_and_checksums() {
    let ctx = Context::new(FormatStyle::Collection).shared();

    let mut rel = Release::new();
    rel.set_version(Some("2.0"));
    rel.add_location("https://example.org/a.tar.xz");
    rel.add_location("https://mirror.example.org/a.tar.xz");
    rel.add_checksum(Checksum::new(ChecksumKind::Sha256, "deadbeef"));
    rel.add_checksum(Checksum::new(ChecksumKind::Sha1, "cafe"));

    let reloaded = load_xml(&ctx, &save_xml(&ctx, &rel));
    assert_eq!(reloaded.locations(), rel.locations());
    assert_eq!(reloaded.checksums(), rel.checksums());
}

#[test]
fn test_xml_timestamp_precedence_over_date() {
    let ctx = Context::new(FormatStyle::Collection).shared();
    let rel = load_xml(
        &ctx,
        r#"<release version="1.0" date="2020-01-01" timestamp="500"></release>"#,
    );
    assert_eq!(rel.timestamp(), 500);
}

#[test]
fn test_xml_description_roundtrip_both_styles() {
    for style in [FormatStyle::Collection, FormatStyle::SingleDocument] {
        let ctx = Context::new(style).shared();
        let mut rel = Release::new();
        rel.set_version(Some("1.0"));
        rel.set_description("<p>Fixed a thing.</p>", Some("C"));
        rel.set_description("<p>Etwas repariert.</p>", Some("de"));

        let reloaded = load_xml(&ctx, &save_xml(&ctx, &rel));
        assert_eq!(reloaded.descriptions(), rel.descriptions(), "style {style:?}");
    }
}

// =============================================================================
// YAML
// =============================================================================

#[test]
fn test_yaml_load_basic_mapping() {
    let ctx = Context::new(FormatStyle::Collection).shared();
    let node: serde_yaml::Mapping =
        serde_yaml::from_str("version: \"1.0\"\ntype: stable\nunix-timestamp: 500\n").unwrap();
    let rel = Release::from_yaml(&ctx, &node).unwrap();

    assert_eq!(rel.kind(), ReleaseKind::Stable);
    assert_eq!(rel.version(), Some("1.0"));
    assert_eq!(rel.timestamp(), 500);
    assert_eq!(rel.urgency(), UrgencyKind::Unknown);
    assert!(rel.locations().is_empty());
    assert!(rel.checksums().is_empty());
    assert_eq!(rel.size(SizeKind::Download), 0);
}

#[test]
fn test_yaml_never_carries_checksums_or_sizes() {
    let ctx = Context::new(FormatStyle::Collection).shared();

    let mut rel = Release::new();
    rel.set_version(Some("1.0"));
    rel.add_checksum(Checksum::new(ChecksumKind::Sha256, "deadbeef"));
    rel.set_size(SizeKind::Download, 2048);

    let node = rel.to_yaml(&ctx);
    let reloaded = Release::from_yaml(&ctx, &node).unwrap();
    assert!(reloaded.checksums().is_empty());
    assert_eq!(reloaded.size(SizeKind::Download), 0);
}

#[test]
fn test_yaml_roundtrip_readable_fields() {
    let ctx = Context::new(FormatStyle::Collection).shared();

    let mut rel = Release::new();
    rel.set_kind(ReleaseKind::Development);
    rel.set_version(Some("3.1"));
    rel.set_timestamp(1000);
    rel.set_urgency(UrgencyKind::Medium);
    rel.set_description("<p>Fixed.</p>", Some("C"));

    let node = rel.to_yaml(&ctx);
    let reloaded = Release::from_yaml(&ctx, &node).unwrap();
    assert_eq!(reloaded.kind(), ReleaseKind::Development);
    assert_eq!(reloaded.version(), Some("3.1"));
    assert_eq!(reloaded.timestamp(), 1000);
    assert_eq!(reloaded.urgency(), UrgencyKind::Medium);
    assert_eq!(reloaded.description(), Some("<p>Fixed.</p>"));
}

// =============================================================================
// Binary cache
// =============================================================================

#[test]
fn test_cache_locale_collapse() {
    let mut rel = Release::new();
    rel.set_active_locale("de");
    rel.set_description("Text", Some("de"));

    let entry = rel.to_cache_entry();
    assert_eq!(entry.description, Some(Some("Text".to_string())));

    let reloaded = Release::from_cache_entry(&entry, "de");
    assert_eq!(reloaded.description(), Some("Text"));

    // the cache is lossy to multi-locale data: any reload locale gets
    // the stored text verbatim
    let reloaded = Release::from_cache_entry(&entry, "fr");
    assert_eq!(reloaded.description(), Some("Text"));
}

#[test]
fn test_cache_byte_idempotence() {
    let mut rel = Release::new();
    rel.set_kind(ReleaseKind::Development);
    rel.set_version(Some("1.2"));
    rel.set_timestamp(1000);
    rel.set_urgency(UrgencyKind::High);
    rel.set_active_locale("de");
    rel.set_description("<p>Repariert.</p>", Some("de"));
    rel.add_location("https://example.org/a.tar.xz");
    rel.add_checksum(Checksum::new(ChecksumKind::Sha256, "deadbeef"));
    rel.set_size(SizeKind::Download, 2048);
    rel.set_size(SizeKind::Installed, 4096);

    let bytes = rel.to_cache_entry().to_vec().unwrap();
    let reloaded = Release::from_cache_entry(&CacheEntry::from_slice(&bytes).unwrap(), "de");
    let bytes_again = reloaded.to_cache_entry().to_vec().unwrap();
    assert_eq!(bytes, bytes_again);
}

#[test]
fn test_cache_file_roundtrip() {
    let mut rel = Release::new();
    rel.set_version(Some("1.0"));
    rel.set_timestamp(500);
    rel.add_location("https://example.org/a.tar.xz");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("release.cache");
    std::fs::write(&path, rel.to_cache_entry().to_vec().unwrap()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let reloaded = Release::from_cache_entry(&CacheEntry::from_slice(&bytes).unwrap(), "C");
    assert_eq!(reloaded.version(), Some("1.0"));
    assert_eq!(reloaded.timestamp(), 500);
    assert_eq!(reloaded.locations(), rel.locations());
}

// =============================================================================
// Cross-format
// =============================================================================

#[test]
fn test_xml_to_yaml_to_cache_chain() {
    let ctx = Context::new(FormatStyle::Collection).shared();
    let rel = load_xml(
        &ctx,
        r#"<release type="stable" version="1.0" timestamp="500" urgency="low">
             <location>https://example.org/a.tar.xz</location>
             <checksum type="sha256">deadbeef</checksum>
             <size type="download">2048</size>
           </release>"#,
    );

    // YAML narrows the record to its own field set
    let yaml_rel = Release::from_yaml(&ctx, &rel.to_yaml(&ctx)).unwrap();
    assert_eq!(yaml_rel.version(), Some("1.0"));
    assert!(yaml_rel.checksums().is_empty());

    // the cache keeps everything but the locale mapping
    let cached = Release::from_cache_entry(&rel.to_cache_entry(), "C");
    assert_eq!(cached.version(), Some("1.0"));
    assert_eq!(cached.timestamp(), 500);
    assert_eq!(cached.urgency(), UrgencyKind::Low);
    assert_eq!(
        cached.checksum(ChecksumKind::Sha256).map(Checksum::value),
        Some("deadbeef")
    );
    assert_eq!(cached.size(SizeKind::Download), 2048);
    assert_eq!(cached.locations(), rel.locations());
}
