//! Version string comparison
//!
//! Release versions are free-form strings ("1.2", "2.0~beta1", "r41"),
//! not strict semver, so comparison works on alternating numeric and
//! alphabetic segments. Absent versions sort before any present one.

use std::cmp::Ordering;

/// One comparable run of characters within a version string
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    /// Digit run, leading zeros stripped
    Num(&'a str),
    /// Alphabetic run
    Alpha(&'a str),
}

impl Segment<'_> {
    fn cmp_segment(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Compare numerically: longer digit run wins, then lexically
            (Segment::Num(a), Segment::Num(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Segment::Alpha(a), Segment::Alpha(b)) => a.cmp(b),
            // A numeric segment outranks an alphabetic one
            (Segment::Num(_), Segment::Alpha(_)) => Ordering::Greater,
            (Segment::Alpha(_), Segment::Num(_)) => Ordering::Less,
        }
    }
}

fn tokenize(version: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let bytes = version.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        if bytes[i].is_ascii_digit() {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let run = version[start..i].trim_start_matches('0');
            segments.push(Segment::Num(run));
        } else if bytes[i].is_ascii_alphabetic() {
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            segments.push(Segment::Alpha(&version[start..i]));
        } else {
            // separators and anything else split segments
            i += 1;
        }
    }
    segments
}

/// Three-way compare of two optional version strings.
///
/// Both absent compares equal; an absent version sorts before any
/// present one. No normalization is performed on the inputs.
pub fn compare_versions(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            let sa = tokenize(a);
            let sb = tokenize(b);
            for (x, y) in sa.iter().zip(sb.iter()) {
                let ord = x.cmp_segment(y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            // the version with remaining segments is the higher one
            sa.len().cmp(&sb.len())
        }
    }
}
