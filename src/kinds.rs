//! Closed enumerations used by release records
//!
//! Every enum here has total string and numeric conversions: unknown
//! input maps to the `Unknown` variant, never an error. The numeric
//! codes are part of the binary cache format and must stay stable.

/// Type of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum ReleaseKind {
    Unknown = 0,
    /// End-user ready stable release; records default to this
    #[default]
    Stable = 1,
    /// Development prerelease
    Development = 2,
}

impl ReleaseKind {
    /// Get the string representation of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseKind::Stable => "stable",
            ReleaseKind::Development => "development",
            ReleaseKind::Unknown => "unknown",
        }
    }

    /// Parse from a string representation
    pub fn from_str(s: &str) -> Self {
        match s {
            "stable" => ReleaseKind::Stable,
            "development" => ReleaseKind::Development,
            _ => ReleaseKind::Unknown,
        }
    }

    /// Parse from a numeric cache code
    pub fn from_u32(code: u32) -> Self {
        match code {
            1 => ReleaseKind::Stable,
            2 => ReleaseKind::Development,
            _ => ReleaseKind::Unknown,
        }
    }
}

/// Urgency of installing a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum UrgencyKind {
    #[default]
    Unknown = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl UrgencyKind {
    /// Get the string representation of this urgency
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyKind::Low => "low",
            UrgencyKind::Medium => "medium",
            UrgencyKind::High => "high",
            UrgencyKind::Critical => "critical",
            UrgencyKind::Unknown => "unknown",
        }
    }

    /// Parse from a string representation
    pub fn from_str(s: &str) -> Self {
        match s {
            "low" => UrgencyKind::Low,
            "medium" => UrgencyKind::Medium,
            "high" => UrgencyKind::High,
            "critical" => UrgencyKind::Critical,
            _ => UrgencyKind::Unknown,
        }
    }

    /// Parse from a numeric cache code
    pub fn from_u32(code: u32) -> Self {
        match code {
            1 => UrgencyKind::Low,
            2 => UrgencyKind::Medium,
            3 => UrgencyKind::High,
            4 => UrgencyKind::Critical,
            _ => UrgencyKind::Unknown,
        }
    }
}

/// Category of a stored release size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SizeKind {
    Unknown = 0,
    /// Size of the downloaded artifact
    Download = 1,
    /// Size after installation
    Installed = 2,
}

impl SizeKind {
    /// Number of size slots, including the unknown sentinel
    pub const COUNT: usize = 3;

    /// All valid (non-sentinel) size kinds, in emission order
    pub const VARIANTS: [SizeKind; 2] = [SizeKind::Download, SizeKind::Installed];

    /// Get the string representation of this size kind
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeKind::Download => "download",
            SizeKind::Installed => "installed",
            SizeKind::Unknown => "unknown",
        }
    }

    /// Parse from a string representation
    pub fn from_str(s: &str) -> Self {
        match s {
            "download" => SizeKind::Download,
            "installed" => SizeKind::Installed,
            _ => SizeKind::Unknown,
        }
    }

    /// Parse from a numeric cache code
    pub fn from_u32(code: u32) -> Self {
        match code {
            1 => SizeKind::Download,
            2 => SizeKind::Installed,
            _ => SizeKind::Unknown,
        }
    }
}

/// Algorithm of a checksum sub-record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ChecksumKind {
    Unknown = 0,
    Sha1 = 1,
    Sha256 = 2,
    Blake2b = 3,
}

impl ChecksumKind {
    /// Get the string representation of this checksum kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumKind::Sha1 => "sha1",
            ChecksumKind::Sha256 => "sha256",
            ChecksumKind::Blake2b => "blake2b",
            ChecksumKind::Unknown => "unknown",
        }
    }

    /// Parse from a string representation
    pub fn from_str(s: &str) -> Self {
        match s {
            "sha1" => ChecksumKind::Sha1,
            "sha256" => ChecksumKind::Sha256,
            "blake2b" => ChecksumKind::Blake2b,
            _ => ChecksumKind::Unknown,
        }
    }

    /// Parse from a numeric cache code
    pub fn from_u32(code: u32) -> Self {
        match code {
            1 => ChecksumKind::Sha1,
            2 => ChecksumKind::Sha256,
            3 => ChecksumKind::Blake2b,
            _ => ChecksumKind::Unknown,
        }
    }
}
