use crate::error::{Result, SemtaggerError};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Literal prefix preserved on parse and re-emitted on output
pub const VERSION_PREFIX: char = 'v';

/// `MAJOR.MINOR.PATCH[-LABEL]`, matched against the text after the prefix.
fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)(?:-(.+))?$")
            .expect("version pattern is a valid regex")
    })
}

/// Semantic version parsed from a tag name.
///
/// Carries the optional `v` prefix and a free-form prerelease label alongside
/// the three numeric components. `original` keeps the exact input for
/// diagnostics and is ignored by equality.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    pub prefix: Option<char>,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Empty means "no prerelease"
    pub prerelease: String,
    pub original: String,
}

impl SemanticVersion {
    /// Create an unprefixed version without a prerelease label
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        let mut version = SemanticVersion {
            prefix: None,
            major,
            minor,
            patch,
            prerelease: String::new(),
            original: String::new(),
        };
        version.original = version.to_string();
        version
    }

    /// Base version used when a repository has no semantic tags yet (`0.0.0`)
    pub fn initial() -> Self {
        SemanticVersion::new(0, 0, 0)
    }

    /// Parse a version string such as `v1.2.3` or `1.2.3-rc1`.
    ///
    /// A single leading `v` is stripped and remembered. The remainder must be
    /// exactly three dot-separated digit runs, optionally followed by `-` and a
    /// non-empty label that runs to the end of the input.
    ///
    /// # Errors
    /// Returns [`SemtaggerError::InvalidVersionFormat`] when the remainder does
    /// not match, or when a numeric component does not fit in a `u64`.
    ///
    /// # Example
    /// ```
    /// # use semtagger::domain::SemanticVersion;
    /// let v = SemanticVersion::parse("v2.3.4-rc1").unwrap();
    /// assert_eq!((v.major, v.minor, v.patch), (2, 3, 4));
    /// assert_eq!(v.prerelease, "rc1");
    /// assert_eq!(v.to_string(), "v2.3.4-rc1");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let (prefix, rest) = match input.strip_prefix(VERSION_PREFIX) {
            Some(rest) => (Some(VERSION_PREFIX), rest),
            None => (None, input),
        };

        let captures = version_pattern()
            .captures(rest)
            .ok_or_else(|| SemtaggerError::invalid_version(input))?;

        let component = |index: usize| -> Result<u64> {
            captures[index]
                .parse::<u64>()
                .map_err(|_| SemtaggerError::invalid_version(input))
        };

        Ok(SemanticVersion {
            prefix,
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            prerelease: captures
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            original: input.to_string(),
        })
    }

    /// Increment major version; resets minor, patch and prerelease
    pub fn increment_major(&mut self) -> &mut Self {
        self.major = self.major.saturating_add(1);
        self.minor = 0;
        self.patch = 0;
        self.prerelease.clear();
        self
    }

    /// Increment minor version; resets patch and prerelease
    pub fn increment_minor(&mut self) -> &mut Self {
        self.minor = self.minor.saturating_add(1);
        self.patch = 0;
        self.prerelease.clear();
        self
    }

    /// Increment patch version; clears prerelease
    pub fn increment_patch(&mut self) -> &mut Self {
        self.patch = self.patch.saturating_add(1);
        self.prerelease.clear();
        self
    }

    /// Apply a bump of the given kind
    pub fn bump(&mut self, bump: VersionBump) -> &mut Self {
        match bump {
            VersionBump::Major => self.increment_major(),
            VersionBump::Minor => self.increment_minor(),
            VersionBump::Patch => self.increment_patch(),
        }
    }

    /// Replace the prerelease label. An empty label clears it.
    ///
    /// The label is not validated: a label that breaks the grammar is still
    /// rendered verbatim.
    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.prerelease = label.into();
        self
    }

    /// Key used to rank tags: numeric components only, prerelease excluded
    pub fn ranking_key(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    /// Prerelease label, if any
    pub fn label(&self) -> Option<&str> {
        if self.prerelease.is_empty() {
            None
        } else {
            Some(&self.prerelease)
        }
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix
            && self.ranking_key() == other.ranking_key()
            && self.prerelease == other.prerelease
    }
}

impl Eq for SemanticVersion {}

impl FromStr for SemanticVersion {
    type Err = SemtaggerError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.prefix {
            write!(f, "{}", prefix)?;
        }
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease)?;
        }
        Ok(())
    }
}

/// Which component a bump increments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}
