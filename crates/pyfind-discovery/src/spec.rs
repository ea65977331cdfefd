use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use pyfind_version::Version;

/// The interpreter implementation named by a specifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Implementation {
    /// The reference implementation. Installs are named by bare version
    /// numbers, e.g. `3.12.1`.
    CPython,
    /// A named fork or distribution with its own release numbering, e.g.
    /// the `miniconda3` in `miniconda3-4.3.30`.
    Other(String),
    /// A name we do not recognize, kept so the caller can report it.
    Unknown,
}

/// A build variant carried as a suffix on the specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// A source build, e.g. `3.11.0a1-src`.
    Source,
}

/// A parsed interpreter version specifier.
///
/// See [`PythonSpec::from_str`]. Parsing is idempotent over the raw string:
/// re-parsing the `Display` form yields an equal spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonSpec {
    raw: String,
    implementation: Implementation,
    version: Option<String>,
    variant: Option<Variant>,
}

impl PythonSpec {
    /// The specifier as given, for diagnostics.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn implementation(&self) -> &Implementation {
        &self.implementation
    }

    /// The version token, if the specifier carried one. The opaque `latest`
    /// and `dev` tokens appear here for fork specifiers such as
    /// `miniconda3-latest`.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn variant(&self) -> Option<Variant> {
        self.variant
    }
}

impl Display for PythonSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecParseError {
    #[error("interpreter specifier is empty")]
    Empty,
    #[error("failed to parse version from specifier `{0}`")]
    InvalidVersion(String),
    #[error("unrecognized interpreter specifier `{0}`")]
    Unrecognized(String),
}

impl FromStr for PythonSpec {
    type Err = SpecParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(SpecParseError::Empty);
        }
        let mut variant = None;
        let mut remainder = raw;
        if let Some(stripped) = remainder.strip_suffix("-src") {
            variant = Some(Variant::Source);
            remainder = stripped;
        }
        // e.g. `3.12.0a3`: a bare version names the reference implementation,
        // and nothing may follow the version token.
        if remainder.starts_with(|c: char| c.is_ascii_digit()) {
            if Version::from_str(remainder).is_err() {
                return Err(SpecParseError::InvalidVersion(raw.to_string()));
            }
            return Ok(Self {
                raw: raw.to_string(),
                implementation: Implementation::CPython,
                version: Some(remainder.to_string()),
                variant,
            });
        }
        // e.g. `miniconda3-4.3.30` or `pypy3.10-7.3.12`: split a
        // distribution name off the first boundary that leaves a version
        // token.
        for (index, _) in remainder.match_indices('-') {
            let (name, version) = (&remainder[..index], &remainder[index + 1..]);
            if is_identifier(name) && is_version_token(version) {
                return Ok(Self {
                    raw: raw.to_string(),
                    implementation: Implementation::Other(name.to_string()),
                    version: Some(version.to_string()),
                    variant,
                });
            }
        }
        // e.g. `pypy37`: recognizable as an identifier, but not an
        // implementation this engine can resolve.
        if is_identifier(remainder) {
            return Ok(Self {
                raw: raw.to_string(),
                implementation: Implementation::Unknown,
                version: None,
                variant,
            });
        }
        Err(SpecParseError::Unrecognized(raw.to_string()))
    }
}

/// `latest` and `dev` stand for themselves in fork specifiers such as
/// `miniconda3-latest`; they are not decomposed further.
fn is_version_token(s: &str) -> bool {
    s == "latest" || s == "dev" || Version::from_str(s).is_ok()
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '_')
        })
}

#[cfg(test)]
mod tests;
