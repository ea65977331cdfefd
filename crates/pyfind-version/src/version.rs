use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

/// The kind of a pre-release tag.
///
/// Kinds are ordered by release maturity: alphas sort before betas, betas
/// before release candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrereleaseKind {
    /// An alpha release, e.g. `3.12.0a3`.
    Alpha,
    /// A beta release, e.g. `3.12.0b1`.
    Beta,
    /// A release candidate, e.g. `3.12.0rc2`.
    Rc,
}

/// A pre-release tag, e.g. the `a3` in `3.12.0a3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prerelease {
    pub kind: PrereleaseKind,
    pub number: u64,
}

/// A pyenv-style interpreter version, as it appears in the name of an
/// install directory or in a version specifier.
///
/// A version is a dotted numeric base optionally followed by a pre-release
/// tag (`3.12.0a3`), a free-threaded marker (`3.13t`), or a `-dev` suffix
/// marking a development snapshot (`3.12-dev`). A version is never both a
/// pre-release and a dev snapshot.
///
/// Trailing zero components are insignificant for equality and ordering —
/// `3.8` and `3.8.0` denote the same release — but are preserved for
/// display. Ordering is total: the dev snapshot of a base sorts before its
/// pre-releases, which sort before the final release.
#[derive(Debug, Clone)]
pub struct Version {
    base: Vec<u64>,
    /// Length of `base` with trailing zero components stripped, computed
    /// once at construction. Comparisons ignore the stripped tail.
    significant: usize,
    pre: Option<Prerelease>,
    dev: bool,
    free_threaded: bool,
}

impl Version {
    /// Create a stable version from release components.
    ///
    /// The one-component form (`Version::new([3])`) is only reachable here;
    /// the string grammar requires at least a major and minor component.
    pub fn new(base: impl IntoIterator<Item = u64>) -> Self {
        let base: Vec<u64> = base.into_iter().collect();
        debug_assert!(!base.is_empty() && base.len() <= 3);
        let significant = significant_len(&base);
        Self {
            base,
            significant,
            pre: None,
            dev: false,
            free_threaded: false,
        }
    }

    #[must_use]
    pub fn with_pre(mut self, pre: Option<Prerelease>) -> Self {
        debug_assert!(pre.is_none() || !self.dev);
        self.pre = pre;
        self
    }

    #[must_use]
    pub fn with_dev(mut self, dev: bool) -> Self {
        debug_assert!(!dev || self.pre.is_none());
        self.dev = dev;
        self
    }

    #[must_use]
    pub fn with_free_threaded(mut self, free_threaded: bool) -> Self {
        self.free_threaded = free_threaded;
        self
    }

    /// The release components as written, trailing zeros included.
    pub fn base(&self) -> &[u64] {
        &self.base
    }

    /// The release components with trailing zeros stripped.
    pub fn significant_base(&self) -> &[u64] {
        &self.base[..self.significant]
    }

    pub fn pre(&self) -> Option<Prerelease> {
        self.pre
    }

    /// Whether this is a development snapshot, e.g. `3.12-dev`.
    pub fn is_dev(&self) -> bool {
        self.dev
    }

    /// Whether this is a free-threaded build, e.g. `3.13t`.
    pub fn is_free_threaded(&self) -> bool {
        self.free_threaded
    }

    /// Whether this is a final release: no pre-release tag, not a snapshot.
    pub fn is_stable(&self) -> bool {
        self.pre.is_none() && !self.dev
    }

    /// Whether this installed version fulfills `requested`.
    ///
    /// Unstable releases must be selected exactly: dev-ness, the pre-release
    /// tag, and free-threadedness all have to line up, so a plain `3.12`
    /// request matches neither `3.12-dev` nor `3.12.0a3`. For stable
    /// versions the requested base acts as a prefix — `3.7` accepts
    /// `3.7.11`, while `3.7.2` does not accept `3.7`.
    pub fn satisfies(&self, requested: &Version) -> bool {
        if self.free_threaded != requested.free_threaded {
            return false;
        }
        if self.dev != requested.dev {
            return false;
        }
        if self.pre != requested.pre {
            return false;
        }
        if requested.base.len() > self.base.len() {
            return false;
        }
        if self.dev {
            // A snapshot names a moving target; the bases must match as
            // written, not merely share a prefix.
            self.base == requested.base
        } else {
            self.base[..requested.base.len()] == requested.base[..]
        }
    }

    /// The key equality, ordering, and hashing all derive from: significant
    /// base, then release stage (dev < pre-release < stable), then the
    /// pre-release tag, then free-threadedness.
    fn comparison_key(&self) -> (&[u64], u8, Option<Prerelease>, bool) {
        let stage = if self.dev {
            0
        } else if self.pre.is_some() {
            1
        } else {
            2
        };
        (self.significant_base(), stage, self.pre, self.free_threaded)
    }
}

fn significant_len(base: &[u64]) -> usize {
    base.iter()
        .rposition(|component| *component != 0)
        .map_or(0, |index| index + 1)
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.comparison_key() == other.comparison_key()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparison_key().hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparison_key().cmp(&other.comparison_key())
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut components = self.base.iter();
        if let Some(major) = components.next() {
            write!(f, "{major}")?;
        }
        for component in components {
            write!(f, ".{component}")?;
        }
        if let Some(pre) = self.pre {
            write!(f, "{pre}")?;
        }
        if self.free_threaded {
            f.write_str("t")?;
        }
        if self.dev {
            f.write_str("-dev")?;
        }
        Ok(())
    }
}

impl Display for Prerelease {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.number)
    }
}

impl Display for PrereleaseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha => f.write_str("a"),
            Self::Beta => f.write_str("b"),
            Self::Rc => f.write_str("rc"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    /// `3` or `3.10.2.4`: only `major.minor` and `major.minor.patch` are
    /// written out in full.
    #[error("expected two or three release components in `{0}`")]
    ComponentCount(String),
    #[error("invalid release component `{component}` in `{version}`")]
    InvalidComponent { version: String, component: String },
    #[error("unexpected trailing `{suffix}` in `{version}`")]
    TrailingContent { version: String, suffix: String },
    #[error("`{0}` cannot be both a pre-release and a dev snapshot")]
    PreAndDev(String),
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn trailing(version: &str, suffix: &str) -> VersionParseError {
            VersionParseError::TrailingContent {
                version: version.to_string(),
                suffix: suffix.to_string(),
            }
        }

        // The numeric base runs until the first character that is neither a
        // digit nor a separator; the `a`/`b`/`rc`/`t`/`-dev` suffixes follow.
        let base_end = s
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(s.len());
        let (base_str, suffix) = s.split_at(base_end);

        let mut base = Vec::new();
        for component in base_str.split('.') {
            let number =
                component
                    .parse::<u64>()
                    .map_err(|_| VersionParseError::InvalidComponent {
                        version: s.to_string(),
                        component: component.to_string(),
                    })?;
            base.push(number);
        }
        if !(2..=3).contains(&base.len()) {
            return Err(VersionParseError::ComponentCount(s.to_string()));
        }
        // The major component is a single digit in this naming scheme;
        // `37.7` is a typo for `3.7.7`, not a request for Python 37.
        if base_str.split('.').next().is_some_and(|major| major.len() != 1) {
            return Err(VersionParseError::InvalidComponent {
                version: s.to_string(),
                component: base_str.split('.').next().unwrap_or_default().to_string(),
            });
        }

        let mut rest = suffix;
        let mut pre = None;
        if let Some((kind, tail)) = strip_pre_kind(rest) {
            let digits_end = tail
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(tail.len());
            if digits_end == 0 {
                return Err(trailing(s, rest));
            }
            let (digits, tail) = tail.split_at(digits_end);
            let number = digits.parse::<u64>().map_err(|_| trailing(s, rest))?;
            pre = Some(Prerelease { kind, number });
            rest = tail;
        }
        let mut free_threaded = false;
        if let Some(tail) = rest.strip_prefix('t') {
            free_threaded = true;
            rest = tail;
        }
        let mut dev = false;
        if let Some(tail) = rest.strip_prefix("-dev") {
            dev = true;
            rest = tail;
        }
        if !rest.is_empty() {
            return Err(trailing(s, rest));
        }
        if pre.is_some() && dev {
            return Err(VersionParseError::PreAndDev(s.to_string()));
        }

        let significant = significant_len(&base);
        Ok(Self {
            base,
            significant,
            pre,
            dev,
            free_threaded,
        })
    }
}

fn strip_pre_kind(s: &str) -> Option<(PrereleaseKind, &str)> {
    if let Some(rest) = s.strip_prefix("rc") {
        Some((PrereleaseKind::Rc, rest))
    } else if let Some(rest) = s.strip_prefix('a') {
        Some((PrereleaseKind::Alpha, rest))
    } else if let Some(rest) = s.strip_prefix('b') {
        Some((PrereleaseKind::Beta, rest))
    } else {
        None
    }
}
