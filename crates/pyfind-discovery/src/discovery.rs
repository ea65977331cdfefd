use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, trace};

use pyfind_version::{Version, VersionParseError};

use crate::pyenv::{self, PyenvInstall, PyenvInstallations};
use crate::spec::{Implementation, PythonSpec, SpecParseError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Installations(#[from] pyenv::Error),

    /// The specifier matched no grammar branch.
    #[error(transparent)]
    Spec(#[from] SpecParseError),

    /// A recognized implementation this engine cannot resolve. The only
    /// error kind callers may treat as "try another mechanism".
    #[error("only CPython specifiers are supported, found `{0}`")]
    UnsupportedImplementation(String),

    /// A well-formed specifier whose version token does not parse.
    #[error("failed to parse version `{version}` from specifier `{spec}`")]
    InvalidVersionRequest {
        spec: String,
        version: String,
        #[source]
        source: VersionParseError,
    },

    /// A CPython specifier that carries no version at all.
    #[error("specifier `{0}` does not name a version")]
    MissingVersion(String),

    #[error("an interpreter specifier is required")]
    MissingSpecifier,

    #[error("interpreter paths are not allowed: `{0}`")]
    PathNotAllowed(String),
}

/// Policy switches for [`discover`], controlling what is accepted besides a
/// resolvable version specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case", default)]
pub struct DiscoverySettings {
    /// With no specifier at all, hand back [`Discovered::Default`] instead
    /// of failing.
    pub allow_default: bool,
    /// Accept raw filesystem paths as specifiers, bypassing resolution.
    pub allow_path: bool,
    /// When nothing matches, hand back [`Discovered::Fallback`] so the host
    /// can run its own discovery.
    pub allow_fallback: bool,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self::compat()
    }
}

impl DiscoverySettings {
    /// Accept paths and an unspecified interpreter, but never fall back.
    pub fn compat() -> Self {
        Self {
            allow_default: true,
            allow_path: true,
            allow_fallback: false,
        }
    }

    /// Require an explicit pyenv-style specifier.
    pub fn strict() -> Self {
        Self {
            allow_default: false,
            allow_path: false,
            allow_fallback: false,
        }
    }

    /// Like [`Self::compat`], but signal the host to run its own discovery
    /// when nothing matches.
    pub fn fallback() -> Self {
        Self {
            allow_default: true,
            allow_path: true,
            allow_fallback: true,
        }
    }
}

/// The outcome of a successful discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovered {
    /// A matching install under the pyenv versions directory.
    Install(PyenvInstall),
    /// A raw path accepted verbatim, to be validated by the host.
    Path(PathBuf),
    /// No specifier was given; the host should use its default interpreter.
    Default,
    /// Nothing matched; the host may engage its fallback mechanism.
    Fallback,
}

/// Resolve a parsed specifier against the installed versions.
///
/// Returns the highest installed version satisfying the request, or
/// `Ok(None)` when a well-formed, supported specifier matched nothing.
/// Installs that parse to equal versions under different names (e.g. `3.8`
/// and `3.8.0`) tie-break on directory iteration order; that is an artifact
/// of the scan, not a guarantee.
pub fn find_best_install(
    spec: &PythonSpec,
    installations: &PyenvInstallations,
) -> Result<Option<PyenvInstall>, Error> {
    match spec.implementation() {
        Implementation::CPython => {}
        Implementation::Other(_) | Implementation::Unknown => {
            return Err(Error::UnsupportedImplementation(spec.as_str().to_string()));
        }
    }
    let Some(version) = spec.version() else {
        return Err(Error::MissingVersion(spec.as_str().to_string()));
    };
    let requested = Version::from_str(version).map_err(|source| Error::InvalidVersionRequest {
        spec: spec.as_str().to_string(),
        version: version.to_string(),
        source,
    })?;

    debug!("Searching for an install matching {requested}");
    let mut best: Option<PyenvInstall> = None;
    for install in installations.find_all()? {
        if !install.version().satisfies(&requested) {
            continue;
        }
        trace!("Proposed {install}");
        if best
            .as_ref()
            .is_none_or(|best| install.version() > best.version())
        {
            best = Some(install);
        }
    }
    match &best {
        Some(install) => debug!("Accepted {install}"),
        None => debug!("No install satisfies {requested}"),
    }
    Ok(best)
}

/// Discover an interpreter for a list of requested specifiers.
///
/// Requests are tried in order; the first one with a match wins. A request
/// that finds nothing moves on to the next, while parse and configuration
/// failures abort discovery — they are caller errors, not misses.
pub fn discover<S: AsRef<str>>(
    requests: &[S],
    settings: &DiscoverySettings,
    installations: &PyenvInstallations,
) -> Result<Option<Discovered>, Error> {
    if requests.is_empty() {
        if settings.allow_default {
            debug!("No specifier given, deferring to the host default interpreter");
            return Ok(Some(Discovered::Default));
        }
        return Err(Error::MissingSpecifier);
    }
    for request in requests {
        let request = request.as_ref();
        // pyenv specifiers never contain separators; a path bypasses
        // version resolution entirely.
        if request.contains(['/', '\\']) {
            if !settings.allow_path {
                return Err(Error::PathNotAllowed(request.to_string()));
            }
            return Ok(Some(Discovered::Path(PathBuf::from(request))));
        }
        let spec = PythonSpec::from_str(request)?;
        if let Some(install) = find_best_install(&spec, installations)? {
            return Ok(Some(Discovered::Install(install)));
        }
    }
    if settings.allow_fallback {
        debug!("No install matched, deferring to the host fallback discovery");
        return Ok(Some(Discovered::Fallback));
    }
    Ok(None)
}
