use std::env;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

use fs_err as fs;
use thiserror::Error;
use tracing::debug;

use pyfind_version::Version;

/// Environment variable overriding the pyenv root directory.
pub(crate) const PYENV_ROOT: &str = "PYENV_ROOT";

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to determine the user home directory")]
    HomeDir(#[from] etcetera::HomeDirError),

    /// The pyenv root is missing or not a directory. A configuration
    /// problem, distinct from an unmatched specifier.
    #[error("pyenv root `{0}` is not a directory")]
    InvalidRoot(PathBuf),
}

/// The set of interpreter installs under a pyenv root.
#[derive(Debug, Clone)]
pub struct PyenvInstallations {
    root: PathBuf,
}

impl PyenvInstallations {
    /// Locate the pyenv root from `$PYENV_ROOT`, falling back to `~/.pyenv`.
    pub fn from_settings() -> Result<Self, Error> {
        let root = match env::var_os(PYENV_ROOT) {
            Some(root) if !root.is_empty() => PathBuf::from(root),
            _ => etcetera::home_dir()?.join(".pyenv"),
        };
        Self::from_root(root)
    }

    /// Use an explicit pyenv root. It must exist and be a directory.
    pub fn from_root(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::InvalidRoot(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory holding one subdirectory per installed version.
    pub fn versions_dir(&self) -> PathBuf {
        self.root.join("versions")
    }

    /// Enumerate the installed versions.
    ///
    /// A missing `versions` directory is an empty set, not an error.
    /// Entries whose names do not parse as versions are skipped with a
    /// diagnostic; a pyenv root routinely holds non-CPython installs.
    pub fn find_all(&self) -> Result<Vec<PyenvInstall>, Error> {
        let versions_dir = self.versions_dir();
        let entries = match fs::read_dir(&versions_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "No pyenv versions directory at `{}`",
                    versions_dir.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        let mut installs = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            match name.parse::<Version>() {
                Ok(version) => installs.push(PyenvInstall {
                    name: name.to_string(),
                    version,
                    path,
                }),
                Err(err) => {
                    debug!("Skipping version directory `{name}`: {err}");
                }
            }
        }
        Ok(installs)
    }
}

/// A single installed interpreter version directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyenvInstall {
    name: String,
    version: Version,
    path: PathBuf,
}

impl PyenvInstall {
    /// The directory name, e.g. `3.12.0a3`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The interpreter executable inside the install. pyenv-win places
    /// `python.exe` directly in the version directory; elsewhere the
    /// executable lives under `bin`.
    pub fn executable(&self) -> PathBuf {
        if cfg!(windows) {
            self.path.join("python.exe")
        } else {
            self.path.join("bin").join("python")
        }
    }
}

impl Display for PyenvInstall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
