use std::str::FromStr;

use thiserror::Error;

use crate::spec::{PythonSpec, SpecParseError};

/// Component fields of a host-tool interpreter request, i.e. what a host
/// parses out of shorthands like `py311`, `python3.11`, or
/// `cpython3.11.0-64` before handing them to this engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParts {
    /// Implementation name or alias. `py`, `python`, `cpython`, and absence
    /// all mean CPython.
    pub implementation: Option<String>,
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub micro: Option<u64>,
    pub free_threaded: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("a major version is required")]
    MissingMajor,
    #[error("a minor version is required")]
    MissingMinor,
    #[error(transparent)]
    Spec(#[from] SpecParseError),
}

impl RequestParts {
    /// Translate into a canonical pyenv-style specifier.
    ///
    /// A major and a minor version are required; reporting their absence
    /// here keeps host-side shorthand errors distinct from resolution
    /// errors.
    pub fn to_pyenv_spec(&self) -> Result<PythonSpec, Error> {
        let major = self.major.ok_or(Error::MissingMajor)?;
        let minor = self.minor.ok_or(Error::MissingMinor)?;
        let mut version = format!("{major}.{minor}");
        if let Some(micro) = self.micro {
            version = format!("{version}.{micro}");
        }
        if self.free_threaded {
            version.push('t');
        }
        let canonical = match self.implementation.as_deref() {
            None => version,
            Some(alias)
                if alias.eq_ignore_ascii_case("py")
                    || alias.eq_ignore_ascii_case("python")
                    || alias.eq_ignore_ascii_case("cpython") =>
            {
                version
            }
            Some(alias) => format!("{}-{version}", alias.to_ascii_lowercase()),
        };
        Ok(PythonSpec::from_str(&canonical)?)
    }
}
