//! Resolve pyenv-style interpreter version specifiers against the installs
//! under a pyenv root.
use thiserror::Error;

pub use crate::discovery::{
    Discovered, DiscoverySettings, Error as DiscoveryError, discover, find_best_install,
};
pub use crate::normalize::{Error as NormalizeError, RequestParts};
pub use crate::pyenv::{Error as PyenvError, PyenvInstall, PyenvInstallations};
pub use crate::spec::{Implementation, PythonSpec, SpecParseError, Variant};

mod discovery;
mod normalize;
mod pyenv;
mod spec;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Discovery(#[from] discovery::Error),

    #[error(transparent)]
    Installations(#[from] pyenv::Error),

    #[error(transparent)]
    Spec(#[from] spec::SpecParseError),

    #[error(transparent)]
    Normalize(#[from] normalize::Error),
}
