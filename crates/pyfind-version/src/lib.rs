//! A model of pyenv-style interpreter versions: parsing, a total order over
//! dev, pre-release, and stable builds, and the containment relation used to
//! match installed versions against requested ones.

pub use crate::version::{Prerelease, PrereleaseKind, Version, VersionParseError};

mod version;
