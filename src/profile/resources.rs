//! Reader for `resources.cfg`: user-facing strings and asset locations.
//!
//! Resources are the profile's lookup table for messages, paths and other
//! values shows ask for at runtime. The file is read once during
//! initialisation and handed to the supervisor, which exposes it to every
//! show through its `ShowContext`. Absence of the file is fatal; absence
//! of an individual key at runtime is a [`ShowError::ResourceMissing`]
//! surfaced through the normal error cascade, never a crash.
//!
//! [`ShowError::ResourceMissing`]: crate::error::ShowError::ResourceMissing

use super::{ConfigText, SearchPath};
use crate::error::PlayerError;

/// File name looked up on the profile search path.
const FILE_NAME: &str = "resources.cfg";

/// Parsed `resources.cfg`.
#[derive(Debug, Clone, Default)]
pub struct ResourceReader {
    cfg: ConfigText,
}

impl ResourceReader {
    /// Reads `resources.cfg` from the search path. Missing everywhere on
    /// the path is a fatal initialisation error.
    pub fn open(search: &SearchPath) -> Result<Self, PlayerError> {
        let text = search.read(FILE_NAME)?;
        Ok(Self::parse(&text))
    }

    /// Parses resources from text (tests, embedded profiles).
    pub fn parse(text: &str) -> Self {
        Self {
            cfg: ConfigText::parse(text),
        }
    }

    /// An empty reader, for demos and tests that use no resources.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up `item` in `section`.
    pub fn get(&self, section: &str, item: &str) -> Option<&str> {
        self.cfg.get(section, item)
    }
}
