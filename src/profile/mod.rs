//! Profile configuration plumbing.
//!
//! A profile is a directory of plain-text config files plus a JSON
//! show-list. Every config file is looked up on the same search path, in
//! priority order:
//!
//! 1. the profile directory (per-exhibit overrides),
//! 2. the home directory (per-installation defaults),
//! 3. the application base directory (shipped defaults).
//!
//! The first file found wins; a file that exists nowhere on the path is a
//! fatal initialisation error. Readers are plain injected values owned by
//! the player for the duration of one run; there is no process-wide
//! config state.
//!
//! ## Contents
//! - [`SearchPath`] — the three-directory lookup
//! - [`ConfigText`] — sectioned `key = value` text, the format shared by
//!   `resources.cfg`, `controls.cfg`, `keys.cfg` and `screen.cfg`
//! - [`ResourceReader`] — `resources.cfg`
//! - [`Controls`] — `controls.cfg`

mod controls;
mod resources;

pub use controls::Controls;
pub use resources::ResourceReader;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::PlayerError;

/// The profile → home → base directory search order.
#[derive(Debug, Clone)]
pub struct SearchPath {
    dirs: [PathBuf; 3],
}

impl SearchPath {
    /// Builds a search path from the three standard directories.
    pub fn new(
        base: impl Into<PathBuf>,
        home: impl Into<PathBuf>,
        profile: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dirs: [profile.into(), home.into(), base.into()],
        }
    }

    /// Returns the first directory on the path containing `name`.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|d| d.join(name))
            .find(|p| p.is_file())
    }

    /// Reads the first `name` found on the path, or fails with the list of
    /// directories searched.
    pub fn read(&self, name: &'static str) -> Result<String, PlayerError> {
        let path = self.locate(name).ok_or_else(|| PlayerError::MissingConfig {
            name,
            searched: self.dirs.to_vec(),
        })?;
        std::fs::read_to_string(&path).map_err(|_| PlayerError::MissingConfig {
            name,
            searched: self.dirs.to_vec(),
        })
    }

    /// The directories on the path, in priority order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// The profile directory (highest priority).
    pub fn profile_dir(&self) -> &Path {
        &self.dirs[0]
    }
}

/// Sectioned `key = value` config text.
///
/// The format is deliberately small: `[section]` headers, `key = value`
/// lines, `#` or `;` comments, blank lines ignored. Section order and the
/// order of keys within a section are preserved.
#[derive(Debug, Clone, Default)]
pub struct ConfigText {
    sections: Vec<(String, Vec<(String, String)>)>,
    index: HashMap<String, usize>,
}

impl ConfigText {
    /// Parses config text. Lines before the first section header and
    /// malformed lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut cfg = ConfigText::default();
        let mut current: Option<usize> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim().to_string();
                let idx = *cfg.index.entry(name.clone()).or_insert_with(|| {
                    cfg.sections.push((name, Vec::new()));
                    cfg.sections.len() - 1
                });
                current = Some(idx);
                continue;
            }
            if let (Some(idx), Some((key, value))) = (current, line.split_once('=')) {
                cfg.sections[idx]
                    .1
                    .push((key.trim().to_string(), value.trim().to_string()));
            }
        }
        cfg
    }

    /// Looks up `item` in `section`. The last assignment wins, matching the
    /// usual override-by-repetition behaviour of layered config files.
    pub fn get(&self, section: &str, item: &str) -> Option<&str> {
        let idx = *self.index.get(section)?;
        self.sections[idx]
            .1
            .iter()
            .rev()
            .find(|(k, _)| k == item)
            .map(|(_, v)| v.as_str())
    }

    /// True if `section` exists.
    pub fn has_section(&self, section: &str) -> bool {
        self.index.contains_key(section)
    }

    /// Iterates sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &[(String, String)])> {
        self.sections
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    /// Iterates `key = value` pairs of one section in file order.
    pub fn items(&self, section: &str) -> impl Iterator<Item = (&str, &str)> {
        let idx = self.index.get(section).copied();
        idx.into_iter().flat_map(move |i| {
            self.sections[i]
                .1
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
        })
    }
}
