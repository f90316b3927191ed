//! Reader for `controls.cfg`: symbolic-name to show-operation bindings.
//!
//! A control binding says what a profile-defined symbol means to a show:
//! `slideshow-next = next`, `clock-dim = dim`. The orchestrator never
//! interprets these; it broadcasts the symbol and each show consults the
//! controls table (through its `ShowContext`) to decide whether, and how,
//! the symbol is relevant to it.
//!
//! Profile bindings are layered over a set of application defaults, with
//! the profile winning on conflicts.

use std::sync::Arc;

use super::{ConfigText, SearchPath};
use crate::error::PlayerError;

/// File name looked up on the profile search path.
const FILE_NAME: &str = "controls.cfg";

/// Section holding the bindings.
const SECTION: &str = "controls";

/// Parsed `controls.cfg`: symbol → operation, file order preserved.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    bindings: Vec<(Arc<str>, Arc<str>)>,
}

impl Controls {
    /// Reads `controls.cfg` from the search path. Missing everywhere on
    /// the path is a fatal initialisation error.
    pub fn open(search: &SearchPath) -> Result<Self, PlayerError> {
        let text = search.read(FILE_NAME)?;
        Ok(Self::parse(&text))
    }

    /// Parses controls from text (tests, embedded profiles).
    pub fn parse(text: &str) -> Self {
        let cfg = ConfigText::parse(text);
        let bindings = cfg
            .items(SECTION)
            .map(|(symbol, operation)| (Arc::from(symbol), Arc::from(operation)))
            .collect();
        Self { bindings }
    }

    /// An empty table, for demos and tests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Layers application defaults under the profile's bindings: a default
    /// is added only when the profile does not bind that symbol.
    pub fn with_defaults<I, S>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<Arc<str>>,
    {
        for (symbol, operation) in defaults {
            let symbol = symbol.into();
            if self.operation_for(&symbol).is_none() {
                self.bindings.push((symbol, operation.into()));
            }
        }
        self
    }

    /// Returns the operation bound to `symbol`, if any.
    pub fn operation_for(&self, symbol: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(s, _)| &**s == symbol)
            .map(|(_, op)| &**op)
    }

    /// Iterates bindings in file order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(s, o)| (&**s, &**o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_lookup() {
        let controls = Controls::parse("[controls]\nslideshow-next = next\nslideshow-prev = prev\n");
        assert_eq!(controls.operation_for("slideshow-next"), Some("next"));
        assert_eq!(controls.operation_for("unbound"), None);
    }

    #[test]
    fn test_defaults_do_not_override_profile() {
        let controls = Controls::parse("[controls]\npp-pause = stop\n")
            .with_defaults([("pp-pause", "pause"), ("pp-play", "play")]);
        assert_eq!(controls.operation_for("pp-pause"), Some("stop"));
        assert_eq!(controls.operation_for("pp-play"), Some("play"));
    }
}
