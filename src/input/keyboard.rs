//! Keyboard bindings: keysym → symbolic name, from `keys.cfg`.
//!
//! The windowing layer is an external collaborator; it owns key events and
//! calls [`KeyboardMap::press`] with the keysym it observed. The map
//! translates bound keysyms into symbolic inputs and injects them through
//! the [`InputPort`]; unbound keysyms are silently ignored.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Edge, InputPort, InputSource};
use crate::error::PlayerError;
use crate::profile::{ConfigText, SearchPath};

/// File name looked up on the profile search path.
const FILE_NAME: &str = "keys.cfg";

/// Section holding the bindings.
const SECTION: &str = "keys";

/// Parsed `keys.cfg`: keysym → symbolic name.
#[derive(Debug, Clone, Default)]
pub struct KeyboardMap {
    bindings: HashMap<String, Arc<str>>,
}

impl KeyboardMap {
    /// Reads `keys.cfg` from the search path. Missing everywhere on the
    /// path is a fatal initialisation error.
    pub fn open(search: &SearchPath) -> Result<Self, PlayerError> {
        let text = search.read(FILE_NAME)?;
        Ok(Self::parse(&text))
    }

    /// Parses bindings from text (tests, embedded profiles).
    pub fn parse(text: &str) -> Self {
        let cfg = ConfigText::parse(text);
        let bindings = cfg
            .items(SECTION)
            .map(|(keysym, symbol)| (keysym.to_string(), Arc::from(symbol)))
            .collect();
        Self { bindings }
    }

    /// Returns the symbol bound to `keysym`, if any.
    pub fn lookup(&self, keysym: &str) -> Option<&Arc<str>> {
        self.bindings.get(keysym)
    }

    /// Translates a key press and injects it. Unbound keysyms are ignored.
    pub fn press(&self, port: &InputPort, keysym: &str) {
        if let Some(symbol) = self.lookup(keysym) {
            port.press(symbol.clone(), Edge::Rising, InputSource::Keyboard);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_key_injects_symbol() {
        let map = KeyboardMap::parse("[keys]\nEscape = pp-exit\nF1 = slideshow-next\n");
        let (port, mut rx) = InputPort::channel();

        map.press(&port, "Escape");
        let ev = rx.try_recv().unwrap();
        assert_eq!(&*ev.symbol, "pp-exit");
        assert_eq!(ev.source, InputSource::Keyboard);
        assert_eq!(ev.edge, Edge::Rising);
    }

    #[test]
    fn test_unbound_key_ignored() {
        let map = KeyboardMap::parse("[keys]\nEscape = pp-exit\n");
        let (port, mut rx) = InputPort::channel();

        map.press(&port, "F12");
        assert!(rx.try_recv().is_err());
    }
}
