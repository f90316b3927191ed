//! Screen click regions: canvas areas bound to symbolic names.
//!
//! `screen.cfg` defines one section per region with its rectangle and the
//! symbol it fires. The canvas itself belongs to the windowing layer; the
//! glue forwards pointer hits to [`ClickAreas::click`], which hit-tests
//! against the configured regions and injects the bound symbol. Clicks
//! outside every region are silently ignored.

use std::sync::Arc;

use super::{Edge, InputPort, InputSource};
use crate::error::PlayerError;
use crate::profile::{ConfigText, SearchPath};

/// File name looked up on the profile search path.
const FILE_NAME: &str = "screen.cfg";

/// One rectangular click region.
#[derive(Debug, Clone)]
pub struct ClickArea {
    /// Section name the region was defined under.
    pub name: Arc<str>,
    /// Left edge, canvas coordinates.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Right edge.
    pub x2: i32,
    /// Bottom edge.
    pub y2: i32,
    /// Symbol injected when the region is hit.
    pub symbol: Arc<str>,
}

impl ClickArea {
    /// True if the point lies inside the region (edges inclusive).
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

/// Parsed `screen.cfg`: ordered click regions.
#[derive(Debug, Clone, Default)]
pub struct ClickAreas {
    areas: Vec<ClickArea>,
}

impl ClickAreas {
    /// Reads `screen.cfg` from the search path. Missing everywhere on the
    /// path is a fatal initialisation error.
    pub fn open(search: &SearchPath) -> Result<Self, PlayerError> {
        let text = search.read(FILE_NAME)?;
        Ok(Self::parse(&text))
    }

    /// Parses regions from text. Sections with missing or malformed
    /// coordinates or without a symbol are skipped.
    pub fn parse(text: &str) -> Self {
        let cfg = ConfigText::parse(text);
        let mut areas = Vec::new();
        for (name, _) in cfg.sections() {
            let coord = |k: &str| cfg.get(name, k).and_then(|v| v.parse::<i32>().ok());
            let (Some(x1), Some(y1), Some(x2), Some(y2)) =
                (coord("x1"), coord("y1"), coord("x2"), coord("y2"))
            else {
                continue;
            };
            let Some(symbol) = cfg.get(name, "symbol") else {
                continue;
            };
            areas.push(ClickArea {
                name: Arc::from(name),
                x1,
                y1,
                x2,
                y2,
                symbol: Arc::from(symbol),
            });
        }
        Self { areas }
    }

    /// Returns the first region (file order) containing the point.
    pub fn hit(&self, x: i32, y: i32) -> Option<&ClickArea> {
        self.areas.iter().find(|a| a.contains(x, y))
    }

    /// Hit-tests a click and injects the bound symbol if a region matched.
    pub fn click(&self, port: &InputPort, x: i32, y: i32) {
        if let Some(area) = self.hit(x, y) {
            port.press(area.symbol.clone(), Edge::Rising, InputSource::Screen);
        }
    }

    /// The configured regions, in file order.
    pub fn areas(&self) -> &[ClickArea] {
        &self.areas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CFG: &str = "[next]\nx1 = 0\ny1 = 0\nx2 = 100\ny2 = 100\nsymbol = slideshow-next\n\
                       [exit]\nx1 = 900\ny1 = 0\nx2 = 1000\ny2 = 50\nsymbol = pp-exit\n";

    #[test]
    fn test_hit_test_and_injection() {
        let areas = ClickAreas::parse(CFG);
        assert_eq!(areas.areas().len(), 2);

        let (port, mut rx) = InputPort::channel();
        areas.click(&port, 950, 25);
        let ev = rx.try_recv().unwrap();
        assert_eq!(&*ev.symbol, "pp-exit");
        assert_eq!(ev.source, InputSource::Screen);
    }

    #[test]
    fn test_miss_is_ignored() {
        let areas = ClickAreas::parse(CFG);
        let (port, mut rx) = InputPort::channel();
        areas.click(&port, 500, 500);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_malformed_section_skipped() {
        let areas = ClickAreas::parse("[broken]\nx1 = a\nsymbol = s\n");
        assert!(areas.areas().is_empty());
    }
}
