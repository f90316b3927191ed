//! The show catalog: the profile's JSON show-list.
//!
//! `pp_showlist.json` names every show a profile can run, carries the
//! profile's issue (format version), and designates the `start` show
//! whose `start-show` field lists the references launched at boot. The
//! issue is checked against the running player's issue before anything
//! starts; a mismatch is fatal, there is no migration layer.

use std::path::Path;

use serde::Deserialize;

use crate::error::PlayerError;

/// Reference of the record that carries the boot start-list.
pub const STARTER_REFERENCE: &str = "start";

/// One show-list record.
///
/// Type-specific fields (media paths, durations, nested show lists) are
/// kept verbatim in `extra` for the [`ShowFactory`](crate::shows::ShowFactory)
/// to interpret.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowRecord {
    /// Stable, profile-defined identifier.
    #[serde(rename = "show-ref")]
    pub reference: String,
    /// Show type the factory dispatches on (e.g. `mediashow`, `liveshow`).
    #[serde(rename = "type", default)]
    pub show_type: String,
    /// Human-readable title, for logs and editors.
    #[serde(default)]
    pub title: String,
    /// Delimiter-separated references launched at boot. Only meaningful
    /// on the `start` record.
    #[serde(rename = "start-show", default)]
    pub start_show: String,
    /// Type-specific fields, uninterpreted by the core.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ShowRecord {
    /// Creates a minimal record (tests, demos).
    pub fn new(reference: impl Into<String>, show_type: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            show_type: show_type.into(),
            title: String::new(),
            start_show: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Sets the boot start-list (builder style, for the `start` record).
    pub fn with_start_show(mut self, start_show: impl Into<String>) -> Self {
        self.start_show = start_show.into();
        self
    }
}

/// On-disk shape of the show-list file.
#[derive(Debug, Deserialize)]
struct ShowListFile {
    issue: String,
    shows: Vec<ShowRecord>,
}

/// The profile's show-list, with a selection cursor.
#[derive(Debug, Clone)]
pub struct ShowCatalog {
    issue: String,
    shows: Vec<ShowRecord>,
    selected: Option<usize>,
}

impl ShowCatalog {
    /// Reads and parses the show-list file.
    pub fn open_json(path: &Path) -> Result<Self, PlayerError> {
        let text = std::fs::read_to_string(path).map_err(|e| PlayerError::ShowlistUnusable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file: ShowListFile =
            serde_json::from_str(&text).map_err(|e| PlayerError::ShowlistUnusable {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self {
            issue: file.issue,
            shows: file.shows,
            selected: None,
        })
    }

    /// Builds a catalog from records (tests, embedded profiles).
    pub fn from_records(issue: impl Into<String>, shows: Vec<ShowRecord>) -> Self {
        Self {
            issue: issue.into(),
            shows,
            selected: None,
        }
    }

    /// The profile's issue string.
    pub fn issue(&self) -> &str {
        &self.issue
    }

    /// Checks the profile issue against the player's, numerically, the
    /// way profile editors have always written it (`1.2` == `1.20`).
    pub fn check_issue(&self, player_issue: &str) -> Result<(), PlayerError> {
        let mismatch = || PlayerError::IssueMismatch {
            profile: self.issue.clone(),
            player: player_issue.to_string(),
        };
        let profile: f32 = self.issue.trim().parse().map_err(|_| mismatch())?;
        let player: f32 = player_issue.trim().parse().map_err(|_| mismatch())?;
        if profile == player {
            Ok(())
        } else {
            Err(mismatch())
        }
    }

    /// Index of the record with the given reference.
    pub fn index_of(&self, reference: &str) -> Option<usize> {
        self.shows.iter().position(|s| s.reference == reference)
    }

    /// Moves the selection cursor. Returns false if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.shows.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// The record under the selection cursor.
    pub fn selected_show(&self) -> Option<&ShowRecord> {
        self.selected.and_then(|i| self.shows.get(i))
    }

    /// The record at `index`.
    pub fn record(&self, index: usize) -> Option<&ShowRecord> {
        self.shows.get(index)
    }

    /// Convenience: the `start` record, selected.
    pub fn starter_show(&mut self) -> Result<&ShowRecord, PlayerError> {
        let index = self
            .index_of(STARTER_REFERENCE)
            .ok_or(PlayerError::StarterShowMissing)?;
        self.select(index);
        Ok(&self.shows[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ShowCatalog {
        ShowCatalog::from_records(
            "1.2",
            vec![
                ShowRecord::new("start", "start").with_start_show("slideshow,clock"),
                ShowRecord::new("slideshow", "mediashow"),
                ShowRecord::new("clock", "liveshow"),
            ],
        )
    }

    #[test]
    fn test_index_select_selected() {
        let mut cat = catalog();
        assert_eq!(cat.index_of("clock"), Some(2));
        assert_eq!(cat.index_of("absent"), None);
        assert!(cat.select(2));
        assert_eq!(cat.selected_show().unwrap().reference, "clock");
        assert!(!cat.select(99));
    }

    #[test]
    fn test_starter_show() {
        let mut cat = catalog();
        let starter = cat.starter_show().unwrap();
        assert_eq!(starter.start_show, "slideshow,clock");

        let mut empty = ShowCatalog::from_records("1.2", vec![]);
        assert!(matches!(
            empty.starter_show(),
            Err(PlayerError::StarterShowMissing)
        ));
    }

    #[test]
    fn test_issue_check() {
        let cat = catalog();
        assert!(cat.check_issue("1.2").is_ok());
        assert!(cat.check_issue("1.20").is_ok());
        assert!(matches!(
            cat.check_issue("1.3"),
            Err(PlayerError::IssueMismatch { .. })
        ));
        let odd = ShowCatalog::from_records("new", vec![]);
        assert!(odd.check_issue("1.2").is_err());
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "issue": "1.2",
            "shows": [
                {"show-ref": "start", "type": "start", "start-show": "slideshow"},
                {"show-ref": "slideshow", "type": "mediashow", "title": "Foyer loop",
                 "medialist": "foyer.json"}
            ]
        }"#;
        let file: super::ShowListFile = serde_json::from_str(json).unwrap();
        let cat = ShowCatalog::from_records(file.issue, file.shows);
        assert_eq!(cat.issue(), "1.2");
        let record = cat.record(cat.index_of("slideshow").unwrap()).unwrap();
        assert_eq!(record.title, "Foyer loop");
        assert_eq!(
            record.extra.get("medialist").and_then(|v| v.as_str()),
            Some("foyer.json")
        );
    }
}
