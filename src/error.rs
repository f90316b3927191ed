//! Error types used by the player runtime and by shows.
//!
//! Two enums cover the two failure domains:
//!
//! - [`PlayerError`] — failures of the orchestration runtime itself:
//!   profile/initialisation problems, supervisor misuse, a termination
//!   grace window running out.
//! - [`ShowError`] — failures inside an individual show's run future.
//!
//! Errors never cross a component boundary as a panic. A show that fails
//! internally returns [`ShowError`] from its run future; the supervisor
//! turns that into an error completion and the orchestrator tears the
//! session down through the normal termination cascade.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors produced by the player runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PlayerError {
    /// A required profile configuration file was not found on the search path.
    #[error("{name} not found; searched {searched:?}")]
    MissingConfig {
        /// File name looked for (e.g. `resources.cfg`).
        name: &'static str,
        /// The directories that were searched, in priority order.
        searched: Vec<PathBuf>,
    },

    /// The show-list file could not be read or parsed.
    #[error("showlist unusable at {path}: {message}")]
    ShowlistUnusable {
        /// Path of the show-list file.
        path: PathBuf,
        /// Underlying read/parse failure.
        message: String,
    },

    /// The profile was produced for a different issue of the player.
    #[error("profile issue {profile} does not match player issue {player}")]
    IssueMismatch {
        /// Issue recorded in the profile's show-list.
        profile: String,
        /// Issue of the running player.
        player: String,
    },

    /// The `start` show is missing from the show-list.
    #[error("show [start] not found in showlist")]
    StarterShowMissing,

    /// A start-list named a show reference that is not in the catalog.
    #[error("unknown show reference: {reference}")]
    UnknownShow {
        /// The reference that failed to resolve.
        reference: String,
    },

    /// A show with a live instance was asked to start again.
    #[error("show {reference} is already running")]
    ShowAlreadyRunning {
        /// The reference that is already live.
        reference: String,
    },

    /// The show factory could not build a show from its catalog record.
    #[error("cannot build show {reference}: {message}")]
    ShowBuild {
        /// Reference of the record that failed.
        reference: String,
        /// Factory-supplied detail.
        message: String,
    },

    /// `ShowSupervisor::init` was called a second time in the same run.
    #[error("supervisor already initialised for this run")]
    SupervisorReinit,

    /// A supervisor operation was called before `init`.
    #[error("supervisor not initialised")]
    SupervisorNotInitialised,

    /// The GPIO backend failed to set up.
    #[error("gpio init failed: {message}")]
    GpioInit {
        /// Backend-supplied detail.
        message: String,
    },

    /// Termination grace window elapsed with shows still live.
    #[error("termination grace {grace:?} exceeded; stuck shows: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// References of shows that never reported completion.
        stuck: Vec<String>,
    },

    /// The run ended with reason `error` (runtime failure inside the session).
    #[error("session ended with error: {message}")]
    SessionError {
        /// Human-readable detail carried to the exit path.
        message: String,
    },
}

impl PlayerError {
    /// Returns a short stable label (snake_case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            PlayerError::MissingConfig { .. } => "missing_config",
            PlayerError::ShowlistUnusable { .. } => "showlist_unusable",
            PlayerError::IssueMismatch { .. } => "issue_mismatch",
            PlayerError::StarterShowMissing => "starter_show_missing",
            PlayerError::UnknownShow { .. } => "unknown_show",
            PlayerError::ShowAlreadyRunning { .. } => "show_already_running",
            PlayerError::ShowBuild { .. } => "show_build",
            PlayerError::SupervisorReinit => "supervisor_reinit",
            PlayerError::SupervisorNotInitialised => "supervisor_not_initialised",
            PlayerError::GpioInit { .. } => "gpio_init",
            PlayerError::GraceExceeded { .. } => "grace_exceeded",
            PlayerError::SessionError { .. } => "session_error",
        }
    }

    /// True for failures that abort start-up before the session runs.
    pub fn is_initialisation(&self) -> bool {
        matches!(
            self,
            PlayerError::MissingConfig { .. }
                | PlayerError::ShowlistUnusable { .. }
                | PlayerError::IssueMismatch { .. }
                | PlayerError::StarterShowMissing
                | PlayerError::GpioInit { .. }
        )
    }
}

/// Errors produced inside a show's run future.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ShowError {
    /// A config key the show needs was absent from the resources file.
    #[error("resource {section}:{item} not found")]
    ResourceMissing {
        /// Resources section.
        section: String,
        /// Item within the section.
        item: String,
    },

    /// The show's own presentation logic failed.
    #[error("show failed: {message}")]
    Failed {
        /// Show-supplied detail.
        message: String,
    },
}

impl ShowError {
    /// Returns a short stable label (snake_case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ShowError::ResourceMissing { .. } => "resource_missing",
            ShowError::Failed { .. } => "show_failed",
        }
    }
}
