//! Hijack Errors
//!
//! Failures a hijack transition can report. None of them is fatal: the
//! controller logs the error and stays (or returns to) idle.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HijackError {
    /// The camera singleton does not exist yet
    NoCamera,
    /// No player-controlled character in the scene
    NoPlayer,
    /// Nobody else in the scene is worth watching
    NoTargets,
    /// A controller is already installed for this process
    AlreadyInstalled,
    /// Construction of the controller failed
    Setup(String),
}

impl fmt::Display for HijackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HijackError::NoCamera => write!(f, "camera is not available"),
            HijackError::NoPlayer => write!(f, "player character not found"),
            HijackError::NoTargets => write!(f, "no characters to observe"),
            HijackError::AlreadyInstalled => write!(f, "hijack controller already installed"),
            HijackError::Setup(reason) => write!(f, "hijack controller setup failed: {reason}"),
        }
    }
}

impl std::error::Error for HijackError {}
