//! Error types for linewire
//!
//! Provides a unified error type for all client operations.
//!
//! Each variant identifies the layer that detected the fault: transport
//! (`Connect`, `Io`, `RemoteClosed`), framing (`Corrupt`), or the server
//! itself (`Command`). Transport and framing faults always tear down the
//! connection before they propagate; `Command` leaves it usable.

use thiserror::Error;

/// Result type alias using LinewireError
pub type Result<T> = std::result::Result<T, LinewireError>;

/// Unified error type for linewire operations
#[derive(Debug, Error)]
pub enum LinewireError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed by remote end")]
    RemoteClosed,

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("corrupt framing: {0}")]
    Corrupt(String),

    // -------------------------------------------------------------------------
    // Application Errors
    // -------------------------------------------------------------------------
    /// The server parsed the request but rejected the command.
    ///
    /// Carries the raw status token, the reply body, and the verb of the
    /// command that was rejected. Rendering is left to the caller.
    #[error("command '{}' failed with status '{}'",
            String::from_utf8_lossy(command),
            String::from_utf8_lossy(status))]
    Command {
        status: Vec<u8>,
        body: Vec<Vec<u8>>,
        command: Vec<u8>,
    },

    /// A well-formed `ok` reply whose shape did not match what a typed
    /// command method expects.
    #[error("unexpected reply: {0}")]
    UnexpectedReply(String),
}

impl LinewireError {
    /// True when the fault left the connection unusable.
    ///
    /// `Command` and `UnexpectedReply` concern well-framed replies; the
    /// stream stays in sync and the connection is kept open.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            LinewireError::Command { .. } | LinewireError::UnexpectedReply(_)
        )
    }
}
