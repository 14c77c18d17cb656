//! Error taxonomy of the game core

use thiserror::Error;

use crate::session::{SessionEvent, SessionState};

#[derive(Debug, Error)]
pub enum GameError {
    /// A vocabulary or asset file could not be opened or read
    #[error("resource unavailable: {what}")]
    Resource {
        what: String,
        #[source]
        source: std::io::Error,
    },

    /// Session resources could not be produced
    #[error("could not allocate session resources: {0}")]
    Allocation(String),

    /// Malformed pointer packet framing
    #[error("pointer protocol error: {0}")]
    Protocol(String),

    /// The current state has no handler for the event
    #[error("no transition from {state:?} on {event:?}")]
    IllegalTransition {
        state: SessionState,
        event: SessionEvent,
    },

    /// Configuration could not be parsed or holds unusable values
    #[error("invalid configuration: {0}")]
    Config(String),
}
