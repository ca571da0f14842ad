//! Core engine types: players, session state, event log, RNG, configuration, errors.
//!
//! Nothing here knows whether a session is solo or multiplayer. Variants in
//! `games` wrap `SessionCore` and add their own scoring.

pub mod config;
pub mod error;
pub mod event_log;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{EngineConfig, DEFAULT_PLAYER_NAME, ROOM_CODE_ALPHABET, SET_SIZE};
pub use error::{ClaimError, RosterError, StoreError, StoreResult, ThemeError};
pub use event_log::{EventLog, LogEntry};
pub use player::{Player, PlayerId, Roster};
pub use rng::GameRng;
pub use state::{ClaimRejection, SessionCore};
