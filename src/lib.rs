//! # set-engine
//!
//! Game engine for the pattern-matching card game Set, for one player or
//! many sharing a board.
//!
//! ## Design Principles
//!
//! 1. **Pure rules**: Validation and enumeration are free functions over card
//!    slices. They never touch session state.
//!
//! 2. **One board state machine**: Solo and multiplayer share `SessionCore`;
//!    variants only add scoring, rosters and views.
//!
//! 3. **Explicit randomness**: Every shuffle and room code draws from a
//!    `GameRng` passed in by the caller, so games replay from a seed.
//!
//! 4. **Snapshots at the boundary**: Stores receive whole sessions and hand
//!    back copies. Concurrent writers are settled by compare-and-set, never
//!    by shared mutable state.
//!
//! ## Modules
//!
//! - `core`: Players, session core state, event log, RNG, configuration, errors
//! - `cards`: Cards, themes and palettes, the deck
//! - `zones`: Board (deck zone -> visible zone) and its replenishment rule
//! - `rules`: Set validation, enumeration, claim requests
//! - `games`: Solo and multiplayer sessions, view projections
//! - `store`: State store contract, snapshots, in-memory store, identity
//!
//! ## Example
//!
//! ```
//! use set_engine::{EngineConfig, GameRng, SoloSession};
//!
//! let mut rng = GameRng::new(2024);
//! let mut game = SoloSession::new(None, EngineConfig::default(), &mut rng);
//!
//! while let Some(set) = game.hint() {
//!     assert!(game.attempt_claim(set.positions, "Ada").accepted);
//! }
//! assert!(game.is_complete());
//! assert_eq!(game.view("Ada").end_message, "No more sets available! Game completed!");
//! ```

pub mod cards;
pub mod core;
pub mod games;
pub mod rules;
pub mod store;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ClaimError, ClaimRejection, EngineConfig, EventLog, GameRng, LogEntry, Player, PlayerId,
    Roster, RosterError, SessionCore, StoreError, StoreResult, ThemeError,
};

pub use crate::cards::{
    Attribute, Card, Deck, Palette, PaletteRemap, ThemeConfiguration, ThemeDimension,
};

pub use crate::zones::{Board, BoardPhase};

pub use crate::rules::{
    count_valid_triples, enumerate_valid_triples, has_valid_triple, is_valid_set, is_valid_triple,
    ClaimPositions, ClaimRequest, Triple,
};

pub use crate::games::{
    ClaimResult, MultiplayerSession, MultiplayerView, SoloSession, SoloView, WaitingRoomView,
};

pub use crate::store::{
    cleanup_stale_rooms, create_room, update_room, IdentityProvider, LocalIdentity, MemoryStore,
    SessionSnapshot, StateStore,
};
