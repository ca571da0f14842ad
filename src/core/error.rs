//! Error types.
//!
//! None of these are fatal. Claim and roster errors describe rejected input
//! and leave the session untouched; store errors come from the boundary.

use thiserror::Error;

use crate::cards::ThemeDimension;

/// Why a claim was rejected.
///
/// The `Display` text is the message shown to the claimant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// The claim did not name exactly three cards.
    #[error("Must select exactly {expected} cards")]
    WrongCardCount { expected: usize, got: usize },

    /// A position does not exist on the current board.
    #[error("Invalid card selection: position {position} is not on a board of {board_size} cards")]
    PositionOutOfRange { position: i64, board_size: usize },

    /// The same position was named twice.
    #[error("Invalid card selection: position {0} selected more than once")]
    DuplicatePosition(usize),

    /// The claimant is not on the roster.
    #[error("Player not found")]
    PlayerNotFound(String),

    /// The three cards do not form a set.
    #[error("Not a valid set")]
    NotASet,

    /// The game is over; the board is frozen.
    #[error("Game is already complete")]
    GameCompleted,
}

impl ClaimError {
    /// Whether the claim was malformed, as opposed to a well-formed wrong guess.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, ClaimError::NotASet)
    }
}

/// Theme configuration errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// The dimension name is neither `color` nor `shape`.
    #[error("Unknown theme dimension: {0}")]
    UnknownDimension(String),

    /// Palette index outside the palette list.
    #[error("{dimension} palette index {index} out of range (have {len})")]
    IndexOutOfRange {
        dimension: ThemeDimension,
        index: usize,
        len: usize,
    },

    /// A dimension was configured with no palettes.
    #[error("No {0} palettes configured")]
    EmptyPalettes(ThemeDimension),

    /// A palette repeats a value.
    #[error("{dimension} palette repeats value {value:?}")]
    DuplicateValue {
        dimension: ThemeDimension,
        value: String,
    },

    /// The fill types repeat a value.
    #[error("Fill types repeat value {0:?}")]
    DuplicateFill(String),

    /// Counts must be 1, 2 and 3 in some order.
    #[error("Invalid counts {0:?}")]
    InvalidCounts([u8; 3]),
}

/// Multiplayer lobby errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RosterError {
    /// No roster entry has this identity.
    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    /// Only the host may do this.
    #[error("Player {0} is not the host")]
    NotHost(String),

    /// Too few players to start.
    #[error("Need at least {required} players to start, have {actual}")]
    NotEnoughPlayers { required: usize, actual: usize },

    /// The game has already started.
    #[error("Game already started")]
    AlreadyStarted,
}

/// State store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot could not be encoded or decoded.
    #[error("Snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// The key was written by someone else since it was read.
    #[error("Version conflict on {key}: expected {expected}, found {actual}")]
    Conflict {
        key: String,
        expected: u64,
        actual: u64,
    },

    /// No snapshot stored under the key.
    #[error("No snapshot stored under {0}")]
    NotFound(String),

    /// The snapshot under the key is of the wrong session kind.
    #[error("Snapshot under {0} is not a multiplayer room")]
    WrongKind(String),

    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
