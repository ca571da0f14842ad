//! Card locations: the deck zone and the visible board.
//!
//! ## Key Types
//!
//! - `Board`: Deck plus visible cards, with the replenishment invariant
//! - `BoardPhase`: Dealing / Playable / Exhausted

pub mod board;

pub use board::{Board, BoardPhase};
