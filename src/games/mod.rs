//! Game variants.
//!
//! ## Key Types
//!
//! - `SoloSession`: one player, one score
//! - `MultiplayerSession`: room code, roster, host-driven start, winner
//! - `ClaimResult`: what a claimant is told after a claim
//! - `SoloView` / `MultiplayerView` / `WaitingRoomView`: read-only projections

pub mod multiplayer;
pub mod solo;
pub mod view;

pub use multiplayer::MultiplayerSession;
pub use solo::SoloSession;
pub use view::{format_elapsed, status_message, MultiplayerView, SoloView, WaitingRoomView};

use crate::cards::Card;
use crate::core::{ClaimError, ClaimRejection};

/// Outcome of a claim, as reported to the claimant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimResult {
    pub accepted: bool,
    /// Display message.
    pub message: String,
    /// The cards claimed; empty when the positions were malformed.
    pub cards: Vec<Card>,
    /// Claimant's score after the claim.
    pub score: u32,
    pub error: Option<ClaimError>,
}

impl ClaimResult {
    pub(crate) fn accepted(message: String, cards: [Card; 3], score: u32) -> Self {
        Self {
            accepted: true,
            message,
            cards: cards.to_vec(),
            score,
            error: None,
        }
    }

    pub(crate) fn rejected(message: String, rejection: ClaimRejection, score: u32) -> Self {
        Self {
            accepted: false,
            message,
            cards: rejection.cards,
            score,
            error: Some(rejection.error),
        }
    }
}
