//! Claim requests: the raw positions a player picked, checked once.
//!
//! UI payloads arrive as loose index lists. A `ClaimRequest` holds them as
//! given; `validate` turns them into `ClaimPositions`, which are guaranteed
//! to be three distinct positions on the current board.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::config::SET_SIZE;
use crate::core::ClaimError;

/// Positions a player submitted, unchecked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// SmallVec keeps the usual three positions off the heap.
    positions: SmallVec<[i64; 3]>,
}

impl ClaimRequest {
    /// Wrap a raw index list.
    #[must_use]
    pub fn new(positions: &[i64]) -> Self {
        Self {
            positions: SmallVec::from_slice(positions),
        }
    }

    /// Raw positions as submitted.
    #[must_use]
    pub fn positions(&self) -> &[i64] {
        &self.positions
    }

    /// Check the request against a board of `board_size` cards.
    ///
    /// Rejects, in order: wrong count, out-of-range position, repeated position.
    pub fn validate(&self, board_size: usize) -> Result<ClaimPositions, ClaimError> {
        let [a, b, c] = self.positions[..] else {
            return Err(ClaimError::WrongCardCount {
                expected: SET_SIZE,
                got: self.positions.len(),
            });
        };

        let mut checked = [0usize; 3];
        for (slot, raw) in checked.iter_mut().zip([a, b, c]) {
            *slot = usize::try_from(raw)
                .ok()
                .filter(|&p| p < board_size)
                .ok_or(ClaimError::PositionOutOfRange {
                    position: raw,
                    board_size,
                })?;
        }

        for i in 0..checked.len() {
            if checked[..i].contains(&checked[i]) {
                return Err(ClaimError::DuplicatePosition(checked[i]));
            }
        }

        Ok(ClaimPositions(checked))
    }
}

impl From<Vec<i64>> for ClaimRequest {
    fn from(positions: Vec<i64>) -> Self {
        Self {
            positions: SmallVec::from_vec(positions),
        }
    }
}

impl From<&[usize]> for ClaimRequest {
    fn from(positions: &[usize]) -> Self {
        Self {
            positions: positions
                .iter()
                .map(|&p| i64::try_from(p).unwrap_or(i64::MAX))
                .collect(),
        }
    }
}

impl From<[usize; 3]> for ClaimRequest {
    fn from(positions: [usize; 3]) -> Self {
        Self::from(&positions[..])
    }
}

/// Three distinct, in-range board positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimPositions([usize; 3]);

impl ClaimPositions {
    /// Positions in submission order.
    #[must_use]
    pub fn get(&self) -> [usize; 3] {
        self.0
    }

    /// Positions sorted high to low, the only safe order for removal.
    #[must_use]
    pub fn descending(&self) -> [usize; 3] {
        let mut sorted = self.0;
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let positions = ClaimRequest::new(&[4, 0, 7]).validate(12).unwrap();
        assert_eq!(positions.get(), [4, 0, 7]);
        assert_eq!(positions.descending(), [7, 4, 0]);
    }

    #[test]
    fn test_wrong_count() {
        assert_eq!(
            ClaimRequest::new(&[0, 1]).validate(12),
            Err(ClaimError::WrongCardCount { expected: 3, got: 2 })
        );
        assert_eq!(
            ClaimRequest::new(&[0, 1, 2, 3]).validate(12),
            Err(ClaimError::WrongCardCount { expected: 3, got: 4 })
        );
        assert!(ClaimRequest::new(&[]).validate(12).is_err());
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            ClaimRequest::new(&[0, 1, 12]).validate(12),
            Err(ClaimError::PositionOutOfRange { position: 12, board_size: 12 })
        );
        assert_eq!(
            ClaimRequest::new(&[-1, 1, 2]).validate(12),
            Err(ClaimError::PositionOutOfRange { position: -1, board_size: 12 })
        );
    }

    #[test]
    fn test_duplicate_position() {
        assert_eq!(
            ClaimRequest::new(&[3, 5, 3]).validate(12),
            Err(ClaimError::DuplicatePosition(3))
        );
    }

    #[test]
    fn test_conversions() {
        let from_vec: ClaimRequest = vec![1, 2, 3].into();
        let from_array: ClaimRequest = [1usize, 2, 3].into();
        assert_eq!(from_vec, from_array);
        assert_eq!(from_vec.positions(), &[1, 2, 3]);
    }
}
