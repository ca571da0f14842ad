//! Set validation and exhaustive enumeration.
//!
//! Three cards form a set when, for every attribute, the three values are
//! either all equal or pairwise distinct. Exactly two distinct values on any
//! attribute breaks the set.

use serde::{Deserialize, Serialize};

use crate::cards::{Attribute, Card};

/// True if three values are all equal or all different.
#[inline]
pub fn all_same_or_all_different<T: PartialEq>(a: T, b: T, c: T) -> bool {
    let ab = a == b;
    let bc = b == c;
    let ac = a == c;
    (ab && bc) || (!ab && !bc && !ac)
}

/// Check whether three cards form a set.
///
/// Symmetric in its arguments.
///
/// ```
/// use set_engine::cards::Card;
/// use set_engine::rules::is_valid_triple;
///
/// let a = Card::new("oval", "red", "solid", 1);
/// let b = Card::new("oval", "red", "solid", 2);
/// let c = Card::new("oval", "red", "solid", 3);
/// assert!(is_valid_triple(&a, &b, &c));
/// ```
#[must_use]
pub fn is_valid_triple(a: &Card, b: &Card, c: &Card) -> bool {
    Attribute::ALL.iter().all(|&attribute| {
        all_same_or_all_different(
            a.attribute(attribute),
            b.attribute(attribute),
            c.attribute(attribute),
        )
    })
}

/// Check a card slice. Anything but exactly three cards is not a set.
#[must_use]
pub fn is_valid_set(cards: &[Card]) -> bool {
    match cards {
        [a, b, c] => is_valid_triple(a, b, c),
        _ => false,
    }
}

/// A valid set found on the board: where it sits and what it is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    /// Board positions, ascending.
    pub positions: [usize; 3],
    /// The cards at those positions.
    pub cards: [Card; 3],
}

/// Every 3-combination of `0..len` as ascending position triples.
///
/// Order is nested-loop order: `i < j < k`, each ascending.
pub fn combinations(len: usize) -> impl Iterator<Item = [usize; 3]> {
    (0..len).flat_map(move |i| {
        (i + 1..len).flat_map(move |j| (j + 1..len).map(move |k| [i, j, k]))
    })
}

/// Lazily yield every valid set among the visible cards.
pub fn valid_triples(visible: &[Card]) -> impl Iterator<Item = Triple> + '_ {
    combinations(visible.len()).filter_map(move |[i, j, k]| {
        let (a, b, c) = (&visible[i], &visible[j], &visible[k]);
        is_valid_triple(a, b, c).then(|| Triple {
            positions: [i, j, k],
            cards: [a.clone(), b.clone(), c.clone()],
        })
    })
}

/// Exhaustively enumerate every valid set among the visible cards.
///
/// Examines all combinations; results are in `(i, j, k)` ascending order.
#[must_use]
pub fn enumerate_valid_triples(visible: &[Card]) -> Vec<Triple> {
    valid_triples(visible).collect()
}

/// Number of valid sets on the board.
#[must_use]
pub fn count_valid_triples(visible: &[Card]) -> usize {
    combinations(visible.len())
        .filter(|&[i, j, k]| is_valid_triple(&visible[i], &visible[j], &visible[k]))
        .count()
}

/// Whether any valid set exists. Stops at the first one.
#[must_use]
pub fn has_valid_triple(visible: &[Card]) -> bool {
    combinations(visible.len())
        .any(|[i, j, k]| is_valid_triple(&visible[i], &visible[j], &visible[k]))
}

/// The first set in enumeration order, if any.
#[must_use]
pub fn hint(visible: &[Card]) -> Option<Triple> {
    valid_triples(visible).next()
}
