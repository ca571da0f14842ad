//! Cards and their four attributes.
//!
//! A card is a plain value: two cards with the same shape, color, fill and
//! count are equal no matter where they came from.
//!
//! ## Attributes
//!
//! - `Shape`, `Color`, `Fill`: symbolic values taken from the active theme
//! - `Count`: number of symbols, 1-3

use serde::{Deserialize, Serialize};

/// One of the four attribute dimensions of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Shape,
    Color,
    Fill,
    Count,
}

impl Attribute {
    /// Every attribute, in evaluation order.
    pub const ALL: [Attribute; 4] = [
        Attribute::Shape,
        Attribute::Color,
        Attribute::Fill,
        Attribute::Count,
    ];
}

/// Value of one attribute on one card.
///
/// Borrowed from the card so comparisons do not allocate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeValue<'a> {
    /// Symbolic value (shape, color, fill).
    Text(&'a str),
    /// Symbol count.
    Count(u8),
}

/// An immutable Set card.
///
/// ## Example
///
/// ```
/// use set_engine::cards::{Attribute, AttributeValue, Card};
///
/// let card = Card::new("oval", "red", "solid", 2);
/// assert_eq!(card.attribute(Attribute::Count), AttributeValue::Count(2));
/// assert_eq!(card, Card::new("oval", "red", "solid", 2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    shape: String,
    color: String,
    fill: String,
    count: u8,
}

impl Card {
    /// Create a card. `count` is 1, 2 or 3.
    pub fn new(
        shape: impl Into<String>,
        color: impl Into<String>,
        fill: impl Into<String>,
        count: u8,
    ) -> Self {
        debug_assert!((1..=3).contains(&count), "card count {} out of range", count);
        Self {
            shape: shape.into(),
            color: color.into(),
            fill: fill.into(),
            count,
        }
    }

    #[must_use]
    pub fn shape(&self) -> &str {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn fill(&self) -> &str {
        &self.fill
    }

    #[must_use]
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Get the value of one attribute.
    #[must_use]
    pub fn attribute(&self, attribute: Attribute) -> AttributeValue<'_> {
        match attribute {
            Attribute::Shape => AttributeValue::Text(&self.shape),
            Attribute::Color => AttributeValue::Text(&self.color),
            Attribute::Fill => AttributeValue::Text(&self.fill),
            Attribute::Count => AttributeValue::Count(self.count),
        }
    }

    /// Mutable access to a themed text attribute, for palette remaps only.
    pub(crate) fn text_attribute_mut(&mut self, attribute: Attribute) -> Option<&mut String> {
        match attribute {
            Attribute::Shape => Some(&mut self.shape),
            Attribute::Color => Some(&mut self.color),
            Attribute::Fill => Some(&mut self.fill),
            Attribute::Count => None,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.count, self.color, self.fill, self.shape)
    }
}
