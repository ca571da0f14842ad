//! Card system: cards, themes and the deck.
//!
//! ## Key Types
//!
//! - `Card`: Immutable four-attribute value
//! - `ThemeConfiguration`: Palettes for the themed attributes
//! - `PaletteRemap`: Positional rewrite applied when a palette changes
//! - `Deck`: The 81 cards of a theme plus the deal cursor

pub mod card;
pub mod deck;
pub mod theme;

pub use card::{Attribute, AttributeValue, Card};
pub use deck::Deck;
pub use theme::{Palette, PaletteRemap, ThemeConfiguration, ThemeDimension};
