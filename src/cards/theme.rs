//! Theme configuration: which symbolic values populate each attribute.
//!
//! Colors and shapes come from selectable palettes. Fills and counts are
//! fixed. Switching palettes never relabels cards at random: a card holding
//! the value at slot `i` of the old palette gets slot `i` of the new one.

use serde::{Deserialize, Serialize};

use super::card::{Attribute, Card};
use crate::core::ThemeError;

/// Three distinct symbolic values for one attribute.
pub type Palette = [String; 3];

/// A themed (selectable) attribute dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeDimension {
    Color,
    Shape,
}

impl ThemeDimension {
    /// The card attribute this dimension drives.
    #[must_use]
    pub fn attribute(self) -> Attribute {
        match self {
            ThemeDimension::Color => Attribute::Color,
            ThemeDimension::Shape => Attribute::Shape,
        }
    }
}

impl std::fmt::Display for ThemeDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeDimension::Color => f.write_str("color"),
            ThemeDimension::Shape => f.write_str("shape"),
        }
    }
}

impl std::str::FromStr for ThemeDimension {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "color" => Ok(ThemeDimension::Color),
            "shape" => Ok(ThemeDimension::Shape),
            other => Err(ThemeError::UnknownDimension(other.to_string())),
        }
    }
}

fn palette(values: [&str; 3]) -> Palette {
    values.map(str::to_string)
}

/// Active theme for a session.
///
/// Selected indices are always within their palette lists; deserialization
/// re-checks this.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTheme")]
pub struct ThemeConfiguration {
    color_palettes: Vec<Palette>,
    shape_palettes: Vec<Palette>,
    fill_types: Palette,
    counts: [u8; 3],
    color_index: usize,
    shape_index: usize,
}

#[derive(Deserialize)]
struct RawTheme {
    color_palettes: Vec<Palette>,
    shape_palettes: Vec<Palette>,
    fill_types: Palette,
    counts: [u8; 3],
    color_index: usize,
    shape_index: usize,
}

impl TryFrom<RawTheme> for ThemeConfiguration {
    type Error = ThemeError;

    fn try_from(raw: RawTheme) -> Result<Self, Self::Error> {
        let mut theme = ThemeConfiguration::new(raw.color_palettes, raw.shape_palettes)?;
        theme.fill_types = check_fills(raw.fill_types)?;
        theme.counts = check_counts(raw.counts)?;
        theme.select(ThemeDimension::Color, raw.color_index)?;
        theme.select(ThemeDimension::Shape, raw.shape_index)?;
        Ok(theme)
    }
}

impl Default for ThemeConfiguration {
    fn default() -> Self {
        Self {
            color_palettes: vec![
                palette(["#ff0101", "#f1c40f", "#008002"]), // red, yellow, green
                palette(["#800080", "#008002", "#ff0101"]), // purple, green, red
                palette(["#1f73bc", "#0da215", "#dd9427"]), // blue, green, orange
            ],
            shape_palettes: vec![
                palette(["oval", "diamond", "squiggle"]),
                palette(["hearts", "squiggle", "triangle"]),
                palette(["squiggle", "hearts", "triangle"]),
            ],
            fill_types: palette(["solid", "striped", "outline"]),
            counts: [1, 2, 3],
            color_index: 0,
            shape_index: 0,
        }
    }
}

impl ThemeConfiguration {
    /// Build a theme from custom palettes, with the first of each selected.
    ///
    /// Fills and counts keep their stock values.
    pub fn new(
        color_palettes: Vec<Palette>,
        shape_palettes: Vec<Palette>,
    ) -> Result<Self, ThemeError> {
        check_palettes(ThemeDimension::Color, &color_palettes)?;
        check_palettes(ThemeDimension::Shape, &shape_palettes)?;
        Ok(Self {
            color_palettes,
            shape_palettes,
            ..Self::default()
        })
    }

    /// Palettes available for a dimension.
    #[must_use]
    pub fn palettes(&self, dimension: ThemeDimension) -> &[Palette] {
        match dimension {
            ThemeDimension::Color => &self.color_palettes,
            ThemeDimension::Shape => &self.shape_palettes,
        }
    }

    /// Selected palette index for a dimension.
    #[must_use]
    pub fn selected_index(&self, dimension: ThemeDimension) -> usize {
        match dimension {
            ThemeDimension::Color => self.color_index,
            ThemeDimension::Shape => self.shape_index,
        }
    }

    /// Selected palette for a dimension.
    #[must_use]
    pub fn current(&self, dimension: ThemeDimension) -> &Palette {
        &self.palettes(dimension)[self.selected_index(dimension)]
    }

    #[must_use]
    pub fn current_colors(&self) -> &Palette {
        self.current(ThemeDimension::Color)
    }

    #[must_use]
    pub fn current_shapes(&self) -> &Palette {
        self.current(ThemeDimension::Shape)
    }

    #[must_use]
    pub fn fill_types(&self) -> &Palette {
        &self.fill_types
    }

    #[must_use]
    pub fn counts(&self) -> [u8; 3] {
        self.counts
    }

    /// Select a different palette for a dimension.
    ///
    /// Returns the remap that existing cards need. Out-of-range indices are
    /// rejected and leave the theme unchanged.
    pub fn select(
        &mut self,
        dimension: ThemeDimension,
        index: usize,
    ) -> Result<PaletteRemap, ThemeError> {
        let len = self.palettes(dimension).len();
        if index >= len {
            return Err(ThemeError::IndexOutOfRange { dimension, index, len });
        }

        let from = self.current(dimension).clone();
        match dimension {
            ThemeDimension::Color => self.color_index = index,
            ThemeDimension::Shape => self.shape_index = index,
        }
        let to = self.current(dimension).clone();

        Ok(PaletteRemap { dimension, from, to })
    }
}

fn check_palettes(dimension: ThemeDimension, palettes: &[Palette]) -> Result<(), ThemeError> {
    if palettes.is_empty() {
        return Err(ThemeError::EmptyPalettes(dimension));
    }
    for palette in palettes {
        for (i, value) in palette.iter().enumerate() {
            if palette[..i].contains(value) {
                return Err(ThemeError::DuplicateValue {
                    dimension,
                    value: value.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_fills(fills: Palette) -> Result<Palette, ThemeError> {
    for (i, fill) in fills.iter().enumerate() {
        if fills[..i].contains(fill) {
            return Err(ThemeError::DuplicateFill(fill.clone()));
        }
    }
    Ok(fills)
}

fn check_counts(counts: [u8; 3]) -> Result<[u8; 3], ThemeError> {
    let mut sorted = counts;
    sorted.sort_unstable();
    if sorted == [1, 2, 3] {
        Ok(counts)
    } else {
        Err(ThemeError::InvalidCounts(counts))
    }
}

/// Positional mapping from an old palette to a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteRemap {
    pub dimension: ThemeDimension,
    pub from: Palette,
    pub to: Palette,
}

impl PaletteRemap {
    /// Whether the remap changes anything.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }

    /// Rewrite one card. Values not in the old palette are left alone.
    ///
    /// Returns true if the card changed.
    pub fn apply(&self, card: &mut Card) -> bool {
        let Some(value) = card.text_attribute_mut(self.dimension.attribute()) else {
            return false;
        };
        match self.from.iter().position(|old| *old == *value) {
            Some(slot) if *value != self.to[slot] => {
                *value = self.to[slot].clone();
                true
            }
            _ => false,
        }
    }

    /// Rewrite every card in a slice, returning how many changed.
    pub fn apply_all<'a>(&self, cards: impl IntoIterator<Item = &'a mut Card>) -> usize {
        cards
            .into_iter()
            .map(|card| self.apply(card))
            .filter(|&changed| changed)
            .count()
    }
}
