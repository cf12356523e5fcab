//! Card deck generation
//!
//! A deck is the ordered list of face values laid out on the board. Every
//! value appears exactly twice.

use std::fmt;

use crate::rng::GameRng;
use crate::state::{GridSize, Theme};

/// One entry of the icon catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Icon {
    pub name: &'static str,
    /// Single-column glyph drawn on the card face
    pub glyph: &'static str,
}

const fn icon(name: &'static str, glyph: &'static str) -> Icon {
    Icon { name, glyph }
}

/// Fixed ordered icon catalog; large enough for a 6x6 board.
pub const ICONS: [Icon; 18] = [
    icon("spade", "♠"),
    icon("club", "♣"),
    icon("heart", "♥"),
    icon("diamond", "♦"),
    icon("star", "★"),
    icon("sun", "☀"),
    icon("umbrella", "☂"),
    icon("snowman", "☃"),
    icon("note", "♪"),
    icon("flag", "⚑"),
    icon("queen", "♛"),
    icon("plane", "✈"),
    icon("flower", "✿"),
    icon("yin-yang", "☯"),
    icon("knight", "♞"),
    icon("command", "⌘"),
    icon("phone", "☎"),
    icon("scissors", "✂"),
];

/// The value two matching cards share
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceValue {
    Number(u8),
    Icon(&'static Icon),
}

impl fmt::Display for FaceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceValue::Number(n) => write!(f, "{}", n),
            FaceValue::Icon(icon) => f.write_str(icon.glyph),
        }
    }
}

/// Deck configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// The icon catalog cannot supply one icon per pair
    IconCatalogTooSmall { needed: usize, available: usize },
    /// The same icon name appears twice in the catalog
    DuplicateIcon(&'static str),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::IconCatalogTooSmall { needed, available } => write!(
                f,
                "icon catalog has {} entries but {} are needed",
                available, needed
            ),
            DeckError::DuplicateIcon(name) => write!(f, "icon '{}' is listed twice", name),
        }
    }
}

impl std::error::Error for DeckError {}

/// Check that a catalog can back every supported grid size
pub fn validate_catalog(catalog: &[Icon]) -> Result<(), DeckError> {
    let needed = GridSize::Six.pair_count();
    if catalog.len() < needed {
        return Err(DeckError::IconCatalogTooSmall {
            needed,
            available: catalog.len(),
        });
    }
    for (i, entry) in catalog.iter().enumerate() {
        if catalog[..i].iter().any(|seen| seen.name == entry.name) {
            return Err(DeckError::DuplicateIcon(entry.name));
        }
    }
    Ok(())
}

/// Shuffled, paired face values for one board session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<FaceValue>,
}

impl Deck {
    /// Build and shuffle a deck using the built-in icon catalog
    pub fn generate(grid: GridSize, theme: Theme, rng: &mut GameRng) -> Result<Self, DeckError> {
        Self::generate_from(grid, theme, &ICONS, rng)
    }

    /// Build and shuffle a deck drawing icons from `catalog`
    pub fn generate_from(
        grid: GridSize,
        theme: Theme,
        catalog: &'static [Icon],
        rng: &mut GameRng,
    ) -> Result<Self, DeckError> {
        let pairs = grid.pair_count();
        let faces: Vec<FaceValue> = match theme {
            Theme::Numbers => (0..pairs as u8).map(FaceValue::Number).collect(),
            Theme::Icons => {
                if catalog.len() < pairs {
                    return Err(DeckError::IconCatalogTooSmall {
                        needed: pairs,
                        available: catalog.len(),
                    });
                }
                catalog[..pairs].iter().map(FaceValue::Icon).collect()
            }
        };

        let mut cards = Vec::with_capacity(pairs * 2);
        cards.extend_from_slice(&faces);
        cards.extend_from_slice(&faces);

        let mut deck = Self { cards };
        deck.shuffle(rng);
        Ok(deck)
    }

    /// Lay out a deck in a fixed order
    pub fn from_cards(cards: Vec<FaceValue>) -> Self {
        Self { cards }
    }

    /// Reorder the same cards in place
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<FaceValue> {
        self.cards.get(index).copied()
    }

    pub fn cards(&self) -> &[FaceValue] {
        &self.cards
    }
}
