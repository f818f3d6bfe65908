use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Card color. `Wild` is only carried by wild-family cards and never becomes
/// the active color once a wild has been played.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Wild,
}

impl Color {
    /// The four colors a player may bind to a wild card.
    pub const SUITS: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    #[inline]
    pub fn is_suit(&self) -> bool {
        !matches!(self, Color::Wild)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Wild => "Wild",
        };
        f.write_str(name)
    }
}

/// Face of a card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Numbered card between 0 and 9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Number(value) => write!(f, "{value}"),
            Rank::Skip => f.write_str("Skip"),
            Rank::Reverse => f.write_str("Reverse"),
            Rank::DrawTwo => f.write_str("Draw Two"),
            Rank::Wild => f.write_str("Wild"),
            Rank::WildDrawFour => f.write_str("Wild Draw Four"),
        }
    }
}

pub const MAX_NUMBER: u8 = 9;
pub const ACTION_COPIES_PER_COLOR: usize = 2;
pub const NUMBER_COPIES_PER_COLOR: usize = 2;
pub const WILD_COUNT: usize = 4;
pub const WILD_DRAW_FOUR_COUNT: usize = 4;
pub const DECK_SIZE: usize = 108;
pub const HAND_SIZE: usize = 7;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

/// Representation of a single UNO card.
///
/// Cards are plain values: two `Red 5` cards are interchangeable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub rank: Rank,
}

impl Card {
    /// Builds a card without checking that the combination exists in a real deck.
    pub const fn new(color: Color, rank: Rank) -> Self {
        Self { color, rank }
    }

    /// Builds a card restricted to combinations found in the standard deck.
    pub fn try_new(color: Color, rank: Rank) -> Result<Self, GameError> {
        let valid = match rank {
            Rank::Wild | Rank::WildDrawFour => color == Color::Wild,
            Rank::Number(value) => color.is_suit() && value <= MAX_NUMBER,
            Rank::Skip | Rank::Reverse | Rank::DrawTwo => color.is_suit(),
        };
        if valid {
            Ok(Self::new(color, rank))
        } else {
            Err(GameError::InvalidCard(Self::new(color, rank)))
        }
    }

    pub const fn number(color: Color, value: u8) -> Self {
        Self::new(color, Rank::Number(value))
    }

    pub const fn wild() -> Self {
        Self::new(Color::Wild, Rank::Wild)
    }

    pub const fn wild_draw_four() -> Self {
        Self::new(Color::Wild, Rank::WildDrawFour)
    }

    /// Wild-family cards are playable on anything.
    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self.rank, Rank::Wild | Rank::WildDrawFour)
    }

    #[inline]
    pub fn is_action(&self) -> bool {
        matches!(self.rank, Rank::Skip | Rank::Reverse | Rank::DrawTwo)
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self.rank, Rank::Number(_))
    }

    /// Number of cards the next player is forced to draw.
    #[inline]
    pub fn draw_penalty(&self) -> usize {
        match self.rank {
            Rank::DrawTwo => 2,
            Rank::WildDrawFour => 4,
            _ => 0,
        }
    }

    /// Checks whether the card can be played on the given active color and rank.
    #[inline]
    pub fn matches(&self, active_color: Color, active_rank: Rank) -> bool {
        self.is_wild() || self.color == active_color || self.rank == active_rank
    }

    /// Point value when the card is left in a losing hand.
    pub fn points(&self) -> usize {
        match self.rank {
            Rank::Number(value) => value as usize,
            Rank::Skip | Rank::Reverse | Rank::DrawTwo => 20,
            Rank::Wild | Rank::WildDrawFour => 50,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wild() {
            write!(f, "{}", self.rank)
        } else {
            write!(f, "{} {}", self.color, self.rank)
        }
    }
}

/// Builds the full 108-card deck in deterministic order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in Color::SUITS {
        deck.push(Card::number(color, 0));
        for value in 1..=MAX_NUMBER {
            for _ in 0..NUMBER_COPIES_PER_COLOR {
                deck.push(Card::number(color, value));
            }
        }
        for rank in [Rank::Skip, Rank::Reverse, Rank::DrawTwo] {
            for _ in 0..ACTION_COPIES_PER_COLOR {
                deck.push(Card::new(color, rank));
            }
        }
    }
    deck.extend(std::iter::repeat(Card::wild()).take(WILD_COUNT));
    deck.extend(std::iter::repeat(Card::wild_draw_four()).take(WILD_DRAW_FOUR_COUNT));
    deck
}
