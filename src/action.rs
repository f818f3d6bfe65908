use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// Zero-based seat index of a player within the game.
pub type PlayerId = usize;

/// Action available to an agent during its turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from the hand onto the discard pile.
    Play(Card),
    /// Draw from the draw pile (the whole pending count while a draw stack is open).
    Draw,
    /// Keep the card just drawn and end the turn. Only legal right after drawing
    /// a playable card with draw-and-play enabled.
    Pass,
}

impl Action {
    /// Returns the card if the action is a play.
    pub fn card(&self) -> Option<Card> {
        match self {
            Action::Play(card) => Some(*card),
            _ => None,
        }
    }

    pub fn is_play(&self) -> bool {
        matches!(self, Action::Play(_))
    }
}

/// Turn order around the table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Seat offset applied when advancing one step.
    pub fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// What happened when an action was applied.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A card was played. `color` is the active color afterwards, which for a
    /// wild card is the color the player bound to it.
    Played {
        player: PlayerId,
        card: Card,
        color: Color,
    },
    /// The player drew a single card and the turn moved on.
    Drew { player: PlayerId },
    /// The player drew a playable card and may still play it.
    DrewPlayable { player: PlayerId, card: Card },
    /// The player answered an open draw stack by taking all of it.
    TookPenalty { player: PlayerId, count: usize },
    /// The player kept the drawn card.
    Passed { player: PlayerId },
    /// The first player named the color of an opening wild.
    ColorChosen { player: PlayerId, color: Color },
}
