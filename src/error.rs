use thiserror::Error;

use crate::action::{Action, PlayerId};
use crate::card::{Card, Color};

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error(transparent)]
    IllegalMove(#[from] IllegalMove),
    #[error("no cards left in either the draw or the discard pile")]
    DeckExhausted,
    #[error("no card has been discarded yet")]
    EmptyDiscard,
    #[error("{0} cannot be chosen as the active color")]
    InvalidColor(Color),
    #[error("{0} is not part of the standard deck")]
    InvalidCard(Card),
    #[error("game is already over")]
    GameOver,
    #[error("no opening color is waiting to be chosen")]
    NoColorPending,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// An action returned by a player that is not in the computed legal-move set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("illegal move by player {player}: {action:?} (legal: {legal:?})")]
pub struct IllegalMove {
    pub player: PlayerId,
    pub action: Action,
    pub legal: Vec<Action>,
}
