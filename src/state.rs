use serde::{Deserialize, Serialize};

use crate::action::{Direction, PlayerId};
use crate::card::{Card, Color, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS, Rank};
use crate::error::GameError;

/// Optional rule variants. Both default to off, matching classic rules.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleSet {
    /// A player who draws a playable card may play it immediately.
    pub draw_and_play: bool,
    /// Draw-two and wild-draw-four may be answered with another draw card,
    /// accumulating the forced draw.
    pub stacking: bool,
}

/// Global constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub hand_size: usize,
    pub rules: RuleSet,
    /// Games still running after this many applied actions are stopped.
    pub max_turns: Option<usize>,
}

impl GameSettings {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::InvalidConfiguration(
                "players must be between 2 and 10",
            ));
        }
        Ok(Self {
            num_players,
            hand_size: HAND_SIZE,
            rules: RuleSet::default(),
            max_turns: None,
        })
    }
}

/// Public portion of a player's state that all opponents may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub hand_size: usize,
    pub is_current: bool,
}

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
    /// Stopped by the configured turn cap without a winner.
    TurnLimit,
}

/// Current phase of the turn state machine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingDeal,
    /// A wild opened the game and the first player has not named its color.
    AwaitingOpeningColor,
    AwaitingAction,
    /// The current player drew this playable card and may play it or pass.
    AwaitingDrawnCard(Card),
    RoundOver,
}

/// Game state snapshot handed to bots. Opponents' hands are reduced to sizes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub phase: TurnPhase,
    pub status: GameStatus,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub top_card: Card,
    pub active_color: Color,
    pub active_rank: Rank,
    pub pending_draw: usize,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
}

impl GameStateView {
    /// Cards in the viewer's hand that can be played on the current active card.
    pub fn playable_cards(&self) -> Vec<Card> {
        self.hand
            .iter()
            .copied()
            .filter(|card| card.matches(self.active_color, self.active_rank))
            .collect()
    }

    /// Hand sizes of everyone but the viewer, in seat order.
    pub fn opponent_hand_sizes(&self) -> Vec<usize> {
        self.players
            .iter()
            .filter(|player| player.id != self.self_player)
            .map(|player| player.hand_size)
            .collect()
    }
}
