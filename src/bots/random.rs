use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::card::{Card, Color};
use crate::state::{GameStateView, TurnPhase};

/// Baseline bot that plays a random playable card and only draws when nothing
/// fits. A freshly drawn card is kept or played with even odds.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn choose_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        if let TurnPhase::AwaitingDrawnCard(_) = state.phase {
            return legal_actions
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(Action::Pass);
        }
        let plays: Vec<Action> = legal_actions
            .iter()
            .copied()
            .filter(Action::is_play)
            .collect();
        if let Some(play) = plays.choose(&mut self.rng) {
            return *play;
        }
        legal_actions
            .iter()
            .copied()
            .find(|action| !action.is_play())
            .unwrap_or(Action::Draw)
    }

    fn choose_color(&mut self, _state: &GameStateView, _card: Card) -> Color {
        Color::SUITS[self.rng.gen_range(0..Color::SUITS.len())]
    }

    fn name(&self) -> &str {
        "random"
    }
}
