use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::bots::most_common_color;
use crate::card::{Card, Color};
use crate::state::GameStateView;

/// Saves wild cards for the late game.
///
/// - With a single card left, play it if it fits.
/// - Prefer a random non-wild play.
/// - Play a wild only while holding more than one playable card, so one is
///   always kept back; otherwise draw.
/// - A drawn card is played unless it is a wild.
pub struct WildLastBot<R: Rng> {
    rng: R,
}

impl<R: Rng> WildLastBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for WildLastBot<R> {
    fn choose_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        let fallback = legal_actions
            .iter()
            .copied()
            .find(|action| matches!(action, Action::Draw | Action::Pass))
            .unwrap_or(Action::Draw);
        let plays: Vec<Action> = legal_actions
            .iter()
            .copied()
            .filter(Action::is_play)
            .collect();
        let Some(first) = plays.first().copied() else {
            return fallback;
        };
        if state.hand.len() == 1 {
            return first;
        }
        let non_wild: Vec<Action> = plays
            .iter()
            .copied()
            .filter(|action| action.card().is_some_and(|card| !card.is_wild()))
            .collect();
        if let Some(play) = non_wild.choose(&mut self.rng) {
            return *play;
        }
        if fallback == Action::Pass {
            return fallback;
        }
        let playable_in_hand = state
            .hand
            .iter()
            .filter(|card| plays.contains(&Action::Play(**card)))
            .count();
        if playable_in_hand > 1 {
            plays.choose(&mut self.rng).copied().unwrap_or(first)
        } else {
            fallback
        }
    }

    fn choose_color(&mut self, state: &GameStateView, _card: Card) -> Color {
        most_common_color(&state.hand)
    }

    fn name(&self) -> &str {
        "wildlast"
    }
}
