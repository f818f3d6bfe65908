use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::bots::most_common_color;
use crate::card::{Card, Color};
use crate::state::GameStateView;

/// Gets rid of wild cards as early as possible.
///
/// - Play a wild whenever one is legal.
/// - Otherwise play a random legal card, drawing only when nothing fits.
/// - Always play a drawn card when allowed to.
/// - Name the color held most often.
pub struct WildFirstBot<R: Rng> {
    rng: R,
}

impl<R: Rng> WildFirstBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for WildFirstBot<R> {
    fn choose_action(&mut self, _state: &GameStateView, legal_actions: &[Action]) -> Action {
        let plays: Vec<Action> = legal_actions
            .iter()
            .copied()
            .filter(Action::is_play)
            .collect();
        if let Some(wild) = plays
            .iter()
            .find(|action| action.card().is_some_and(|card| card.is_wild()))
        {
            return *wild;
        }
        if let Some(play) = plays.choose(&mut self.rng) {
            return *play;
        }
        legal_actions
            .iter()
            .copied()
            .find(|action| matches!(action, Action::Draw | Action::Pass))
            .unwrap_or(Action::Draw)
    }

    fn choose_color(&mut self, state: &GameStateView, _card: Card) -> Color {
        most_common_color(&state.hand)
    }

    fn name(&self) -> &str {
        "wildfirst"
    }
}
