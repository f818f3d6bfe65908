use crate::action::Action;
use crate::card::{Card, Color};
use crate::state::GameStateView;

/// Interface for defining custom UNO bots.
///
/// Bots only see what the engine hands them and never mutate game state; the
/// engine validates whatever they return.
pub trait Bot {
    /// Picks one of `legal_actions`.
    fn choose_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action;

    /// Picks the color bound to a wild card. Must not return `Color::Wild`.
    fn choose_color(&mut self, state: &GameStateView, card: Card) -> Color;

    /// Label used in logs and reports.
    fn name(&self) -> &str {
        "bot"
    }
}

impl<B: Bot + ?Sized> Bot for Box<B> {
    fn choose_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        (**self).choose_action(state, legal_actions)
    }

    fn choose_color(&mut self, state: &GameStateView, card: Card) -> Color {
        (**self).choose_color(state, card)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
