//! UNO game engine built for running many bot-versus-bot games quickly.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod score;
pub mod simulation;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, Direction, PlayerId, TurnEvent};
pub use crate::bot::Bot;
pub use crate::bots::registry::{create_bot_from_spec, create_bot_with_seed, label_for_spec, spec_seed};
pub use crate::bots::{HumanBot, RandomBot, WildFirstBot, WildLastBot};
pub use crate::card::{Card, Color, Rank};
pub use crate::deck::Deck;
pub use crate::error::{GameError, IllegalMove};
pub use crate::game::{Game, GameBuilder, GameConfig, GameSummary};
pub use crate::score::{hand_points, winner_points};
pub use crate::simulation::{BatchConfig, BatchReport, LabelStats, run_batch};
pub use crate::state::{GameSettings, GameStateView, GameStatus, PlayerPublicState, RuleSet, TurnPhase};
pub use crate::visualize::{describe_action, describe_event, render_state};
