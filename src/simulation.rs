//! Batch runner: plays many independent games and aggregates results per bot
//! label.
//!
//! Every game gets a fresh `Game` and fresh bots. Deck and bot seeds are
//! derived from the base seed, the game index and the seat, and seating is
//! permuted per game so no label keeps the first-player advantage.

use std::collections::BTreeMap;
use std::error::Error;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::action::Action;
use crate::bot::Bot;
use crate::bots::registry::{create_bot_with_seed, label_for_spec, spec_seed};
use crate::card::{Card, Color, MAX_PLAYERS, MIN_PLAYERS};
use crate::game::Game;
use crate::state::{GameStateView, RuleSet};

/// What to run.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    pub games: usize,
    pub seed: u64,
    /// Bot specs as accepted by
    /// [`create_bot_from_spec`](crate::bots::registry::create_bot_from_spec),
    /// one per seat. A seed written into a spec is mixed with the per-game
    /// seed rather than reused for every game.
    pub bots: Vec<String>,
    pub rules: RuleSet,
    pub max_turns: Option<usize>,
}

/// Aggregated results for one bot label.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LabelStats {
    pub label: String,
    pub seats: usize,
    pub wins: usize,
    pub points: u64,
    pub decisions: usize,
    pub decision_time: Duration,
}

impl LabelStats {
    /// Wins per seat taken.
    pub fn win_rate(&self) -> f64 {
        if self.seats == 0 {
            0.0
        } else {
            self.wins as f64 / self.seats as f64
        }
    }

    pub fn avg_points(&self) -> f64 {
        if self.seats == 0 {
            0.0
        } else {
            self.points as f64 / self.seats as f64
        }
    }

    pub fn avg_decision_ms(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.decision_time.as_secs_f64() * 1.0e3 / self.decisions as f64
        }
    }
}

/// A game that ended with an error instead of a result.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailedGame {
    pub game: usize,
    pub error: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchReport {
    pub games: usize,
    /// Sorted by win rate, best first.
    pub labels: Vec<LabelStats>,
    /// Games stopped by the turn cap.
    pub stalled: usize,
    pub failed: Vec<FailedGame>,
    pub total_turns: usize,
    pub total_reshuffles: usize,
}

impl BatchReport {
    pub fn label(&self, label: &str) -> Option<&LabelStats> {
        self.labels.iter().find(|stats| stats.label == label)
    }
}

/// Wraps a bot and measures the time spent deciding.
struct TimedBot {
    inner: Box<dyn Bot>,
    elapsed: Duration,
    decisions: usize,
}

impl TimedBot {
    fn new(inner: Box<dyn Bot>) -> Self {
        Self {
            inner,
            elapsed: Duration::ZERO,
            decisions: 0,
        }
    }
}

impl Bot for TimedBot {
    fn choose_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        let t0 = Instant::now();
        let action = self.inner.choose_action(state, legal_actions);
        self.elapsed += t0.elapsed();
        self.decisions += 1;
        action
    }

    fn choose_color(&mut self, state: &GameStateView, card: Card) -> Color {
        let t0 = Instant::now();
        let color = self.inner.choose_color(state, card);
        self.elapsed += t0.elapsed();
        color
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Plays `config.games` games and aggregates the outcome per bot label.
///
/// Games that fail (an illegal bot move, an exhausted deck) are recorded in
/// [`BatchReport::failed`] and the batch carries on.
pub fn run_batch(config: &BatchConfig) -> Result<BatchReport, Box<dyn Error>> {
    let players = config.bots.len();
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
        return Err(format!(
            "expected between {MIN_PLAYERS} and {MAX_PLAYERS} players, received {players}"
        )
        .into());
    }
    if config
        .bots
        .iter()
        .any(|spec| label_for_spec(spec) == "human")
    {
        return Err("human players are not supported in batch runs".into());
    }

    let labels_for_spec: Vec<String> = config.bots.iter().map(|s| label_for_spec(s)).collect();
    let mut stats: BTreeMap<String, LabelStats> = BTreeMap::new();
    for label in &labels_for_spec {
        stats.entry(label.clone()).or_insert_with(|| LabelStats {
            label: label.clone(),
            ..LabelStats::default()
        });
    }
    let mut report = BatchReport {
        games: config.games,
        ..BatchReport::default()
    };

    for game_idx in 0..config.games {
        let mut seating: Vec<usize> = (0..players).collect();
        let mut seat_rng = StdRng::seed_from_u64(config.seed ^ 0x9E37_79B9 ^ (game_idx as u64));
        seating.shuffle(&mut seat_rng);

        let deck_seed = mix_seed(config.seed, game_idx as u64, 0x5EED_15);
        let mut builder = Game::builder(players)?
            .with_seed(deck_seed)
            .with_rules(config.rules)
            .with_names(seating.iter().map(|src| config.bots[*src].clone()).collect());
        if let Some(limit) = config.max_turns {
            builder = builder.with_max_turns(limit);
        }
        let mut game = builder.build()?;

        let mut bots = Vec::with_capacity(players);
        let mut labels = Vec::with_capacity(players);
        for (seat, src) in seating.iter().enumerate() {
            let spec = &config.bots[*src];
            let bot_seed = batch_bot_seed(config.seed, game_idx, seat, spec);
            bots.push(TimedBot::new(create_bot_with_seed(spec, seat, bot_seed)?));
            labels.push(labels_for_spec[*src].clone());
        }

        let outcome = game.play_game(&mut bots);
        for (bot, label) in bots.iter().zip(&labels) {
            if let Some(entry) = stats.get_mut(label) {
                entry.seats += 1;
                entry.decisions += bot.decisions;
                entry.decision_time += bot.elapsed;
            }
        }
        match outcome {
            Ok(summary) => {
                debug!(game = game_idx, ?summary, "game finished");
                report.total_turns += summary.turns;
                report.total_reshuffles += summary.reshuffles;
                match summary.winner {
                    Some(winner) => {
                        if let Some(entry) = stats.get_mut(&labels[winner]) {
                            entry.wins += 1;
                            entry.points += summary.winner_points as u64;
                        }
                    }
                    None => report.stalled += 1,
                }
            }
            Err(err) => {
                warn!(game = game_idx, %err, "game failed");
                report.failed.push(FailedGame {
                    game: game_idx,
                    error: err.to_string(),
                });
            }
        }
    }

    let mut labels: Vec<LabelStats> = stats.into_values().collect();
    labels.sort_by(|a, b| {
        b.win_rate()
            .partial_cmp(&a.win_rate())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
    report.labels = labels;
    Ok(report)
}

/// Seed for the bot in `seat` of game `game`. An explicit spec seed still
/// changes the stream, but never makes two games share one.
fn batch_bot_seed(base: u64, game: usize, seat: usize, spec: &str) -> u64 {
    let derived = mix_seed(base, game as u64, seat as u64);
    match spec_seed(spec) {
        Some(explicit) => mix_seed(derived, explicit, 1),
        None => derived,
    }
}

/// Derives an independent seed from a base seed and two indices.
pub fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B97F4A7C15)) ^ (b.wrapping_mul(0xBF58_476D1CE4E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_seed_separates_games_and_seats() {
        let base = 42;
        assert_ne!(mix_seed(base, 0, 0), mix_seed(base, 1, 0));
        assert_ne!(mix_seed(base, 0, 0), mix_seed(base, 0, 1));
        assert_eq!(mix_seed(base, 3, 2), mix_seed(base, 3, 2));
    }

    #[test]
    fn explicit_spec_seed_varies_per_game() {
        let base = 42;
        assert_ne!(
            batch_bot_seed(base, 0, 1, "random:7"),
            batch_bot_seed(base, 1, 1, "random:7")
        );
        assert_ne!(
            batch_bot_seed(base, 0, 1, "random:7"),
            batch_bot_seed(base, 0, 1, "random:8")
        );
        assert_ne!(
            batch_bot_seed(base, 0, 1, "random:7"),
            batch_bot_seed(base, 0, 1, "random")
        );
        assert_eq!(batch_bot_seed(base, 3, 0, "random"), mix_seed(base, 3, 0));
    }

    #[test]
    fn rejects_bad_player_counts_and_humans() {
        let mut config = BatchConfig {
            games: 1,
            seed: 1,
            bots: vec![String::from("random")],
            rules: RuleSet::default(),
            max_turns: None,
        };
        assert!(run_batch(&config).is_err());
        config.bots = vec![String::from("random"), String::from("human")];
        assert!(run_batch(&config).is_err());
    }
}
